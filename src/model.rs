//! Data model consumed by the layout engine.
//!
//! Only the information the page layout needs is modelled here: textual
//! score metadata for the header, the master bars shared by all tracks,
//! and the per-track data used for stave heights and the tuning diagram.

use serde::{Deserialize, Serialize};

/// A complete musical score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Score {
    /// Title of the piece
    pub title: Option<String>,
    /// Subtitle
    pub subtitle: Option<String>,
    /// Performing artist
    pub artist: Option<String>,
    /// Album the piece appears on
    pub album: Option<String>,
    /// Author of the lyrics
    pub words: Option<String>,
    /// Composer
    pub music: Option<String>,
    /// Measures shared by all tracks, in score order
    pub master_bars: Vec<MasterBar>,
    /// Instruments
    pub tracks: Vec<Track>,
}

/// One measure boundary shared by every track.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MasterBar {
    /// Time signature numerator (e.g. 3 in 3/4)
    pub time_signature_numerator: i32,
    /// Time signature denominator (e.g. 4 in 3/4)
    pub time_signature_denominator: i32,
    /// Number of sharps (positive) or flats (negative)
    pub key_signature: i32,
    /// Whether a repeat sign opens this bar
    pub is_repeat_start: bool,
}

/// A single instrument of the score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Track {
    pub name: String,
    /// String pitches as MIDI note numbers, highest string first.
    /// Empty for instruments without strings.
    pub tuning: Vec<i32>,
    pub is_percussion: bool,
}

impl Score {
    /// Create a new empty score.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of master bars in the score.
    pub fn bar_count(&self) -> usize {
        self.master_bars.len()
    }

    /// Read `title` treating an empty string as absent. Same for the
    /// other metadata accessors below.
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn subtitle(&self) -> Option<&str> {
        non_empty(&self.subtitle)
    }

    pub fn artist(&self) -> Option<&str> {
        non_empty(&self.artist)
    }

    pub fn album(&self) -> Option<&str> {
        non_empty(&self.album)
    }

    pub fn words(&self) -> Option<&str> {
        non_empty(&self.words)
    }

    pub fn music(&self) -> Option<&str> {
        non_empty(&self.music)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl MasterBar {
    /// A 4/4 bar in C major.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_signature(numerator: i32, denominator: i32) -> Self {
        Self {
            time_signature_numerator: numerator,
            time_signature_denominator: denominator,
            ..Self::default()
        }
    }

    /// Bar length in quarter notes. Malformed signatures fall back to 4/4.
    pub fn quarter_beats(&self) -> f64 {
        if self.time_signature_numerator <= 0 || self.time_signature_denominator <= 0 {
            return 4.0;
        }
        self.time_signature_numerator as f64 * 4.0 / self.time_signature_denominator as f64
    }

    /// Whether this bar shows a different time signature than `previous`.
    pub fn time_signature_differs(&self, previous: &MasterBar) -> bool {
        self.time_signature_numerator != previous.time_signature_numerator
            || self.time_signature_denominator != previous.time_signature_denominator
    }
}

impl Default for MasterBar {
    fn default() -> Self {
        Self {
            time_signature_numerator: 4,
            time_signature_denominator: 4,
            key_signature: 0,
            is_repeat_start: false,
        }
    }
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_tuning(mut self, tuning: &[i32]) -> Self {
        self.tuning = tuning.to_vec();
        self
    }

    pub fn percussion(mut self) -> Self {
        self.is_percussion = true;
        self
    }

    /// Whether the track is drawn with an additional tablature stave.
    pub fn is_stringed(&self) -> bool {
        !self.is_percussion && !self.tuning.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_metadata_is_absent() {
        let score = Score {
            title: Some(String::new()),
            artist: Some("Band".into()),
            ..Score::default()
        };
        assert_eq!(score.title(), None);
        assert_eq!(score.subtitle(), None);
        assert_eq!(score.artist(), Some("Band"));
    }

    #[test]
    fn quarter_beats_from_time_signature() {
        assert_eq!(MasterBar::with_time_signature(3, 4).quarter_beats(), 3.0);
        assert_eq!(MasterBar::with_time_signature(6, 8).quarter_beats(), 3.0);
        assert_eq!(MasterBar::with_time_signature(0, 4).quarter_beats(), 4.0);
    }

    #[test]
    fn score_deserializes_with_defaults() {
        let score: Score = serde_json::from_str(
            r#"{ "title": "Song", "masterBars": [{}, { "timeSignatureNumerator": 3 }],
                 "tracks": [{ "name": "Guitar", "tuning": [64, 59, 55, 50, 45, 40] }] }"#,
        )
        .unwrap();
        assert_eq!(score.bar_count(), 2);
        assert_eq!(score.master_bars[0].time_signature_numerator, 4);
        assert_eq!(score.master_bars[1].time_signature_numerator, 3);
        assert!(score.tracks[0].is_stringed());
    }
}
