//! Score info header: title, credits and tuning diagram above the first
//! stave group.
//!
//! The header is described once as a list of rows. Layout sums the row
//! heights, painting walks the same rows, so both passes always agree on
//! which rows exist and how tall they are.

use bitflags::bitflags;

use crate::model::{Score, Track};
use crate::settings::options;
use crate::tuning::{find_tuning, text_for_tuning};

use super::canvas::{Canvas, TextAlign};
use super::constants::{Font, LayoutConstants, RenderingResources};
use super::ScoreRenderer;

bitflags! {
    /// Header elements that may be shown.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HeaderFooterElements: u32 {
        const TITLE = 0x0001;
        const SUB_TITLE = 0x0002;
        const ARTIST = 0x0004;
        const ALBUM = 0x0008;
        const WORDS = 0x0010;
        const MUSIC = 0x0020;
        const WORDS_AND_MUSIC = 0x0040;
        const TUNING = 0x0080;
        const ALL = Self::TITLE.bits()
            | Self::SUB_TITLE.bits()
            | Self::ARTIST.bits()
            | Self::ALBUM.bits()
            | Self::WORDS.bits()
            | Self::MUSIC.bits()
            | Self::WORDS_AND_MUSIC.bits()
            | Self::TUNING.bits();
    }
}

/// Horizontal anchor of a header text, resolved against the final page
/// width at paint time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderX {
    Center,
    /// Offset from the left padding
    Left(f64),
    /// Right padding edge
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderText {
    pub text: String,
    pub font: Font,
    pub x: HeaderX,
    /// Offset from the top of the row
    pub dy: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderRow {
    pub height: f64,
    pub texts: Vec<HeaderText>,
}

#[derive(Debug, Clone)]
pub struct ScoreInfo {
    pub rows: Vec<HeaderRow>,
    /// False when every element is hidden; the header then takes no space.
    pub enabled: bool,
    gap_measure: f64,
    gap_paint: f64,
    padding_left: f64,
    padding_right: f64,
    color: &'static str,
}

impl ScoreInfo {
    pub fn from_renderer(renderer: &ScoreRenderer<'_>) -> Self {
        let flags = if renderer.settings.layout.get(options::HIDE_INFO, false) {
            HeaderFooterElements::empty()
        } else {
            HeaderFooterElements::ALL
        };
        Self::build(
            renderer.score,
            &renderer.tracks,
            flags,
            renderer.scale(),
            &renderer.constants,
            &renderer.resources,
        )
    }

    pub fn build(
        score: &Score,
        tracks: &[&Track],
        flags: HeaderFooterElements,
        scale: f64,
        constants: &LayoutConstants,
        res: &RenderingResources,
    ) -> Self {
        let mut info = Self {
            rows: Vec::new(),
            enabled: !flags.is_empty(),
            gap_measure: constants.header_gap_measure * scale,
            gap_paint: constants.header_gap_paint * scale,
            padding_left: constants.padding_left,
            padding_right: constants.padding_right,
            color: res.score_info_color,
        };
        if !info.enabled {
            return info;
        }

        let info_row = constants.info_row_height * scale;
        let centered = |text: String, font: &Font| HeaderText {
            text,
            font: font.clone(),
            x: HeaderX::Center,
            dy: 0.0,
        };

        if let (Some(title), true) = (score.title(), flags.contains(HeaderFooterElements::TITLE)) {
            info.push(constants.title_height * scale, vec![centered(title.to_string(), &res.title_font)]);
        }
        let sub_rows = [
            (score.subtitle(), HeaderFooterElements::SUB_TITLE),
            (score.artist(), HeaderFooterElements::ARTIST),
            (score.album(), HeaderFooterElements::ALBUM),
        ];
        for (value, flag) in sub_rows {
            if let (Some(text), true) = (value, flags.contains(flag)) {
                info.push(info_row, vec![centered(text.to_string(), &res.sub_title_font)]);
            }
        }

        match (score.words(), score.music()) {
            (Some(words), Some(music))
                if words == music && flags.contains(HeaderFooterElements::WORDS_AND_MUSIC) =>
            {
                info.push(info_row, vec![centered(format!("Music and Words by {words}"), &res.words_font)]);
            }
            (words, music) => {
                let mut texts = Vec::new();
                if let (Some(music), true) = (music, flags.contains(HeaderFooterElements::MUSIC)) {
                    texts.push(HeaderText {
                        text: format!("Music by {music}"),
                        font: res.words_font.clone(),
                        x: HeaderX::Right,
                        dy: 0.0,
                    });
                }
                if let (Some(words), true) = (words, flags.contains(HeaderFooterElements::WORDS)) {
                    texts.push(HeaderText {
                        text: format!("Words by {words}"),
                        font: res.words_font.clone(),
                        x: HeaderX::Left(0.0),
                        dy: 0.0,
                    });
                }
                if !texts.is_empty() {
                    info.push(info_row, texts);
                }
            }
        }

        info.push(constants.info_gap * scale, Vec::new());

        if let [track] = tracks {
            if !track.is_percussion && flags.contains(HeaderFooterElements::TUNING) {
                info.push_tuning(track, scale, constants, res);
            }
        }

        info
    }

    fn push(&mut self, height: f64, texts: Vec<HeaderText>) {
        self.rows.push(HeaderRow { height, texts });
    }

    fn push_tuning(&mut self, track: &Track, scale: f64, constants: &LayoutConstants, res: &RenderingResources) {
        let Some(tuning) = find_tuning(&track.tuning) else {
            return;
        };
        let row = constants.tuning_row_height * scale;

        self.push(
            row,
            vec![HeaderText {
                text: tuning.name.to_string(),
                font: res.effect_font.clone(),
                x: HeaderX::Left(0.0),
                dy: 0.0,
            }],
        );

        if !tuning.is_standard {
            let per_column = track.tuning.len().div_ceil(2);
            let texts = track
                .tuning
                .iter()
                .enumerate()
                .map(|(i, &pitch)| {
                    let column = i / per_column;
                    HeaderText {
                        text: format!("({}) = {}", i + 1, text_for_tuning(pitch, false)),
                        font: res.effect_font.clone(),
                        x: HeaderX::Left(column as f64 * constants.tuning_column_offset * scale),
                        dy: (i % per_column) as f64 * row,
                    }
                })
                .collect();
            self.push(per_column as f64 * row, texts);
        }

        self.push(row, Vec::new());
    }

    /// Vertical space the header consumes during layout.
    pub fn measure(&self) -> f64 {
        if !self.enabled {
            return 0.0;
        }
        self.rows.iter().map(|r| r.height).sum::<f64>() + self.gap_measure
    }

    /// Paint the rows starting at `y` on a page `page_width` wide. Returns the
    /// y below the header.
    pub fn paint(&self, y: f64, page_width: f64, canvas: &mut dyn Canvas) -> f64 {
        if !self.enabled {
            return y;
        }
        canvas.set_color(self.color);
        let mut y = y;
        for row in &self.rows {
            for text in &row.texts {
                let (x, align) = match text.x {
                    HeaderX::Center => (page_width / 2.0, TextAlign::Center),
                    HeaderX::Left(offset) => (self.padding_left + offset, TextAlign::Left),
                    HeaderX::Right => (page_width - self.padding_right, TextAlign::Right),
                };
                canvas.set_font(&text.font);
                canvas.set_text_align(align);
                canvas.fill_text(&text.text, x, y + text.dy);
            }
            y += row.height;
        }
        y + self.gap_paint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        align: TextAlign,
        texts: Vec<(String, f64, f64, TextAlign)>,
    }

    impl Canvas for Recorder {
        fn set_color(&mut self, _color: &str) {}
        fn set_font(&mut self, _font: &Font) {}
        fn set_text_align(&mut self, align: TextAlign) {
            self.align = align;
        }
        fn fill_text(&mut self, text: &str, x: f64, y: f64) {
            self.texts.push((text.to_string(), x, y, self.align));
        }
        fn line(&mut self, _x1: f64, _y1: f64, _x2: f64, _y2: f64, _width: f64) {}
    }

    fn full_score() -> Score {
        Score {
            title: Some("Title".into()),
            subtitle: Some("Sub".into()),
            artist: Some("Artist".into()),
            album: Some("Album".into()),
            words: Some("Someone".into()),
            music: Some("Someone".into()),
            ..Score::default()
        }
    }

    fn build(score: &Score, tracks: &[&Track], flags: HeaderFooterElements, scale: f64) -> ScoreInfo {
        ScoreInfo::build(
            score,
            tracks,
            flags,
            scale,
            &LayoutConstants::default(),
            &RenderingResources::default(),
        )
    }

    #[test]
    fn hidden_header_takes_no_space_and_paints_nothing() {
        let score = full_score();
        let info = build(&score, &[], HeaderFooterElements::empty(), 1.0);
        assert_eq!(info.measure(), 0.0);

        let mut canvas = Recorder::default();
        assert_eq!(info.paint(40.0, 950.0, &mut canvas), 40.0);
        assert!(canvas.texts.is_empty());
    }

    #[test]
    fn measures_all_rows() {
        let score = full_score();
        let info = build(&score, &[], HeaderFooterElements::ALL, 1.0);
        // title 35 + 3 × 20 + combined credits 20 + gap 20 + closing 40
        assert_eq!(info.measure(), 175.0);

        let info = build(&score, &[], HeaderFooterElements::ALL, 2.0);
        assert_eq!(info.measure(), 350.0);
    }

    #[test]
    fn empty_score_measures_fixed_gaps() {
        let info = build(&Score::default(), &[], HeaderFooterElements::ALL, 1.0);
        assert_eq!(info.measure(), 60.0);
    }

    #[test]
    fn combined_credits_when_words_equal_music() {
        let score = full_score();
        let info = build(&score, &[], HeaderFooterElements::ALL, 1.0);
        let mut canvas = Recorder::default();
        info.paint(0.0, 1000.0, &mut canvas);
        let credit = canvas.texts.iter().find(|t| t.0.contains(" by ")).unwrap();
        assert_eq!(credit.0, "Music and Words by Someone");
        assert_eq!(credit.1, 500.0);
        assert_eq!(credit.3, TextAlign::Center);
    }

    #[test]
    fn separate_credits_share_one_row() {
        let score = Score {
            words: Some("Lyricist".into()),
            music: Some("Composer".into()),
            ..Score::default()
        };
        let info = build(&score, &[], HeaderFooterElements::ALL, 1.0);
        // credits 20 + gap 20 + closing 40
        assert_eq!(info.measure(), 80.0);

        let mut canvas = Recorder::default();
        info.paint(0.0, 1000.0, &mut canvas);
        assert_eq!(
            canvas.texts,
            vec![
                ("Music by Composer".to_string(), 960.0, 0.0, TextAlign::Right),
                ("Words by Lyricist".to_string(), 40.0, 0.0, TextAlign::Left),
            ]
        );
    }

    #[test]
    fn standard_tuning_shows_name_only() {
        let guitar = Track::new("Guitar").with_tuning(&[64, 59, 55, 50, 45, 40]);
        let info = build(&Score::default(), &[&guitar], HeaderFooterElements::ALL, 1.0);
        // gap 20 + name 15 + closing tuning row 15 + closing 40
        assert_eq!(info.measure(), 90.0);
    }

    #[test]
    fn non_standard_tuning_lists_strings_in_two_columns() {
        let guitar = Track::new("Guitar").with_tuning(&[64, 59, 55, 50, 45, 38]);
        let info = build(&Score::default(), &[&guitar], HeaderFooterElements::ALL, 1.0);
        // gap 20 + name 15 + 3 string rows × 15 + closing tuning row 15 + closing 40
        assert_eq!(info.measure(), 135.0);

        let mut canvas = Recorder::default();
        let end = info.paint(0.0, 950.0, &mut canvas);
        // painting closes with the shorter gap
        assert_eq!(end, 120.0);

        let strings: Vec<_> = canvas.texts.iter().filter(|t| t.0.starts_with('(')).collect();
        assert_eq!(strings.len(), 6);
        assert_eq!((strings[0].0.as_str(), strings[0].1, strings[0].2), ("(1) = E", 40.0, 35.0));
        assert_eq!((strings[2].1, strings[2].2), (40.0, 65.0));
        assert_eq!((strings[3].0.as_str(), strings[3].1, strings[3].2), ("(4) = D", 83.0, 35.0));
        assert_eq!((strings[5].0.as_str(), strings[5].2), ("(6) = D", 65.0));
    }

    #[test]
    fn tuning_skipped_for_percussion_unknown_or_multiple_tracks() {
        let drums = Track::new("Drums").with_tuning(&[64, 59, 55, 50, 45, 38]).percussion();
        let odd = Track::new("Odd").with_tuning(&[1, 2, 3]);
        let guitar = Track::new("Guitar").with_tuning(&[64, 59, 55, 50, 45, 40]);
        let base = build(&Score::default(), &[], HeaderFooterElements::ALL, 1.0).measure();

        for tracks in [vec![&drums], vec![&odd], vec![&guitar, &guitar]] {
            let info = build(&Score::default(), &tracks, HeaderFooterElements::ALL, 1.0);
            assert_eq!(info.measure(), base);
        }
    }

    #[test]
    fn measure_and_paint_walk_the_same_rows() {
        let score = full_score();
        let guitar = Track::new("Guitar").with_tuning(&[62, 57, 55, 50, 45, 38]);
        let info = build(&score, &[&guitar], HeaderFooterElements::ALL, 1.5);
        let mut canvas = Recorder::default();
        let painted = info.paint(0.0, 950.0, &mut canvas);
        let constants = LayoutConstants::default();
        let gap_difference = (constants.header_gap_measure - constants.header_gap_paint) * 1.5;
        assert_eq!(info.measure() - painted, gap_difference);
    }
}
