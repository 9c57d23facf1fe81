//! Bar measurement: how wide and tall one bar of one track wants to be.
//!
//! The page layout treats bars as opaque boxes; anything that knows how to
//! size a bar (a full glyph engine, or a fixed size in tests) can plug in
//! through [`BarMetrics`].

use crate::model::{MasterBar, Score, Track};

use super::constants::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarSize {
    pub width: f64,
    pub height: f64,
}

pub trait BarMetrics {
    /// Natural size of bar `bar_index` of `track` at the given scale.
    fn measure_bar(&self, score: &Score, track: &Track, bar_index: usize, scale: f64) -> BarSize;
}

/// Sizes bars from their time signature and the signatures/repeats shown at
/// their start. Heights depend on the track: a standard stave, plus a
/// tablature stave for stringed instruments.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBarMetrics;

impl BarMetrics for DefaultBarMetrics {
    fn measure_bar(&self, score: &Score, track: &Track, bar_index: usize, scale: f64) -> BarSize {
        let width = match score.master_bars.get(bar_index) {
            Some(bar) => {
                let previous = bar_index.checked_sub(1).and_then(|i| score.master_bars.get(i));
                bar_width(bar, previous)
            }
            None => MIN_BAR_WIDTH,
        };
        BarSize {
            width: width * scale,
            height: stave_height(track) * scale,
        }
    }
}

fn bar_width(bar: &MasterBar, previous: Option<&MasterBar>) -> f64 {
    let mut w = (bar.quarter_beats() * PER_BEAT_MIN_WIDTH).max(MIN_BAR_WIDTH);

    let (shows_time, key_change) = match previous {
        None => (true, bar.key_signature != 0),
        Some(prev) => (
            bar.time_signature_differs(prev),
            bar.key_signature != prev.key_signature,
        ),
    };
    if shows_time {
        w += TIME_SIG_SPACE;
    }
    if key_change {
        let previous_accidentals = previous.map_or(0, |p| p.key_signature.unsigned_abs());
        // naturals cancelling the old key plus the new accidentals
        let shown = bar.key_signature.unsigned_abs().max(previous_accidentals);
        w += shown as f64 * KEY_SIG_ACCIDENTAL_SPACE;
    }
    if bar.is_repeat_start {
        w += REPEAT_START_SPACE;
    }
    w
}

/// Unscaled height one track occupies in a stave group.
pub(super) fn stave_height(track: &Track) -> f64 {
    let mut h = STAFF_HEIGHT + 2.0 * STAVE_PADDING;
    if let Some(tab) = tab_height(track) {
        h += TAB_STAVE_GAP + tab;
    }
    h
}

/// Height between the first and last tablature line, if the track has one.
pub(super) fn tab_height(track: &Track) -> Option<f64> {
    if !track.is_stringed() {
        return None;
    }
    Some((track.tuning.len().saturating_sub(1)) as f64 * TAB_LINE_SPACING)
}
