//! Page view layout: arranges the bars into lines of a fixed-width page
//! of dynamic height.
//!
//! Bars are packed greedily into stave groups: a line takes bars until the
//! next one would not fit (or `barsPerRow` is reached), then the line is
//! justified to the usable width and the next line starts below it.

use std::ops::RangeInclusive;

use log::{debug, trace};

use crate::settings::options;

use super::boundings::BoundingsLookup;
use super::canvas::{Canvas, TextAlign};
use super::header::ScoreInfo;
use super::stave_group::StaveGroup;
use super::ScoreRenderer;

/// Layout options resolved once per layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PageOptions {
    start: i64,
    count: i64,
    auto_size: bool,
    /// `None` when lines are only broken by width
    bars_per_row: Option<usize>,
}

impl PageOptions {
    fn from_renderer(renderer: &ScoreRenderer<'_>) -> Self {
        let layout = &renderer.settings.layout;
        let bars_per_row: i64 = layout.get(options::BARS_PER_ROW, -1);
        Self {
            start: layout.get(options::START, 1),
            count: layout.get(options::COUNT, -1),
            auto_size: layout.get(options::AUTO_SIZE, true),
            bars_per_row: usize::try_from(bars_per_row).ok().filter(|&n| n > 0),
        }
    }
}

/// Inclusive range of bar indices to lay out, or `None` for an empty score.
///
/// `start` is 1-based; a negative `count` means every bar from `start`.
pub fn resolve_bar_range(start: i64, count: i64, bar_count: usize) -> Option<RangeInclusive<usize>> {
    if bar_count == 0 {
        return None;
    }
    let last = bar_count as i64 - 1;
    let start_index = start.saturating_sub(1).clamp(0, last);
    let count = if count < 0 { bar_count as i64 } else { count };
    let end_index = (start_index.saturating_add(count) - 1).clamp(start_index, last);
    Some(start_index as usize..=end_index as usize)
}

#[derive(Debug, Default)]
pub struct PageViewLayout {
    pub width: f64,
    pub height: f64,
    groups: Vec<StaveGroup>,
    /// Page width chosen before packing; the usable line width derives from it.
    sheet_width: f64,
}

impl PageViewLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[StaveGroup] {
        &self.groups
    }

    /// Width available to the bars of one line.
    pub fn max_width(&self, renderer: &ScoreRenderer<'_>) -> f64 {
        self.sheet_width - renderer.constants.padding_left - renderer.constants.padding_right
    }

    pub fn do_layout(&mut self, renderer: &ScoreRenderer<'_>) {
        self.groups = Vec::new();

        let opts = PageOptions::from_renderer(renderer);
        let scale = renderer.scale();
        let constants = &renderer.constants;

        let range = resolve_bar_range(opts.start, opts.count, renderer.score.bar_count());
        debug!("page layout: bars {:?}, {} track(s)", range, renderer.tracks.len());

        self.sheet_width = if opts.auto_size || renderer.settings.width <= 0.0 {
            constants.reference_width * scale
        } else {
            renderer.settings.width
        };
        self.width = self.sheet_width;

        let header_height = ScoreInfo::from_renderer(renderer).measure();
        let x = constants.padding_left;
        let mut y = constants.padding_top + header_height;
        debug!("page width {:.1}, header height {:.1}", self.width, header_height);

        if let Some(range) = range {
            if !renderer.tracks.is_empty() {
                let end_index = *range.end();
                let mut current = *range.start();
                while current <= end_index {
                    let mut group = self.create_stave_group(renderer, &opts, current, end_index);
                    group.x = x;
                    group.y = y;

                    self.fit_group(renderer, &mut group);

                    y += group.height() + constants.group_spacing * scale;
                    debug!(
                        "stave group {}: bars {:?}..={:?}, width {:.1}, full {}",
                        group.index,
                        group.first_bar_index(),
                        group.last_bar_index(),
                        group.width(),
                        group.is_full
                    );

                    let Some(last) = group.last_bar_index() else {
                        break;
                    };
                    current = last + 1;
                    self.groups.push(group);
                }
            }
        }

        self.height = y + constants.padding_bottom;
        debug!(
            "page layout done: {} group(s), {:.1} x {:.1}",
            self.groups.len(),
            self.width,
            self.height
        );
    }

    /// Pack bars `current..=end_index` into a new group until it is full.
    fn create_stave_group(
        &self,
        renderer: &ScoreRenderer<'_>,
        opts: &PageOptions,
        current: usize,
        end_index: usize,
    ) -> StaveGroup {
        let mut group = StaveGroup::new();
        group.index = self.groups.len();
        let max_width = self.max_width(renderer);

        for i in current..=end_index {
            let candidate = StaveGroup::candidate(renderer, i);

            match opts.bars_per_row {
                Some(limit) => {
                    if group.bar_count() + 1 > limit {
                        trace!("group {}: bar {i} exceeds {limit} bars per row", group.index);
                        group.is_full = true;
                        return group;
                    }
                }
                None => {
                    let width = group.width_with(&candidate);
                    if width >= max_width {
                        if group.is_empty() {
                            // a bar wider than the line stands alone
                            trace!("group {}: bar {i} alone is {width:.1} wide", group.index);
                            group.commit(candidate);
                            return group;
                        }
                        trace!("group {}: bar {i} overflows at {width:.1}", group.index);
                        group.is_full = true;
                        return group;
                    }
                }
            }

            group.commit(candidate);
        }

        group
    }

    /// Spread the free space of the line evenly over its bars.
    fn fit_group(&mut self, renderer: &ScoreRenderer<'_>, group: &mut StaveGroup) {
        let free_space = self.max_width(renderer) - group.width();
        let bar_count = group.bar_count();

        let mut bar_space = 0.0;
        if free_space != 0.0 && bar_count > 0 {
            bar_space = free_space / bar_count as f64;
        }

        // overflowing lines are compressed even when not full, but a lone
        // bar is never squeezed below its natural width
        let apply = if bar_space < 0.0 { bar_count > 1 } else { group.is_full };
        if apply {
            group.apply_bar_spacing(bar_space);
        }

        self.width = self.width.max(group.width());
    }

    /// Paint the header and every stave group.
    pub fn paint_score(&self, renderer: &ScoreRenderer<'_>, canvas: &mut dyn Canvas) {
        let y = renderer.constants.padding_top;
        ScoreInfo::from_renderer(renderer).paint(y, self.width, canvas);

        canvas.set_color(renderer.resources.main_glyph_color);
        canvas.set_text_align(TextAlign::Left);
        for group in &self.groups {
            group.paint(0.0, 0.0, renderer, canvas);
        }
    }

    pub fn build_boundings_lookup(&self, lookup: &mut BoundingsLookup) {
        for group in &self.groups {
            group.build_boundings_lookup(lookup);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_defaults_to_all_bars() {
        assert_eq!(resolve_bar_range(1, -1, 10), Some(0..=9));
    }

    #[test]
    fn range_clamps_start_and_count() {
        assert_eq!(resolve_bar_range(0, -1, 10), Some(0..=9));
        assert_eq!(resolve_bar_range(-5, 3, 10), Some(0..=2));
        assert_eq!(resolve_bar_range(4, 3, 10), Some(3..=5));
        assert_eq!(resolve_bar_range(8, 100, 10), Some(7..=9));
        assert_eq!(resolve_bar_range(50, 2, 10), Some(9..=9));
    }

    #[test]
    fn zero_count_keeps_one_bar() {
        assert_eq!(resolve_bar_range(3, 0, 10), Some(2..=2));
    }

    #[test]
    fn empty_score_has_no_range() {
        assert_eq!(resolve_bar_range(1, -1, 0), None);
    }

    #[test]
    fn range_is_always_valid() {
        for bar_count in 1..6usize {
            for start in 0..10i64 {
                for count in 0..10i64 {
                    let range = resolve_bar_range(start, count, bar_count).unwrap();
                    assert!(range.start() <= range.end());
                    assert!(*range.end() < bar_count);
                }
            }
        }
    }

    #[test]
    fn any_negative_count_takes_the_rest() {
        assert_eq!(resolve_bar_range(3, -5, 10), Some(2..=9));
        assert_eq!(resolve_bar_range(1, i64::MIN, 10), Some(0..=9));
        for count in -20..0i64 {
            assert_eq!(resolve_bar_range(4, count, 6), Some(3..=5));
        }
    }
}
