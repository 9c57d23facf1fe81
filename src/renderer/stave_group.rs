//! Stave group: one visual line holding consecutive bars of every
//! selected track, stacked vertically.

use super::boundings::{BarBounds, BoundingsLookup, Bounds, StaveGroupBounds};
use super::canvas::{Canvas, TextAlign};
use super::constants::*;
use super::metrics::tab_height;
use super::ScoreRenderer;

/// One bar as placed in a group.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSlot {
    /// Index into `Score::master_bars`
    pub bar_index: usize,
    /// Widest natural width over all tracks
    pub natural_width: f64,
    /// Extra space added by justification (negative when compressed)
    pub spacing: f64,
    /// Natural height per selected track
    pub heights: Vec<f64>,
}

impl BarSlot {
    pub fn width(&self) -> f64 {
        self.natural_width + self.spacing
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaveGroup {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub is_full: bool,
    bars: Vec<BarSlot>,
    width: f64,
    height: f64,
}

impl StaveGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure `bar_index` across all selected tracks without adding it.
    pub fn candidate(renderer: &ScoreRenderer<'_>, bar_index: usize) -> BarSlot {
        let scale = renderer.scale();
        let mut natural_width: f64 = 0.0;
        let heights = renderer
            .tracks
            .iter()
            .map(|track| {
                let size = renderer.metrics.measure_bar(renderer.score, track, bar_index, scale);
                natural_width = natural_width.max(size.width);
                size.height
            })
            .collect();
        BarSlot {
            bar_index,
            natural_width,
            spacing: 0.0,
            heights,
        }
    }

    /// Width the group would have with `candidate` appended.
    pub fn width_with(&self, candidate: &BarSlot) -> f64 {
        self.width + candidate.width()
    }

    /// Append a measured bar.
    pub fn commit(&mut self, slot: BarSlot) {
        self.bars.push(slot);
        self.update_sizes();
    }

    /// Measure and append `bar_index` across all selected tracks.
    pub fn add_bars(&mut self, renderer: &ScoreRenderer<'_>, bar_index: usize) {
        let slot = Self::candidate(renderer, bar_index);
        self.commit(slot);
    }

    /// Remove the most recently added bar, restoring the previous sizes.
    pub fn revert_last_bar(&mut self) -> Option<BarSlot> {
        let slot = self.bars.pop()?;
        self.update_sizes();
        Some(slot)
    }

    /// Distribute `space` to every bar of the group (may be negative).
    pub fn apply_bar_spacing(&mut self, space: f64) {
        for slot in &mut self.bars {
            slot.spacing += space;
        }
        self.update_sizes();
    }

    fn update_sizes(&mut self) {
        self.width = self.bars.iter().map(BarSlot::width).sum();
        let stave_count = self.bars.iter().map(|b| b.heights.len()).max().unwrap_or(0);
        self.height = (0..stave_count).map(|t| self.stave_height(t)).sum();
    }

    /// Height of the stave of the `track`-th selected track: the tallest
    /// bar of that track in this group.
    fn stave_height(&self, track: usize) -> f64 {
        self.bars
            .iter()
            .filter_map(|b| b.heights.get(track).copied())
            .fold(0.0, f64::max)
    }

    pub fn bars(&self) -> &[BarSlot] {
        &self.bars
    }

    pub fn bar_count(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn first_bar_index(&self) -> Option<usize> {
        self.bars.first().map(|b| b.bar_index)
    }

    pub fn last_bar_index(&self) -> Option<usize> {
        self.bars.last().map(|b| b.bar_index)
    }

    /// Left edge and width of each bar, in page coordinates.
    pub fn bar_positions(&self) -> impl Iterator<Item = (usize, f64, f64)> + '_ {
        let mut x = self.x;
        self.bars.iter().map(move |slot| {
            let bar_x = x;
            x += slot.width();
            (slot.bar_index, bar_x, slot.width())
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Painting
    // ═══════════════════════════════════════════════════════════════════

    /// Paint staff lines, bar separators and the line's first bar number,
    /// offset by `(cx, cy)`.
    pub fn paint(&self, cx: f64, cy: f64, renderer: &ScoreRenderer<'_>, canvas: &mut dyn Canvas) {
        if self.bars.is_empty() {
            return;
        }
        let scale = renderer.scale();
        let res = &renderer.resources;
        let left = cx + self.x;
        let right = left + self.width;

        let mut stave_top = cy + self.y;
        for (t, track) in renderer.tracks.iter().enumerate() {
            let top = stave_top + STAVE_PADDING * scale;
            let mut line_groups = vec![(top, 5, STAFF_LINE_SPACING * scale)];
            if let Some(tab) = tab_height(track) {
                let tab_top = top + (STAFF_HEIGHT + TAB_STAVE_GAP) * scale;
                let spacing = if track.tuning.len() > 1 {
                    tab * scale / (track.tuning.len() - 1) as f64
                } else {
                    0.0
                };
                line_groups.push((tab_top, track.tuning.len(), spacing));
            }

            for &(line_top, lines, spacing) in &line_groups {
                let bottom = line_top + (lines.saturating_sub(1)) as f64 * spacing;

                canvas.set_color(res.staff_line_color);
                for i in 0..lines {
                    let ly = line_top + i as f64 * spacing;
                    canvas.line(left, ly, right, ly, STAFF_LINE_WIDTH * scale);
                }

                canvas.set_color(res.bar_separator_color);
                canvas.line(left, line_top, left, bottom, BARLINE_WIDTH * scale);
                for (_, bar_x, bar_w) in self.bar_positions() {
                    let bx = cx + bar_x + bar_w;
                    canvas.line(bx, line_top, bx, bottom, BARLINE_WIDTH * scale);
                }
            }

            if t == 0 {
                if let Some(first) = self.first_bar_index() {
                    canvas.set_color(res.bar_number_color);
                    canvas.set_font(&res.bar_number_font);
                    canvas.set_text_align(TextAlign::Left);
                    let number_y = top - res.bar_number_font.size - 2.0 * scale;
                    canvas.fill_text(&(first + 1).to_string(), left, number_y);
                }
            }

            stave_top += self.stave_height(t);
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Bounding boxes
    // ═══════════════════════════════════════════════════════════════════

    pub fn build_boundings_lookup(&self, lookup: &mut BoundingsLookup) {
        let bars = self
            .bar_positions()
            .map(|(bar_index, x, w)| BarBounds {
                bar_index,
                visual_bounds: Bounds { x, y: self.y, w, h: self.height },
            })
            .collect();
        lookup.add_stave_group(StaveGroupBounds {
            index: self.index,
            visual_bounds: Bounds {
                x: self.x,
                y: self.y,
                w: self.width,
                h: self.height,
            },
            bars,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MasterBar, Score, Track};
    use crate::settings::Settings;

    fn slot(bar_index: usize, width: f64, heights: &[f64]) -> BarSlot {
        BarSlot {
            bar_index,
            natural_width: width,
            spacing: 0.0,
            heights: heights.to_vec(),
        }
    }

    #[test]
    fn commit_and_revert_track_sizes() {
        let mut group = StaveGroup::new();
        group.commit(slot(0, 50.0, &[80.0, 100.0]));
        group.commit(slot(1, 70.0, &[90.0, 100.0]));
        assert_eq!(group.width(), 120.0);
        assert_eq!(group.height(), 190.0);
        assert_eq!(group.last_bar_index(), Some(1));

        let reverted = group.revert_last_bar().unwrap();
        assert_eq!(reverted.bar_index, 1);
        assert_eq!(group.width(), 50.0);
        assert_eq!(group.height(), 180.0);
        assert_eq!(group.last_bar_index(), Some(0));
    }

    #[test]
    fn revert_on_empty_group_is_noop() {
        let mut group = StaveGroup::new();
        assert!(group.revert_last_bar().is_none());
        assert_eq!(group.width(), 0.0);
        assert!(group.is_empty());
    }

    #[test]
    fn width_with_does_not_mutate() {
        let mut group = StaveGroup::new();
        group.commit(slot(0, 50.0, &[80.0]));
        let next = slot(1, 30.0, &[80.0]);
        assert_eq!(group.width_with(&next), 80.0);
        assert_eq!(group.width(), 50.0);
        assert_eq!(group.bar_count(), 1);
    }

    #[test]
    fn bar_spacing_applies_to_every_bar() {
        let mut group = StaveGroup::new();
        group.commit(slot(0, 50.0, &[80.0]));
        group.commit(slot(1, 50.0, &[80.0]));
        group.apply_bar_spacing(10.0);
        assert_eq!(group.width(), 120.0);
        assert!(group.bars().iter().all(|b| b.width() == 60.0));

        group.apply_bar_spacing(-25.0);
        assert_eq!(group.width(), 70.0);
    }

    #[test]
    fn boundings_follow_bar_positions() {
        let mut group = StaveGroup::new();
        group.x = 40.0;
        group.y = 100.0;
        group.index = 3;
        group.commit(slot(5, 50.0, &[80.0]));
        group.commit(slot(6, 70.0, &[80.0]));

        let mut lookup = BoundingsLookup::new();
        group.build_boundings_lookup(&mut lookup);
        let g = &lookup.stave_groups[0];
        assert_eq!(g.index, 3);
        assert_eq!(g.visual_bounds, Bounds { x: 40.0, y: 100.0, w: 120.0, h: 80.0 });
        assert_eq!(g.bars[1].bar_index, 6);
        assert_eq!(g.bars[1].visual_bounds.x, 90.0);
        assert_eq!(lookup.find_bar_at(100.0, 150.0), Some(6));
    }

    #[test]
    fn add_bars_measures_every_selected_track() {
        let score = Score {
            master_bars: vec![MasterBar::new(); 2],
            tracks: vec![
                Track::new("Piano"),
                Track::new("Guitar").with_tuning(&[64, 59, 55, 50, 45, 40]),
            ],
            ..Score::default()
        };
        let settings = Settings::default().with_tracks(vec![0, 1]);
        let renderer = ScoreRenderer::new(&score, &settings).unwrap();

        let mut group = StaveGroup::new();
        group.add_bars(&renderer, 1);
        assert_eq!(group.bar_count(), 1);
        assert_eq!(group.last_bar_index(), Some(1));

        let heights = &group.bars()[0].heights;
        assert_eq!(heights.len(), 2);
        assert_eq!(group.height(), heights[0] + heights[1]);
        assert_eq!(group.width(), StaveGroup::candidate(&renderer, 1).natural_width);
    }
}
