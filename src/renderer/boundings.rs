//! Bounding box lookup: filled once per stave group after layout, then
//! queried by the host for hit testing (e.g. tapping a bar to seek).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.x + self.w && y >= self.y && y <= self.y + self.h
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarBounds {
    /// Index into `Score::master_bars`
    pub bar_index: usize,
    pub visual_bounds: Bounds,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaveGroupBounds {
    pub index: usize,
    pub visual_bounds: Bounds,
    pub bars: Vec<BarBounds>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingsLookup {
    pub stave_groups: Vec<StaveGroupBounds>,
}

impl BoundingsLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stave_group(&mut self, bounds: StaveGroupBounds) {
        self.stave_groups.push(bounds);
    }

    /// The stave group whose vertical extent contains `y`.
    pub fn find_group_at(&self, y: f64) -> Option<&StaveGroupBounds> {
        self.stave_groups
            .iter()
            .find(|g| y >= g.visual_bounds.y && y <= g.visual_bounds.y + g.visual_bounds.h)
    }

    /// Index of the bar painted at `(x, y)`.
    pub fn find_bar_at(&self, x: f64, y: f64) -> Option<usize> {
        self.find_group_at(y)?
            .bars
            .iter()
            .find(|b| b.visual_bounds.contains(x, y))
            .map(|b| b.bar_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(index: usize, y: f64, first_bar: usize) -> StaveGroupBounds {
        let bars = (0..2)
            .map(|i| BarBounds {
                bar_index: first_bar + i,
                visual_bounds: Bounds { x: 40.0 + i as f64 * 100.0, y, w: 100.0, h: 80.0 },
            })
            .collect();
        StaveGroupBounds {
            index,
            visual_bounds: Bounds { x: 40.0, y, w: 200.0, h: 80.0 },
            bars,
        }
    }

    #[test]
    fn hit_tests_bars() {
        let mut lookup = BoundingsLookup::new();
        lookup.add_stave_group(group(0, 100.0, 0));
        lookup.add_stave_group(group(1, 200.0, 2));

        assert_eq!(lookup.find_bar_at(50.0, 120.0), Some(0));
        assert_eq!(lookup.find_bar_at(150.0, 120.0), Some(1));
        assert_eq!(lookup.find_bar_at(150.0, 250.0), Some(3));
        assert_eq!(lookup.find_group_at(250.0).map(|g| g.index), Some(1));
    }

    #[test]
    fn misses_outside_groups() {
        let mut lookup = BoundingsLookup::new();
        lookup.add_stave_group(group(0, 100.0, 0));
        assert_eq!(lookup.find_bar_at(50.0, 190.0), None);
        assert_eq!(lookup.find_bar_at(500.0, 120.0), None);
    }
}
