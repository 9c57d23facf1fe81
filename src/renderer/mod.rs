//! Score renderer: lays out a Score onto a page and paints it.
//!
//! Rendering is two synchronous passes over one [`PageViewLayout`]:
//! `do_layout` decides the lines and page size, then `paint_score` draws the
//! header and every stave group onto a [`Canvas`]. Bounding boxes for hit
//! testing are collected in a separate pass afterwards.

mod boundings;
mod canvas;
mod constants;
mod header;
mod metrics;
mod page_layout;
mod stave_group;
mod svg_builder;

use log::warn;
use serde::Serialize;

use crate::error::Result;
use crate::model::{Score, Track};
use crate::settings::Settings;

pub use boundings::{BarBounds, BoundingsLookup, Bounds, StaveGroupBounds};
pub use canvas::{Canvas, TextAlign};
pub use constants::{Font, FontStyle, FontWeight, LayoutConstants, RenderingResources};
pub use header::{HeaderFooterElements, HeaderRow, HeaderText, HeaderX, ScoreInfo};
pub use metrics::{BarMetrics, BarSize, DefaultBarMetrics};
pub use page_layout::{resolve_bar_range, PageViewLayout};
pub use stave_group::{BarSlot, StaveGroup};
pub use svg_builder::SvgBuilder;

static DEFAULT_METRICS: DefaultBarMetrics = DefaultBarMetrics;

// ═══════════════════════════════════════════════════════════════════════
// Renderer context
// ═══════════════════════════════════════════════════════════════════════

/// Everything a layout pass reads: the score, the settings, the resolved
/// track selection and the sizing collaborators.
pub struct ScoreRenderer<'a> {
    pub score: &'a Score,
    pub settings: &'a Settings,
    /// Selected tracks, in selection order
    pub tracks: Vec<&'a Track>,
    pub metrics: &'a dyn BarMetrics,
    pub constants: LayoutConstants,
    /// Fonts already multiplied by the settings scale
    pub resources: RenderingResources,
}

impl<'a> ScoreRenderer<'a> {
    /// Fails when the settings do not validate (non-positive scale).
    pub fn new(score: &'a Score, settings: &'a Settings) -> Result<Self> {
        settings.validate()?;
        let tracks = settings
            .tracks
            .iter()
            .filter_map(|&i| {
                let track = score.tracks.get(i);
                if track.is_none() {
                    warn!("selected track {i} does not exist ({} tracks), ignoring", score.tracks.len());
                }
                track
            })
            .collect();

        if settings.layout.mode != "page" {
            warn!("unknown layout mode '{}', using page layout", settings.layout.mode);
        }

        Ok(Self {
            score,
            settings,
            tracks,
            metrics: &DEFAULT_METRICS,
            constants: LayoutConstants::default(),
            resources: RenderingResources::default().scaled(settings.scale),
        })
    }

    pub fn with_metrics(mut self, metrics: &'a dyn BarMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_constants(mut self, constants: LayoutConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn scale(&self) -> f64 {
        self.settings.scale
    }

    /// Run a fresh layout pass.
    pub fn layout(&self) -> PageViewLayout {
        let mut layout = PageViewLayout::new();
        layout.do_layout(self);
        layout
    }

    /// Paint a finished layout into a standalone SVG document.
    pub fn paint_svg(&self, layout: &PageViewLayout) -> String {
        let mut svg = SvgBuilder::new(layout.width, layout.height);
        svg.rect(0.0, 0.0, layout.width, layout.height, "white");
        layout.paint_score(self, &mut svg);
        svg.build()
    }

    pub fn boundings(&self, layout: &PageViewLayout) -> BoundingsLookup {
        let mut lookup = BoundingsLookup::new();
        layout.build_boundings_lookup(&mut lookup);
        lookup
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Layout summary
// ═══════════════════════════════════════════════════════════════════════

/// Serializable result of a layout pass, for hosts that draw themselves.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayoutSummary {
    pub width: f64,
    pub height: f64,
    pub groups: Vec<GroupSummary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub is_full: bool,
    pub bars: Vec<BarPosition>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarPosition {
    /// Index into `Score::master_bars`
    pub bar_index: usize,
    pub x: f64,
    pub width: f64,
}

impl From<&PageViewLayout> for PageLayoutSummary {
    fn from(layout: &PageViewLayout) -> Self {
        let groups = layout
            .groups()
            .iter()
            .map(|g| GroupSummary {
                index: g.index,
                x: g.x,
                y: g.y,
                width: g.width(),
                height: g.height(),
                is_full: g.is_full,
                bars: g
                    .bar_positions()
                    .map(|(bar_index, x, width)| BarPosition { bar_index, x, width })
                    .collect(),
            })
            .collect();
        Self {
            width: layout.width,
            height: layout.height,
            groups,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Lay out `score` and return line and bar positions.
pub fn layout_score(score: &Score, settings: &Settings) -> Result<PageLayoutSummary> {
    let renderer = ScoreRenderer::new(score, settings)?;
    Ok(PageLayoutSummary::from(&renderer.layout()))
}

/// Lay out and paint `score` into a complete SVG string.
pub fn render_score_to_svg(score: &Score, settings: &Settings) -> Result<String> {
    let renderer = ScoreRenderer::new(score, settings)?;
    let layout = renderer.layout();
    Ok(renderer.paint_svg(&layout))
}

/// Lay out `score` and collect the bounding boxes of every line and bar.
pub fn build_boundings_lookup(score: &Score, settings: &Settings) -> Result<BoundingsLookup> {
    let renderer = ScoreRenderer::new(score, settings)?;
    let layout = renderer.layout();
    Ok(renderer.boundings(&layout))
}
