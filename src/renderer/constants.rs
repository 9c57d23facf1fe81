//! Layout constants and rendering resources (all in user units at scale 1).

// ── Bar measurement ─────────────────────────────────────────────────
pub(super) const MIN_BAR_WIDTH: f64 = 38.0;
pub(super) const PER_BEAT_MIN_WIDTH: f64 = 40.0;
pub(super) const TIME_SIG_SPACE: f64 = 24.0;
pub(super) const KEY_SIG_ACCIDENTAL_SPACE: f64 = 10.0;
pub(super) const REPEAT_START_SPACE: f64 = 14.0;

// ── Stave dimensions ────────────────────────────────────────────────
pub(super) const STAFF_LINE_SPACING: f64 = 10.0; // distance between staff lines
pub(super) const STAFF_HEIGHT: f64 = 40.0; // 5 lines, 4 spaces
pub(super) const TAB_LINE_SPACING: f64 = 13.0;
pub(super) const STAVE_PADDING: f64 = 20.0; // above and below each stave
pub(super) const TAB_STAVE_GAP: f64 = 30.0; // between standard notation and tab
pub(super) const STAFF_LINE_WIDTH: f64 = 0.8;
pub(super) const BARLINE_WIDTH: f64 = 1.0;

/// Spacing record for the page layout. Paddings are in absolute units;
/// every other value is multiplied by the render scale.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConstants {
    pub padding_left: f64,
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,
    /// Page width at scale 1 when auto-sizing.
    pub reference_width: f64,
    /// Vertical space between two stave groups.
    pub group_spacing: f64,
    pub title_height: f64,
    /// Subtitle, artist, album and composer rows.
    pub info_row_height: f64,
    /// Gap between the score info rows and the tuning block.
    pub info_gap: f64,
    /// Tuning name row, each string listing row and the row closing the
    /// tuning block.
    pub tuning_row_height: f64,
    /// Horizontal offset of the second string listing column.
    pub tuning_column_offset: f64,
    /// Gap closing the header when measuring it for layout.
    pub header_gap_measure: f64,
    /// Gap closing the header after painting it.
    pub header_gap_paint: f64,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            padding_left: 40.0,
            padding_top: 40.0,
            padding_right: 40.0,
            padding_bottom: 40.0,
            reference_width: 950.0,
            group_spacing: 20.0,
            title_height: 35.0,
            info_row_height: 20.0,
            info_gap: 20.0,
            tuning_row_height: 15.0,
            tuning_column_offset: 43.0,
            header_gap_measure: 40.0,
            header_gap_paint: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: &'static str,
    pub size: f64,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl Font {
    pub const fn new(family: &'static str, size: f64, weight: FontWeight, style: FontStyle) -> Self {
        Self { family, size, weight, style }
    }

    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            size: self.size * scale,
            ..self.clone()
        }
    }
}

/// Fonts and colors used while painting.
#[derive(Debug, Clone)]
pub struct RenderingResources {
    pub title_font: Font,
    pub sub_title_font: Font,
    pub words_font: Font,
    pub effect_font: Font,
    pub bar_number_font: Font,
    pub score_info_color: &'static str,
    pub main_glyph_color: &'static str,
    pub staff_line_color: &'static str,
    pub bar_separator_color: &'static str,
    pub bar_number_color: &'static str,
}

impl Default for RenderingResources {
    fn default() -> Self {
        const SERIF: &str = "Georgia, 'Times New Roman', serif";
        Self {
            title_font: Font::new(SERIF, 32.0, FontWeight::Normal, FontStyle::Normal),
            sub_title_font: Font::new(SERIF, 20.0, FontWeight::Normal, FontStyle::Normal),
            words_font: Font::new(SERIF, 15.0, FontWeight::Normal, FontStyle::Normal),
            effect_font: Font::new(SERIF, 12.0, FontWeight::Normal, FontStyle::Italic),
            bar_number_font: Font::new("Arial, sans-serif", 11.0, FontWeight::Normal, FontStyle::Normal),
            score_info_color: "#1a1a1a",
            main_glyph_color: "#1a1a1a",
            staff_line_color: "#555555",
            bar_separator_color: "#333333",
            bar_number_color: "#c80000",
        }
    }
}

impl RenderingResources {
    /// Copy of the resources with every font size multiplied by `scale`.
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            title_font: self.title_font.scaled(scale),
            sub_title_font: self.sub_title_font.scaled(scale),
            words_font: self.words_font.scaled(scale),
            effect_font: self.effect_font.scaled(scale),
            bar_number_font: self.bar_number_font.scaled(scale),
            ..self.clone()
        }
    }
}
