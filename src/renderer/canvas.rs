//! Drawing surface used by the painting passes.
//!
//! The layout engine never reads anything back from the canvas; it is an
//! output sink with a small amount of current state (font, color, text
//! alignment), like an HTML5 2D context.

use super::constants::Font;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// SVG `text-anchor` value.
    pub fn anchor(self) -> &'static str {
        match self {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        }
    }
}

pub trait Canvas {
    fn set_color(&mut self, color: &str);
    fn set_font(&mut self, font: &Font);
    fn set_text_align(&mut self, align: TextAlign);
    /// Draw `text` with the current font, color and alignment; `y` is the
    /// top of the text.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    /// Stroke a straight line with the current color.
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64);
}
