//! SVG builder: accumulates SVG elements and produces the final string.

use super::canvas::{Canvas, TextAlign};
use super::constants::{Font, FontStyle, FontWeight};

// ═══════════════════════════════════════════════════════════════════════
// SvgBuilder
// ═══════════════════════════════════════════════════════════════════════

pub struct SvgBuilder {
    pub(super) elements: Vec<String>,
    width: f64,
    height: f64,
    color: String,
    font: Option<Font>,
    align: TextAlign,
}

impl SvgBuilder {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
            color: "#000000".to_string(),
            font: None,
            align: TextAlign::Left,
        }
    }

    pub fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: 'Georgia', 'Times New Roman', serif;">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, w, h, fill
        ));
    }
}

impl Canvas for SvgBuilder {
    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    fn set_font(&mut self, font: &Font) {
        self.font = Some(font.clone());
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.align = align;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let escaped = escape_text(text);
        let (size, font_attrs) = match &self.font {
            Some(font) => (font.size, font_attributes(font)),
            None => (12.0, String::new()),
        };
        // SVG places text on its baseline; the canvas contract is top-aligned.
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}"{} fill="{}" text-anchor="{}">{}</text>"#,
            x,
            y + size,
            size,
            font_attrs,
            self.color,
            self.align.anchor(),
            escaped
        ));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            x1, y1, x2, y2, self.color, width
        ));
    }
}

fn font_attributes(font: &Font) -> String {
    let mut attrs = format!(r#" font-family="{}""#, font.family.replace('"', "'"));
    if font.weight == FontWeight::Bold {
        attrs.push_str(r#" font-weight="bold""#);
    }
    if font.style == FontStyle::Italic {
        attrs.push_str(r#" font-style="italic""#);
    }
    attrs
}

fn escape_text(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_uses_current_state() {
        let mut svg = SvgBuilder::new(100.0, 50.0);
        svg.set_color("#ff0000");
        svg.set_text_align(TextAlign::Center);
        svg.set_font(&Font::new("serif", 20.0, FontWeight::Bold, FontStyle::Italic));
        svg.fill_text("A & B", 50.0, 10.0);
        let out = svg.build();
        assert!(out.contains(r#"y="30.0""#));
        assert!(out.contains(r#"text-anchor="middle""#));
        assert!(out.contains(r##"fill="#ff0000""##));
        assert!(out.contains(r#"font-weight="bold""#));
        assert!(out.contains(r#"font-style="italic""#));
        assert!(out.contains("A &amp; B"));
    }

    #[test]
    fn build_wraps_elements() {
        let mut svg = SvgBuilder::new(200.0, 80.0);
        svg.line(0.0, 0.0, 10.0, 0.0, 1.0);
        let out = svg.build();
        assert!(out.starts_with("<svg"));
        assert!(out.contains(r#"viewBox="0 0 200 80""#));
        assert!(out.contains("<line"));
        assert!(out.ends_with("</svg>\n"));
    }
}
