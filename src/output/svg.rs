//! Vector SVG surface.
//!
//! Records draw calls as SVG elements; unlike the raster surface it keeps
//! the tick labels and the summary text.

use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Line, Point, Rect};
use crate::render::DrawSurface;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Share of the font size between the top of a glyph box and its baseline.
const BASELINE_RATIO: f32 = 0.8;

/// SVG document builder and [`DrawSurface`].
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
    },
    Circle {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Rgba,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Text positioned at its baseline.
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
    },
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Elements recorded so far.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );

        if let Some(bg) = self.background {
            let _ = writeln!(
                svg,
                r#"  <rect width="100%" height="100%" fill="{}"/>"#,
                bg.to_css()
            );
        }

        for element in &self.elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

impl DrawSurface for SvgEncoder {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.add_element(SvgElement::Rect {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            fill: color,
        });
    }

    fn line(&mut self, line: Line, thickness: f32, color: Rgba) {
        if !line.start.is_finite() || !line.end.is_finite() {
            return;
        }
        self.add_element(SvgElement::Line {
            x1: line.start.x,
            y1: line.start.y,
            x2: line.end.x,
            y2: line.end.y,
            stroke: color,
            stroke_width: thickness,
        });
    }

    fn circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.add_element(SvgElement::Circle {
            cx: center.x,
            cy: center.y,
            r: radius,
            fill: color,
        });
    }

    fn text(&mut self, position: Point, text: &str, font_size: f32, color: Rgba) {
        self.add_element(SvgElement::Text {
            x: position.x,
            y: position.y + font_size * BASELINE_RATIO,
            text: text.to_string(),
            font_size,
            fill: color,
        });
    }
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => format!(
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
            fill.to_css()
        ),
        SvgElement::Circle { cx, cy, r, fill } => format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#,
            fill.to_css()
        ),
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => format!(
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
            stroke.to_css()
        ),
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
        } => {
            let escaped_text = text
                .replace('&', "&amp;")
                .replace('<', "&lt;")
                .replace('>', "&gt;")
                .replace('"', "&quot;");
            format!(
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" font-family="monospace">{escaped_text}</text>"#,
                fill.to_css()
            )
        }
    }
}
