//! The drawing capability the plot renderer targets.
//!
//! Everything is in device coordinates. Hosts with their own windowing
//! layer implement [`DrawSurface`] over it; the crate ships a raster
//! surface ([`Framebuffer`]), a vector one
//! ([`SvgEncoder`](crate::output::SvgEncoder)) and a [`RecordingSurface`]
//! that keeps the issued commands for inspection.

use super::primitives::{draw_circle, draw_rect, draw_segment};
use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Line, Point, Rect};
use log::trace;

/// Primitive draw calls issued by the renderer.
pub trait DrawSurface {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Stroke a line segment `thickness` pixels wide.
    fn line(&mut self, line: Line, thickness: f32, color: Rgba);

    /// Fill a circle.
    fn circle(&mut self, center: Point, radius: f32, color: Rgba);

    /// Draw `text` with its top-left corner at `position`.
    fn text(&mut self, position: Point, text: &str, font_size: f32, color: Rgba);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Rgba },
    Line { line: Line, thickness: f32, color: Rgba },
    Circle { center: Point, radius: f32, color: Rgba },
    Text { position: Point, text: String, font_size: f32, color: Rgba },
}

/// Surface that stores every call instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in issue order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded rectangles.
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, .. } => Some(rect),
            _ => None,
        })
    }

    /// Recorded line segments with their colors.
    pub fn lines(&self) -> impl Iterator<Item = (&Line, Rgba)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { line, color, .. } => Some((line, *color)),
            _ => None,
        })
    }

    /// Recorded text strings.
    pub fn texts(&self) -> impl Iterator<Item = (&Point, &str)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { position, text, .. } => Some((position, text.as_str())),
            _ => None,
        })
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn line(&mut self, line: Line, thickness: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            line,
            thickness,
            color,
        });
    }

    fn circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn text(&mut self, position: Point, text: &str, font_size: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_string(),
            font_size,
            color,
        });
    }
}

impl DrawSurface for Framebuffer {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        draw_rect(self, rect, color);
    }

    fn line(&mut self, line: Line, thickness: f32, color: Rgba) {
        draw_segment(self, line, thickness, color);
    }

    fn circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if center.is_finite() {
            draw_circle(self, center.x.round() as i32, center.y.round() as i32, radius.round() as i32, color);
        }
    }

    // No glyph rasterizer: labels only appear on vector surfaces.
    fn text(&mut self, _position: Point, text: &str, _font_size: f32, _color: Rgba) {
        trace!("raster surface dropped label {text:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_keeps_order() {
        let mut surface = RecordingSurface::new();
        surface.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::RED);
        surface.line(Line::from_coords(0.0, 0.0, 1.0, 1.0), 1.0, Rgba::GRAY);
        surface.text(Point::new(3.0, 4.0), "hi", 12.0, Rgba::BLACK);
        surface.circle(Point::ORIGIN, 5.0, Rgba::RED);

        assert_eq!(surface.commands().len(), 4);
        assert!(matches!(surface.commands()[0], DrawCommand::FillRect { .. }));
        assert_eq!(surface.rects().count(), 1);
        assert_eq!(surface.lines().count(), 1);
        assert_eq!(surface.texts().next(), Some((&Point::new(3.0, 4.0), "hi")));

        surface.clear();
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_framebuffer_surface_draws() {
        let mut fb = Framebuffer::new(40, 40).unwrap();
        fb.clear(Rgba::WHITE);

        DrawSurface::fill_rect(&mut fb, Rect::new(2.0, 2.0, 4.0, 4.0), Rgba::LIGHT_GRAY);
        DrawSurface::line(&mut fb, Line::horizontal(20.0, 0.0, 39.0), 1.0, Rgba::GRAY);
        DrawSurface::circle(&mut fb, Point::new(30.0, 30.0), 3.0, Rgba::RED);
        DrawSurface::text(&mut fb, Point::new(0.0, 0.0), "ignored", 10.0, Rgba::BLACK);

        assert_eq!(fb.count_color(Rgba::LIGHT_GRAY), 16);
        assert_eq!(fb.get_pixel(10, 20), Some(Rgba::GRAY));
        assert_eq!(fb.get_pixel(30, 30), Some(Rgba::RED));
        assert_eq!(fb.count_color(Rgba::BLACK), 0);
    }
}
