//! Raster primitives for the framebuffer surface.
//!
//! Implements rasterization algorithms for basic geometric shapes.

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;
use crate::geometry::{Line, Rect};

// ============================================================================
// Line Drawing
// ============================================================================

/// Draw a line using Bresenham's algorithm (non-antialiased).
///
/// Endpoints must already be near the framebuffer; use [`clip_line`] for
/// segments that may reach far off-screen.
pub fn draw_line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            fb.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Clip a segment to `[0, width] x [0, height]` (Liang-Barsky).
///
/// Returns `None` when nothing of the segment is inside, or when an
/// endpoint is not finite.
#[must_use]
pub fn clip_line(line: Line, width: f32, height: f32) -> Option<Line> {
    if !line.start.is_finite() || !line.end.is_finite() {
        return None;
    }

    let dx = line.end.x - line.start.x;
    let dy = line.end.y - line.start.y;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    for (p, q) in [
        (-dx, line.start.x),
        (dx, width - line.start.x),
        (-dy, line.start.y),
        (dy, height - line.start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some(Line::from_coords(
        line.start.x + t0 * dx,
        line.start.y + t0 * dy,
        line.start.x + t1 * dx,
        line.start.y + t1 * dy,
    ))
}

/// Clip and draw a segment, widening it to `thickness` pixels.
///
/// Thick lines are drawn as parallel Bresenham runs offset along the
/// minor axis.
pub fn draw_segment(fb: &mut Framebuffer, line: Line, thickness: f32, color: Rgba) {
    let Some(clipped) = clip_line(line, fb.width() as f32, fb.height() as f32) else {
        return;
    };

    let (x0, y0) = (clipped.start.x.round() as i32, clipped.start.y.round() as i32);
    let (x1, y1) = (clipped.end.x.round() as i32, clipped.end.y.round() as i32);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();

    let passes = thickness.round().max(1.0) as i32;
    let first = -(passes - 1) / 2;
    for k in first..first + passes {
        if steep {
            draw_line(fb, x0 + k, y0, x1 + k, y1, color);
        } else {
            draw_line(fb, x0, y0 + k, x1, y1 + k, color);
        }
    }
}

// ============================================================================
// Rectangle Drawing
// ============================================================================

/// Fill the pixels covered by a device-space rectangle.
///
/// Edges are rounded to the nearest pixel boundary and clipped to the
/// framebuffer, so partially visible bars stay anchored where they belong.
pub fn draw_rect(fb: &mut Framebuffer, rect: Rect, color: Rgba) {
    let clamp_x = |v: f32| v.round().clamp(0.0, fb.width() as f32) as u32;
    let clamp_y = |v: f32| v.round().clamp(0.0, fb.height() as f32) as u32;

    if !(rect.x.is_finite() && rect.y.is_finite() && rect.width.is_finite() && rect.height.is_finite())
    {
        return;
    }

    let x0 = clamp_x(rect.x);
    let x1 = clamp_x(rect.right());
    let y0 = clamp_y(rect.y);
    let y1 = clamp_y(rect.bottom());

    if x0 < x1 && y0 < y1 {
        fb.fill_rect(x0, y0, x1 - x0, y1 - y0, color);
    }
}

// ============================================================================
// Circle Drawing
// ============================================================================

/// Draw a filled circle using the midpoint algorithm.
///
/// Circles whose bounding box misses the framebuffer are skipped, so any
/// center is accepted.
pub fn draw_circle(fb: &mut Framebuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    let (cx, cy, radius) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let (width, height) = (i64::from(fb.width()), i64::from(fb.height()));
    if radius < 0 || cx + radius < 0 || cy + radius < 0 || cx - radius >= width || cy - radius >= height {
        return;
    }
    if radius == 0 {
        fb.set_pixel(cx as u32, cy as u32, color);
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        draw_horizontal_line(fb, cx - x, cx + x, cy + y, color);
        draw_horizontal_line(fb, cx - x, cx + x, cy - y, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy + x, color);
        draw_horizontal_line(fb, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

#[inline]
fn draw_horizontal_line(fb: &mut Framebuffer, x1: i64, x2: i64, y: i64, color: Rgba) {
    if y < 0 || y >= i64::from(fb.height()) {
        return;
    }

    let x_start = x1.max(0);
    let x_end = (x2 + 1).min(i64::from(fb.width()));

    if x_start < x_end {
        fb.fill_rect(x_start as u32, y as u32, (x_end - x_start) as u32, 1, color);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(w: u32, h: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(w, h).expect("framebuffer creation should succeed");
        fb.clear(Rgba::WHITE);
        fb
    }

    #[test]
    fn test_draw_line_horizontal() {
        let mut fb = blank(100, 100);
        draw_line(&mut fb, 10, 50, 90, 50, Rgba::BLACK);

        assert_eq!(fb.get_pixel(10, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(90, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_draw_line_diagonal() {
        let mut fb = blank(100, 100);
        draw_line(&mut fb, 10, 10, 90, 90, Rgba::BLACK);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLACK));
    }

    #[test]
    fn test_clip_line_inside_unchanged() {
        let line = Line::from_coords(10.0, 10.0, 20.0, 30.0);
        assert_eq!(clip_line(line, 100.0, 100.0), Some(line));
    }

    #[test]
    fn test_clip_line_far_endpoint() {
        let line = Line::from_coords(10.0, 50.0, 11.0, -1.0e30);
        let clipped = clip_line(line, 100.0, 100.0).unwrap();
        assert!(clipped.end.y.abs() < 1e-2);
        assert!((clipped.start.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_clip_line_outside_and_nan() {
        assert!(clip_line(Line::from_coords(-10.0, -10.0, -5.0, -1.0), 100.0, 100.0).is_none());
        assert!(clip_line(Line::from_coords(f32::NAN, 0.0, 5.0, 5.0), 100.0, 100.0).is_none());
    }

    #[test]
    fn test_draw_segment_thickness() {
        let mut fb = blank(50, 50);
        draw_segment(&mut fb, Line::horizontal(25.0, 5.0, 45.0), 3.0, Rgba::BLACK);
        assert_eq!(fb.get_pixel(20, 24), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(20, 25), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(20, 26), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(20, 28), Some(Rgba::WHITE));
    }

    #[test]
    fn test_draw_rect_partially_offscreen() {
        let mut fb = blank(100, 100);
        draw_rect(&mut fb, Rect::new(-10.0, 90.0, 20.0, 50.0), Rgba::RED);

        assert_eq!(fb.get_pixel(0, 95), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(9, 99), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(10, 95), Some(Rgba::WHITE));
        assert_eq!(fb.count_color(Rgba::RED), 10 * 10);
    }

    #[test]
    fn test_draw_rect_non_finite_ignored() {
        let mut fb = blank(10, 10);
        draw_rect(&mut fb, Rect::new(0.0, f32::NAN, 5.0, 5.0), Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 0);
    }

    #[test]
    fn test_draw_circle() {
        let mut fb = blank(100, 100);
        draw_circle(&mut fb, 50, 50, 20, Rgba::BLUE);

        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::BLUE));
        assert_eq!(fb.get_pixel(5, 5), Some(Rgba::WHITE));
    }

    #[test]
    fn test_circle_zero_radius() {
        let mut fb = blank(100, 100);
        draw_circle(&mut fb, 50, 50, 0, Rgba::RED);
        assert_eq!(fb.get_pixel(50, 50), Some(Rgba::RED));
    }

    #[test]
    fn test_circle_far_center_skipped() {
        let mut fb = blank(64, 64);
        draw_circle(&mut fb, i32::MAX, 10, 5, Rgba::RED);
        draw_circle(&mut fb, i32::MIN, i32::MIN, 5, Rgba::RED);
        draw_circle(&mut fb, 10, i32::MAX - 2, 5, Rgba::RED);
        assert_eq!(fb.count_color(Rgba::RED), 0);
    }

    #[test]
    fn test_circle_clipped_at_edge() {
        let mut fb = blank(64, 64);
        draw_circle(&mut fb, -3, 30, 5, Rgba::RED);
        assert_eq!(fb.get_pixel(0, 30), Some(Rgba::RED));
        assert_eq!(fb.get_pixel(3, 30), Some(Rgba::WHITE));
    }
}
