//! Device-space geometric primitives.
//!
//! All coordinates here are pixels: x grows to the right, y grows downward.

/// A 2D point with floating-point device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Narrow a double-precision device position.
    #[must_use]
    pub fn from_f64((x, y): (f64, f64)) -> Self {
        Self::new(x as f32, y as f32)
    }

    /// Whether both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A line segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a new line segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a line from coordinates.
    #[must_use]
    pub const fn from_coords(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Horizontal segment at `y` from `x0` to `x1`.
    #[must_use]
    pub const fn horizontal(y: f32, x0: f32, x1: f32) -> Self {
        Self::from_coords(x0, y, x1, y)
    }

    /// Vertical segment at `x` from `y0` to `y1`.
    #[must_use]
    pub const fn vertical(x: f32, y0: f32, y1: f32) -> Self {
        Self::from_coords(x, y0, x, y1)
    }
}

/// An axis-aligned rectangle: top-left corner plus non-negative size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanned by two opposite corners given in any order.
    #[must_use]
    pub fn spanning(a: Point, b: Point) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Check if a point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_spanning_normalizes() {
        let rect = Rect::spanning(Point::new(10.0, 40.0), Point::new(4.0, 20.0));
        assert_eq!(rect, Rect::new(4.0, 20.0, 6.0, 20.0));
        assert_eq!(rect.right(), 10.0);
        assert_eq!(rect.bottom(), 40.0);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(!rect.contains(Point::new(15.0, 5.0)));
    }

    #[test]
    fn test_point_from_f64_and_finite() {
        let p = Point::from_f64((1.5, -2.0));
        assert_eq!(p, Point::new(1.5, -2.0));
        assert!(p.is_finite());
        assert!(!Point::new(f32::NAN, 0.0).is_finite());
    }

    #[test]
    fn test_axis_aligned_lines() {
        assert_eq!(Line::horizontal(3.0, 0.0, 9.0), Line::from_coords(0.0, 3.0, 9.0, 3.0));
        assert_eq!(Line::vertical(3.0, 0.0, 9.0), Line::from_coords(3.0, 0.0, 3.0, 9.0));
    }
}
