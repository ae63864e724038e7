//! World/device coordinate mapping for the plot surface.
//!
//! World coordinates are the mathematical plane (y up). Device coordinates
//! are pixels (y down). With pan offset `o`, scale `s` and canvas height `h`:
//!
//! ```text
//! device_x = x * s.x + o.x
//! device_y = h - y * s.y + o.y
//! ```
//!
//! The canvas size travels with the transform in a [`Viewport`]; nothing
//! here reads global state.

use crate::function::Integrand;
use crate::geometry::{Line, Point};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// World positions of the labelled grid ticks on both axes.
///
/// Fixed regardless of zoom, so ticks may fall off-screen.
pub const GRID_TICKS: RangeInclusive<i32> = -9..=9;

/// Axis selector for independent zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// Positive lower/upper bound applied to each scale component by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBounds {
    /// Smallest permitted pixels-per-unit.
    pub min: f64,
    /// Largest permitted pixels-per-unit.
    pub max: f64,
}

impl ScaleBounds {
    /// Clamp a scale component into the bounds.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

impl Default for ScaleBounds {
    fn default() -> Self {
        Self { min: 0.5, max: 400.0 }
    }
}

/// Pan offset (device pixels) and per-axis scale (pixels per world unit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    /// Horizontal pan.
    pub offset_x: f64,
    /// Vertical pan.
    pub offset_y: f64,
    /// Horizontal pixels per world unit.
    pub scale_x: f64,
    /// Vertical pixels per world unit.
    pub scale_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new((500.0, -50.0), (200.0, 200.0))
    }
}

impl ViewTransform {
    /// Create a transform from `(offset_x, offset_y)` and `(scale_x, scale_y)`.
    #[must_use]
    pub const fn new(offset: (f64, f64), scale: (f64, f64)) -> Self {
        Self {
            offset_x: offset.0,
            offset_y: offset.1,
            scale_x: scale.0,
            scale_y: scale.1,
        }
    }

    /// Shift the view by a device delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Multiply one scale component by `factor`, clamped to `bounds`.
    pub fn zoom(&mut self, axis: Axis, factor: f64, bounds: ScaleBounds) {
        let scale = match axis {
            Axis::X => &mut self.scale_x,
            Axis::Y => &mut self.scale_y,
        };
        *scale = bounds.clamp(*scale * factor);
    }

    /// Restore both scale components, leaving the pan untouched.
    pub fn reset_scale(&mut self, scale: (f64, f64)) {
        self.scale_x = scale.0;
        self.scale_y = scale.1;
    }
}

/// A [`ViewTransform`] bound to a canvas of known size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current pan and zoom.
    pub transform: ViewTransform,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(transform: ViewTransform, width: u32, height: u32) -> Self {
        Self {
            transform,
            width,
            height,
        }
    }

    /// World x to device x.
    #[must_use]
    pub fn device_x(&self, x: f64) -> f64 {
        x * self.transform.scale_x + self.transform.offset_x
    }

    /// World y to device y (axis inverted).
    #[must_use]
    pub fn device_y(&self, y: f64) -> f64 {
        f64::from(self.height) - y * self.transform.scale_y + self.transform.offset_y
    }

    /// Device x to world x.
    #[must_use]
    pub fn world_x(&self, device_x: f64) -> f64 {
        (device_x - self.transform.offset_x) / self.transform.scale_x
    }

    /// Device y to world y.
    #[must_use]
    pub fn world_y(&self, device_y: f64) -> f64 {
        (f64::from(self.height) + self.transform.offset_y - device_y) / self.transform.scale_y
    }

    /// Map a world point to device pixels.
    #[must_use]
    pub fn world_to_device(&self, x: f64, y: f64) -> (f64, f64) {
        (self.device_x(x), self.device_y(y))
    }

    /// Map device pixels back to the world; inverse of [`Self::world_to_device`].
    #[must_use]
    pub fn device_to_world(&self, device_x: f64, device_y: f64) -> (f64, f64) {
        (self.world_x(device_x), self.world_y(device_y))
    }

    /// [`Self::world_to_device`] narrowed to a drawable [`Point`].
    #[must_use]
    pub fn project(&self, x: f64, y: f64) -> Point {
        Point::from_f64(self.world_to_device(x, y))
    }

    /// Device position of the world origin.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.project(0.0, 0.0)
    }

    /// Whether a device y lies strictly inside the canvas band.
    #[must_use]
    pub fn in_vertical_band(&self, device_y: f64) -> bool {
        0.0 < device_y && device_y < f64::from(self.height)
    }

    /// Per-pixel polyline approximation of `function` across the canvas.
    ///
    /// Column `c` is inverted to world x, evaluated, and mapped back to a
    /// device y; a segment joins columns `c - 1` and `c` when either end is
    /// inside the vertical band. Non-finite ends are never joined.
    pub fn curve_segments<F: Integrand + ?Sized>(&self, function: &F) -> Vec<Line> {
        let sample = |column: u32| {
            let device_x = f64::from(column);
            let device_y = self.device_y(function.evaluate_at(self.world_x(device_x)));
            (device_x, device_y)
        };

        let mut segments = Vec::new();
        if self.width == 0 {
            return segments;
        }

        let mut prev = sample(0);
        for column in 1..self.width {
            let cur = sample(column);
            let visible = self.in_vertical_band(prev.1) || self.in_vertical_band(cur.1);
            if visible && prev.1.is_finite() && cur.1.is_finite() {
                segments.push(Line::new(Point::from_f64(prev), Point::from_f64(cur)));
            }
            prev = cur;
        }
        segments
    }
}
