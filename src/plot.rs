//! Per-frame composition of the integral plot.
//!
//! Draw order: partition bars, axes with the fixed tick grid, the function
//! curve, the origin marker, and finally the textual summary pinned to the
//! top-left corner. Nothing is carried between frames.

use crate::color::Rgba;
use crate::function::Integrand;
use crate::geometry::{Line, Point, Rect};
use crate::quadrature::IntegrationResult;
use crate::render::DrawSurface;
use crate::viewport::{Viewport, GRID_TICKS};
use serde::{Deserialize, Serialize};

/// Colors and sizes used when drawing a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    /// Canvas clear color.
    #[serde(default = "default_background")]
    pub background: Rgba,
    /// Partition bar fill.
    #[serde(default = "default_bar_color")]
    pub bar_color: Rgba,
    /// Axis lines, ticks and tick labels.
    #[serde(default = "default_axis_color")]
    pub axis_color: Rgba,
    /// Function curve.
    #[serde(default = "default_curve_color")]
    pub curve_color: Rgba,
    /// Origin marker.
    #[serde(default = "default_origin_color")]
    pub origin_color: Rgba,
    /// Summary text.
    #[serde(default = "default_text_color")]
    pub text_color: Rgba,
    /// Summary font size; also the column unit of the summary layout.
    #[serde(default = "default_font_size")]
    pub font_size: f32,
    /// Tick label font size.
    #[serde(default = "default_font_size")]
    pub tick_label_size: f32,
    /// Half length of a tick mark in pixels.
    #[serde(default = "default_tick_half_length")]
    pub tick_half_length: f32,
    /// Origin marker radius in pixels.
    #[serde(default = "default_origin_radius")]
    pub origin_radius: f32,
    /// Stroke width for axes and curve.
    #[serde(default = "default_line_thickness")]
    pub line_thickness: f32,
    /// Top-left corner of the summary line.
    #[serde(default = "default_summary_origin")]
    pub summary_origin: (f32, f32),
}

fn default_background() -> Rgba {
    Rgba::PAPER
}
fn default_bar_color() -> Rgba {
    Rgba::LIGHT_GRAY
}
fn default_axis_color() -> Rgba {
    Rgba::GRAY
}
fn default_curve_color() -> Rgba {
    Rgba::BLUE
}
fn default_origin_color() -> Rgba {
    Rgba::RED
}
fn default_text_color() -> Rgba {
    Rgba::BLACK
}
fn default_font_size() -> f32 {
    30.0
}
fn default_tick_half_length() -> f32 {
    10.0
}
fn default_origin_radius() -> f32 {
    5.0
}
fn default_line_thickness() -> f32 {
    1.0
}
fn default_summary_origin() -> (f32, f32) {
    (30.0, 30.0)
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: default_background(),
            bar_color: default_bar_color(),
            axis_color: default_axis_color(),
            curve_color: default_curve_color(),
            origin_color: default_origin_color(),
            text_color: default_text_color(),
            font_size: default_font_size(),
            tick_label_size: default_font_size(),
            tick_half_length: default_tick_half_length(),
            origin_radius: default_origin_radius(),
            line_thickness: default_line_thickness(),
            summary_origin: default_summary_origin(),
        }
    }
}

/// Renders one frame of the Riemann-sum plot onto a [`DrawSurface`].
#[derive(Debug, Clone, Default)]
pub struct IntegralPlot {
    style: PlotStyle,
}

impl IntegralPlot {
    /// Create a renderer with the given style.
    #[must_use]
    pub fn new(style: PlotStyle) -> Self {
        Self { style }
    }

    /// Style in use.
    #[must_use]
    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    /// Draw the full frame.
    ///
    /// `result` is the engine's cached result for `function`; without one,
    /// only the grid, curve, origin and function name are drawn.
    pub fn render_frame<S, F>(
        &self,
        surface: &mut S,
        function: &F,
        result: Option<&IntegrationResult>,
        viewport: &Viewport,
    ) where
        S: DrawSurface + ?Sized,
        F: Integrand + ?Sized,
    {
        if let Some(result) = result {
            self.draw_bars(surface, result, viewport);
        }
        self.draw_axes(surface, viewport);
        self.draw_curve(surface, function, viewport);
        self.draw_origin(surface, viewport);
        self.draw_summary(surface, function, result);
    }

    /// One bar per partition, from the x-axis to the sample value.
    ///
    /// Negative samples extend below the axis; reversed intervals still
    /// produce bars with non-negative device width.
    pub fn draw_bars<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        result: &IntegrationResult,
        viewport: &Viewport,
    ) {
        let request = result.request();
        for (i, &sample) in result.samples().iter().enumerate() {
            if !sample.is_finite() {
                continue;
            }
            let (x0, x1) = request.partition_bounds(i);
            let rect = Rect::spanning(viewport.project(x0, 0.0), viewport.project(x1, sample));
            surface.fill_rect(rect, self.style.bar_color);
        }
    }

    /// Both axes through the world origin plus labelled ticks at -9..=9.
    pub fn draw_axes<S: DrawSurface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        let style = &self.style;
        let origin = viewport.origin();
        let (width, height) = (viewport.width as f32, viewport.height as f32);
        let half = style.tick_half_length;
        let label = style.tick_label_size;

        surface.line(Line::horizontal(origin.y, 0.0, width), style.line_thickness, style.axis_color);
        surface.line(Line::vertical(origin.x, 0.0, height), style.line_thickness, style.axis_color);

        for tick in GRID_TICKS {
            let text = tick.to_string();

            let y = viewport.device_y(f64::from(tick)) as f32;
            surface.line(
                Line::horizontal(y, origin.x - half, origin.x + half),
                style.line_thickness,
                style.axis_color,
            );
            surface.text(
                Point::new(origin.x - 1.5 * label, y - 0.5 * label),
                &text,
                label,
                style.axis_color,
            );

            let x = viewport.device_x(f64::from(tick)) as f32;
            surface.line(
                Line::vertical(x, origin.y + half, origin.y - half),
                style.line_thickness,
                style.axis_color,
            );
            surface.text(
                Point::new(x - 0.5 * label, origin.y + 0.5 * label),
                &text,
                label,
                style.axis_color,
            );
        }
    }

    /// Per-pixel polyline of the function across the canvas.
    pub fn draw_curve<S, F>(&self, surface: &mut S, function: &F, viewport: &Viewport)
    where
        S: DrawSurface + ?Sized,
        F: Integrand + ?Sized,
    {
        for segment in viewport.curve_segments(function) {
            surface.line(segment, self.style.line_thickness, self.style.curve_color);
        }
    }

    /// Marker at the world origin.
    pub fn draw_origin<S: DrawSurface + ?Sized>(&self, surface: &mut S, viewport: &Viewport) {
        surface.circle(viewport.origin(), self.style.origin_radius, self.style.origin_color);
    }

    /// Function name, interval, estimate and rule in screen space.
    ///
    /// Only the name is shown for a degenerate interval or a missing result.
    pub fn draw_summary<S, F>(&self, surface: &mut S, function: &F, result: Option<&IntegrationResult>)
    where
        S: DrawSurface + ?Sized,
        F: Integrand + ?Sized,
    {
        let style = &self.style;
        let (x, y) = style.summary_origin;
        let size = style.font_size;

        surface.text(Point::new(x, y), function.name(), size, style.text_color);

        let Some(result) = result else {
            return;
        };
        let request = result.request();
        if request.is_degenerate() {
            return;
        }

        for (column, text) in summary_columns(result) {
            surface.text(Point::new(column * size, y), &text, size, style.text_color);
        }
    }
}

/// Summary fields after the name, keyed by their column in font-size units.
fn summary_columns(result: &IntegrationResult) -> [(f32, String); 3] {
    let request = result.request();
    [
        (7.0, format!("[{:.6}, {:.6}]", request.lower, request.upper)),
        (20.0, format!("{:.6}", result.estimate())),
        (30.0, format!("Integration method: {}", request.rule)),
    ]
}
