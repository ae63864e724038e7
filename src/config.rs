//! YAML configuration for the explorer session and renderer.
//!
//! Every field has a default, so an empty document is a valid config.
//!
//! ```yaml
//! canvas:
//!   width: 1430
//!   height: 1020
//! view:
//!   scale_x: 120.0
//!   scale_bounds: { min: 0.5, max: 400.0 }
//! integration:
//!   function: sin2
//!   partitions: 30
//!   rule: mid_point
//!   seed: 7
//! ```

use crate::error::{Error, Result};
use crate::function::Function;
use crate::plot::PlotStyle;
use crate::quadrature::QuadratureRule;
use crate::viewport::{ScaleBounds, ViewTransform};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Drawing surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width in pixels.
    #[serde(default = "default_canvas_width")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default = "default_canvas_height")]
    pub height: u32,
}

fn default_canvas_width() -> u32 {
    1430
}
fn default_canvas_height() -> u32 {
    1020
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Initial view and pan/zoom behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Initial horizontal pan.
    #[serde(default = "default_offset_x")]
    pub offset_x: f64,
    /// Initial vertical pan.
    #[serde(default = "default_offset_y")]
    pub offset_y: f64,
    /// Initial and reset horizontal scale.
    #[serde(default = "default_scale")]
    pub scale_x: f64,
    /// Initial and reset vertical scale.
    #[serde(default = "default_scale")]
    pub scale_y: f64,
    /// Limits applied on every zoom step.
    #[serde(default)]
    pub scale_bounds: ScaleBounds,
    /// Pixels panned per wheel notch.
    #[serde(default = "default_pan_step")]
    pub pan_step: f64,
    /// Scale multiplier per zoom-in notch.
    #[serde(default = "default_zoom_in")]
    pub zoom_in: f64,
    /// Scale multiplier per zoom-out notch.
    #[serde(default = "default_zoom_out")]
    pub zoom_out: f64,
}

fn default_offset_x() -> f64 {
    500.0
}
fn default_offset_y() -> f64 {
    -50.0
}
fn default_scale() -> f64 {
    200.0
}
fn default_pan_step() -> f64 {
    10.0
}
fn default_zoom_in() -> f64 {
    1.1
}
fn default_zoom_out() -> f64 {
    0.9
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            offset_x: default_offset_x(),
            offset_y: default_offset_y(),
            scale_x: default_scale(),
            scale_y: default_scale(),
            scale_bounds: ScaleBounds::default(),
            pan_step: default_pan_step(),
            zoom_in: default_zoom_in(),
            zoom_out: default_zoom_out(),
        }
    }
}

impl ViewConfig {
    /// The transform a session starts with.
    #[must_use]
    pub fn initial_transform(&self) -> ViewTransform {
        ViewTransform::new((self.offset_x, self.offset_y), self.initial_scale())
    }

    /// Scale restored by a reset.
    #[must_use]
    pub fn initial_scale(&self) -> (f64, f64) {
        (
            self.scale_bounds.clamp(self.scale_x),
            self.scale_bounds.clamp(self.scale_y),
        )
    }
}

/// Initial integration parameters and host-side limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Initially selected function.
    #[serde(default)]
    pub function: Function,
    /// Initial lower bound.
    #[serde(default = "default_lower")]
    pub lower: f64,
    /// Initial upper bound.
    #[serde(default = "default_upper")]
    pub upper: f64,
    /// Partition count.
    #[serde(default = "default_partitions")]
    pub partitions: usize,
    /// Initially selected rule.
    #[serde(default)]
    pub rule: QuadratureRule,
    /// Smallest bound the host may set.
    #[serde(default = "default_bound_min")]
    pub bound_min: f64,
    /// Largest bound the host may set.
    #[serde(default = "default_bound_max")]
    pub bound_max: f64,
    /// Seed for the random rule; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_lower() -> f64 {
    0.0
}
fn default_upper() -> f64 {
    2.0
}
fn default_partitions() -> usize {
    15
}
fn default_bound_min() -> f64 {
    -10.0
}
fn default_bound_max() -> f64 {
    10.0
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            function: Function::default(),
            lower: default_lower(),
            upper: default_upper(),
            partitions: default_partitions(),
            rule: QuadratureRule::default(),
            bound_min: default_bound_min(),
            bound_max: default_bound_max(),
            seed: None,
        }
    }
}

impl IntegrationConfig {
    /// Clamp a bound into `[bound_min, bound_max]`.
    #[must_use]
    pub fn clamp_bound(&self, value: f64) -> f64 {
        value.max(self.bound_min).min(self.bound_max)
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Canvas size.
    #[serde(default)]
    pub canvas: CanvasConfig,
    /// View behavior.
    #[serde(default)]
    pub view: ViewConfig,
    /// Integration parameters.
    #[serde(default)]
    pub integration: IntegrationConfig,
    /// Plot colors and sizes.
    #[serde(default)]
    pub style: PlotStyle,
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Reject values the session cannot run with.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPartitionCount`] for zero partitions,
    /// [`Error::InvalidDimensions`] for an empty canvas.
    pub fn validate(&self) -> Result<()> {
        if self.integration.partitions == 0 {
            return Err(Error::InvalidPartitionCount {
                partitions: self.integration.partitions,
            });
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::InvalidDimensions {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        Ok(())
    }
}
