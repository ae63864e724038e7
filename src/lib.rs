//! # Riemann-Viz
//!
//! Interactive Riemann-sum explorer: approximate a definite integral with
//! left, right, midpoint or random sampling, and draw the partition bars,
//! axes and function curve on any drawing surface.
//!
//! ## Components
//!
//! - **Quadrature**: [`quadrature::QuadratureEngine`] evaluates a function
//!   once per partition and memoizes the last request.
//! - **Coordinate mapping**: [`viewport::Viewport`] converts between world
//!   and device coordinates under the current pan and zoom.
//! - **Rendering**: [`plot::IntegralPlot`] issues rectangles, lines, circles
//!   and text to a [`render::DrawSurface`]; a raster framebuffer (PNG) and an
//!   SVG document are bundled.
//!
//! ## Quick Start
//!
//! ```
//! use riemann_viz::prelude::*;
//!
//! let mut config = Config::new();
//! config.integration.seed = Some(7);
//! let mut explorer = Explorer::new(&config)?;
//! explorer.apply(Action::Key(3))?;
//!
//! let svg = explorer.render_svg()?;
//! assert!(svg.render().contains("Integration method: middle"));
//! # Ok::<(), riemann_viz::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli`: the `riemann-render` binary and its logger (default)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Device-space geometric primitives (points, lines, rectangles).
pub mod geometry;

/// Built-in functions and the integrand trait.
pub mod function;

/// Riemann-sum integration with a single-entry cache.
pub mod quadrature;

/// World/device coordinate mapping.
pub mod viewport;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Drawing surfaces and rasterization.
pub mod render;

/// Frame composition: bars, axes, curve, summary.
pub mod plot;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Session
// ============================================================================

/// YAML configuration.
pub mod config;

/// Host-driven session state.
pub mod explorer;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for riemann-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use riemann_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::explorer::{Action, Explorer};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::function::{Function, Integrand};
    pub use crate::geometry::{Line, Point, Rect};
    pub use crate::output::{PngEncoder, SvgEncoder};
    pub use crate::plot::{IntegralPlot, PlotStyle};
    pub use crate::quadrature::{IntegrationResult, QuadratureEngine, QuadratureRule};
    pub use crate::render::{DrawSurface, RecordingSurface};
    pub use crate::viewport::{Axis, ViewTransform, Viewport};
}
