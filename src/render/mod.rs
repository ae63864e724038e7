//! Drawing surfaces and rasterization.
//!
//! The renderer in [`crate::plot`] speaks only [`DrawSurface`]. The raster
//! implementation for [`Framebuffer`](crate::framebuffer::Framebuffer) is
//! built from the primitives here.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: non-antialiased line drawing
//! - **Liang-Barsky**: segment clipping against the framebuffer
//! - **Midpoint Circle**: filled circle rendering
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Liang, Y.-D., & Barsky, B. A. (1984). "A new concept and method for line clipping."

mod primitives;
mod surface;

pub use primitives::{clip_line, draw_circle, draw_line, draw_rect, draw_segment};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface};
