//! Error types for riemann-viz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in riemann-viz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Partition count below one; the subinterval width would divide by zero.
    #[error("Invalid partition count: {partitions} (at least 1 partition is required)")]
    InvalidPartitionCount {
        /// Requested partition count.
        partitions: usize,
    },

    /// Invalid dimensions for a framebuffer or canvas.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Configuration file not found or unreadable.
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    /// Configuration parse error.
    #[error("Config parse error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred.
        line: usize,
        /// Parser message.
        message: String,
    },
}
