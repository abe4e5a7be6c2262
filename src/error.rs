//! # Error Types
//!
//! Buffer construction and region errors are local, non-propagating
//! conditions: the operation is a no-op and the caller gets the reason.
//! [`RasterError`] wraps them together with the scene/IO failures of the
//! configuration layer.

use thiserror::Error;

/// Buffer-level failures. The buffer involved is always left unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Zero extent, or a non-zero stride smaller than the width
    #[error("Invalid dimensions: {width}x{height} with stride {stride}")]
    InvalidDimensions { width: u32, height: u32, stride: u32 },

    /// Requested view rectangle does not lie inside its parent
    #[error(
        "Slice {width}x{height} at ({x}, {y}) exceeds parent {parent_width}x{parent_height}"
    )]
    SliceOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        parent_width: u32,
        parent_height: u32,
    },

    /// Destination too small for the source placed at the requested offset
    #[error(
        "Copy region mismatch: {src_width}x{src_height} at ({x}, {y}) exceeds destination {dst_width}x{dst_height}"
    )]
    CopyRegionMismatch {
        x: u32,
        y: u32,
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },

    /// Whole-buffer copy between buffers of different extent
    #[error("Size mismatch: source {src_width}x{src_height}, destination {dst_width}x{dst_height}")]
    SizeMismatch {
        src_width: u32,
        src_height: u32,
        dst_width: u32,
        dst_height: u32,
    },

    /// Externally supplied storage does not match the declared layout
    #[error("Storage length {actual} does not match layout (expected {expected})")]
    StorageLength { expected: usize, actual: usize },
}

/// Main error type for rasterkit operations
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// Scene description is well-formed JSON but semantically invalid
    #[error("Scene error: {0}")]
    Scene(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SDL2 preview window failure
    #[error("Display error: {0}")]
    Display(String),
}

pub type Result<T, E = RasterError> = std::result::Result<T, E>;
