//! Error type shared by every fallible plotting operation.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    /// The window or surface was requested with a zero dimension.
    #[error("invalid figure dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// The configured font file could not be loaded.
    #[error("failed to load font from {path}: {source}")]
    FontLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("series index {index} out of range (axes has {len} series)")]
    SeriesIndex { index: usize, len: usize },

    #[error("axes index {index} out of range (figure has {len} axes)")]
    AxesIndex { index: usize, len: usize },

    /// Coordinate slices handed to a plot call differ in length.
    #[error("coordinate lengths differ: x={x}, y={y}, z={z:?}")]
    LengthMismatch { x: usize, y: usize, z: Option<usize> },

    #[error("line thickness must be positive, got {0}")]
    InvalidThickness(f32),

    /// The surface cannot hand back its pixels.
    #[error("failed to read pixels: {0}")]
    Readback(String),

    #[error("failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
