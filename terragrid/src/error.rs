//! Error types for the terragrid library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a heightmap.
///
/// Every variant is fatal for the run it occurs in: the resampler never
/// emits a partial grid and the encoder is never invoked after a failure.
/// Per-cell conditions (a destination cell falling outside the source
/// raster, or landing on a source nodata pixel) are not errors; they are
/// recorded in the sample grid as the nodata sentinel.
#[derive(Error, Debug)]
pub enum HeightmapError {
    /// IO error when reading rasters or configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Job configuration could not be parsed.
    #[error("invalid job config: {0}")]
    Config(#[from] serde_json::Error),

    /// Grid side length too small to define a pixel spacing.
    #[error("grid requires at least 2 samples per side, got {samples}")]
    InvalidGridSpec { samples: usize },

    /// The source raster file was not found.
    #[error("source raster not found: {path}")]
    RasterNotFound { path: PathBuf },

    /// File size doesn't match any known `.hgt` layout.
    #[error("invalid .hgt file size: {size} bytes (expected 25934402 for SRTM1 or 2884802 for SRTM3)")]
    InvalidRasterSize { size: usize },

    /// The raster filename does not encode a southwest corner.
    #[error("cannot determine raster corner from filename: {path}")]
    InvalidRasterName { path: PathBuf },

    /// The source raster's pixel transform cannot be inverted.
    #[error("source raster transform is singular and cannot be inverted")]
    SingularTransform,
}

/// Result type alias using [`HeightmapError`].
pub type Result<T> = std::result::Result<T, HeightmapError>;
