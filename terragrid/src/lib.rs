//! # terragrid
//!
//! Converts a geodetic elevation raster into a square grid of elevation
//! samples in a local planar frame, serialized as a compact binary
//! heightmap plus a JSON metadata sidecar.
//!
//! The destination frame is a local azimuthal equidistant plane centered on
//! a chosen origin: x east, y north, meters, distances from the origin true
//! to the ground. Each destination cell is projected back to geodetic
//! coordinates, located in the source raster through its own CRS and affine
//! transform, and filled with the nearest source sample or the nodata
//! sentinel `-32768`.
//!
//! ## Quick Start
//!
//! ```ignore
//! use terragrid::{encode, generate, HgtTile, JobConfig};
//!
//! let config = JobConfig::from_file("terrain_request.json")?;
//! let raster = HgtTile::open(&config.raster_path)?;
//!
//! let (grid, metadata) = generate(&config, &raster)?;
//! std::fs::write(config.out_bin(), encode(&grid))?;
//! std::fs::write(config.out_meta(), serde_json::to_string_pretty(&metadata)?)?;
//! ```
//!
//! ## Output Format
//!
//! The binary is headerless: exactly `samples × samples` little-endian
//! signed 16-bit integers in row-major order, row 0 at the north edge,
//! column 0 at the west edge. The sidecar record carries everything needed
//! to interpret it (origin, grid geometry, format descriptor, observed
//! elevation range).

pub mod config;
pub mod encode;
pub mod error;
pub mod grid;
pub mod hgt;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod resample;
pub mod transform;

// Re-export the main types at the crate root for convenience.
pub use config::JobConfig;
pub use encode::{encode, FormatDescriptor, Metadata};
pub use error::{HeightmapError, Result};
pub use grid::{CenterOffset, DestinationGrid, GridSpec};
pub use hgt::{HgtResolution, HgtTile};
pub use pipeline::generate;
pub use projection::{AeqdProjection, Origin};
pub use raster::{MemoryRaster, RasterSource};
pub use resample::{resample, SampleGrid, NODATA};
pub use transform::Affine;
