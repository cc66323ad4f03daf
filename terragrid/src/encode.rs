//! Binary heightmap encoding and the metadata sidecar record.
//!
//! The binary layout is deliberately headerless: exactly
//! `samples × samples × 2` bytes of little-endian signed 16-bit integers in
//! row-major order (row 0 north, column 0 west). Everything a consumer
//! needs to interpret the bytes lives in the metadata record written next
//! to it.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::grid::{CenterOffset, GridSpec};
use crate::projection::Origin;
use crate::resample::{SampleGrid, NODATA};

/// Serialize a sample grid to its binary layout.
///
/// Pure: identical grids produce identical bytes.
pub fn encode(grid: &SampleGrid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(grid.cells().len() * 2);
    for &cell in grid.cells() {
        buf.extend_from_slice(&cell.to_le_bytes());
    }
    buf
}

/// Description of the binary sample format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDescriptor {
    pub dtype: String,
    pub endian: String,
    pub layout: String,
}

impl Default for FormatDescriptor {
    fn default() -> Self {
        Self {
            dtype: "int16".to_string(),
            endian: "little".to_string(),
            layout: "row-major".to_string(),
        }
    }
}

/// Sidecar record describing a written heightmap.
///
/// `min` and `max` are observed over valid cells only and are `null` when
/// the grid contains no valid sample, which is a legitimate outcome for a
/// tile entirely outside source coverage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub origin: Origin,
    pub grid: GridSpec,
    pub center_offset: CenterOffset,
    pub format: FormatDescriptor,
    pub nodata_out: i16,
    pub min: Option<i16>,
    pub max: Option<i16>,
    pub out_bin: PathBuf,
}

impl Metadata {
    /// Build the record for a filled grid.
    pub fn new(
        origin: Origin,
        grid: GridSpec,
        center_offset: CenterOffset,
        out_bin: PathBuf,
        samples: &SampleGrid,
    ) -> Self {
        let range = samples.min_max();
        Self {
            origin,
            grid,
            center_offset,
            format: FormatDescriptor::default(),
            nodata_out: NODATA,
            min: range.map(|(lo, _)| lo),
            max: range.map(|(_, hi)| hi),
            out_bin,
        }
    }
}
