//! Nearest-neighbor resampling into the destination grid.
//!
//! For every destination cell the resampler walks the full coordinate
//! chain: grid index → local meters → geodetic degrees → source CRS →
//! fractional source pixel → nearest source sample. Cells that land outside
//! the source raster, or on its nodata value, become [`NODATA`]; a failed
//! source read aborts the run.
//!
//! Each cell depends only on its own coordinates, so rows are filled in
//! parallel over disjoint slices of the output; the result is identical for
//! any thread count.

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::error::Result;
use crate::grid::DestinationGrid;
use crate::projection::AeqdProjection;
use crate::raster::RasterSource;
use crate::transform::Affine;

/// Sentinel for cells with no valid elevation sample.
pub const NODATA: i16 = -32768;

/// Valid output values are clamped into this range; the lower bound leaves
/// the sentinel unambiguous.
const CLAMP_MIN: f64 = -32767.0;
const CLAMP_MAX: f64 = 32767.0;

/// A square matrix of elevation samples, row-major, row 0 at the north edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleGrid {
    side: usize,
    cells: Vec<i16>,
}

impl SampleGrid {
    /// A grid of `side` × `side` cells, all nodata.
    pub fn filled_nodata(side: usize) -> Self {
        Self {
            side,
            cells: vec![NODATA; side * side],
        }
    }

    /// Side length in samples.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Cell value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> i16 {
        self.cells[row * self.side + col]
    }

    /// Set the cell at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: i16) {
        self.cells[row * self.side + col] = value;
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[i16] {
        &self.cells
    }

    /// Number of cells holding a valid sample.
    pub fn valid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != NODATA).count()
    }

    /// Observed (min, max) over valid cells, or `None` if every cell is
    /// nodata.
    pub fn min_max(&self) -> Option<(i16, i16)> {
        let mut range: Option<(i16, i16)> = None;
        for &cell in &self.cells {
            if cell == NODATA {
                continue;
            }
            range = Some(match range {
                None => (cell, cell),
                Some((lo, hi)) => (lo.min(cell), hi.max(cell)),
            });
        }
        range
    }
}

/// Fill a sample grid from the source raster.
///
/// Out-of-coverage and nodata cells are normal outcomes; any source read
/// error is fatal and no grid is returned. Source values outside the 16-bit
/// range are clamped and counted, and the count logged at warn level.
pub fn resample<R: RasterSource + Sync>(
    grid: &DestinationGrid,
    projection: &AeqdProjection,
    raster: &R,
) -> Result<SampleGrid> {
    let to_pixel = raster.transform().inverse()?;
    let (width, height) = raster.dimensions();
    let nodata = raster.nodata();
    let side = grid.samples();
    let clamped = AtomicU64::new(0);

    let mut out = SampleGrid::filled_nodata(side);
    out.cells
        .par_chunks_mut(side)
        .enumerate()
        .try_for_each(|(row, out_row)| -> Result<()> {
            for (col, cell) in out_row.iter_mut().enumerate() {
                let (x, y) = grid.local_xy(row, col);
                let (lat, lon) = projection.inverse(x, y);
                let (cx, cy) = raster.crs_coords(lat, lon);
                *cell = sample_nearest(
                    raster, &to_pixel, width, height, nodata, cx, cy, &clamped,
                )?;
            }
            Ok(())
        })?;

    let clamped = clamped.load(Ordering::Relaxed);
    if clamped > 0 {
        log::warn!("{clamped} source value(s) outside the 16-bit output range were clamped");
    }

    Ok(out)
}

/// Sample the nearest source pixel at CRS coordinates (cx, cy).
#[allow(clippy::too_many_arguments)]
fn sample_nearest<R: RasterSource>(
    raster: &R,
    to_pixel: &Affine,
    width: usize,
    height: usize,
    nodata: Option<f64>,
    cx: f64,
    cy: f64,
    clamped: &AtomicU64,
) -> Result<i16> {
    let (col_f, row_f) = to_pixel.apply(cx, cy);
    let col = col_f.round();
    let row = row_f.round();
    if !col.is_finite() || !row.is_finite() || col < 0.0 || row < 0.0 {
        return Ok(NODATA);
    }
    let (col, row) = (col as usize, row as usize);
    if col >= width || row >= height {
        return Ok(NODATA);
    }

    let value = raster.read(col, row)?;
    // NaN never equals a declared sentinel and cannot be cast meaningfully,
    // so it is treated as missing data as well.
    if value.is_nan() || nodata == Some(value) {
        return Ok(NODATA);
    }

    let rounded = value.round();
    if rounded < CLAMP_MIN || rounded > CLAMP_MAX {
        clamped.fetch_add(1, Ordering::Relaxed);
        return Ok(if rounded < CLAMP_MIN {
            CLAMP_MIN as i16
        } else {
            CLAMP_MAX as i16
        });
    }
    Ok(rounded as i16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CenterOffset, GridSpec};
    use crate::raster::MemoryRaster;

    fn grid_3x200() -> DestinationGrid {
        let spec = GridSpec::new(200.0, 3).unwrap();
        DestinationGrid::new(&spec, &CenterOffset::default()).unwrap()
    }

    /// A raster covering roughly ±1 km around (0, 0) at ~111 m spacing.
    fn covering_raster(value: f64) -> MemoryRaster {
        MemoryRaster::uniform(21, 21, (0.01, -0.01), 0.001, value)
    }

    #[test]
    fn test_uniform_coverage_fills_every_cell() {
        let grid = grid_3x200();
        let projection = AeqdProjection::new(0.0, 0.0);
        let raster = covering_raster(500.0);

        let out = resample(&grid, &projection, &raster).unwrap();
        assert_eq!(out.cells(), &[500i16; 9][..]);
        assert_eq!(out.min_max(), Some((500, 500)));
        assert_eq!(out.valid_count(), 9);
    }

    #[test]
    fn test_grid_outside_coverage_is_all_nodata() {
        let grid = grid_3x200();
        let projection = AeqdProjection::new(0.0, 0.0);
        // Raster is on the other side of the planet.
        let raster = MemoryRaster::uniform(10, 10, (50.0, 120.0), 0.001, 7.0);

        let out = resample(&grid, &projection, &raster).unwrap();
        assert_eq!(out.cells(), &[NODATA; 9][..]);
        assert_eq!(out.min_max(), None);
        assert_eq!(out.valid_count(), 0);
    }

    #[test]
    fn test_source_nodata_propagates() {
        let grid = grid_3x200();
        let projection = AeqdProjection::new(0.0, 0.0);
        let t = crate::transform::Affine::new(0.001, 0.0, -0.01, 0.0, -0.001, 0.01);
        let raster = MemoryRaster::new(21, 21, t, Some(-9999.0), vec![-9999.0; 441]);

        let out = resample(&grid, &projection, &raster).unwrap();
        assert_eq!(out.cells(), &[NODATA; 9][..]);
    }

    #[test]
    fn test_partial_coverage() {
        let grid = grid_3x200();
        let projection = AeqdProjection::new(0.0, 0.0);
        // Covers only the northern half of the destination square: the
        // southernmost pixel centers sit just north of y = 0.
        let raster = MemoryRaster::uniform(21, 11, (0.01, -0.01), 0.001, 42.0);

        let out = resample(&grid, &projection, &raster).unwrap();
        // North row valid, south row nodata.
        assert_eq!(out.get(0, 0), 42);
        assert_eq!(out.get(0, 2), 42);
        assert_eq!(out.get(2, 0), NODATA);
        assert_eq!(out.get(2, 2), NODATA);
        assert!(out.valid_count() >= 3 && out.valid_count() < 9);
    }

    #[test]
    fn test_out_of_range_values_clamped_away_from_sentinel() {
        let grid = grid_3x200();
        let projection = AeqdProjection::new(0.0, 0.0);

        let high = covering_raster(100_000.0);
        let out = resample(&grid, &projection, &high).unwrap();
        assert_eq!(out.cells(), &[32767i16; 9][..]);

        let low = covering_raster(-100_000.0);
        let out = resample(&grid, &projection, &low).unwrap();
        // Clamped low values must stay distinguishable from nodata.
        assert_eq!(out.cells(), &[-32767i16; 9][..]);
        assert_eq!(out.valid_count(), 9);
    }

    #[test]
    fn test_nan_source_values_become_nodata() {
        let grid = grid_3x200();
        let projection = AeqdProjection::new(0.0, 0.0);
        let t = crate::transform::Affine::new(0.001, 0.0, -0.01, 0.0, -0.001, 0.01);
        let raster = MemoryRaster::new(21, 21, t, None, vec![f64::NAN; 441]);

        let out = resample(&grid, &projection, &raster).unwrap();
        assert_eq!(out.cells(), &[NODATA; 9][..]);
    }

    #[test]
    fn test_deterministic_across_runs() {
        let spec = GridSpec::new(2000.0, 33).unwrap();
        let grid = DestinationGrid::new(&spec, &CenterOffset::default()).unwrap();
        let projection = AeqdProjection::new(35.36, 138.72);
        // A gradient raster so ordering bugs would actually show.
        let values: Vec<f64> = (0..441).map(|i| f64::from(i % 97)).collect();
        let t = crate::transform::Affine::new(0.002, 0.0, 138.72 - 0.021, 0.0, -0.002, 35.36 + 0.021);
        let raster = MemoryRaster::new(21, 21, t, None, values);

        let a = resample(&grid, &projection, &raster).unwrap();
        let b = resample(&grid, &projection, &raster).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_min_max_over_valid_cells_only() {
        let mut grid = SampleGrid::filled_nodata(2);
        grid.set(0, 0, 10);
        grid.set(1, 1, -5);
        assert_eq!(grid.min_max(), Some((-5, 10)));
        assert_eq!(grid.valid_count(), 2);
    }
}
