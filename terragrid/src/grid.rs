//! Destination grid geometry.
//!
//! A heightmap job samples a square of side `size_m` meters, centered on the
//! projection origin plus an optional planar offset, at `samples` × `samples`
//! evenly spaced points. Using `samples - 1` intervals puts the outermost
//! sample centers exactly on the square's edges, which is the convention a
//! renderer's vertex grid expects.

use serde::{Deserialize, Serialize};

use crate::error::{HeightmapError, Result};
use crate::transform::Affine;

/// Size and density of the square destination grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridSpec {
    /// Span of the square grid in meters.
    pub size_m: f64,
    /// Side length in sample count. Must be at least 2.
    pub samples: usize,
}

impl GridSpec {
    /// Create a validated grid spec.
    pub fn new(size_m: f64, samples: usize) -> Result<Self> {
        let spec = Self { size_m, samples };
        spec.validate()?;
        Ok(spec)
    }

    /// Reject specs whose pixel spacing would be undefined.
    pub fn validate(&self) -> Result<()> {
        if self.samples < 2 {
            return Err(HeightmapError::InvalidGridSpec {
                samples: self.samples,
            });
        }
        Ok(())
    }

    /// Distance between adjacent sample centers in meters.
    ///
    /// Only meaningful for a validated spec; `samples >= 2` guarantees a
    /// nonzero divisor.
    pub fn pixel_spacing(&self) -> f64 {
        self.size_m / (self.samples - 1) as f64
    }
}

/// Planar offset of the sampled square relative to the projection origin.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CenterOffset {
    /// Eastward shift in meters.
    pub east_m: f64,
    /// Northward shift in meters.
    pub north_m: f64,
}

/// The affine geometry of the destination sampling grid.
///
/// Row 0 is the north edge (y decreases as row increases), column 0 the
/// west edge. A pure function of its inputs; built once per run and never
/// mutated.
#[derive(Debug, Clone)]
pub struct DestinationGrid {
    transform: Affine,
    samples: usize,
}

impl DestinationGrid {
    /// Build the grid geometry from a spec and center offset.
    ///
    /// Fails with [`HeightmapError::InvalidGridSpec`] if the spec does not
    /// define a pixel spacing.
    pub fn new(spec: &GridSpec, center: &CenterOffset) -> Result<Self> {
        spec.validate()?;
        let pixel = spec.pixel_spacing();
        let half = spec.size_m / 2.0;
        let x0 = center.east_m - half;
        let y0 = center.north_m + half;
        Ok(Self {
            transform: Affine::new(pixel, 0.0, x0, 0.0, -pixel, y0),
            samples: spec.samples,
        })
    }

    /// Side length in samples.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// The grid's pixel-to-local-meters affine transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Local-plane coordinate of the sample center at (row, col).
    pub fn local_xy(&self, row: usize, col: usize) -> (f64, f64) {
        self.transform.apply(col as f64, row as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pixel_spacing_spans_grid() {
        for (size_m, samples) in [(200.0, 3), (1000.0, 2), (8000.0, 257)] {
            let spec = GridSpec::new(size_m, samples).unwrap();
            assert_relative_eq!(
                spec.pixel_spacing() * (samples - 1) as f64,
                size_m,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_single_sample_rejected() {
        assert!(matches!(
            GridSpec::new(200.0, 1),
            Err(HeightmapError::InvalidGridSpec { samples: 1 })
        ));
        assert!(matches!(
            GridSpec::new(200.0, 0),
            Err(HeightmapError::InvalidGridSpec { samples: 0 })
        ));
    }

    #[test]
    fn test_two_samples_valid() {
        let spec = GridSpec::new(0.0, 2).unwrap();
        assert_eq!(spec.pixel_spacing(), 0.0);
    }

    #[test]
    fn test_grid_corners() {
        let spec = GridSpec::new(200.0, 3).unwrap();
        let center = CenterOffset {
            east_m: 10.0,
            north_m: -20.0,
        };
        let grid = DestinationGrid::new(&spec, &center).unwrap();
        // (0, 0) is the northwest corner, (samples-1, samples-1) the
        // southeast corner.
        assert_eq!(grid.local_xy(0, 0), (10.0 - 100.0, -20.0 + 100.0));
        assert_eq!(grid.local_xy(2, 2), (10.0 + 100.0, -20.0 - 100.0));
    }

    #[test]
    fn test_nine_cell_layout() {
        // samples=3, size_m=200, no offset: cell centers land on a
        // 100-meter lattice.
        let spec = GridSpec::new(200.0, 3).unwrap();
        let grid = DestinationGrid::new(&spec, &CenterOffset::default()).unwrap();
        let expected = [
            (-100.0, 100.0),
            (0.0, 100.0),
            (100.0, 100.0),
            (-100.0, 0.0),
            (0.0, 0.0),
            (100.0, 0.0),
            (-100.0, -100.0),
            (0.0, -100.0),
            (100.0, -100.0),
        ];
        for (i, &(ex, ey)) in expected.iter().enumerate() {
            let (x, y) = grid.local_xy(i / 3, i % 3);
            assert_eq!((x, y), (ex, ey), "cell {i}");
        }
    }
}
