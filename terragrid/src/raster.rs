//! Source raster abstraction.
//!
//! The resampler consumes any elevation raster through [`RasterSource`]:
//! pixel dimensions, a pixel→CRS affine transform, a nullable nodata value,
//! a conversion from geodetic degrees into the raster's own CRS, and a
//! fallible single-band read. This is the same surface rasterio exposes for
//! a dataset, reduced to what nearest-neighbor sampling needs.
//!
//! The CRS conversion lives on the source because the source's coordinate
//! reference is arbitrary: a geodetic raster returns `(lon, lat)` unchanged,
//! a projected one applies its own projection math.

use crate::error::Result;
use crate::transform::Affine;

/// A single-band elevation raster the resampler can sample from.
pub trait RasterSource {
    /// Pixel dimensions as (columns, rows).
    fn dimensions(&self) -> (usize, usize);

    /// Affine transform from fractional pixel (col, row) to CRS coordinates.
    fn transform(&self) -> Affine;

    /// The value this raster uses to mark missing data, if it declares one.
    fn nodata(&self) -> Option<f64>;

    /// Convert geodetic degrees into this raster's CRS coordinates.
    fn crs_coords(&self, lat: f64, lon: f64) -> (f64, f64);

    /// Read the elevation value at (col, row).
    ///
    /// Callers stay within [`Self::dimensions`]; a read failure is fatal
    /// for the whole run.
    fn read(&self, col: usize, row: usize) -> Result<f64>;
}

/// An in-memory geodetic raster.
///
/// Rows run north to south, columns west to east, matching the common
/// north-up raster layout. Mainly used by tests, benches, and synthetic
/// data generation, but also a reasonable carrier for rasters decoded
/// elsewhere.
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    width: usize,
    height: usize,
    transform: Affine,
    nodata: Option<f64>,
    values: Vec<f64>,
}

impl MemoryRaster {
    /// Create a raster from row-major values.
    ///
    /// `transform` maps (col, row) to (lon, lat) degrees.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != width * height`.
    pub fn new(
        width: usize,
        height: usize,
        transform: Affine,
        nodata: Option<f64>,
        values: Vec<f64>,
    ) -> Self {
        assert_eq!(values.len(), width * height, "value count must match dimensions");
        Self {
            width,
            height,
            transform,
            nodata,
            values,
        }
    }

    /// A raster of uniform elevation covering a north-up geodetic window.
    ///
    /// `nw` is the (lat, lon) of the northwest pixel center and `pixel_deg`
    /// the spacing in degrees.
    pub fn uniform(
        width: usize,
        height: usize,
        nw: (f64, f64),
        pixel_deg: f64,
        value: f64,
    ) -> Self {
        let (nw_lat, nw_lon) = nw;
        let transform = Affine::new(pixel_deg, 0.0, nw_lon, 0.0, -pixel_deg, nw_lat);
        Self::new(width, height, transform, None, vec![value; width * height])
    }
}

impl RasterSource for MemoryRaster {
    fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn transform(&self) -> Affine {
        self.transform
    }

    fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    fn crs_coords(&self, lat: f64, lon: f64) -> (f64, f64) {
        // Geodetic CRS: x is longitude, y is latitude.
        (lon, lat)
    }

    fn read(&self, col: usize, row: usize) -> Result<f64> {
        Ok(self.values[row * self.width + col])
    }
}
