//! Affine pixel transforms.
//!
//! Both the destination grid and source rasters describe their georeferencing
//! with the same six-coefficient affine mapping used by GDAL and rasterio:
//!
//! ```text
//! x = a * col + b * row + c
//! y = d * col + e * row + f
//! ```
//!
//! For north-up rasters `b` and `d` are zero, `a` is the pixel width and `e`
//! the (negative) pixel height, but the inverse below handles the general
//! rotated case.

use crate::error::{HeightmapError, Result};

/// A 2D affine transform from pixel indices (col, row) to world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Map fractional pixel indices to world coordinates.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// The inverse transform, mapping world coordinates back to fractional
    /// pixel indices.
    ///
    /// Fails with [`HeightmapError::SingularTransform`] if the linear part
    /// has no inverse (zero-area pixels).
    pub fn inverse(&self) -> Result<Affine> {
        let det = self.a * self.e - self.b * self.d;
        if det == 0.0 || !det.is_finite() {
            return Err(HeightmapError::SingularTransform);
        }
        let inv_a = self.e / det;
        let inv_b = -self.b / det;
        let inv_d = -self.d / det;
        let inv_e = self.a / det;
        Ok(Affine {
            a: inv_a,
            b: inv_b,
            c: -(inv_a * self.c + inv_b * self.f),
            d: inv_d,
            e: inv_e,
            f: -(inv_d * self.c + inv_e * self.f),
        })
    }
}
