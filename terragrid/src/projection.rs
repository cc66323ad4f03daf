//! Local azimuthal equidistant projection.
//!
//! Maps between geodetic coordinates (degrees) and a local planar frame
//! centered on a reference point, where x points east, y points north, and
//! straight-line distance from the origin equals great-circle distance on
//! the ground. Uses a spherical Earth model, which is accurate to well
//! under a meter at heightmap-tile scales (a few kilometers).
//!
//! Formulas follow the standard spherical forms: forward is great-circle
//! distance plus initial bearing decomposed into east/north components,
//! inverse is the direct geodesic (destination point) from the origin.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// The geodetic anchor point of a heightmap job, in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Origin {
    pub lat: f64,
    pub lon: f64,
}

impl Origin {
    /// The local projection centered at this point.
    pub fn projection(&self) -> AeqdProjection {
        AeqdProjection::new(self.lat, self.lon)
    }
}

/// Azimuthal equidistant projection anchored at a geodetic origin.
///
/// The origin maps to (0, 0) exactly. Distances and directions from the
/// origin are preserved, which is what makes the projection suitable for
/// locally flat sampling grids.
///
/// # Example
///
/// ```
/// use terragrid::AeqdProjection;
///
/// let proj = AeqdProjection::new(46.8, 9.8);
/// let (x, y) = proj.forward(46.8, 9.8);
/// assert_eq!((x, y), (0.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct AeqdProjection {
    /// Origin latitude in degrees.
    origin_lat: f64,
    /// Origin longitude in degrees.
    origin_lon: f64,
    /// Origin longitude in radians.
    origin_lon_rad: f64,
    /// Cached sin of the origin latitude.
    sin_origin_lat: f64,
    /// Cached cos of the origin latitude.
    cos_origin_lat: f64,
}

impl AeqdProjection {
    /// Create a projection centered at the given origin (degrees).
    pub fn new(origin_lat: f64, origin_lon: f64) -> Self {
        let origin_lat_rad = origin_lat.to_radians();
        Self {
            origin_lat,
            origin_lon,
            origin_lon_rad: origin_lon.to_radians(),
            sin_origin_lat: origin_lat_rad.sin(),
            cos_origin_lat: origin_lat_rad.cos(),
        }
    }

    /// Origin latitude (degrees).
    pub fn origin_lat(&self) -> f64 {
        self.origin_lat
    }

    /// Origin longitude (degrees).
    pub fn origin_lon(&self) -> f64 {
        self.origin_lon
    }

    /// Project geodetic coordinates (degrees) to local east/north meters.
    ///
    /// The angular distance argument is clamped into the `acos` domain, so
    /// even near-antipodal input produces a finite result instead of NaN.
    pub fn forward(&self, lat: f64, lon: f64) -> (f64, f64) {
        let lat_rad = lat.to_radians();
        let d_lon = lon.to_radians() - self.origin_lon_rad;
        let (sin_lat, cos_lat) = lat_rad.sin_cos();
        let cos_d_lon = d_lon.cos();

        let cos_c = (self.sin_origin_lat * sin_lat
            + self.cos_origin_lat * cos_lat * cos_d_lon)
            .clamp(-1.0, 1.0);
        let distance = EARTH_RADIUS_M * cos_c.acos();

        // Initial bearing from the origin. atan2(0, 0) is 0, so the origin
        // itself decomposes to exactly (0, 0).
        let bearing = (d_lon.sin() * cos_lat)
            .atan2(self.cos_origin_lat * sin_lat - self.sin_origin_lat * cos_lat * cos_d_lon);

        (distance * bearing.sin(), distance * bearing.cos())
    }

    /// Recover geodetic coordinates (degrees) from local east/north meters.
    ///
    /// A zero offset returns the origin exactly. Longitude is wrapped to
    /// [-180, 180).
    pub fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let distance = x.hypot(y);
        if distance == 0.0 {
            return (self.origin_lat, self.origin_lon);
        }

        let bearing = x.atan2(y);
        let delta = distance / EARTH_RADIUS_M;
        let (sin_d, cos_d) = delta.sin_cos();

        let sin_lat = (self.sin_origin_lat * cos_d
            + self.cos_origin_lat * sin_d * bearing.cos())
        .clamp(-1.0, 1.0);
        let lat_rad = sin_lat.asin();

        let lon_rad = self.origin_lon_rad
            + (bearing.sin() * sin_d * self.cos_origin_lat).atan2(cos_d - self.sin_origin_lat * sin_lat);

        (lat_rad.to_degrees(), wrap_longitude(lon_rad.to_degrees()))
    }
}

/// Wrap a longitude in degrees to [-180, 180).
fn wrap_longitude(lon: f64) -> f64 {
    let mut lon = (lon + 180.0) % 360.0;
    if lon < 0.0 {
        lon += 360.0;
    }
    lon - 180.0
}
