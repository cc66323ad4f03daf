//! SRTM `.hgt` raster source.
//!
//! `.hgt` files are headerless grids of big-endian 16-bit elevation samples
//! covering a 1° × 1° geodetic cell, named after their southwest corner
//! (`N35E138.hgt`). Resolution is detected from the file size:
//!
//! - **SRTM1**: 3601 × 3601 samples, 1 arc-second (~30 m)
//! - **SRTM3**: 1201 × 1201 samples, 3 arc-second (~90 m)
//!
//! Row 0 is the north edge. The file is memory-mapped, so loading a tile is
//! cheap and sampling touches only the pages the resampler actually reads.

use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{HeightmapError, Result};
use crate::raster::RasterSource;
use crate::transform::Affine;

/// File size for SRTM1: 3601 × 3601 × 2 bytes.
const SRTM1_SIZE: usize = 3601 * 3601 * 2;

/// File size for SRTM3: 1201 × 1201 × 2 bytes.
const SRTM3_SIZE: usize = 1201 * 1201 * 2;

/// Value marking voids in SRTM data.
const HGT_VOID: i16 = -32768;

/// Resolution of an `.hgt` tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HgtResolution {
    /// 1 arc-second (~30 m), 3601 samples per side.
    Srtm1,
    /// 3 arc-second (~90 m), 1201 samples per side.
    Srtm3,
}

impl HgtResolution {
    /// Samples per row/column.
    pub fn samples(&self) -> usize {
        match self {
            HgtResolution::Srtm1 => 3601,
            HgtResolution::Srtm3 => 1201,
        }
    }

    /// Sample spacing in arc-seconds.
    pub fn arcseconds(&self) -> f64 {
        match self {
            HgtResolution::Srtm1 => 1.0,
            HgtResolution::Srtm3 => 3.0,
        }
    }
}

/// A memory-mapped `.hgt` elevation tile.
pub struct HgtTile {
    data: Mmap,
    samples: usize,
    resolution: HgtResolution,
    /// Southwest corner latitude (integer degrees).
    sw_lat: i32,
    /// Southwest corner longitude (integer degrees).
    sw_lon: i32,
}

impl HgtTile {
    /// Open a tile, taking the southwest corner from the filename.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (sw_lat, sw_lon) = parse_sw_corner(path.as_ref()).ok_or_else(|| {
            HeightmapError::InvalidRasterName {
                path: path.as_ref().to_path_buf(),
            }
        })?;
        Self::open_with_corner(path, sw_lat, sw_lon)
    }

    /// Open a tile with an explicit southwest corner, for files that do not
    /// follow the `N35E138.hgt` naming convention.
    pub fn open_with_corner<P: AsRef<Path>>(path: P, sw_lat: i32, sw_lon: i32) -> Result<Self> {
        let file = File::open(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                HeightmapError::RasterNotFound {
                    path: path.as_ref().to_path_buf(),
                }
            } else {
                HeightmapError::Io(e)
            }
        })?;

        // SAFETY: the file is opened read-only and the mapping is never
        // exposed mutably. Truncation by another process while mapped is
        // undefined behavior we accept, as every mmap consumer does.
        let mmap = unsafe { Mmap::map(&file)? };

        let resolution = match mmap.len() {
            SRTM1_SIZE => HgtResolution::Srtm1,
            SRTM3_SIZE => HgtResolution::Srtm3,
            size => return Err(HeightmapError::InvalidRasterSize { size }),
        };

        Ok(Self {
            data: mmap,
            samples: resolution.samples(),
            resolution,
            sw_lat,
            sw_lon,
        })
    }

    /// Resolution of this tile.
    pub fn resolution(&self) -> HgtResolution {
        self.resolution
    }

    /// Southwest corner as (lat, lon) integer degrees.
    pub fn sw_corner(&self) -> (i32, i32) {
        (self.sw_lat, self.sw_lon)
    }
}

impl RasterSource for HgtTile {
    fn dimensions(&self) -> (usize, usize) {
        (self.samples, self.samples)
    }

    fn transform(&self) -> Affine {
        // Sample centers sit on the degree lines: column 0 at sw_lon,
        // row 0 at the north edge sw_lat + 1.
        let spacing = 1.0 / (self.samples - 1) as f64;
        Affine::new(
            spacing,
            0.0,
            f64::from(self.sw_lon),
            0.0,
            -spacing,
            f64::from(self.sw_lat + 1),
        )
    }

    fn nodata(&self) -> Option<f64> {
        Some(f64::from(HGT_VOID))
    }

    fn crs_coords(&self, lat: f64, lon: f64) -> (f64, f64) {
        (lon, lat)
    }

    fn read(&self, col: usize, row: usize) -> Result<f64> {
        let offset = (row * self.samples + col) * 2;
        let value = i16::from_be_bytes([self.data[offset], self.data[offset + 1]]);
        Ok(f64::from(value))
    }
}

/// Extract the southwest corner from an `.hgt` filename.
///
/// Accepts `N35E138.hgt`, lowercase prefixes, and full paths. Returns
/// `None` if the stem is not of the `{N|S}dd{E|W}ddd` form.
fn parse_sw_corner(path: &Path) -> Option<(i32, i32)> {
    let name = path.file_stem()?.to_str()?;
    if name.len() != 7 {
        return None;
    }
    let lat_sign = match &name[0..1] {
        "N" | "n" => 1,
        "S" | "s" => -1,
        _ => return None,
    };
    let lon_sign = match &name[3..4] {
        "E" | "e" => 1,
        "W" | "w" => -1,
        _ => return None,
    };
    let lat: i32 = name[1..3].parse().ok()?;
    let lon: i32 = name[4..7].parse().ok()?;
    Some((lat * lat_sign, lon * lon_sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const SRTM3_SAMPLES: usize = 1201;

    /// Write a synthetic SRTM3 tile with a few known samples.
    fn create_test_tile(dir: &Path, filename: &str) -> PathBuf {
        let mut data = vec![0u8; SRTM3_SIZE];

        // Northwest corner (row 0, col 0) = 1000 m.
        data[0..2].copy_from_slice(&1000i16.to_be_bytes());

        // Center (row 600, col 600) = 500 m.
        let center = (600 * SRTM3_SAMPLES + 600) * 2;
        data[center..center + 2].copy_from_slice(&500i16.to_be_bytes());

        // Southeast corner = void.
        let se = (1200 * SRTM3_SAMPLES + 1200) * 2;
        data[se..se + 2].copy_from_slice(&HGT_VOID.to_be_bytes());

        let path = dir.join(filename);
        let mut file = File::create(&path).unwrap();
        file.write_all(&data).unwrap();
        path
    }

    #[test]
    fn test_open_detects_resolution() {
        let tmp = TempDir::new().unwrap();
        let path = create_test_tile(tmp.path(), "N35E138.hgt");
        let tile = HgtTile::open(&path).unwrap();
        assert_eq!(tile.resolution(), HgtResolution::Srtm3);
        assert_eq!(tile.dimensions(), (1201, 1201));
        assert_eq!(tile.sw_corner(), (35, 138));
    }

    #[test]
    fn test_invalid_size_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("N35E138.hgt");
        File::create(&path).unwrap().write_all(&[0u8; 1000]).unwrap();
        assert!(matches!(
            HgtTile::open(&path),
            Err(HeightmapError::InvalidRasterSize { size: 1000 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("N00E000.hgt");
        assert!(matches!(
            HgtTile::open(&path),
            Err(HeightmapError::RasterNotFound { .. })
        ));
    }

    #[test]
    fn test_bad_filename_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tile.hgt");
        File::create(&path).unwrap();
        assert!(matches!(
            HgtTile::open(&path),
            Err(HeightmapError::InvalidRasterName { .. })
        ));
    }

    #[test]
    fn test_read_known_samples() {
        let tmp = TempDir::new().unwrap();
        let path = create_test_tile(tmp.path(), "N35E138.hgt");
        let tile = HgtTile::open(&path).unwrap();
        assert_eq!(tile.read(0, 0).unwrap(), 1000.0);
        assert_eq!(tile.read(600, 600).unwrap(), 500.0);
        assert_eq!(tile.read(1200, 1200).unwrap(), f64::from(HGT_VOID));
        assert_eq!(tile.read(1, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_georeferencing() {
        let tmp = TempDir::new().unwrap();
        let path = create_test_tile(tmp.path(), "N35E138.hgt");
        let tile = HgtTile::open(&path).unwrap();
        let t = tile.transform();
        // Row 0 is the north edge at 36°N, column 0 the west edge at 138°E.
        assert_eq!(t.apply(0.0, 0.0), (138.0, 36.0));
        // The last sample center lands on the southeast degree lines.
        let (lon, lat) = t.apply(1200.0, 1200.0);
        assert!((lon - 139.0).abs() < 1e-9);
        assert!((lat - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_sw_corner() {
        let p = |s: &str| parse_sw_corner(Path::new(s));
        assert_eq!(p("N35E138.hgt"), Some((35, 138)));
        assert_eq!(p("S12W077.hgt"), Some((-12, -77)));
        assert_eq!(p("/data/srtm/n00e000.hgt"), Some((0, 0)));
        assert_eq!(p("invalid.hgt"), None);
        assert_eq!(p("N35X138.hgt"), None);
        assert_eq!(p("NAAE138.hgt"), None);
    }
}
