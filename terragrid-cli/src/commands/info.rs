use std::path::PathBuf;

use anyhow::{Context, Result};
use terragrid::{HgtTile, RasterSource};

pub fn run(raster_path: PathBuf) -> Result<()> {
    let tile = HgtTile::open(&raster_path)
        .with_context(|| format!("failed to open raster {}", raster_path.display()))?;

    let (width, height) = tile.dimensions();
    let (sw_lat, sw_lon) = tile.sw_corner();

    println!("File      : {}", raster_path.display());
    println!("Resolution: {:?} ({} arcsec)", tile.resolution(), tile.resolution().arcseconds());
    println!("Samples   : {width} x {height}");
    println!(
        "Coverage  : lat {sw_lat}..{} lon {sw_lon}..{}",
        sw_lat + 1,
        sw_lon + 1
    );
    if let Some(nodata) = tile.nodata() {
        println!("Nodata    : {nodata}");
    }

    // Scan the elevation range; voids are skipped.
    let nodata = tile.nodata();
    let mut range: Option<(f64, f64)> = None;
    for row in 0..height {
        for col in 0..width {
            let value = tile.read(col, row)?;
            if nodata == Some(value) {
                continue;
            }
            range = Some(match range {
                None => (value, value),
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
            });
        }
    }
    match range {
        Some((lo, hi)) => println!("Elevation : {lo}..{hi} m"),
        None => println!("Elevation : all void"),
    }

    Ok(())
}
