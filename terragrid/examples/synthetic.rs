//! Generate a heightmap from a synthetic raster, no source data required.
//!
//! Run with: cargo run --example synthetic -- /tmp/out

use std::env;
use std::fs;
use std::path::PathBuf;

use terragrid::{encode, generate, Affine, JobConfig, MemoryRaster};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("Usage: cargo run --example synthetic -- <output-dir>");
        std::process::exit(1);
    });
    fs::create_dir_all(&out_dir)?;

    // A conical island: 600 m peak at the center, sea level at the rim.
    let side = 201;
    let spacing = 0.0005; // ~55 m per pixel
    let values: Vec<f64> = (0..side * side)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            let dx = col as f64 - (side / 2) as f64;
            let dy = row as f64 - (side / 2) as f64;
            let r = (dx * dx + dy * dy).sqrt() / (side / 2) as f64;
            (600.0 * (1.0 - r)).max(0.0)
        })
        .collect();
    let half_span = spacing * (side / 2) as f64;
    let transform = Affine::new(spacing, 0.0, -half_span, 0.0, -spacing, half_span);
    let raster = MemoryRaster::new(side, side, transform, None, values);

    let mut config = JobConfig::from_str(
        r#"{
            "origin": { "lat": 0.0, "lon": 0.0 },
            "grid": { "size_m": 8000.0, "samples": 257 },
            "raster_path": "synthetic"
        }"#,
    )?;
    config.resolve_paths(&out_dir);

    let (grid, metadata) = generate(&config, &raster)?;

    fs::write(config.out_bin(), encode(&grid))?;
    fs::write(
        config.out_meta(),
        serde_json::to_string_pretty(&metadata)?,
    )?;

    println!("Wrote: {}", config.out_bin().display());
    println!("Meta : {}", config.out_meta().display());
    println!(
        "Valid samples: {}/{}",
        grid.valid_count(),
        grid.side() * grid.side()
    );
    if let (Some(min), Some(max)) = (metadata.min, metadata.max) {
        println!("Elevation range: {min}..{max} m");
    }

    Ok(())
}
