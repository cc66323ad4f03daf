use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use terragrid::{encode, generate, HgtTile, JobConfig};

pub fn run(
    config_path: PathBuf,
    out_bin: Option<PathBuf>,
    out_meta: Option<PathBuf>,
) -> Result<()> {
    let mut config = JobConfig::from_file(&config_path)
        .with_context(|| format!("failed to load job config {}", config_path.display()))?;
    if let Some(path) = out_bin {
        config.out_bin = Some(path);
    }
    if let Some(path) = out_meta {
        config.out_meta = Some(path);
    }

    let raster = HgtTile::open(&config.raster_path)
        .with_context(|| format!("failed to open raster {}", config.raster_path.display()))?;
    log::debug!(
        "raster: {:?}, sw corner {:?}",
        raster.resolution(),
        raster.sw_corner()
    );

    // Everything fallible happens before the first write: a failed run
    // must leave no output files behind.
    let (grid, metadata) = generate(&config, &raster).context("heightmap generation failed")?;
    let bytes = encode(&grid);
    let meta_json =
        serde_json::to_string_pretty(&metadata).context("failed to serialize metadata")?;

    let bin_path = config.out_bin();
    let meta_path = config.out_meta();
    if let Some(parent) = bin_path.parent() {
        fs::create_dir_all(parent)?;
    }
    if let Some(parent) = meta_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&bin_path, &bytes)
        .with_context(|| format!("failed to write {}", bin_path.display()))?;
    fs::write(&meta_path, meta_json)
        .with_context(|| format!("failed to write {}", meta_path.display()))?;

    eprintln!("Wrote: {} ({} bytes)", bin_path.display(), bytes.len());
    eprintln!("Meta : {}", meta_path.display());
    eprintln!(
        "Valid samples: {}/{}",
        grid.valid_count(),
        grid.side() * grid.side()
    );

    Ok(())
}
