//! Job configuration.
//!
//! A heightmap job is described by a small JSON document:
//!
//! ```json
//! {
//!   "origin": { "lat": 46.8, "lon": 9.8 },
//!   "grid": { "size_m": 8000.0, "samples": 257 },
//!   "center_offset": { "east_m": 0.0, "north_m": 0.0 },
//!   "raster_path": "N46E009.hgt",
//!   "out_bin": "public/terrain.bin",
//!   "out_meta": "public/terrain.meta.json"
//! }
//! ```
//!
//! `center_offset` and the output paths are optional. Relative paths are
//! resolved against the directory containing the config file. Validation
//! happens once here, at the boundary, so an undersized grid fails with a
//! typed error before any raster is touched.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grid::{CenterOffset, GridSpec};
use crate::projection::Origin;

const DEFAULT_OUT_BIN: &str = "terrain.bin";
const DEFAULT_OUT_META: &str = "terrain.meta.json";

/// A validated heightmap job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Geodetic anchor of the local projection.
    pub origin: Origin,
    /// Destination grid size and density.
    pub grid: GridSpec,
    /// Planar shift of the sampled square. Defaults to none.
    #[serde(default)]
    pub center_offset: CenterOffset,
    /// Source elevation raster.
    pub raster_path: PathBuf,
    /// Output binary path override.
    #[serde(default)]
    pub out_bin: Option<PathBuf>,
    /// Output metadata path override.
    #[serde(default)]
    pub out_meta: Option<PathBuf>,
}

impl JobConfig {
    /// Load, validate, and path-resolve a config file.
    ///
    /// Relative paths in the document become absolute with respect to the
    /// config file's parent directory, matching how job files reference
    /// rasters sitting next to them.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(&path)?;
        let mut config = Self::from_str(&text)?;
        if let Some(base) = path.as_ref().parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Parse and validate a config document.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        let config: JobConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()
    }

    /// Make all paths absolute relative to `base_dir` and fill in output
    /// defaults.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        self.raster_path = resolve(base_dir, &self.raster_path);
        let out_bin = self
            .out_bin
            .take()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_BIN));
        self.out_bin = Some(resolve(base_dir, &out_bin));
        let out_meta = self
            .out_meta
            .take()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_META));
        self.out_meta = Some(resolve(base_dir, &out_meta));
    }

    /// Output binary path (default `terrain.bin`).
    pub fn out_bin(&self) -> PathBuf {
        self.out_bin
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_BIN))
    }

    /// Output metadata path (default `terrain.meta.json`).
    pub fn out_meta(&self) -> PathBuf {
        self.out_meta
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_META))
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
