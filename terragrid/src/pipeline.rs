//! End-to-end heightmap generation.
//!
//! [`generate`] is the whole engine behind one function: validate the job,
//! build the projection and destination grid, fill the sample grid from the
//! source raster, and compute the metadata record. It performs no file I/O
//! and keeps no process-wide state; writing the binary and sidecar belongs
//! to the caller, which must only do so when this function succeeds.

use crate::config::JobConfig;
use crate::encode::Metadata;
use crate::error::Result;
use crate::grid::DestinationGrid;
use crate::raster::RasterSource;
use crate::resample::{resample, SampleGrid};

/// Run a heightmap job against a source raster.
///
/// Returns the filled sample grid and its metadata record. Fails without
/// partial output on an invalid grid spec or any source read error.
pub fn generate<R: RasterSource + Sync>(
    config: &JobConfig,
    raster: &R,
) -> Result<(SampleGrid, Metadata)> {
    config.validate()?;

    let projection = config.origin.projection();
    let grid = DestinationGrid::new(&config.grid, &config.center_offset)?;

    log::info!(
        "resampling {samples}x{samples} grid spanning {size} m around ({lat}, {lon})",
        samples = config.grid.samples,
        size = config.grid.size_m,
        lat = config.origin.lat,
        lon = config.origin.lon,
    );

    let samples = resample(&grid, &projection, raster)?;

    let total = samples.side() * samples.side();
    log::info!("valid samples: {}/{}", samples.valid_count(), total);

    let metadata = Metadata::new(
        config.origin,
        config.grid,
        config.center_offset,
        config.out_bin(),
        &samples,
    );
    Ok((samples, metadata))
}
