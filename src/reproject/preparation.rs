//! Preparation stage: copy a tile and stamp its projection

use std::path::{Path, PathBuf};

use gdal::cpl::CslStringList;
use log::{debug, info};

use crate::raster::dataset::{open_read_only, PartialOutput};
use crate::raster::driver::{capabilities, lookup_driver, require_capability, CAN_CREATE_COPY};
use crate::raster::errors::TileResult;
use crate::reproject::ReprojectionOptions;
use crate::utils::path_utils::destination_path;

/// Copy `source_path` into `destination_dir` and stamp the configured projection
///
/// The copy keeps the source file name. Running this twice for the same pair
/// overwrites the previous copy.
///
/// # Arguments
/// * `source_path` - Tile to copy
/// * `destination_dir` - Directory receiving the copy
/// * `options` - Driver and stamp projection to use
///
/// # Returns
/// Path of the prepared copy
pub fn prepare_image(
    source_path: &Path,
    destination_dir: &Path,
    options: &ReprojectionOptions,
) -> TileResult<PathBuf> {
    let source = open_read_only(source_path)?;

    let driver = lookup_driver(&options.driver_name)?;
    if capabilities(&driver).can_create {
        info!("Driver {} supports Create() method", driver.short_name());
    }
    require_capability(&driver, CAN_CREATE_COPY)?;

    let output_path = destination_path(source_path, destination_dir)?;
    let output = PartialOutput::new(&output_path);

    let mut copy = source.create_copy(&driver, &output_path, &CslStringList::new())?;
    drop(source);
    debug!("Copied {} to {}", source_path.display(), output_path.display());

    if let Some(stamp) = options.stamp_projection {
        let wkt = stamp.to_wkt()?;
        copy.set_projection(&wkt)?;
        info!("Stamped {} with {}", output_path.display(), stamp.description());
    }

    drop(copy);
    output.commit();

    Ok(output_path)
}
