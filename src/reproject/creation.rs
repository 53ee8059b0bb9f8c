//! Creation stage: build the reprojected output grid and warp into it

use std::path::{Path, PathBuf};

use gdal::Dataset;
use log::{debug, info};

use crate::raster::dataset::{
    band_data_type, create_with_raw_data_type, data_type_name, open_read_only, PartialOutput,
};
use crate::raster::driver::{lookup_driver, require_capability, CAN_CREATE};
use crate::raster::errors::{TileError, TileResult};
use crate::reproject::transformer::suggest_output;
use crate::reproject::warp::warp_bands;
use crate::reproject::ReprojectionOptions;
use crate::utils::path_utils::destination_path;

/// Reproject `source_path` into the target coordinate system
///
/// The output keeps the source file name, band count and band-1 data type,
/// and uses the grid GDAL suggests for the target projection. If anything
/// fails after the output file was created, the partial file is removed.
///
/// # Arguments
/// * `source_path` - Prepared tile to reproject
/// * `destination_dir` - Directory receiving the output
/// * `options` - Target system, driver and warp settings
///
/// # Returns
/// Path of the reprojected tile
pub fn reproject_with_creation(
    source_path: &Path,
    destination_dir: &Path,
    options: &ReprojectionOptions,
) -> TileResult<PathBuf> {
    let source = open_read_only(source_path)?;

    let band_count = source.raster_count();
    if band_count == 0 {
        return Err(TileError::GenericError(
            format!("{} has no raster bands", source_path.display()),
        ));
    }
    let data_type = band_data_type(&source.rasterband(1)?);

    let target_wkt = options.target.to_wkt()?;
    let suggested = suggest_output(&source, &target_wkt)?;
    info!("Output grid for {}: {}x{} in {}, extent {}",
          source_path.display(), suggested.width, suggested.height, options.target.description(),
          suggested.geo_reference().extent(suggested.width, suggested.height));
    debug!("Output band type {}", data_type_name(data_type));

    let driver = lookup_driver(&options.driver_name)?;
    require_capability(&driver, CAN_CREATE)?;

    let output_path = destination_path(source_path, destination_dir)?;
    let output = PartialOutput::new(&output_path);

    let mut destination = create_with_raw_data_type(
        &driver,
        &output_path,
        (suggested.width, suggested.height),
        band_count,
        data_type,
    )?;
    destination.set_projection(&target_wkt)?;
    destination.set_geo_transform(&suggested.geo_transform)?;

    copy_color_table(&source, &destination)?;

    let bands: Vec<usize> = if options.warp_all_bands {
        (1..=band_count).collect()
    } else {
        vec![1]
    };
    warp_bands(&source, &destination, &bands, options.resampling)?;

    drop(destination);
    output.commit();

    Ok(output_path)
}

/// Copy the color table of band 1, if the source has one
fn copy_color_table(source: &Dataset, destination: &Dataset) -> TileResult<()> {
    let source_band = source.rasterband(1)?;
    if let Some(table) = source_band.color_table() {
        let mut destination_band = destination.rasterband(1)?;
        destination_band.set_color_table(&table);
        debug!("Copied color table with {} entries", table.entry_count());
    }
    Ok(())
}
