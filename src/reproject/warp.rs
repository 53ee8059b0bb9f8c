//! Band warping between two open datasets
//!
//! Resamples source pixels into the destination grid through a GDAL warp
//! operation. Options, operation and transformer are each owned by a guard
//! so every exit path releases them.

use std::mem::size_of;
use std::os::raw::c_int;

use gdal::cpl::CslStringList;
use gdal::Dataset;
use gdal_sys::CPLErr;
use log::debug;

use crate::raster::errors::{TileError, TileResult};
use crate::reproject::last_gdal_message;
use crate::reproject::resampling::ResamplingMethod;
use crate::reproject::transformer::GenImgProjTransformer;

struct WarpOptions {
    options: *mut gdal_sys::GDALWarpOptions,
}

impl WarpOptions {
    fn new() -> TileResult<Self> {
        let options = unsafe { gdal_sys::GDALCreateWarpOptions() };
        if options.is_null() {
            return Err(TileError::TransformComputationFailure(
                "Failed to allocate warp options".to_string(),
            ));
        }
        Ok(WarpOptions { options })
    }
}

impl Drop for WarpOptions {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALDestroyWarpOptions(self.options);
        }
    }
}

struct WarpOperation {
    operation: gdal_sys::GDALWarpOperationH,
}

impl Drop for WarpOperation {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALDestroyWarpOperation(self.operation);
        }
    }
}

/// Warp the given 1-based bands of `source` into the same bands of `destination`
///
/// Both datasets must carry a projection and a geotransform. The whole
/// destination grid is written, so the source is read at its own size and
/// resampled to the destination size.
pub fn warp_bands(
    source: &Dataset,
    destination: &Dataset,
    bands: &[usize],
    resampling: ResamplingMethod,
) -> TileResult<()> {
    if bands.is_empty() {
        return Err(TileError::GenericError("No bands selected for warping".to_string()));
    }

    let (dst_width, dst_height) = destination.raster_size();
    debug!("Warping band(s) {:?} into {}x{} grid using {} resampling",
           bands, dst_width, dst_height, resampling.name());

    // Declaration order matters: operation drops first, transformer last
    let transformer = GenImgProjTransformer::new(source, None, Some(destination), None)?;
    let warp_options = WarpOptions::new()?;

    let mut extra_options = CslStringList::new();
    extra_options.add_string("INIT_DEST=0")?;

    let operation = unsafe {
        let options = warp_options.options;
        (*options).papszWarpOptions = gdal_sys::CSLDuplicate(extra_options.as_ptr());
        (*options).hSrcDS = source.c_dataset();
        (*options).hDstDS = destination.c_dataset();
        (*options).eResampleAlg = resampling.to_gdal();

        (*options).nBandCount = bands.len() as c_int;
        let band_bytes = size_of::<c_int>() * bands.len();
        (*options).panSrcBands = gdal_sys::CPLMalloc(band_bytes).cast::<c_int>();
        (*options).panDstBands = gdal_sys::CPLMalloc(band_bytes).cast::<c_int>();
        for (i, band) in bands.iter().enumerate() {
            (*options).panSrcBands.add(i).write(*band as c_int);
            (*options).panDstBands.add(i).write(*band as c_int);
        }

        (*options).pfnTransformer = Some(gdal_sys::GDALGenImgProjTransform);
        (*options).pTransformerArg = transformer.as_ptr();

        gdal_sys::GDALCreateWarpOperation(options)
    };

    if operation.is_null() {
        return Err(TileError::TransformComputationFailure(
            format!("Failed to initialize warp operation: {}", last_gdal_message()),
        ));
    }
    let operation = WarpOperation { operation };

    let rv = unsafe {
        gdal_sys::GDALChunkAndWarpImage(
            operation.operation,
            0,
            0,
            dst_width as c_int,
            dst_height as c_int,
        )
    };

    if rv != CPLErr::CE_None {
        return Err(TileError::TransformComputationFailure(
            format!("Warp failed: {}", last_gdal_message()),
        ));
    }

    Ok(())
}
