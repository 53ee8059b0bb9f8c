//! Generic image-to-image projection transformer
//!
//! Wraps `GDALCreateGenImgProjTransformer` so the transformer is destroyed
//! when the value goes out of scope, and exposes the suggested warp output
//! computed with it.

use std::ffi::{c_void, CString};
use std::os::raw::{c_char, c_int};
use std::ptr::{null, null_mut};

use gdal::{Dataset, GeoTransform};
use gdal_sys::CPLErr;
use log::debug;

use crate::raster::errors::{TileError, TileResult};
use crate::raster::geo_reference::GeoReference;
use crate::reproject::last_gdal_message;

/// GCP based transforms are never used for tiles
const GCP_USE_OK: c_int = 0;
/// Polynomial order hint, only relevant to GCP transforms
const POLYNOMIAL_ORDER: c_int = 1;

/// Output grid suggested for a reprojected raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestedOutput {
    /// Geotransform of the output grid
    pub geo_transform: GeoTransform,
    /// Width in pixels
    pub width: usize,
    /// Height in lines
    pub height: usize,
}

impl SuggestedOutput {
    /// Georeferencing helpers for the suggested grid
    pub fn geo_reference(&self) -> GeoReference {
        GeoReference::new(self.geo_transform)
    }
}

/// Owned GenImgProj transformer handle
pub struct GenImgProjTransformer {
    handle: *mut c_void,
}

impl GenImgProjTransformer {
    /// Build a transformer from `source` pixel space to a target projection
    ///
    /// # Arguments
    /// * `source` - Source dataset, also provides the source geotransform
    /// * `source_wkt` - Source projection, `None` to use the one stored in `source`
    /// * `destination` - Destination dataset, `None` when no output exists yet
    /// * `destination_wkt` - Destination projection, `None` to use the one stored in `destination`
    pub fn new(
        source: &Dataset,
        source_wkt: Option<&str>,
        destination: Option<&Dataset>,
        destination_wkt: Option<&str>,
    ) -> TileResult<Self> {
        let source_wkt = to_c_string(source_wkt)?;
        let destination_wkt = to_c_string(destination_wkt)?;

        let handle = unsafe {
            gdal_sys::GDALCreateGenImgProjTransformer(
                source.c_dataset(),
                as_ptr_or_null(&source_wkt),
                destination.map(|ds| ds.c_dataset()).unwrap_or(null_mut()),
                as_ptr_or_null(&destination_wkt),
                GCP_USE_OK,
                0.0,
                POLYNOMIAL_ORDER,
            )
        };

        if handle.is_null() {
            return Err(TileError::TransformComputationFailure(
                format!("Failed to create transformer: {}", last_gdal_message()),
            ));
        }

        Ok(GenImgProjTransformer { handle })
    }

    pub(crate) fn as_ptr(&self) -> *mut c_void {
        self.handle
    }

    /// Compute the output size and geotransform containing the whole
    /// reprojected extent of `source`
    pub fn suggest_output(&self, source: &Dataset) -> TileResult<SuggestedOutput> {
        let mut geo_transform: GeoTransform = [0.0; 6];
        let mut pixels: c_int = 0;
        let mut lines: c_int = 0;

        let rv = unsafe {
            gdal_sys::GDALSuggestedWarpOutput(
                source.c_dataset(),
                Some(gdal_sys::GDALGenImgProjTransform),
                self.handle,
                geo_transform.as_mut_ptr(),
                &mut pixels,
                &mut lines,
            )
        };

        if rv != CPLErr::CE_None {
            return Err(TileError::TransformComputationFailure(
                format!("Failed to compute suggested warp output: {}", last_gdal_message()),
            ));
        }

        if pixels <= 0 || lines <= 0 {
            return Err(TileError::TransformComputationFailure(
                format!("Suggested output has an empty size {}x{}", pixels, lines),
            ));
        }

        debug!("Suggested output {}x{} with geotransform {:?}", pixels, lines, geo_transform);

        Ok(SuggestedOutput {
            geo_transform,
            width: pixels as usize,
            height: lines as usize,
        })
    }
}

impl Drop for GenImgProjTransformer {
    fn drop(&mut self) {
        unsafe {
            gdal_sys::GDALDestroyGenImgProjTransformer(self.handle);
        }
    }
}

/// Suggest the output grid for reprojecting `source` into `target_wkt`
///
/// The source projection is the one stored in the file. The transformer only
/// lives for the duration of this call.
pub fn suggest_output(source: &Dataset, target_wkt: &str) -> TileResult<SuggestedOutput> {
    let source_wkt = source.projection();
    if source_wkt.trim().is_empty() {
        return Err(TileError::TransformComputationFailure(
            "Source dataset has no projection".to_string(),
        ));
    }

    let transformer =
        GenImgProjTransformer::new(source, Some(&source_wkt), None, Some(target_wkt))?;
    transformer.suggest_output(source)
}

fn to_c_string(value: Option<&str>) -> TileResult<Option<CString>> {
    value
        .map(|s| {
            CString::new(s)
                .map_err(|e| TileError::GenericError(format!("Invalid WKT string: {}", e)))
        })
        .transpose()
}

fn as_ptr_or_null(value: &Option<CString>) -> *const c_char {
    value.as_ref().map(|s| s.as_ptr()).unwrap_or(null())
}
