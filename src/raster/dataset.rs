//! Dataset acquisition helpers
//!
//! Every dataset handed out here is an owned `gdal::Dataset`, closed when it
//! is dropped. `PartialOutput` extends that to files on disk: an output that
//! was never committed is deleted when the guard goes out of scope.

use std::ffi::{CStr, CString};
use std::fs;
use std::io;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};
use std::ptr::null_mut;

use gdal::raster::{GdalDataType, RasterBand};
use gdal::{Dataset, DatasetOptions, Driver, GdalOpenFlags};
use gdal_sys::GDALDataType;
use log::{debug, warn};

use crate::raster::errors::{last_gdal_message, TileError, TileResult};

/// Owned handle to an open raster file, closed exactly once on drop
pub type RasterHandle = Dataset;

/// Open a raster dataset in read-only mode
///
/// # Arguments
/// * `path` - Path of the file to open
///
/// # Returns
/// The open dataset, or `TileError::OpenFailure` when GDAL cannot read it
pub fn open_read_only(path: &Path) -> TileResult<RasterHandle> {
    let options = DatasetOptions {
        open_flags: GdalOpenFlags::GDAL_OF_READONLY | GdalOpenFlags::GDAL_OF_RASTER,
        ..DatasetOptions::default()
    };

    Dataset::open_ex(path, options).map_err(|e| TileError::OpenFailure {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Create a dataset whose bands use a data type only known at runtime
///
/// # Arguments
/// * `driver` - Output format driver
/// * `path` - Path of the file to create
/// * `size` - Raster size as (width, height)
/// * `band_count` - Number of bands
/// * `data_type` - Band data type, usually copied from a source band
pub fn create_with_data_type(
    driver: &Driver,
    path: &Path,
    size: (usize, usize),
    band_count: usize,
    data_type: GdalDataType,
) -> TileResult<RasterHandle> {
    create_with_raw_data_type(driver, path, size, band_count, data_type as GDALDataType::Type)
}

/// Same as [`create_with_data_type`] for a raw GDAL data type code
///
/// Covers every type GDAL can store, including Int8 and the complex types
/// that have no `GdalDataType` counterpart. Only `GDT_Unknown` is refused.
pub fn create_with_raw_data_type(
    driver: &Driver,
    path: &Path,
    size: (usize, usize),
    band_count: usize,
    data_type: GDALDataType::Type,
) -> TileResult<RasterHandle> {
    let (width, height) = size;
    let type_name = data_type_name(data_type);
    debug!("Creating {}x{} dataset with {} band(s) of {} at {}",
           width, height, band_count, type_name, path.display());

    if data_type == GDALDataType::GDT_Unknown {
        return Err(TileError::UnsupportedDataType(type_name));
    }

    let c_path = CString::new(path.to_string_lossy().as_bytes()).map_err(|e| {
        TileError::GenericError(format!("Invalid output path {}: {}", path.display(), e))
    })?;
    let as_c_int = |value: usize, what: &str| {
        c_int::try_from(value)
            .map_err(|_| TileError::GenericError(format!("{} {} is out of range", what, value)))
    };

    let handle = unsafe {
        gdal_sys::GDALCreate(
            driver.c_driver(),
            c_path.as_ptr(),
            as_c_int(width, "Width")?,
            as_c_int(height, "Height")?,
            as_c_int(band_count, "Band count")?,
            data_type,
            null_mut(),
        )
    };

    if handle.is_null() {
        return Err(TileError::GenericError(format!(
            "Failed to create {}: {}", path.display(), last_gdal_message()
        )));
    }

    Ok(unsafe { Dataset::from_c_dataset(handle) })
}

/// Raw GDAL data type code of a band
pub fn band_data_type(band: &RasterBand) -> GDALDataType::Type {
    unsafe { gdal_sys::GDALGetRasterDataType(band.c_rasterband()) }
}

/// GDAL name of a raw data type code, e.g. "CInt16"
pub fn data_type_name(data_type: GDALDataType::Type) -> String {
    let ptr = unsafe { gdal_sys::GDALGetDataTypeName(data_type) };
    if ptr.is_null() {
        return "Unknown".to_string();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Scoped guard for an output file that is still being written
///
/// Declare the guard before the dataset it protects: locals drop in reverse
/// order, so the dataset is closed before the guard removes the file.
#[derive(Debug)]
pub struct PartialOutput {
    path: PathBuf,
    committed: bool,
}

impl PartialOutput {
    /// Start guarding `path`
    pub fn new(path: &Path) -> Self {
        PartialOutput {
            path: path.to_path_buf(),
            committed: false,
        }
    }

    /// Path of the guarded output
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep the output on disk
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        match fs::remove_file(&self.path) {
            Ok(()) => warn!("Removed partial output {}", self.path.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {},
            Err(e) => warn!("Failed to remove partial output {}: {}", self.path.display(), e),
        }
    }
}
