//! Custom error types for tile processing

use std::ffi::CStr;
use std::fmt;
use std::io;

use gdal::errors::GdalError;

/// Errors raised while inspecting or reprojecting a tile
#[derive(Debug)]
pub enum TileError {
    /// I/O error
    IoError(io::Error),
    /// Error reported by GDAL
    GdalError(GdalError),
    /// Dataset could not be opened
    OpenFailure {
        /// Path that was passed to GDAL
        path: String,
        /// Reason reported by GDAL
        reason: String,
    },
    /// Output driver lacks a required capability (e.g. DCAP_CREATECOPY)
    UnsupportedDriverCapability {
        /// Short name of the driver
        driver: String,
        /// Capability flag that was missing
        capability: String,
    },
    /// Transformer creation, suggested output or warp failed
    TransformComputationFailure(String),
    /// Band data type cannot be used to create an output dataset
    UnsupportedDataType(String),
    /// Invalid configuration value
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileError::IoError(e) => write!(f, "I/O error: {}", e),
            TileError::GdalError(e) => write!(f, "GDAL error: {}", e),
            TileError::OpenFailure { path, reason } => {
                write!(f, "Failed to open dataset {}: {}", path, reason)
            },
            TileError::UnsupportedDriverCapability { driver, capability } => {
                write!(f, "Driver {} does not support {}", driver, capability)
            },
            TileError::TransformComputationFailure(msg) => {
                write!(f, "Transform computation failed: {}", msg)
            },
            TileError::UnsupportedDataType(name) => {
                write!(f, "Unsupported band data type: {}", name)
            },
            TileError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            TileError::GenericError(msg) => write!(f, "Tile error: {}", msg),
        }
    }
}

impl std::error::Error for TileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TileError::IoError(e) => Some(e),
            TileError::GdalError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TileError {
    fn from(error: io::Error) -> Self {
        TileError::IoError(error)
    }
}

impl From<GdalError> for TileError {
    fn from(error: GdalError) -> Self {
        TileError::GdalError(error)
    }
}

impl From<String> for TileError {
    fn from(msg: String) -> Self {
        TileError::GenericError(msg)
    }
}

/// Result type for tile operations
pub type TileResult<T> = Result<T, TileError>;

/// Last error message recorded by GDAL on this thread
pub(crate) fn last_gdal_message() -> String {
    let message = unsafe {
        let ptr = gdal_sys::CPLGetLastErrorMsg();
        if ptr.is_null() {
            return "unknown GDAL error".to_string();
        }
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    };

    if message.is_empty() {
        "unknown GDAL error".to_string()
    } else {
        message
    }
}
