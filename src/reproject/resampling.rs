//! Resampling algorithms available to the warp step

use gdal_sys::GDALResampleAlg;

use crate::raster::errors::{TileError, TileResult};

/// Resampling kernel used when warping source pixels into the output grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResamplingMethod {
    #[default]
    Nearest,
    Bilinear,
    Cubic,
    CubicSpline,
    Lanczos,
    Average,
    Mode,
}

impl ResamplingMethod {
    /// Parse a resampling method from its configuration name
    pub fn from_name(name: &str) -> TileResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "nearest" | "near" => Ok(ResamplingMethod::Nearest),
            "bilinear" => Ok(ResamplingMethod::Bilinear),
            "cubic" => Ok(ResamplingMethod::Cubic),
            "cubicspline" => Ok(ResamplingMethod::CubicSpline),
            "lanczos" => Ok(ResamplingMethod::Lanczos),
            "average" => Ok(ResamplingMethod::Average),
            "mode" => Ok(ResamplingMethod::Mode),
            other => Err(TileError::ConfigError(format!("Unknown resampling method: {}", other))),
        }
    }

    /// Configuration name of this method
    pub fn name(&self) -> &'static str {
        match self {
            ResamplingMethod::Nearest => "nearest",
            ResamplingMethod::Bilinear => "bilinear",
            ResamplingMethod::Cubic => "cubic",
            ResamplingMethod::CubicSpline => "cubicspline",
            ResamplingMethod::Lanczos => "lanczos",
            ResamplingMethod::Average => "average",
            ResamplingMethod::Mode => "mode",
        }
    }

    pub(crate) fn to_gdal(self) -> GDALResampleAlg::Type {
        match self {
            ResamplingMethod::Nearest => GDALResampleAlg::GRA_NearestNeighbour,
            ResamplingMethod::Bilinear => GDALResampleAlg::GRA_Bilinear,
            ResamplingMethod::Cubic => GDALResampleAlg::GRA_Cubic,
            ResamplingMethod::CubicSpline => GDALResampleAlg::GRA_CubicSpline,
            ResamplingMethod::Lanczos => GDALResampleAlg::GRA_Lanczos,
            ResamplingMethod::Average => GDALResampleAlg::GRA_Average,
            ResamplingMethod::Mode => GDALResampleAlg::GRA_Mode,
        }
    }
}
