//! Tile reprojection
//!
//! Reprojection runs in two stages. Preparation copies each tile into an
//! intermediate directory and stamps it with a fixed coordinate system.
//! Creation computes the output grid for the target UTM zone, creates the
//! output dataset and warps the source pixels into it.

pub mod resampling;
pub mod transformer;
pub mod warp;
pub mod preparation;
pub mod creation;

pub use creation::reproject_with_creation;
pub use preparation::prepare_image;
pub use resampling::ResamplingMethod;
pub use transformer::{suggest_output, GenImgProjTransformer, SuggestedOutput};
pub use warp::warp_bands;

use crate::coordinate::CoordinateSystem;
pub(crate) use crate::raster::errors::last_gdal_message;

/// Settings shared by both reprojection stages
#[derive(Debug, Clone, PartialEq)]
pub struct ReprojectionOptions {
    /// Short name of the output driver, e.g. "GTiff"
    pub driver_name: String,
    /// Coordinate system tiles are warped into
    pub target: CoordinateSystem,
    /// Coordinate system written onto prepared copies, `None` keeps the source projection
    pub stamp_projection: Option<CoordinateSystem>,
    /// Resampling kernel for the warp
    pub resampling: ResamplingMethod,
    /// Warp every band instead of band 1 only
    pub warp_all_bands: bool,
}

impl Default for ReprojectionOptions {
    fn default() -> Self {
        ReprojectionOptions {
            driver_name: "GTiff".to_string(),
            target: CoordinateSystem::UTM(37, true),
            stamp_projection: Some(CoordinateSystem::WGS84),
            resampling: ResamplingMethod::default(),
            warp_all_bands: false,
        }
    }
}
