pub mod raster;
pub mod coordinate;
pub mod reproject;
pub mod config;
pub mod utils;
pub mod commands;
pub mod cli;
pub mod api;

pub use crate::api::Tilewarp;

pub use config::Settings;
pub use coordinate::{BoundingBox, CoordinateSystem, CoordinateSystemFactory, Point};
pub use raster::{DatasetReport, TileError, TileResult};
pub use reproject::{ReprojectionOptions, ResamplingMethod, SuggestedOutput};
