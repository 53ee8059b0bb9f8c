//! Raster dataset access on top of GDAL
//!
//! This module wraps the pieces of the GDAL bindings the commands need:
//! opening and creating datasets, driver capabilities, georeferencing
//! and the metadata report printed by the inspector.

pub mod errors;
pub mod dataset;
pub mod driver;
pub mod geo_reference;
pub mod inspect;

pub use errors::{TileError, TileResult};
pub use dataset::{open_read_only, PartialOutput, RasterHandle};
pub use geo_reference::GeoReference;
pub use inspect::{inspect_file, BandReport, DatasetReport, MinMax, MinMaxSource};
