//! Coordinate handling for geospatial data
//!
//! This module provides the coordinate systems tiles are reprojected into
//! and the small geometric types used to describe raster extents.

mod bbox;
mod point;
mod crs;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::point::Point;
pub use self::crs::{CoordinateSystem, CoordinateSystemFactory};
