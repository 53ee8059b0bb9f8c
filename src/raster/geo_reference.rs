//! Affine georeferencing helpers
//!
//! Wraps the six GDAL geotransform coefficients
//! `[origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height]`.

use gdal::GeoTransform;

use crate::coordinate::{BoundingBox, Point};

/// Affine mapping from pixel/line indices to georeferenced coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoReference {
    coefficients: GeoTransform,
}

impl GeoReference {
    /// Wrap a geotransform read from a dataset or suggested by GDAL
    pub fn new(coefficients: GeoTransform) -> Self {
        GeoReference { coefficients }
    }

    /// Georeferenced coordinate of the top-left corner of pixel (0, 0)
    pub fn origin(&self) -> Point {
        Point::new(self.coefficients[0], self.coefficients[3])
    }

    /// Pixel width and pixel height (height is negative for north-up rasters)
    pub fn pixel_size(&self) -> (f64, f64) {
        (self.coefficients[1], self.coefficients[5])
    }

    /// Whether the transform has no rotation terms
    pub fn is_north_up(&self) -> bool {
        self.coefficients[2] == 0.0 && self.coefficients[4] == 0.0
    }

    /// Map a pixel/line position to georeferenced coordinates
    pub fn pixel_to_geo(&self, pixel: f64, line: f64) -> Point {
        let gt = &self.coefficients;
        Point::new(
            gt[0] + pixel * gt[1] + line * gt[2],
            gt[3] + pixel * gt[4] + line * gt[5],
        )
    }

    /// Extent covered by a raster of the given size
    ///
    /// All four corners are mapped so rotated transforms are bounded correctly.
    pub fn extent(&self, width: usize, height: usize) -> BoundingBox {
        let (w, h) = (width as f64, height as f64);
        let corners = [
            self.pixel_to_geo(0.0, 0.0),
            self.pixel_to_geo(w, 0.0),
            self.pixel_to_geo(0.0, h),
            self.pixel_to_geo(w, h),
        ];

        corners[1..].iter().fold(
            BoundingBox::from_corners(corners[0], corners[0]),
            |bbox, corner| BoundingBox::new(
                bbox.min_x.min(corner.x),
                bbox.min_y.min(corner.y),
                bbox.max_x.max(corner.x),
                bbox.max_y.max(corner.y),
            ),
        )
    }
}
