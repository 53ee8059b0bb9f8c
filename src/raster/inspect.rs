//! Dataset and band metadata reports
//!
//! Collects everything the inspector prints into plain structures so the
//! same report can be logged, returned from the library API, or tested.

use std::fmt;
use std::os::raw::c_int;
use std::path::{Path, PathBuf};

use gdal::raster::RasterBand;
use gdal::{Dataset, Metadata};
use log::debug;

use crate::raster::dataset::{band_data_type, data_type_name, open_read_only};
use crate::raster::errors::TileResult;
use crate::raster::geo_reference::GeoReference;

/// Where a band's min/max values came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinMaxSource {
    /// Both values were already stored with the dataset
    Cached,
    /// Values were computed by scanning the band
    Computed,
}

impl MinMaxSource {
    fn name(&self) -> &'static str {
        match self {
            MinMaxSource::Cached => "cached",
            MinMaxSource::Computed => "computed",
        }
    }
}

/// Minimum and maximum pixel values of a band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
    pub source: MinMaxSource,
}

/// Metadata of a single raster band
#[derive(Debug, Clone)]
pub struct BandReport {
    /// 1-based band index
    pub index: usize,
    /// Natural block size (x, y)
    pub block_size: (usize, usize),
    /// GDAL data type name, e.g. "Byte"
    pub data_type: String,
    /// Color interpretation name, e.g. "Gray"
    pub color_interpretation: String,
    /// Min/max values, or the reason they could not be determined
    pub min_max: Result<MinMax, String>,
    /// Number of overviews, or the reason it could not be read
    pub overview_count: Result<i32, String>,
    /// Number of color table entries, if the band has a color table
    pub color_table_entries: Option<usize>,
}

/// Metadata of a raster dataset and all of its bands
#[derive(Debug, Clone)]
pub struct DatasetReport {
    pub path: PathBuf,
    pub driver_short_name: String,
    pub driver_long_name: String,
    pub width: usize,
    pub height: usize,
    pub band_count: usize,
    /// WKT projection, `None` when the dataset has none
    pub projection: Option<String>,
    /// Geotransform, `None` when the dataset has none
    pub geo_reference: Option<GeoReference>,
    /// `KEY=VALUE` items of the default metadata domain
    pub metadata: Vec<String>,
    /// One entry per band; `Err` holds the reason a band could not be read
    pub bands: Vec<Result<BandReport, String>>,
}

/// Open a file read-only and collect its report
pub fn inspect_file(path: &Path) -> TileResult<DatasetReport> {
    let dataset = open_read_only(path)?;
    Ok(inspect_dataset(path, &dataset))
}

/// Collect the report for an already opened dataset
pub fn inspect_dataset(path: &Path, dataset: &Dataset) -> DatasetReport {
    let driver = dataset.driver();
    let (width, height) = dataset.raster_size();
    let band_count = dataset.raster_count();

    let projection = Some(dataset.projection()).filter(|wkt| !wkt.trim().is_empty());
    let geo_reference = dataset.geo_transform().ok().map(GeoReference::new);
    let metadata = dataset.metadata_domain("").unwrap_or_default();

    let bands = (1..=band_count)
        .map(|index| {
            dataset.rasterband(index)
                .map(|band| inspect_band(index, &band))
                .map_err(|e| e.to_string())
        })
        .collect();

    DatasetReport {
        path: path.to_path_buf(),
        driver_short_name: driver.short_name(),
        driver_long_name: driver.long_name(),
        width,
        height,
        band_count,
        projection,
        geo_reference,
        metadata,
        bands,
    }
}

/// Collect the report for one band
pub fn inspect_band(index: usize, band: &RasterBand) -> BandReport {
    let min_max = match cached_min_max(band) {
        Some((min, max)) => Ok(MinMax { min, max, source: MinMaxSource::Cached }),
        None => {
            debug!("Band {} has no cached min/max, scanning", index);
            band.compute_raster_min_max(false)
                .map(|stats| MinMax {
                    min: stats.min,
                    max: stats.max,
                    source: MinMaxSource::Computed,
                })
                .map_err(|e| e.to_string())
        }
    };

    BandReport {
        index,
        block_size: band.block_size(),
        data_type: data_type_name(band_data_type(band)),
        color_interpretation: band.color_interpretation().name(),
        min_max,
        overview_count: band.overview_count().map_err(|e| e.to_string()),
        color_table_entries: band.color_table().map(|table| table.entry_count()),
    }
}

/// Min/max stored with the band, only when both values are known
fn cached_min_max(band: &RasterBand) -> Option<(f64, f64)> {
    let mut got_min: c_int = 0;
    let mut got_max: c_int = 0;

    let (min, max) = unsafe {
        let handle = band.c_rasterband();
        (
            gdal_sys::GDALGetRasterMinimum(handle, &mut got_min),
            gdal_sys::GDALGetRasterMaximum(handle, &mut got_max),
        )
    };

    if got_min != 0 && got_max != 0 {
        Some((min, max))
    } else {
        None
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.path.display())?;
        writeln!(f, "Driver:")?;
        writeln!(f, "\t{}", self.driver_short_name)?;
        writeln!(f, "\t{}", self.driver_long_name)?;
        writeln!(f, "Size:")?;
        writeln!(f, "\tRaster X: {}", self.width)?;
        writeln!(f, "\tRaster Y: {}", self.height)?;
        writeln!(f, "\tRaster count: {}", self.band_count)?;

        match &self.projection {
            Some(wkt) => writeln!(f, "Projection is {}", wkt)?,
            None => writeln!(f, "No projection set")?,
        }

        match &self.geo_reference {
            Some(geo) => {
                let origin = geo.origin();
                let (pixel_width, pixel_height) = geo.pixel_size();
                writeln!(f, "Geo transform:")?;
                writeln!(f, "\tOrigin: {}, {}", origin.x, origin.y)?;
                writeln!(f, "\tPixel size: {}, {}", pixel_width, pixel_height)?;
                if !geo.is_north_up() {
                    writeln!(f, "\tRotated: yes")?;
                }
                writeln!(f, "\tExtent: {}", geo.extent(self.width, self.height))?;
            },
            None => writeln!(f, "Couldn't get geo transform")?,
        }

        if self.metadata.is_empty() {
            writeln!(f, "Metadata is empty")?;
        } else {
            writeln!(f, "Metadata:")?;
            for item in &self.metadata {
                writeln!(f, "\t{}", item)?;
            }
        }

        for (position, band) in self.bands.iter().enumerate() {
            match band {
                Ok(band) => write!(f, "{}", band)?,
                Err(reason) => writeln!(f, "Band {}: unavailable ({})", position + 1, reason)?,
            }
        }

        Ok(())
    }
}

impl fmt::Display for BandReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Band {}:", self.index)?;
        writeln!(f, "Block: {}, {}", self.block_size.0, self.block_size.1)?;
        writeln!(f, "Type: {}", self.data_type)?;
        writeln!(f, "Color interp: {}", self.color_interpretation)?;

        match &self.min_max {
            Ok(min_max) => {
                writeln!(f, "Min: {}", min_max.min)?;
                writeln!(f, "Max: {}", min_max.max)?;
                writeln!(f, "Min/max source: {}", min_max.source.name())?;
            },
            Err(reason) => {
                writeln!(f, "Min: unavailable")?;
                writeln!(f, "Max: unavailable")?;
                writeln!(f, "Min/max source: {}", reason)?;
            },
        }

        match &self.overview_count {
            Ok(count) => writeln!(f, "Overviews count: {}", count)?,
            Err(reason) => writeln!(f, "Overviews count: unavailable ({})", reason)?,
        }

        match self.color_table_entries {
            Some(count) => writeln!(f, "Color table entries count: {}", count)?,
            None => writeln!(f, "Color table not found")?,
        }

        Ok(())
    }
}
