//! Fixture tiles shared by the integration tests

#![allow(dead_code)]

use std::path::Path;

use gdal::raster::{Buffer, GdalDataType};
use gdal::{Dataset, DriverManager, Metadata};
use gdal_sys::GDALDataType;

use tilewarp::raster::dataset::{create_with_data_type, create_with_raw_data_type};
use tilewarp::raster::driver::{capabilities, lookup_driver};

/// Geotransform placing a tile near 39E 10N, inside UTM zone 37
pub const ZONE_37_GEO_TRANSFORM: [f64; 6] = [39.0, 0.001, 0.0, 10.0, 0.0, -0.001];

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
    DriverManager::register_all();
}

/// Pixel value stored in every pixel of band 2 by `write_two_band_tile`
pub const SECOND_BAND_VALUE: u8 = 77;

/// Write a square single-band Byte GeoTIFF filled with a repeating gradient
///
/// Pixel values run from 10 to 209.
pub fn write_tile(path: &Path, size: usize, geo_transform: Option<[f64; 6]>) {
    let dataset = create_byte_tile(path, size, 1, geo_transform);
    write_band(&dataset, 1, size, |i| (10 + i % 200) as u8);
}

/// Write a two-band tile: band 1 like `write_tile`, band 2 constant
pub fn write_two_band_tile(path: &Path, size: usize) {
    let dataset = create_byte_tile(path, size, 2, Some(ZONE_37_GEO_TRANSFORM));
    write_band(&dataset, 1, size, |i| (10 + i % 200) as u8);
    write_band(&dataset, 2, size, |_| SECOND_BAND_VALUE);
}

/// Write a georeferenced tile of a raw GDAL type, pixels left at zero
pub fn write_typed_tile(path: &Path, size: usize, data_type: GDALDataType::Type) {
    let driver = lookup_driver("GTiff").unwrap();
    let mut dataset = create_with_raw_data_type(&driver, path, (size, size), 1, data_type).unwrap();
    dataset.set_geo_transform(&ZONE_37_GEO_TRANSFORM).unwrap();
}

/// Short name of a registered raster driver that cannot CreateCopy
pub fn driver_without_create_copy() -> String {
    (0..DriverManager::count())
        .filter_map(|index| DriverManager::get_driver(index).ok())
        .find(|driver| {
            driver.metadata_item("DCAP_RASTER", "").as_deref() == Some("YES")
                && !capabilities(driver).can_create_copy
        })
        .map(|driver| driver.short_name())
        .unwrap()
}

fn create_byte_tile(
    path: &Path,
    size: usize,
    band_count: usize,
    geo_transform: Option<[f64; 6]>,
) -> Dataset {
    let driver = lookup_driver("GTiff").unwrap();
    let mut dataset =
        create_with_data_type(&driver, path, (size, size), band_count, GdalDataType::UInt8)
            .unwrap();
    if let Some(transform) = geo_transform {
        dataset.set_geo_transform(&transform).unwrap();
    }
    dataset
}

fn write_band(dataset: &Dataset, index: usize, size: usize, value: impl Fn(usize) -> u8) {
    let mut band = dataset.rasterband(index).unwrap();
    let data: Vec<u8> = (0..size * size).map(value).collect();
    let mut buffer = Buffer::new((size, size), data);
    band.write((0, 0), (size, size), &mut buffer).unwrap();
}

/// Write a tile like `write_tile` whose band 1 carries an RGB palette
pub fn write_paletted_tile(path: &Path, size: usize, entries: i32) {
    write_tile(path, size, Some(ZONE_37_GEO_TRANSFORM));

    let dataset = gdal::Dataset::open_ex(
        path,
        gdal::DatasetOptions {
            open_flags: gdal::GdalOpenFlags::GDAL_OF_UPDATE | gdal::GdalOpenFlags::GDAL_OF_RASTER,
            ..Default::default()
        },
    )
    .unwrap();
    let band = dataset.rasterband(1).unwrap();

    unsafe {
        let table = gdal_sys::GDALCreateColorTable(gdal_sys::GDALPaletteInterp::GPI_RGB);
        for i in 0..entries {
            let entry = gdal_sys::GDALColorEntry {
                c1: i as i16,
                c2: (255 - i) as i16,
                c3: 0,
                c4: 255,
            };
            gdal_sys::GDALSetColorEntry(table, i, &entry);
        }
        let err = gdal_sys::GDALSetRasterColorTable(band.c_rasterband(), table);
        gdal_sys::GDALDestroyColorTable(table);
        assert_eq!(err, gdal_sys::CPLErr::CE_None);
    }
}
