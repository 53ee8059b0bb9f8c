//! Integration tests for inspection and the two reprojection stages

extern crate std;

mod common;

use std::fs;

use gdal::spatial_ref::SpatialRef;

use tilewarp::cli::build_cli;
use tilewarp::commands::{settings_from_args, InspectCommand, ReprojectCommand};
use tilewarp::config::Settings;
use tilewarp::coordinate::CoordinateSystem;
use tilewarp::raster::dataset::{band_data_type, data_type_name, open_read_only};
use tilewarp::raster::errors::TileError;
use tilewarp::raster::inspect::MinMaxSource;
use tilewarp::reproject::{
    prepare_image, reproject_with_creation, suggest_output, ReprojectionOptions,
};
use tilewarp::utils::logger::Logger;

use common::{
    driver_without_create_copy, init, write_paletted_tile, write_tile, write_two_band_tile,
    write_typed_tile, SECOND_BAND_VALUE, ZONE_37_GEO_TRANSFORM,
};

/// Prepare `source` into `<root>/prepared` and reproject it into `<root>/output`
fn prepare_and_reproject(
    root: &std::path::Path,
    source: &std::path::Path,
    options: &ReprojectionOptions,
) -> (std::path::PathBuf, std::path::PathBuf) {
    let prepared_dir = root.join("prepared");
    let output_dir = root.join("output");
    fs::create_dir_all(&prepared_dir).unwrap();
    fs::create_dir_all(&output_dir).unwrap();

    let prepared = prepare_image(source, &prepared_dir, options).unwrap();
    let output = reproject_with_creation(&prepared, &output_dir, options).unwrap();
    (prepared, output)
}

/// Computed (min, max) of one band of a file
fn band_min_max(path: &std::path::Path, index: usize) -> (f64, f64) {
    let dataset = open_read_only(path).unwrap();
    let stats = dataset.rasterband(index).unwrap().compute_raster_min_max(false).unwrap();
    (stats.min, stats.max)
}

fn settings_for(root: &std::path::Path) -> Settings {
    Settings {
        input_dir: root.join("tiles"),
        intermediate_dir: root.join("tiles_changed"),
        output_dir: root.join("reprojection_results"),
        ..Settings::default()
    }
}

#[test]
fn test_inspect_directory_skips_unreadable_entries() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_for(dir.path());
    fs::create_dir_all(&settings.input_dir).unwrap();

    fs::write(settings.input_dir.join("broken.tif"), b"").unwrap();
    write_tile(&settings.input_dir.join("tile_100_200.tif"), 100, None);

    let logger = Logger::new(dir.path().join("inspect.log").to_str().unwrap()).unwrap();
    let summary = InspectCommand::new(settings, &logger).run().unwrap();

    std::assert_eq!(summary.reports.len(), 1);
    std::assert_eq!(summary.skipped.len(), 1);
    std::assert!(summary.skipped[0].0.ends_with("broken.tif"));

    let report = &summary.reports[0];
    std::assert!(report.projection.is_none());
    let min_max = report.bands[0].as_ref().unwrap().min_max.as_ref().unwrap();
    std::assert_eq!(min_max.source, MinMaxSource::Computed);
    std::assert_eq!((min_max.min, min_max.max), (10.0, 209.0));
    std::assert!(report.to_string().contains("No projection set"));
}

#[test]
fn test_prepare_copies_and_stamps_wgs84() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tile_39_10.tif");
    let prepared_dir = dir.path().join("prepared");
    fs::create_dir_all(&prepared_dir).unwrap();
    write_tile(&source, 64, Some(ZONE_37_GEO_TRANSFORM));

    let prepared = prepare_image(&source, &prepared_dir, &ReprojectionOptions::default()).unwrap();
    std::assert_eq!(prepared, prepared_dir.join("tile_39_10.tif"));

    let dataset = open_read_only(&prepared).unwrap();
    std::assert_eq!(dataset.raster_size(), (64, 64));
    std::assert_eq!(dataset.raster_count(), 1);
    std::assert_eq!(dataset.geo_transform().unwrap(), ZONE_37_GEO_TRANSFORM);

    let srs = SpatialRef::from_wkt(&dataset.projection()).unwrap();
    std::assert!(srs.is_geographic());
    std::assert_eq!(srs.auth_code().unwrap(), 4326);
}

#[test]
fn test_prepare_without_stamp_keeps_missing_projection() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("plain.tif");
    let prepared_dir = dir.path().join("prepared");
    fs::create_dir_all(&prepared_dir).unwrap();
    write_tile(&source, 16, None);

    let options = ReprojectionOptions {
        stamp_projection: None,
        ..ReprojectionOptions::default()
    };
    let prepared = prepare_image(&source, &prepared_dir, &options).unwrap();

    std::assert!(open_read_only(&prepared).unwrap().projection().is_empty());
}

#[test]
fn test_prepare_twice_gives_identical_output() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tile_39_10.tif");
    let prepared_dir = dir.path().join("prepared");
    fs::create_dir_all(&prepared_dir).unwrap();
    write_tile(&source, 32, Some(ZONE_37_GEO_TRANSFORM));

    let options = ReprojectionOptions::default();
    let first_path = prepare_image(&source, &prepared_dir, &options).unwrap();
    let first = fs::read(&first_path).unwrap();
    let second_path = prepare_image(&source, &prepared_dir, &options).unwrap();
    let second = fs::read(&second_path).unwrap();

    std::assert_eq!(first_path, second_path);
    std::assert_eq!(first, second);
}

#[test]
fn test_prepare_rejects_driver_without_create_copy() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tile.tif");
    let prepared_dir = dir.path().join("prepared");
    fs::create_dir_all(&prepared_dir).unwrap();
    write_tile(&source, 8, Some(ZONE_37_GEO_TRANSFORM));

    let driver_name = driver_without_create_copy();
    let options = ReprojectionOptions {
        driver_name: driver_name.clone(),
        ..ReprojectionOptions::default()
    };

    match prepare_image(&source, &prepared_dir, &options) {
        Err(TileError::UnsupportedDriverCapability { driver, capability }) => {
            std::assert_eq!(driver, driver_name);
            std::assert_eq!(capability, "DCAP_CREATECOPY");
        },
        other => std::panic!("expected UnsupportedDriverCapability, got {:?}", other),
    }
    std::assert_eq!(fs::read_dir(&prepared_dir).unwrap().count(), 0);
}

#[test]
fn test_prepare_rejects_unknown_driver() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tile.tif");
    let prepared_dir = dir.path().join("prepared");
    fs::create_dir_all(&prepared_dir).unwrap();
    write_tile(&source, 8, Some(ZONE_37_GEO_TRANSFORM));

    let options = ReprojectionOptions {
        driver_name: "NoSuchDriver".to_string(),
        ..ReprojectionOptions::default()
    };

    std::assert!(prepare_image(&source, &prepared_dir, &options).is_err());
    std::assert!(!prepared_dir.join("tile.tif").exists());
}

#[test]
fn test_reproject_uses_suggested_grid() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tile_39_10.tif");
    write_tile(&source, 64, Some(ZONE_37_GEO_TRANSFORM));

    let options = ReprojectionOptions::default();
    let (prepared, output) = prepare_and_reproject(dir.path(), &source, &options);
    std::assert_eq!(output, dir.path().join("output").join("tile_39_10.tif"));

    let dataset = open_read_only(&output).unwrap();
    let declared_wkt = dataset.projection();
    let expected = suggest_output(&open_read_only(&prepared).unwrap(), &declared_wkt).unwrap();

    std::assert_eq!(dataset.raster_size(), (expected.width, expected.height));
    std::assert_eq!(dataset.raster_count(), 1);
    std::assert_eq!(dataset.rasterband(1).unwrap().band_type().name(), "Byte");

    let srs = SpatialRef::from_wkt(&declared_wkt).unwrap();
    std::assert!(srs.is_projected());
    std::assert_eq!(srs.auth_code().unwrap(), 32637);

    let transform = dataset.geo_transform().unwrap();
    for (actual, wanted) in transform.iter().zip(expected.geo_transform.iter()) {
        std::assert!((actual - wanted).abs() < 1e-6);
    }
    std::assert!(transform[1] > 0.0);
    std::assert!(transform[5] < 0.0);
    // 39E is the central meridian of zone 37
    std::assert!((transform[0] - 500_000.0).abs() < 100.0);
}

#[test]
fn test_reproject_writes_source_pixels() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("tile_39_10.tif");
    write_tile(&source, 64, Some(ZONE_37_GEO_TRANSFORM));

    let (_, output) = prepare_and_reproject(dir.path(), &source, &ReprojectionOptions::default());

    // Nearest neighbour keeps source values; untouched pixels stay 0
    let (min, max) = band_min_max(&output, 1);
    std::assert!(max > 10.0, "band 1 was not warped, max {}", max);
    std::assert!(max <= 209.0);
    std::assert!(min >= 0.0);
}

#[test]
fn test_reproject_band_selection() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("two_bands.tif");
    write_two_band_tile(&source, 32);

    let first_only = tempfile::tempdir().unwrap();
    let (_, output) =
        prepare_and_reproject(first_only.path(), &source, &ReprojectionOptions::default());
    std::assert_eq!(open_read_only(&output).unwrap().raster_count(), 2);
    std::assert!(band_min_max(&output, 1).1 > 10.0);
    std::assert_eq!(band_min_max(&output, 2).1, 0.0);

    let all_bands = ReprojectionOptions {
        warp_all_bands: true,
        ..ReprojectionOptions::default()
    };
    let (_, output) = prepare_and_reproject(dir.path(), &source, &all_bands);
    std::assert!(band_min_max(&output, 1).1 > 10.0);
    std::assert_eq!(band_min_max(&output, 2).1, SECOND_BAND_VALUE as f64);
}

#[test]
fn test_reproject_keeps_complex_band_type() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("complex.tif");
    write_typed_tile(&source, 16, gdal_sys::GDALDataType::GDT_CFloat32);

    let (_, output) = prepare_and_reproject(dir.path(), &source, &ReprojectionOptions::default());

    let dataset = open_read_only(&output).unwrap();
    let data_type = band_data_type(&dataset.rasterband(1).unwrap());
    std::assert_eq!(data_type, gdal_sys::GDALDataType::GDT_CFloat32);
    std::assert_eq!(data_type_name(data_type), "CFloat32");
}

#[test]
fn test_reproject_copies_color_table() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("paletted.tif");
    let prepared_dir = dir.path().join("prepared");
    let output_dir = dir.path().join("output");
    fs::create_dir_all(&prepared_dir).unwrap();
    fs::create_dir_all(&output_dir).unwrap();
    write_paletted_tile(&source, 32, 16);

    let options = ReprojectionOptions::default();
    let prepared = prepare_image(&source, &prepared_dir, &options).unwrap();
    let output = reproject_with_creation(&prepared, &output_dir, &options).unwrap();

    let dataset = open_read_only(&output).unwrap();
    let band = dataset.rasterband(1).unwrap();
    let table = band.color_table().unwrap();
    std::assert!(table.entry_count() >= 16);
}

#[test]
fn test_reproject_without_projection_fails_cleanly() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("plain.tif");
    let output_dir = dir.path().join("output");
    fs::create_dir_all(&output_dir).unwrap();
    write_tile(&source, 16, None);

    let result = reproject_with_creation(&source, &output_dir, &ReprojectionOptions::default());

    std::assert!(result.is_err());
    std::assert!(!output_dir.join("plain.tif").exists());
}

#[test]
fn test_reproject_command_runs_both_stages() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_for(dir.path());
    fs::create_dir_all(&settings.input_dir).unwrap();

    write_tile(&settings.input_dir.join("tile_39_10.tif"), 32, Some(ZONE_37_GEO_TRANSFORM));
    let zone_37_east = [40.0, 0.001, 0.0, 10.0, 0.0, -0.001];
    write_tile(&settings.input_dir.join("tile_40_10.tif"), 32, Some(zone_37_east));
    fs::write(settings.input_dir.join("readme.txt"), b"not a tile").unwrap();

    let logger = Logger::new(dir.path().join("reproject.log").to_str().unwrap()).unwrap();
    let summary = ReprojectCommand::new(settings.clone(), &logger).run().unwrap();

    std::assert_eq!(summary.prepared.len(), 2);
    std::assert_eq!(summary.reprojected.len(), 2);
    std::assert_eq!(summary.skipped.len(), 1);
    std::assert!(summary.skipped[0].0.ends_with("readme.txt"));

    std::assert!(settings.intermediate_dir.join("tile_39_10.tif").exists());
    std::assert!(settings.output_dir.join("tile_40_10.tif").exists());
    std::assert!(!settings.output_dir.join("readme.txt").exists());
}

#[test]
fn test_cli_overrides_reach_settings() {
    let matches = build_cli().get_matches_from([
        "tilewarp",
        "--reproject",
        "--input", "in",
        "--output", "out",
        "--utm-zone", "33",
        "--hemisphere", "south",
        "--stamp", "none",
        "--all-bands",
    ]);

    std::assert!(matches.get_flag("reproject"));

    let settings = settings_from_args(&matches).unwrap();
    std::assert_eq!(settings.input_dir, std::path::PathBuf::from("in"));
    std::assert_eq!(settings.output_dir, std::path::PathBuf::from("out"));
    std::assert_eq!(settings.target_system(), CoordinateSystem::UTM(33, false));
    std::assert!(settings.stamp_projection.is_none());
    std::assert!(settings.warp_all_bands);
}

#[test]
fn test_cli_rejects_invalid_zone() {
    let matches = build_cli().get_matches_from(["tilewarp", "--utm-zone", "61"]);
    std::assert!(settings_from_args(&matches).is_err());
}

#[test]
fn test_cli_inspect_conflicts_with_reproject() {
    let result = build_cli().try_get_matches_from(["tilewarp", "--inspect", "--reproject"]);
    std::assert!(result.is_err());
}

#[test]
fn test_library_facade_single_tile() {
    init();
    let dir = tempfile::tempdir().unwrap();
    let settings = settings_for(dir.path());
    fs::create_dir_all(&settings.input_dir).unwrap();
    fs::create_dir_all(&settings.intermediate_dir).unwrap();
    fs::create_dir_all(&settings.output_dir).unwrap();

    let source = settings.input_dir.join("tile_39_10.tif");
    write_tile(&source, 32, Some(ZONE_37_GEO_TRANSFORM));

    let log_file = dir.path().join("facade.log");
    let tilewarp = tilewarp::Tilewarp::new(Some(log_file.to_str().unwrap()), settings).unwrap();

    let coords = tilewarp.tile_coordinates(&source).unwrap();
    std::assert_eq!((coords.x, coords.y), (39.0, 10.0));

    let report = tilewarp.inspect(&source).unwrap();
    std::assert_eq!(report.geo_reference.unwrap().origin(), tilewarp::Point::new(39.0, 10.0));

    let prepared = tilewarp.prepare(&source).unwrap();
    let output = tilewarp.reproject(&prepared).unwrap();
    std::assert!(output.starts_with(&tilewarp.settings().output_dir));

    let logged = fs::read_to_string(&log_file).unwrap();
    std::assert!(logged.contains("Prepared"));
    std::assert!(logged.contains("Reprojected"));
}
