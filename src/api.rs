use std::path::{Path, PathBuf};

use log::info;

use crate::commands::{InspectCommand, InspectionSummary, ReprojectCommand, ReprojectionSummary};
use crate::config::Settings;
use crate::coordinate::Point;
use crate::raster::errors::TileResult;
use crate::raster::inspect::{inspect_file, DatasetReport};
use crate::reproject::{prepare_image, reproject_with_creation};
use crate::utils::filename_utils::tile_coordinates_of;
use crate::utils::logger::Logger;
use crate::utils::path_utils::ensure_directory;

/// Main interface to the tilewarp library
pub struct Tilewarp {
    logger: Logger,
    settings: Settings,
}

impl Tilewarp {
    /// Create a new Tilewarp instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "tilewarp.log"
    /// * `settings` - Directories and reprojection parameters
    ///
    /// # Returns
    /// A Tilewarp instance or an error if initialization fails
    pub fn new(log_file: Option<&str>, settings: Settings) -> TileResult<Self> {
        settings.validate()?;
        let log_path = log_file.unwrap_or("tilewarp.log");
        let logger = Logger::new(log_path)?;
        Ok(Tilewarp { logger, settings })
    }

    /// Settings this instance runs with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Inspect a single raster file
    pub fn inspect(&self, input_path: &Path) -> TileResult<DatasetReport> {
        inspect_file(input_path)
    }

    /// Inspect every file of the configured input directory
    pub fn inspect_directory(&self) -> TileResult<InspectionSummary> {
        InspectCommand::new(self.settings.clone(), &self.logger).run()
    }

    /// Copy one tile into the intermediate directory and stamp its projection
    pub fn prepare(&self, input_path: &Path) -> TileResult<PathBuf> {
        let options = self.settings.reprojection_options();
        ensure_directory(&self.settings.intermediate_dir)?;
        let output = prepare_image(input_path, &self.settings.intermediate_dir, &options)?;
        self.logger.log(&format!("Prepared {} -> {}", input_path.display(), output.display()))?;
        Ok(output)
    }

    /// Warp one prepared tile into the output directory
    pub fn reproject(&self, prepared_path: &Path) -> TileResult<PathBuf> {
        let options = self.settings.reprojection_options();
        ensure_directory(&self.settings.output_dir)?;
        let output = reproject_with_creation(prepared_path, &self.settings.output_dir, &options)?;
        info!("Reprojected {} into {}", prepared_path.display(), options.target.description());
        self.logger.log(&format!(
            "Reprojected {} -> {}", prepared_path.display(), output.display()
        ))?;
        Ok(output)
    }

    /// Run both reprojection stages over the configured input directory
    pub fn reproject_directory(&self) -> TileResult<ReprojectionSummary> {
        ReprojectCommand::new(self.settings.clone(), &self.logger).run()
    }

    /// Tile coordinates encoded in a file name, if any
    pub fn tile_coordinates(&self, path: &Path) -> Option<Point> {
        tile_coordinates_of(path)
    }
}
