//! Tile metadata inspection command
//!
//! This module implements the command that prints driver, size,
//! georeferencing, metadata and per-band details of every tile in the
//! input directory.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::commands::command_traits::Command;
use crate::config::Settings;
use crate::raster::errors::TileResult;
use crate::raster::inspect::{inspect_file, DatasetReport};
use crate::utils::filename_utils::tile_coordinates_of;
use crate::utils::logger::Logger;
use crate::utils::path_utils::list_directory;

/// Outcome of an inspection run
#[derive(Debug, Default)]
pub struct InspectionSummary {
    /// Reports of every tile that could be opened
    pub reports: Vec<DatasetReport>,
    /// Entries that were skipped, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Command for inspecting a directory of tiles
pub struct InspectCommand<'a> {
    /// Run configuration, only the input directory is used
    settings: Settings,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> InspectCommand<'a> {
    /// Create a new inspect command
    pub fn new(settings: Settings, logger: &'a Logger) -> Self {
        InspectCommand { settings, logger }
    }

    /// Inspect every entry of the input directory
    ///
    /// Each entry is handled independently: one that cannot be opened is
    /// recorded as skipped and the run continues.
    pub fn run(&self) -> TileResult<InspectionSummary> {
        let input_dir = &self.settings.input_dir;
        info!("Inspecting tiles in {}", input_dir.display());

        let mut summary = InspectionSummary::default();

        for path in list_directory(input_dir)? {
            match self.inspect_entry(&path) {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    summary.skipped.push((path, e.to_string()));
                }
            }
        }

        Ok(summary)
    }

    fn inspect_entry(&self, path: &Path) -> TileResult<DatasetReport> {
        info!("File fullname: {}", path.display());

        let report = inspect_file(path)?;

        if let Some(coords) = tile_coordinates_of(path) {
            debug!("Tile coordinates from file name: {}, {}", coords.x, coords.y);
        }

        info!("{}", report.to_string().trim_end());
        Ok(report)
    }
}

impl<'a> Command for InspectCommand<'a> {
    fn execute(&self) -> TileResult<()> {
        let summary = self.run()?;

        let message = format!("Inspection finished: {} inspected, {} skipped",
                              summary.reports.len(), summary.skipped.len());
        info!("{}", message);
        self.logger.log(&message)?;

        Ok(())
    }
}
