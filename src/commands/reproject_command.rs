//! Tile reprojection command
//!
//! This module implements the two-stage reprojection run: every input
//! tile is prepared into the intermediate directory, then every prepared
//! tile is reprojected into the output directory.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::commands::command_traits::Command;
use crate::config::Settings;
use crate::raster::errors::TileResult;
use crate::reproject::{prepare_image, reproject_with_creation, ReprojectionOptions};
use crate::utils::logger::Logger;
use crate::utils::path_utils::{ensure_directory, list_directory};
use crate::utils::progress::ProgressTracker;

/// Outcome of a reprojection run
#[derive(Debug, Default)]
pub struct ReprojectionSummary {
    /// Copies written to the intermediate directory
    pub prepared: Vec<PathBuf>,
    /// Tiles written to the output directory
    pub reprojected: Vec<PathBuf>,
    /// Files skipped in either stage, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

/// Command for reprojecting a directory of tiles into a UTM zone
pub struct ReprojectCommand<'a> {
    /// Run configuration
    settings: Settings,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ReprojectCommand<'a> {
    /// Create a new reproject command
    pub fn new(settings: Settings, logger: &'a Logger) -> Self {
        ReprojectCommand { settings, logger }
    }

    /// Run both stages and collect what happened to every file
    pub fn run(&self) -> TileResult<ReprojectionSummary> {
        let options = self.settings.reprojection_options();
        let sources = list_directory(&self.settings.input_dir)?;
        ensure_directory(&self.settings.intermediate_dir)?;
        ensure_directory(&self.settings.output_dir)?;

        info!("Reprojecting {} file(s) from {} into {}",
              sources.len(), self.settings.input_dir.display(), options.target.description());

        let mut summary = ReprojectionSummary::default();

        summary.prepared = self.run_stage(
            "Preparing",
            &sources,
            &self.settings.intermediate_dir,
            &options,
            prepare_image,
            &mut summary.skipped,
        );

        summary.reprojected = self.run_stage(
            "Reprojecting",
            &summary.prepared,
            &self.settings.output_dir,
            &options,
            reproject_with_creation,
            &mut summary.skipped,
        );

        Ok(summary)
    }

    /// Apply one stage to every file; failures are logged and recorded as skipped
    fn run_stage<F>(
        &self,
        label: &str,
        files: &[PathBuf],
        destination_dir: &Path,
        options: &ReprojectionOptions,
        stage: F,
        skipped: &mut Vec<(PathBuf, String)>,
    ) -> Vec<PathBuf>
    where
        F: Fn(&Path, &Path, &ReprojectionOptions) -> TileResult<PathBuf>,
    {
        let progress = ProgressTracker::new(files.len() as u64, label);
        let mut written = Vec::with_capacity(files.len());

        for file in files {
            progress.set_message(&format!("{} {}", label, file.display()));
            match stage(file, destination_dir, options) {
                Ok(output) => {
                    info!("{} {} -> {}", label, file.display(), output.display());
                    written.push(output);
                },
                Err(e) => {
                    warn!("{}: skipping {}: {}", label, file.display(), e);
                    skipped.push((file.clone(), e.to_string()));
                }
            }
            progress.increment(1);
        }

        progress.finish();
        written
    }
}

impl<'a> Command for ReprojectCommand<'a> {
    fn execute(&self) -> TileResult<()> {
        let summary = self.run()?;

        let message = format!(
            "Reprojection finished: {} prepared, {} reprojected, {} skipped",
            summary.prepared.len(),
            summary.reprojected.len(),
            summary.skipped.len(),
        );
        info!("{}", message);
        self.logger.log(&message)?;

        Ok(())
    }
}
