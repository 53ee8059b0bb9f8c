//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod inspect_command;
pub mod reproject_command;

pub use command_traits::{Command, CommandFactory};
pub use inspect_command::{InspectCommand, InspectionSummary};
pub use reproject_command::{ReprojectCommand, ReprojectionSummary};

use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::debug;

use crate::config::{Settings, SettingsOverrides};
use crate::raster::errors::TileResult;
use crate::utils::logger::Logger;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct TilewarpCommandFactory;

impl TilewarpCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        TilewarpCommandFactory
    }
}

impl Default for TilewarpCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for TilewarpCommandFactory {
    fn create_command(
        &self,
        args: &ArgMatches,
        logger: &'a Logger,
    ) -> TileResult<Box<dyn Command + 'a>> {
        let settings = settings_from_args(args)?;
        debug!("Effective settings: {:?}", settings);

        if args.get_flag("reproject") {
            Ok(Box::new(ReprojectCommand::new(settings, logger)))
        } else {
            // Default to inspect command
            Ok(Box::new(InspectCommand::new(settings, logger)))
        }
    }
}

/// Build settings from an optional `--config` file and the override flags
pub fn settings_from_args(args: &ArgMatches) -> TileResult<Settings> {
    let base = match args.get_one::<String>("config") {
        Some(path) => Settings::from_file(Path::new(path))?,
        None => Settings::default(),
    };

    let overrides = SettingsOverrides {
        input_dir: args.get_one::<String>("input").map(PathBuf::from),
        intermediate_dir: args.get_one::<String>("intermediate").map(PathBuf::from),
        output_dir: args.get_one::<String>("output").map(PathBuf::from),
        utm_zone: args.get_one::<String>("utm-zone").cloned(),
        hemisphere: args.get_one::<String>("hemisphere").cloned(),
        stamp: args.get_one::<String>("stamp").cloned(),
        driver: args.get_one::<String>("driver").cloned(),
        resampling: args.get_one::<String>("resampling").cloned(),
        warp_all_bands: args.get_flag("all-bands"),
    };

    base.apply_overrides(&overrides)
}
