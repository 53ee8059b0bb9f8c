//! Command pattern interfaces
//!
//! Every run of the binary is one command: inspecting a directory or
//! reprojecting it.

use crate::raster::errors::TileResult;
use crate::utils::logger::Logger;

/// A directory-wide operation selected on the command line
pub trait Command {
    /// Run the command over every file of its input directory
    ///
    /// # Returns
    /// An error only when the run cannot start, e.g. an unreadable input
    /// directory. Failures of individual tiles are logged and skipped.
    fn execute(&self) -> TileResult<()>;
}

/// Builds the command matching the parsed arguments
pub trait CommandFactory<'a> {
    /// Resolve settings from `args` and pick the command to run
    ///
    /// # Arguments
    /// * `args` - Parsed command-line arguments
    /// * `logger` - File logger the command writes its summary to
    fn create_command(
        &self,
        args: &clap::ArgMatches,
        logger: &'a Logger,
    ) -> TileResult<Box<dyn Command + 'a>>;
}
