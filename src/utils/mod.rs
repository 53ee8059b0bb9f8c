//! Utility modules for common functionality
//!
//! This module provides logging, progress reporting and file system helpers
//! used throughout the application.

pub mod logger;
pub(crate) mod progress;
pub mod path_utils;
pub mod filename_utils;
