//! Configuration of inspection and reprojection runs

pub mod settings;

pub use settings::{Hemisphere, Settings, SettingsOverrides};
