//! Run configuration
//!
//! Settings are built from built-in defaults, then an optional TOML file,
//! then command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::coordinate::{CoordinateSystem, CoordinateSystemFactory};
use crate::raster::errors::{TileError, TileResult};
use crate::reproject::{ReprojectionOptions, ResamplingMethod};

const DEFAULT_INPUT_DIR: &str = "data/tiles";
const DEFAULT_INTERMEDIATE_DIR: &str = "data/tiles_changed";
const DEFAULT_OUTPUT_DIR: &str = "data/reprojection_results";
const DEFAULT_UTM_ZONE: u8 = 37;
const DEFAULT_DRIVER: &str = "GTiff";

/// Sections of the TOML file and the keys each one accepts
const KNOWN_KEYS: &[(&str, &[&str])] = &[
    ("paths", &["input", "intermediate", "output"]),
    ("projection", &["utm_zone", "hemisphere", "stamp"]),
    ("output", &["driver", "resampling", "warp_all_bands"]),
];

/// Hemisphere of the target UTM zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Parse "north"/"south" (or "n"/"s")
    pub fn from_name(name: &str) -> TileResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "north" | "n" => Ok(Hemisphere::North),
            "south" | "s" => Ok(Hemisphere::South),
            other => Err(TileError::ConfigError(format!("Unknown hemisphere: {}", other))),
        }
    }

    pub fn is_northern(&self) -> bool {
        *self == Hemisphere::North
    }
}

/// Complete configuration of a run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding the original tiles
    pub input_dir: PathBuf,
    /// Directory receiving prepared copies
    pub intermediate_dir: PathBuf,
    /// Directory receiving reprojected tiles
    pub output_dir: PathBuf,
    /// Target UTM zone, 1..=60
    pub utm_zone: u8,
    /// Target UTM hemisphere
    pub hemisphere: Hemisphere,
    /// Coordinate system stamped onto prepared copies, `None` keeps the source one
    pub stamp_projection: Option<CoordinateSystem>,
    /// Short name of the output driver
    pub driver: String,
    /// Resampling kernel for the warp
    pub resampling: ResamplingMethod,
    /// Warp every band instead of band 1 only
    pub warp_all_bands: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            intermediate_dir: PathBuf::from(DEFAULT_INTERMEDIATE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            utm_zone: DEFAULT_UTM_ZONE,
            hemisphere: Hemisphere::North,
            stamp_projection: Some(CoordinateSystem::WGS84),
            driver: DEFAULT_DRIVER.to_string(),
            resampling: ResamplingMethod::default(),
            warp_all_bands: false,
        }
    }
}

/// Values supplied on the command line; `None` leaves the setting untouched
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub input_dir: Option<PathBuf>,
    pub intermediate_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub utm_zone: Option<String>,
    pub hemisphere: Option<String>,
    pub stamp: Option<String>,
    pub driver: Option<String>,
    pub resampling: Option<String>,
    pub warp_all_bands: bool,
}

impl Settings {
    /// Parse settings from a TOML string, starting from the defaults
    pub fn from_str(content: &str) -> TileResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(TileError::ConfigError(format!("Failed to parse TOML: {}", e))),
        };

        for key in Self::unknown_keys(&toml_value) {
            warn!("Ignoring unknown configuration key {}", key);
        }

        let mut settings = Settings::default();

        if let Some(paths) = toml_value.get("paths").and_then(|v| v.as_table()) {
            if let Some(dir) = Self::string_entry(paths, "paths", "input")? {
                settings.input_dir = PathBuf::from(dir);
            }
            if let Some(dir) = Self::string_entry(paths, "paths", "intermediate")? {
                settings.intermediate_dir = PathBuf::from(dir);
            }
            if let Some(dir) = Self::string_entry(paths, "paths", "output")? {
                settings.output_dir = PathBuf::from(dir);
            }
        }

        if let Some(projection) = toml_value.get("projection").and_then(|v| v.as_table()) {
            if let Some(value) = projection.get("utm_zone") {
                let zone = value.as_integer().ok_or_else(|| {
                    TileError::ConfigError("projection.utm_zone must be an integer".to_string())
                })?;
                settings.utm_zone = Self::parse_zone(&zone.to_string())?;
            }
            if let Some(name) = Self::string_entry(projection, "projection", "hemisphere")? {
                settings.hemisphere = Hemisphere::from_name(&name)?;
            }
            if let Some(stamp) = Self::string_entry(projection, "projection", "stamp")? {
                settings.stamp_projection = Self::parse_stamp(&stamp)?;
            }
        }

        if let Some(output) = toml_value.get("output").and_then(|v| v.as_table()) {
            if let Some(driver) = Self::string_entry(output, "output", "driver")? {
                settings.driver = driver;
            }
            if let Some(name) = Self::string_entry(output, "output", "resampling")? {
                settings.resampling = ResamplingMethod::from_name(&name)?;
            }
            if let Some(value) = output.get("warp_all_bands") {
                settings.warp_all_bands = value.as_bool().ok_or_else(|| {
                    TileError::ConfigError("output.warp_all_bands must be a boolean".to_string())
                })?;
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> TileResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TileError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_str(&contents)
    }

    /// Apply command-line overrides on top of these settings
    pub fn apply_overrides(mut self, overrides: &SettingsOverrides) -> TileResult<Self> {
        if let Some(dir) = &overrides.input_dir {
            self.input_dir = dir.clone();
        }
        if let Some(dir) = &overrides.intermediate_dir {
            self.intermediate_dir = dir.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(zone) = &overrides.utm_zone {
            self.utm_zone = Self::parse_zone(zone)?;
        }
        if let Some(name) = &overrides.hemisphere {
            self.hemisphere = Hemisphere::from_name(name)?;
        }
        if let Some(stamp) = &overrides.stamp {
            self.stamp_projection = Self::parse_stamp(stamp)?;
        }
        if let Some(driver) = &overrides.driver {
            self.driver = driver.clone();
        }
        if let Some(name) = &overrides.resampling {
            self.resampling = ResamplingMethod::from_name(name)?;
        }
        if overrides.warp_all_bands {
            self.warp_all_bands = true;
        }

        self.validate()?;
        Ok(self)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> TileResult<()> {
        CoordinateSystemFactory::utm(self.utm_zone, self.hemisphere.is_northern())?;
        if self.driver.trim().is_empty() {
            return Err(TileError::ConfigError("Output driver name is empty".to_string()));
        }
        Ok(())
    }

    /// Target coordinate system of the reprojection
    pub fn target_system(&self) -> CoordinateSystem {
        CoordinateSystem::UTM(self.utm_zone, self.hemisphere.is_northern())
    }

    /// Options handed to both reprojection stages
    pub fn reprojection_options(&self) -> ReprojectionOptions {
        ReprojectionOptions {
            driver_name: self.driver.clone(),
            target: self.target_system(),
            stamp_projection: self.stamp_projection,
            resampling: self.resampling,
            warp_all_bands: self.warp_all_bands,
        }
    }

    /// Dotted names of every section or key the parser does not read
    ///
    /// A section that is not a table is reported by its name alone.
    pub(crate) fn unknown_keys(root: &toml::Value) -> Vec<String> {
        let mut unknown = Vec::new();
        let Some(sections) = root.as_table() else {
            return unknown;
        };

        for (section, value) in sections {
            let known = KNOWN_KEYS.iter().find(|(name, _)| *name == section.as_str());
            match (known, value.as_table()) {
                (Some((_, keys)), Some(entries)) => {
                    unknown.extend(
                        entries.keys()
                            .filter(|key| !keys.contains(&key.as_str()))
                            .map(|key| format!("{}.{}", section, key)),
                    );
                },
                _ => unknown.push(section.clone()),
            }
        }

        unknown
    }

    fn string_entry(
        table: &toml::value::Table,
        section: &str,
        key: &str,
    ) -> TileResult<Option<String>> {
        match table.get(key) {
            None => Ok(None),
            Some(value) => value.as_str().map(|s| Some(s.to_string())).ok_or_else(|| {
                TileError::ConfigError(format!("{}.{} must be a string", section, key))
            }),
        }
    }

    fn parse_zone(value: &str) -> TileResult<u8> {
        let zone = value.trim().parse::<u8>()
            .map_err(|_| TileError::ConfigError(format!("Invalid UTM zone: {}", value)))?;
        CoordinateSystemFactory::utm(zone, true)?;
        Ok(zone)
    }

    fn parse_stamp(value: &str) -> TileResult<Option<CoordinateSystem>> {
        if value.trim().eq_ignore_ascii_case("none") {
            Ok(None)
        } else {
            CoordinateSystemFactory::from_string(value).map(Some)
        }
    }
}
