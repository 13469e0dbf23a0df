//! Configuration for ZoneKit
//!
//! Provides configuration file handling and validation for the zone editor.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Zone defaults (clearances and thermal relief, in mils)
//! - Editor preferences (45 degree constraint, rule checking, undo depth)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zonekit_core::mils_to_iu;

/// Name of the configuration file inside the config directory
pub const CONFIG_FILE_NAME: &str = "zonekit.toml";

/// Corner smoothing applied to zone outlines when filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerSmoothing {
    /// Sharp corners
    None,
    /// Corners cut at 45 degrees
    Chamfer,
    /// Rounded corners
    Fillet,
}

impl Default for CornerSmoothing {
    fn default() -> Self {
        Self::None
    }
}

impl std::fmt::Display for CornerSmoothing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Chamfer => write!(f, "chamfer"),
            Self::Fillet => write!(f, "fillet"),
        }
    }
}

/// Default parameters for newly drawn zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneDefaults {
    /// Gap between a pad and its thermal relief spokes (mils)
    pub thermal_relief_gap_mil: f64,
    /// Width of the thermal relief copper spokes (mils)
    pub thermal_relief_copper_width_mil: f64,
    /// Clearance between the zone fill and other copper (mils)
    pub clearance_mil: f64,
    /// Minimum width of filled copper (mils)
    pub min_thickness_mil: f64,
    /// Corner smoothing style
    pub corner_smoothing: CornerSmoothing,
    /// Corner smoothing radius (mils)
    pub corner_radius_mil: f64,
}

impl Default for ZoneDefaults {
    fn default() -> Self {
        Self {
            thermal_relief_gap_mil: 20.0,
            thermal_relief_copper_width_mil: 20.0,
            clearance_mil: 20.0,
            min_thickness_mil: 10.0,
            corner_smoothing: CornerSmoothing::None,
            corner_radius_mil: 0.0,
        }
    }
}

impl ZoneDefaults {
    pub fn thermal_relief_gap(&self) -> i64 {
        mils_to_iu(self.thermal_relief_gap_mil)
    }

    pub fn thermal_relief_copper_width(&self) -> i64 {
        mils_to_iu(self.thermal_relief_copper_width_mil)
    }

    pub fn clearance(&self) -> i64 {
        mils_to_iu(self.clearance_mil)
    }

    pub fn min_thickness(&self) -> i64 {
        mils_to_iu(self.min_thickness_mil)
    }

    pub fn corner_radius(&self) -> i64 {
        mils_to_iu(self.corner_radius_mil)
    }
}

/// Zone editor preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Constrain new outline edges to multiples of 45 degrees
    pub zone_45_only: bool,
    /// Run the rule checker while drawing and closing copper zones
    pub legacy_drc_on: bool,
    /// Maximum number of undo records kept
    pub undo_depth: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            zone_45_only: false,
            legacy_drc_on: true,
            undo_depth: 50,
        }
    }
}

/// Complete zone editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Zone defaults
    pub zones: ZoneDefaults,
    /// Editor preferences
    pub editor: EditorSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config file location (`<config dir>/zonekit/zonekit.toml`)
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join("zonekit").join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config: Self = match Format::from_path(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load config from file, falling back to defaults when it is missing or invalid
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)
            .map_err(|source| SettingsError::Write {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zones = &self.zones;
        for (key, value) in [
            ("zones.thermal_relief_gap_mil", zones.thermal_relief_gap_mil),
            (
                "zones.thermal_relief_copper_width_mil",
                zones.thermal_relief_copper_width_mil,
            ),
            ("zones.clearance_mil", zones.clearance_mil),
            ("zones.corner_radius_mil", zones.corner_radius_mil),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if !zones.min_thickness_mil.is_finite() || zones.min_thickness_mil <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "zones.min_thickness_mil".to_string(),
                value: zones.min_thickness_mil.to_string(),
            });
        }

        if self.editor.undo_depth == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "editor.undo_depth".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
