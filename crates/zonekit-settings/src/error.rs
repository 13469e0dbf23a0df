//! Settings errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read, write or decode a settings file
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Creating the settings directory failed
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Malformed JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot encode settings as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Invalid settings: {0}")]
    Config(#[from] ConfigError),
}

/// A settings value or location the zone editor cannot use
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Settings files must end in .json or .toml, got '{0}'")]
    UnsupportedFormat(String),

    #[error("'{key}' = {value} is out of range")]
    ValueOutOfRange { key: String, value: String },

    /// `dirs` found no config directory for this OS
    #[error("No config directory on {0}")]
    UnsupportedPlatform(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

pub type ConfigResult<T> = Result<T, ConfigError>;
