//! ZoneKit Settings Crate
//!
//! Handles zone editor configuration and settings persistence.

pub mod config;
pub mod error;

pub use config::{Config, CornerSmoothing, EditorSettings, ZoneDefaults};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
