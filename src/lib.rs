//! # ZoneKit
//!
//! Interactive editing of copper and keepout zone outlines for PCB layout.
//!
//! ## Architecture
//!
//! ZoneKit is organized as a workspace with multiple crates:
//!
//! 1. **zonekit-core** - Board geometry, layer and net identity, units, errors
//! 2. **zonekit-settings** - Zone defaults and editor options, JSON/TOML persistence
//! 3. **zonekit-editor** - Outlines, zones, undo journal, combiner, edit sessions
//! 4. **zonekit** - This crate: logging setup, gesture scripts and the binary
//!
//! The binary has no canvas. It replays a JSON gesture script through the
//! same [`ZoneEditor`] an interactive front end would drive.

pub mod script;

pub use zonekit_core::{
    BoardPoint, BoardVector, Error, LayerId, LayerSet, NetCode, NetList, OutlineError, Result,
    ZoneEditError, ZoneId,
};

pub use zonekit_editor::{
    combine_zones, AcceptAll, AcceptDefaults, BeginOutcome, Board, CommitReport,
    CornerDeleteOutcome, DrcVerdict, EditState, FinishOutcome, LastCornerOutcome,
    PolygonOutline, UndoJournal, Zone, ZoneEditor, ZoneEditorListener, ZoneParamsOutcome,
    ZoneParamsPrompt, ZoneRuleChecker, ZoneSettings, ZoneTool,
};

pub use zonekit_settings::{Config, EditorSettings, ZoneDefaults};

pub use script::{
    replay, Gesture, GestureScript, PromptAnswer, ReplayReport, ScriptError, SettingsPatch,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("ZONEKIT_BUILD_DATE");

/// Initialize logging
///
/// Log lines go to stderr so the JSON written to stdout stays parseable.
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
