//! Zone parameter prompt.
//!
//! Stands in for the copper, keepout and non-copper parameter dialogs.

use crate::board::Board;
use crate::zone::ZoneSettings;

/// How the user left the parameter prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneParamsOutcome {
    /// Cancelled: nothing changes
    Abort,
    /// Settings accepted for the zone being edited
    Accepted(ZoneSettings),
    /// Settings exported to every similar zone without touching geometry
    ExportValues(ZoneSettings),
}

/// Prompts for zone parameters, pre-filled with `initial`
pub trait ZoneParamsPrompt {
    fn edit_copper(&mut self, board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome;

    fn edit_keepout(&mut self, board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome;

    fn edit_non_copper(&mut self, board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome;
}

/// Prompt that accepts the proposed settings unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl ZoneParamsPrompt for AcceptDefaults {
    fn edit_copper(&mut self, _board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome {
        ZoneParamsOutcome::Accepted(initial.clone())
    }

    fn edit_keepout(&mut self, _board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome {
        ZoneParamsOutcome::Accepted(initial.clone())
    }

    fn edit_non_copper(&mut self, _board: &Board, initial: &ZoneSettings) -> ZoneParamsOutcome {
        ZoneParamsOutcome::Accepted(initial.clone())
    }
}
