//! Zone editor listener interface
//!
//! The renderer and any other observer are told about structural changes
//! through this trait. Every method has an empty default.

use zonekit_core::ZoneId;

/// Handle for a registered editor listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoneListenerHandle(pub usize);

/// Listener trait for zone editor events
pub trait ZoneEditorListener {
    /// Called after every mutation of a zone outline, including previews
    fn on_outline_changed(&self, _zone: ZoneId) {}

    /// Called when a zone joins the board
    fn on_zone_added(&self, _zone: ZoneId) {}

    /// Called when a zone leaves the board
    fn on_zone_removed(&self, _zone: ZoneId) {}

    /// Called for each advisory rule violation
    fn on_drc_warning(&self, _zone: ZoneId, _message: &str) {}

    /// Called when a gesture releases mouse capture, on every exit path
    fn on_capture_released(&self) {}
}
