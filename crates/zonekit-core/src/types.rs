//! Identity types shared across crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a zone.
///
/// Assigned once when the zone is created and carried unchanged through
/// undo snapshots, so a snapshot can always be matched back to the live zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZoneId(pub u64);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:X}", self.0)
    }
}
