//! # ZoneKit Core
//!
//! Core types shared by the ZoneKit crates:
//! integer board geometry, layer and net identity, unit conversion
//! and the error taxonomy used by the zone editor.

pub mod error;
pub mod geometry;
pub mod layer;
pub mod net;
pub mod types;
pub mod units;

pub use error::{Error, OutlineError, Result, ZoneEditError};
pub use geometry::{snap_to_45, BoardPoint, BoardVector};
pub use layer::{LayerId, LayerSet};
pub use net::{NetCode, NetList};
pub use types::ZoneId;
pub use units::{iu_to_mils, mils_to_iu, mm_to_iu, IU_PER_MILS, IU_PER_MM};
