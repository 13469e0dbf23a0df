//! # ZoneKit Editor
//!
//! Interactive editing of copper and keepout zone outlines on a board.
//!
//! ## Core Components
//!
//! - **Outline**: contours of integer vertices, exterior first, then holes
//! - **Zone**: an outline plus layer, net, keepout and fill metadata
//! - **Board**: the ordered zone collection
//! - **Journal**: pre-edit snapshots diffed into atomic undo records
//! - **Combiner**: merges overlapping zones of the same net and layers
//! - **Filler**: copper fill of an outline around higher-priority obstacles
//! - **Rule checker**: the seam to an external design rule checker
//! - **Session**: the [`ZoneEditor`] state machine driving every gesture
//!
//! ## Architecture
//!
//! ```text
//! ZoneEditor (one active gesture at most)
//!   ├── MouseCapture (corner, edge, zone move, rubber band)
//!   ├── ZoneRuleChecker (blocking while drawing, advisory after commits)
//!   ├── Board
//!   │     └── Zone ── PolygonOutline
//!   ├── combine_zones (after each structural edit)
//!   └── UndoJournal ◄── ZoneTransaction (per gesture)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zonekit_editor::{Board, ZoneEditor, ZoneTool};
//! use zonekit_core::BoardPoint;
//! use zonekit_settings::Config;
//!
//! let mut editor = ZoneEditor::with_defaults(Board::new(), &Config::default());
//! for (x, y) in [(0, 0), (100, 0), (100, 100), (0, 100)] {
//!     editor.begin_zone(BoardPoint::new(x, y), ZoneTool::Copper)?;
//! }
//! editor.end_zone()?;
//! ```

pub mod board;
pub mod capture;
pub mod combiner;
pub mod drc;
pub mod filler;
pub mod journal;
pub mod listener;
pub mod outline;
pub mod prompt;
pub mod session;
pub mod zone;

pub use board::{Board, ZoneFilter};
pub use capture::{CornerCapture, EdgeDragCapture, MouseCapture, NewEdgeCapture, ZoneMoveCapture};
pub use combiner::{combine_zones, CombineReport};
pub use drc::{AcceptAll, DrcVerdict, ZoneRuleChecker};
pub use filler::compute_fill;
pub use journal::{UndoEntry, UndoJournal, UndoKind, UndoRecord, ZoneTransaction};
pub use listener::{ZoneEditorListener, ZoneListenerHandle};
pub use outline::{Contour, PolygonOutline, VertexIndex};
pub use prompt::{AcceptDefaults, ZoneParamsOutcome, ZoneParamsPrompt};
pub use session::{
    BeginOutcome, CommitReport, CornerDeleteOutcome, EditState, FinishOutcome,
    LastCornerOutcome, ZoneEditor, ZoneTool,
};
pub use zone::{EditFlags, KeepoutRules, Zone, ZoneLayers, ZoneSettings};
