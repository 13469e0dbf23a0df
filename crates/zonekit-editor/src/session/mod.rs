//! Interactive zone editing.
//!
//! [`ZoneEditor`] owns the board, the undo journal and at most one active
//! gesture. A gesture holds mouse capture from its start until it commits
//! or aborts; `None` in the session slot is the idle state.
//!
//! This module is split into submodules:
//! - `draw`: drawing new zones and cutouts
//! - `drag`: corner, edge and whole-zone drags
//! - `modify`: one-shot edits of committed zones

mod drag;
mod draw;
mod fill;
mod modify;

use crate::board::Board;
use crate::capture::MouseCapture;
use crate::combiner::combine_zones;
use crate::drc::{AcceptAll, DrcVerdict, ZoneRuleChecker};
use crate::journal::{UndoEntry, UndoJournal, UndoRecord, ZoneTransaction};
use crate::listener::{ZoneEditorListener, ZoneListenerHandle};
use crate::prompt::{AcceptDefaults, ZoneParamsPrompt};
use crate::zone::Zone;
use std::fmt;
use std::sync::Arc;
use zonekit_core::{BoardPoint, LayerId, ZoneEditError, ZoneId};
use zonekit_settings::{Config, EditorSettings, ZoneDefaults};

/// What the editor is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditState {
    Idle,
    DrawingNewZone,
    MovingCorner,
    DraggingEdge,
    MovingWholeZone,
}

impl fmt::Display for EditState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditState::Idle => write!(f, "idle"),
            EditState::DrawingNewZone => write!(f, "drawing new zone"),
            EditState::MovingCorner => write!(f, "moving corner"),
            EditState::DraggingEdge => write!(f, "dragging edge"),
            EditState::MovingWholeZone => write!(f, "moving zone"),
        }
    }
}

/// Kind of zone started by [`ZoneEditor::begin_zone`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTool {
    Copper,
    Keepout,
}

/// Zone the next drawing session is based on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneTemplate {
    /// Copy the parameters of this zone
    Similar(ZoneId),
    /// Fold the drawn outline into this zone as a hole
    Cutout(ZoneId),
}

impl ZoneTemplate {
    fn zone(&self) -> ZoneId {
        match self {
            ZoneTemplate::Similar(id) | ZoneTemplate::Cutout(id) => *id,
        }
    }
}

/// The zone a gesture works on
#[derive(Debug)]
enum SessionZone {
    /// Zone being drawn; owned by the session until it commits
    Candidate(Zone),
    /// Zone already on the board
    Committed(ZoneId),
}

/// One active gesture
struct EditSession {
    zone: SessionZone,
    capture: Box<dyn MouseCapture>,
    /// Pre-edit snapshot; drawing sessions take theirs at finish
    transaction: Option<ZoneTransaction>,
    cutout_target: Option<ZoneId>,
    last_cursor: BoardPoint,
}

impl EditSession {
    fn state(&self) -> EditState {
        self.capture.state()
    }
}

/// Result of a committed gesture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitReport {
    /// The zone holding the edit afterwards; `None` if it vanished
    pub zone: Option<ZoneId>,
    /// Zones absorbed by the combine pass
    pub merged: usize,
    /// Advisory rule violations; the edit stands regardless
    pub drc_warnings: Vec<String>,
}

/// Result of a click while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// A new zone was started with its first corner
    Started(ZoneId),
    /// A corner was placed; `corners` counts the placed corners
    CornerAdded { corners: usize },
    /// Click on the previous corner; nothing placed
    Unchanged,
    /// Parameter prompt cancelled; no zone was created
    Aborted,
}

/// Result of closing a drawn outline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishOutcome {
    Committed(CommitReport),
    /// Fewer than 3 corners; the zone was discarded
    Cancelled,
}

/// Result of removing the last corner while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastCornerOutcome {
    Removed { corners: usize },
    /// Too few corners left; the zone was discarded
    Cancelled,
}

/// Result of deleting a corner of a committed zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CornerDeleteOutcome {
    CornerRemoved(CommitReport),
    /// The outline became degenerate; the whole zone was deleted
    ZoneDeleted,
}

/// Board editing context for zones
pub struct ZoneEditor<C = AcceptAll, P = AcceptDefaults> {
    board: Board,
    journal: UndoJournal,
    settings: EditorSettings,
    defaults: ZoneDefaults,
    checker: C,
    prompt: P,
    active_layer: LayerId,
    session: Option<EditSession>,
    template: Option<ZoneTemplate>,
    listeners: Vec<(ZoneListenerHandle, Arc<dyn ZoneEditorListener>)>,
    next_listener: usize,
}

impl ZoneEditor {
    /// Editor with an accepting rule checker and prompt
    pub fn with_defaults(board: Board, config: &Config) -> Self {
        Self::new(board, config, AcceptAll, AcceptDefaults)
    }
}

impl<C: ZoneRuleChecker, P: ZoneParamsPrompt> ZoneEditor<C, P> {
    pub fn new(board: Board, config: &Config, checker: C, prompt: P) -> Self {
        Self {
            board,
            journal: UndoJournal::new(config.editor.undo_depth),
            settings: config.editor.clone(),
            defaults: config.zones.clone(),
            checker,
            prompt,
            active_layer: LayerId::F_CU,
            session: None,
            template: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access, for loading zones outside of any gesture
    pub fn board_mut(&mut self) -> Result<&mut Board, ZoneEditError> {
        self.require_idle()?;
        Ok(&mut self.board)
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn journal(&self) -> &UndoJournal {
        &self.journal
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EditorSettings {
        &mut self.settings
    }

    pub fn checker(&self) -> &C {
        &self.checker
    }

    pub fn checker_mut(&mut self) -> &mut C {
        &mut self.checker
    }

    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    pub fn active_layer(&self) -> LayerId {
        self.active_layer
    }

    pub fn set_active_layer(&mut self, layer: LayerId) {
        self.active_layer = layer;
    }

    pub fn state(&self) -> EditState {
        self.session
            .as_ref()
            .map_or(EditState::Idle, EditSession::state)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The zone being drawn, before it is committed
    pub fn candidate(&self) -> Option<&Zone> {
        match self.session.as_ref().map(|s| &s.zone) {
            Some(SessionZone::Candidate(zone)) => Some(zone),
            _ => None,
        }
    }

    /// Last cursor position seen by the active gesture
    pub fn last_cursor(&self) -> Option<BoardPoint> {
        self.session.as_ref().map(|s| s.last_cursor)
    }

    pub fn add_listener(&mut self, listener: Arc<dyn ZoneEditorListener>) -> ZoneListenerHandle {
        let handle = ZoneListenerHandle(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((handle, listener));
        handle
    }

    pub fn remove_listener(&mut self, handle: ZoneListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    /// Routes cursor motion to the gesture holding capture.
    /// Without an active gesture the motion is ignored.
    pub fn on_mouse_move(&mut self, cursor: BoardPoint) -> Result<(), ZoneEditError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let zone = session_zone_mut(&mut session.zone, &mut self.board)?;
        session.capture.on_move(zone, cursor).map_err(fatal)?;
        session.last_cursor = cursor;
        let id = zone.id();
        self.notify(|l| l.on_outline_changed(id));
        Ok(())
    }

    /// Aborts the active gesture, restoring the pre-gesture geometry.
    /// Returns `false` when nothing was active.
    pub fn abort(&mut self) -> Result<bool, ZoneEditError> {
        let Some(mut session) = self.release() else {
            return Ok(false);
        };
        let state = session.state();
        let id = match &mut session.zone {
            SessionZone::Candidate(zone) => {
                session.capture.on_abort(zone).map_err(fatal)?;
                zone.id()
            }
            SessionZone::Committed(id) => {
                if let Some(zone) = self.board.zone_mut(*id) {
                    session.capture.on_abort(zone).map_err(fatal)?;
                    zone.clear_flags();
                }
                *id
            }
        };
        tracing::debug!("Aborted {} on zone {}", state, id);
        self.notify(|l| l.on_outline_changed(id));
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.session.is_none() && self.journal.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.is_none() && self.journal.can_redo()
    }

    /// Reverts the latest committed gesture. Refused while a gesture is active.
    pub fn undo(&mut self) -> Result<Option<String>, ZoneEditError> {
        self.require_idle()?;
        let before = self.zone_ids();
        let description = self.journal.undo(&mut self.board);
        if let Some(description) = &description {
            tracing::info!("Undo: {}", description);
        }
        self.notify_board_diff(&before);
        Ok(description)
    }

    /// Re-applies the latest undone gesture. Refused while a gesture is active.
    pub fn redo(&mut self) -> Result<Option<String>, ZoneEditError> {
        self.require_idle()?;
        let before = self.zone_ids();
        let description = self.journal.redo(&mut self.board);
        if let Some(description) = &description {
            tracing::info!("Redo: {}", description);
        }
        self.notify_board_diff(&before);
        Ok(description)
    }

    fn require_idle(&self) -> Result<(), ZoneEditError> {
        match &self.session {
            Some(session) => Err(ZoneEditError::SessionActive {
                state: session.state().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn zone_ref(&self, id: ZoneId) -> Result<&Zone, ZoneEditError> {
        self.board.zone(id).ok_or(ZoneEditError::ZoneNotFound(id))
    }

    /// Ends capture. Every exit path of a gesture goes through here.
    fn release(&mut self) -> Option<EditSession> {
        let session = self.session.take()?;
        self.notify(|l| l.on_capture_released());
        Some(session)
    }

    fn notify(&self, f: impl Fn(&dyn ZoneEditorListener)) {
        for (_, listener) in &self.listeners {
            f(listener.as_ref());
        }
    }

    fn zone_ids(&self) -> Vec<ZoneId> {
        self.board.zones().iter().map(Zone::id).collect()
    }

    fn notify_board_diff(&self, before: &[ZoneId]) {
        for id in before {
            if self.board.contains(*id) {
                self.notify(|l| l.on_outline_changed(*id));
            } else {
                self.notify(|l| l.on_zone_removed(*id));
            }
        }
        for zone in self.board.zones() {
            if !before.contains(&zone.id()) {
                self.notify(|l| l.on_zone_added(zone.id()));
            }
        }
    }

    fn notify_record(&self, record: &UndoRecord) {
        for entry in &record.entries {
            let id = entry.zone_id();
            match entry {
                UndoEntry::New { .. } => self.notify(|l| l.on_zone_added(id)),
                UndoEntry::Deleted { .. } => self.notify(|l| l.on_zone_removed(id)),
                UndoEntry::Changed { .. } => self.notify(|l| l.on_outline_changed(id)),
            }
        }
    }

    /// Runs the rule checker as a non-blocking report on `id`
    fn advisory_drc(&mut self, id: ZoneId) -> Vec<String> {
        let Some(zone) = self.board.zone(id) else {
            return Vec::new();
        };
        let warnings = self.checker.check_zone(&self.board, zone);
        for warning in &warnings {
            tracing::warn!("DRC: zone {}: {}", id, warning);
            self.notify(|l| l.on_drc_warning(id, warning));
        }
        warnings
    }

    /// Diffs the transaction against the board and records it
    fn commit(&mut self, tx: ZoneTransaction) {
        let record = tx.finish(&self.board);
        self.notify_record(&record);
        if self.journal.commit(record) {
            tracing::info!(
                "{} (undo depth {})",
                self.journal
                    .last_record()
                    .map_or("", |r| r.description.as_str()),
                self.journal.undo_depth()
            );
        }
    }

    /// Combines the edited zone with its neighbours, reports rule
    /// violations and records the gesture.
    fn finish_gesture(&mut self, tx: ZoneTransaction, edited: ZoneId) -> CommitReport {
        self.finish_gesture_with(tx, edited, false)
    }

    /// Same as `finish_gesture`, refilling the surviving zone when `refill`
    fn finish_gesture_with(
        &mut self,
        mut tx: ZoneTransaction,
        edited: ZoneId,
        refill: bool,
    ) -> CommitReport {
        let combine = combine_zones(&mut self.board, edited);
        let survivor = combine.survivor;
        let merged = combine.merged;
        tx.record_auxiliary(combine.touched);

        if let Some(zone) = survivor.and_then(|id| self.board.zone_mut(id)) {
            zone.clear_flags();
        }
        if let Some(id) = survivor.filter(|_| refill) {
            self.refill(id);
        }
        let drc_warnings = survivor
            .map(|id| self.advisory_drc(id))
            .unwrap_or_default();
        self.commit(tx);

        CommitReport {
            zone: survivor,
            merged,
            drc_warnings,
        }
    }
}

fn session_zone_mut<'a>(
    zone: &'a mut SessionZone,
    board: &'a mut Board,
) -> Result<&'a mut Zone, ZoneEditError> {
    match zone {
        SessionZone::Candidate(zone) => Ok(zone),
        SessionZone::Committed(id) => board.zone_mut(*id).ok_or(ZoneEditError::ZoneNotFound(*id)),
    }
}

/// Logs a contract breach and converts it into the editor error
fn fatal(err: impl Into<ZoneEditError>) -> ZoneEditError {
    let err = err.into();
    tracing::error!("{}", err);
    err
}

/// Asks the rule checker about one edge; a violation blocks the edit
fn check_blocking<C: ZoneRuleChecker>(
    checker: &mut C,
    board: &Board,
    zone: &Zone,
    index: usize,
    violation: impl FnOnce(String) -> ZoneEditError,
) -> Result<(), ZoneEditError> {
    match checker.check_edge(board, zone, index) {
        DrcVerdict::Pass => Ok(()),
        DrcVerdict::Violation(reason) => {
            let err = violation(reason);
            tracing::warn!("{}", err);
            Err(err)
        }
        DrcVerdict::Fatal(reason) => Err(fatal(ZoneEditError::RuleCheckerFailure { reason })),
    }
}
