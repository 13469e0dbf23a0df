//! Undo journal for zone edits.
//!
//! A gesture opens a [`ZoneTransaction`] that deep-copies every zone the
//! gesture may touch. When the gesture commits, the transaction is diffed
//! against the live board into one [`UndoRecord`], which the
//! [`UndoJournal`] applies and reverts as a unit.

use crate::board::{Board, ZoneFilter};
use crate::zone::Zone;
use std::cmp::Reverse;
use std::collections::VecDeque;
use zonekit_core::ZoneId;

/// What happened to a zone during a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoKind {
    New,
    Changed,
    Deleted,
}

/// One zone's contribution to an undo record. Zones are owned copies.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoEntry {
    /// Zone added by the gesture, as committed
    New { zone: Zone },
    /// Zone modified by the gesture, as it was before
    Changed { zone: Zone },
    /// Zone removed by the gesture, as it was before, with its board position
    Deleted { zone: Zone, index: usize },
}

impl UndoEntry {
    pub fn kind(&self) -> UndoKind {
        match self {
            UndoEntry::New { .. } => UndoKind::New,
            UndoEntry::Changed { .. } => UndoKind::Changed,
            UndoEntry::Deleted { .. } => UndoKind::Deleted,
        }
    }

    pub fn zone(&self) -> &Zone {
        match self {
            UndoEntry::New { zone } | UndoEntry::Changed { zone } | UndoEntry::Deleted { zone, .. } => {
                zone
            }
        }
    }

    pub fn zone_id(&self) -> ZoneId {
        self.zone().id()
    }

    /// Undoes this entry on `board` and returns the entry that redoes it
    fn revert(self, board: &mut Board) -> Option<UndoEntry> {
        match self {
            UndoEntry::New { zone } => {
                let index = board.index_of(zone.id())?;
                let removed = board.remove(zone.id())?;
                Some(UndoEntry::Deleted {
                    zone: removed,
                    index,
                })
            }
            UndoEntry::Changed { zone } => {
                let id = zone.id();
                match board.replace(zone) {
                    Some(previous) => Some(UndoEntry::Changed { zone: previous }),
                    None => {
                        tracing::warn!("Undo: zone {} vanished, change dropped", id);
                        None
                    }
                }
            }
            UndoEntry::Deleted { zone, index } => {
                board.insert(index, zone.clone());
                Some(UndoEntry::New { zone })
            }
        }
    }
}

/// The atomic unit of undo: every zone touched by one gesture
#[derive(Debug, Clone, PartialEq)]
pub struct UndoRecord {
    pub description: String,
    pub entries: Vec<UndoEntry>,
}

impl UndoRecord {
    pub fn new(description: impl Into<String>, entries: Vec<UndoEntry>) -> Self {
        Self {
            description: description.into(),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_for(&self, id: ZoneId) -> Option<&UndoEntry> {
        self.entries.iter().find(|e| e.zone_id() == id)
    }

    /// Reverts all entries, last first, and returns the inverse record
    pub fn revert(self, board: &mut Board) -> UndoRecord {
        let entries = self
            .entries
            .into_iter()
            .rev()
            .filter_map(|entry| entry.revert(board))
            .collect();
        UndoRecord {
            description: self.description,
            entries,
        }
    }
}

/// Pre-edit snapshot of the zones a gesture may touch
#[derive(Debug, Clone)]
pub struct ZoneTransaction {
    description: String,
    picked: Vec<(usize, Zone)>,
    created: Vec<ZoneId>,
    auxiliary: Vec<UndoEntry>,
}

impl ZoneTransaction {
    /// Deep-copies every zone on `board` matching `filter`
    pub fn begin(board: &Board, filter: ZoneFilter, description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            picked: board.snapshot(filter),
            created: Vec::new(),
            auxiliary: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rename(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn picked_count(&self) -> usize {
        self.picked.len()
    }

    /// Marks `id` as added to the board by this gesture
    pub fn mark_new(&mut self, id: ZoneId) {
        if !self.created.contains(&id) {
            self.created.push(id);
        }
    }

    /// Appends zones touched by a combine pass
    pub fn record_auxiliary(&mut self, entries: impl IntoIterator<Item = UndoEntry>) {
        self.auxiliary.extend(entries);
    }

    fn is_picked(&self, id: ZoneId) -> bool {
        self.picked.iter().any(|(_, z)| z.id() == id)
    }

    /// Diffs the snapshot against `board` and builds the undo record.
    ///
    /// Entry order is deletions by descending position, then changes, then
    /// additions, so reverting (last first) removes additions before
    /// restoring deleted zones at their original positions.
    pub fn finish(self, board: &Board) -> UndoRecord {
        let mut deleted = Vec::new();
        let mut changed = Vec::new();
        let mut added = Vec::new();

        for (index, snapshot) in &self.picked {
            match board.zone(snapshot.id()) {
                None => deleted.push(UndoEntry::Deleted {
                    zone: snapshot.clone(),
                    index: *index,
                }),
                Some(live) if !live.same_state(snapshot) => changed.push(UndoEntry::Changed {
                    zone: snapshot.clone(),
                }),
                Some(_) => {}
            }
        }

        for entry in &self.auxiliary {
            let id = entry.zone_id();
            if self.is_picked(id) || self.created.contains(&id) {
                continue;
            }
            match entry {
                UndoEntry::New { .. } if board.contains(id) => added.push(id),
                UndoEntry::New { .. } => {}
                UndoEntry::Changed { .. } => changed.push(entry.clone()),
                UndoEntry::Deleted { .. } => deleted.push(entry.clone()),
            }
        }

        added.extend(self.created.iter().copied().filter(|id| board.contains(*id)));
        let added = added.into_iter().filter_map(|id| {
            board.zone(id).map(|z| {
                let mut zone = z.clone();
                zone.clear_flags();
                UndoEntry::New { zone }
            })
        });

        deleted.sort_by_key(|entry| match entry {
            UndoEntry::Deleted { index, .. } => Reverse(*index),
            _ => Reverse(0),
        });

        let entries = deleted.into_iter().chain(changed).chain(added).collect();
        UndoRecord::new(self.description, entries)
    }
}

/// Bounded undo/redo history of zone records
#[derive(Debug, Clone)]
pub struct UndoJournal {
    undo_stack: VecDeque<UndoRecord>,
    redo_stack: Vec<UndoRecord>,
    max_depth: usize,
}

impl UndoJournal {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Records a committed gesture. Empty records are dropped.
    pub fn commit(&mut self, record: UndoRecord) -> bool {
        if record.is_empty() {
            tracing::debug!("Nothing to record for '{}'", record.description);
            return false;
        }
        tracing::debug!(
            "Recording '{}' ({} zones)",
            record.description,
            record.entries.len()
        );
        self.redo_stack.clear();
        self.undo_stack.push_back(record);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        true
    }

    /// Reverts the latest record on `board`; returns its description
    pub fn undo(&mut self, board: &mut Board) -> Option<String> {
        let record = self.undo_stack.pop_back()?;
        let description = record.description.clone();
        self.redo_stack.push(record.revert(board));
        Some(description)
    }

    /// Re-applies the latest undone record on `board`; returns its description
    pub fn redo(&mut self, board: &mut Board) -> Option<String> {
        let record = self.redo_stack.pop()?;
        let description = record.description.clone();
        self.undo_stack.push_back(record.revert(board));
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn last_record(&self) -> Option<&UndoRecord> {
        self.undo_stack.back()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for UndoJournal {
    fn default() -> Self {
        Self::new(50)
    }
}
