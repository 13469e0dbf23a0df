//! Mouse capture strategies.
//!
//! While a gesture holds capture, cursor motion is routed to exactly one
//! strategy. Each strategy knows how to preview the motion on its zone and
//! how to put the zone back when the gesture is aborted.

use crate::session::EditState;
use crate::zone::Zone;
use zonekit_core::{snap_to_45, BoardPoint, OutlineError};

pub trait MouseCapture {
    /// The editor state this capture represents
    fn state(&self) -> EditState;

    /// Previews the cursor at `cursor`
    fn on_move(&mut self, zone: &mut Zone, cursor: BoardPoint) -> Result<(), OutlineError>;

    /// Restores the zone to how it was before the gesture
    fn on_abort(&mut self, zone: &mut Zone) -> Result<(), OutlineError>;
}

/// Rubber band edge of a zone being drawn: the trailing corner follows
/// the cursor.
#[derive(Debug, Clone, Copy)]
pub struct NewEdgeCapture {
    pub zone_45_only: bool,
}

impl MouseCapture for NewEdgeCapture {
    fn state(&self) -> EditState {
        EditState::DrawingNewZone
    }

    fn on_move(&mut self, zone: &mut Zone, cursor: BoardPoint) -> Result<(), OutlineError> {
        let count = zone.corner_count();
        if count == 0 {
            return Ok(());
        }
        let last = count - 1;
        let previous = last.checked_sub(1).and_then(|i| zone.corner_position(i));
        let target = match previous {
            Some(previous) if self.zone_45_only => snap_to_45(cursor, previous),
            _ => cursor,
        };
        if zone.corner_position(last) != Some(target) {
            zone.outline_mut().set_corner_position(last, target)?;
        }
        Ok(())
    }

    fn on_abort(&mut self, zone: &mut Zone) -> Result<(), OutlineError> {
        zone.outline_mut().remove_all_contours();
        Ok(())
    }
}

/// Dragging one corner of a committed zone
#[derive(Debug, Clone, Copy)]
pub struct CornerCapture {
    pub corner: usize,
    pub initial: BoardPoint,
    /// Corner inserted by this gesture; abort removes it
    pub is_new: bool,
}

impl MouseCapture for CornerCapture {
    fn state(&self) -> EditState {
        EditState::MovingCorner
    }

    fn on_move(&mut self, zone: &mut Zone, cursor: BoardPoint) -> Result<(), OutlineError> {
        zone.outline_mut().set_corner_position(self.corner, cursor)
    }

    fn on_abort(&mut self, zone: &mut Zone) -> Result<(), OutlineError> {
        if self.is_new {
            zone.outline_mut().remove_vertex(self.corner);
            Ok(())
        } else {
            zone.outline_mut()
                .set_corner_position(self.corner, self.initial)
        }
    }
}

/// Dragging the edge that starts at corner `edge`
#[derive(Debug, Clone, Copy)]
pub struct EdgeDragCapture {
    pub edge: usize,
    pub initial_cursor: BoardPoint,
    pub last_cursor: BoardPoint,
}

impl MouseCapture for EdgeDragCapture {
    fn state(&self) -> EditState {
        EditState::DraggingEdge
    }

    fn on_move(&mut self, zone: &mut Zone, cursor: BoardPoint) -> Result<(), OutlineError> {
        let offset = cursor - self.last_cursor;
        if !offset.is_zero() {
            zone.move_edge(self.edge, offset)?;
            self.last_cursor = cursor;
        }
        Ok(())
    }

    fn on_abort(&mut self, zone: &mut Zone) -> Result<(), OutlineError> {
        let offset = self.initial_cursor - self.last_cursor;
        if !offset.is_zero() {
            zone.move_edge(self.edge, offset)?;
            self.last_cursor = self.initial_cursor;
        }
        Ok(())
    }
}

/// Moving a whole committed zone
#[derive(Debug, Clone, Copy)]
pub struct ZoneMoveCapture {
    pub initial_cursor: BoardPoint,
    pub last_cursor: BoardPoint,
}

impl MouseCapture for ZoneMoveCapture {
    fn state(&self) -> EditState {
        EditState::MovingWholeZone
    }

    fn on_move(&mut self, zone: &mut Zone, cursor: BoardPoint) -> Result<(), OutlineError> {
        let offset = cursor - self.last_cursor;
        if !offset.is_zero() {
            zone.move_by(offset);
            self.last_cursor = cursor;
        }
        Ok(())
    }

    fn on_abort(&mut self, zone: &mut Zone) -> Result<(), OutlineError> {
        let offset = self.initial_cursor - self.last_cursor;
        if !offset.is_zero() {
            zone.move_by(offset);
            self.last_cursor = self.initial_cursor;
        }
        Ok(())
    }
}
