//! Corner, edge and whole-zone drags of committed zones.

use super::{fatal, CommitReport, EditSession, SessionZone, ZoneEditor};
use crate::board::ZoneFilter;
use crate::capture::{CornerCapture, EdgeDragCapture, MouseCapture, ZoneMoveCapture};
use crate::drc::ZoneRuleChecker;
use crate::journal::ZoneTransaction;
use crate::prompt::ZoneParamsPrompt;
use zonekit_core::{BoardPoint, OutlineError, ZoneEditError, ZoneId};

impl<C: ZoneRuleChecker, P: ZoneParamsPrompt> ZoneEditor<C, P> {
    /// Starts dragging corner `corner` of `zone`
    pub fn start_move_corner(&mut self, zone: ZoneId, corner: usize) -> Result<(), ZoneEditError> {
        self.require_idle()?;
        let initial = self.corner_of(zone, corner)?;
        let tx = self.begin_drag(zone, "Move zone corner");
        self.capture(
            zone,
            tx,
            Box::new(CornerCapture {
                corner,
                initial,
                is_new: false,
            }),
            initial,
        );
        if let Some(z) = self.board.zone_mut(zone) {
            z.flags_mut().moving = true;
            z.flags_mut().selected_corner = Some(corner);
        }
        Ok(())
    }

    /// Inserts a corner after `edge` at `pos` and starts dragging it.
    /// Aborting the drag removes the inserted corner again.
    pub fn insert_corner_and_move(
        &mut self,
        zone: ZoneId,
        edge: usize,
        pos: BoardPoint,
    ) -> Result<(), ZoneEditError> {
        self.require_idle()?;
        self.corner_of(zone, edge)?;
        // Snapshot first: the new corner is not part of the pre-edit state
        let tx = self.begin_drag(zone, "Insert zone corner");
        let corner = match self.board.zone_mut(zone) {
            Some(z) => {
                let corner = z.outline_mut().insert_vertex(edge, pos).map_err(fatal)?;
                z.flags_mut().moving = true;
                z.flags_mut().selected_corner = Some(corner);
                corner
            }
            None => return Err(ZoneEditError::ZoneNotFound(zone)),
        };
        self.capture(
            zone,
            tx,
            Box::new(CornerCapture {
                corner,
                initial: pos,
                is_new: true,
            }),
            pos,
        );
        self.notify(|l| l.on_outline_changed(zone));
        Ok(())
    }

    /// Starts dragging the edge that begins at corner `edge`
    pub fn start_drag_edge(
        &mut self,
        zone: ZoneId,
        edge: usize,
        cursor: BoardPoint,
    ) -> Result<(), ZoneEditError> {
        self.require_idle()?;
        self.corner_of(zone, edge)?;
        let tx = self.begin_drag(zone, "Drag zone edge");
        self.capture(
            zone,
            tx,
            Box::new(EdgeDragCapture {
                edge,
                initial_cursor: cursor,
                last_cursor: cursor,
            }),
            cursor,
        );
        if let Some(z) = self.board.zone_mut(zone) {
            z.flags_mut().dragging = true;
            z.flags_mut().selected_corner = Some(edge);
        }
        Ok(())
    }

    /// Starts moving the whole zone with the cursor
    pub fn start_move_zone(&mut self, zone: ZoneId, cursor: BoardPoint) -> Result<(), ZoneEditError> {
        self.require_idle()?;
        self.zone_ref(zone)?;
        let tx = self.begin_drag(zone, "Move zone");
        self.capture(
            zone,
            tx,
            Box::new(ZoneMoveCapture {
                initial_cursor: cursor,
                last_cursor: cursor,
            }),
            cursor,
        );
        if let Some(z) = self.board.zone_mut(zone) {
            z.flags_mut().moving = true;
        }
        Ok(())
    }

    /// Commits the active drag: combines, records undo and reports rule
    /// violations without reverting.
    pub fn end_move(&mut self) -> Result<CommitReport, ZoneEditError> {
        match self.session.as_ref().map(|s| &s.zone) {
            Some(SessionZone::Committed(_)) => {}
            _ => return Err(ZoneEditError::NoActiveSession),
        }
        let Some(session) = self.release() else {
            return Err(ZoneEditError::NoActiveSession);
        };
        let (SessionZone::Committed(id), Some(tx)) = (session.zone, session.transaction) else {
            return Err(ZoneEditError::NoActiveSession);
        };

        let Some(zone) = self.board.zone_mut(id) else {
            return Err(ZoneEditError::ZoneNotFound(id));
        };
        zone.clear_flags();
        tracing::debug!("{} on zone {} done", tx.description(), id);
        Ok(self.finish_gesture(tx, id))
    }

    fn corner_of(&self, zone: ZoneId, corner: usize) -> Result<BoardPoint, ZoneEditError> {
        let z = self.zone_ref(zone)?;
        z.corner_position(corner).ok_or_else(|| {
            fatal(OutlineError::VertexOutOfRange {
                index: corner,
                count: z.corner_count(),
            })
        })
    }

    /// Snapshots every zone that may combine with `zone` and highlights its net
    fn begin_drag(&mut self, zone: ZoneId, description: &str) -> ZoneTransaction {
        let (filter, net) = match self.board.zone(zone) {
            Some(z) => (
                ZoneFilter::for_zone(z),
                (!z.is_keepout() && z.is_on_copper_layer()).then(|| z.net()),
            ),
            None => (ZoneFilter::All, None),
        };
        if net.is_some() {
            self.board.set_highlight_net(net);
        }
        ZoneTransaction::begin(&self.board, filter, description)
    }

    fn capture(
        &mut self,
        zone: ZoneId,
        tx: ZoneTransaction,
        capture: Box<dyn MouseCapture>,
        cursor: BoardPoint,
    ) {
        tracing::debug!("{} on zone {} from {}", capture.state(), zone, cursor);
        self.session = Some(EditSession {
            zone: SessionZone::Committed(zone),
            capture,
            transaction: Some(tx),
            cutout_target: None,
            last_cursor: cursor,
        });
    }
}
