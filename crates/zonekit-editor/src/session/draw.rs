//! Drawing new zones, similar zones and cutouts.

use super::{
    check_blocking, fatal, BeginOutcome, EditSession, EditState, FinishOutcome,
    LastCornerOutcome, SessionZone, ZoneEditor, ZoneTemplate, ZoneTool,
};
use crate::board::ZoneFilter;
use crate::capture::NewEdgeCapture;
use crate::drc::ZoneRuleChecker;
use crate::journal::ZoneTransaction;
use crate::prompt::{ZoneParamsOutcome, ZoneParamsPrompt};
use crate::zone::{Zone, ZoneSettings};
use zonekit_core::{BoardPoint, ZoneEditError, ZoneId};

impl<C: ZoneRuleChecker, P: ZoneParamsPrompt> ZoneEditor<C, P> {
    /// Makes the next new zone copy the parameters of `template`
    pub fn add_similar_zone(&mut self, template: ZoneId) -> Result<(), ZoneEditError> {
        self.require_idle()?;
        self.zone_ref(template)?;
        self.template = Some(ZoneTemplate::Similar(template));
        Ok(())
    }

    /// Makes the next drawn outline a cutout (hole) of `target`
    pub fn add_zone_cutout(&mut self, target: ZoneId) -> Result<(), ZoneEditError> {
        self.require_idle()?;
        self.zone_ref(target)?;
        self.template = Some(ZoneTemplate::Cutout(target));
        Ok(())
    }

    /// Handles a click of the zone drawing tool.
    ///
    /// The first click prompts for parameters and starts a new zone; later
    /// clicks place the corner under the rubber band after checking the edge
    /// it closes. A rejected edge leaves the session open.
    pub fn begin_zone(
        &mut self,
        pos: BoardPoint,
        tool: ZoneTool,
    ) -> Result<BeginOutcome, ZoneEditError> {
        if let Some(template) = self.template {
            if !self.board.contains(template.zone()) {
                tracing::debug!("Zone template {} is gone", template.zone());
                self.template = None;
            }
        }

        match self.state() {
            EditState::Idle => self.start_zone(pos, tool),
            EditState::DrawingNewZone => self.place_corner(pos),
            other => {
                tracing::debug!("Begin zone while {}: aborting", other);
                self.abort()?;
                self.start_zone(pos, tool)
            }
        }
    }

    fn start_zone(&mut self, pos: BoardPoint, tool: ZoneTool) -> Result<BeginOutcome, ZoneEditError> {
        let template = self.template.take();
        let settings = match template {
            Some(template) => self.zone_ref(template.zone())?.settings().clone(),
            None => match self.prompt_new_zone(tool)? {
                Some(settings) => settings,
                None => {
                    tracing::debug!("Zone parameters cancelled");
                    return Ok(BeginOutcome::Aborted);
                }
            },
        };

        self.active_layer = settings.layers.primary();
        if !settings.is_keepout() {
            self.board.set_highlight_net(Some(settings.net));
        }

        let id = self.board.new_zone_id();
        let mut zone = Zone::new(id, settings);
        zone.flags_mut().is_new = true;
        zone.flags_mut().in_edit = true;
        // The duplicate is the rubber band corner that follows the cursor
        zone.outline_mut().append_corner(pos, 0, true)?;
        zone.outline_mut().append_corner(pos, 0, true)?;

        if self.settings.legacy_drc_on && zone.is_on_copper_layer() {
            check_blocking(&mut self.checker, &self.board, &zone, 0, |reason| {
                ZoneEditError::StartPointViolation { reason }
            })?;
        }

        let cutout_target = match template {
            Some(ZoneTemplate::Cutout(target)) => Some(target),
            _ => None,
        };
        tracing::debug!(
            "Started zone {} on {} at {}",
            id,
            self.active_layer.name(),
            pos
        );
        self.session = Some(EditSession {
            zone: SessionZone::Candidate(zone),
            capture: Box::new(NewEdgeCapture {
                zone_45_only: self.settings.zone_45_only,
            }),
            transaction: None,
            cutout_target,
            last_cursor: pos,
        });
        self.notify(|l| l.on_outline_changed(id));
        Ok(BeginOutcome::Started(id))
    }

    /// Prompts for the parameters of a fresh zone; `None` when cancelled
    fn prompt_new_zone(&mut self, tool: ZoneTool) -> Result<Option<ZoneSettings>, ZoneEditError> {
        let base = ZoneSettings::from_defaults(&self.defaults, self.active_layer);
        let outcome = match tool {
            ZoneTool::Keepout => {
                if !self.active_layer.is_copper() {
                    return Err(ZoneEditError::KeepoutNotOnCopper);
                }
                self.prompt.edit_keepout(&self.board, &base.into_keepout())
            }
            ZoneTool::Copper if self.active_layer.is_copper() => {
                let mut initial = base;
                if let Some(net) = self.board.highlight_net() {
                    initial.net = net;
                }
                self.prompt.edit_copper(&self.board, &initial)
            }
            ZoneTool::Copper => self.prompt.edit_non_copper(&self.board, &base),
        };

        Ok(match outcome {
            ZoneParamsOutcome::Abort => None,
            ZoneParamsOutcome::Accepted(settings) | ZoneParamsOutcome::ExportValues(settings) => {
                Some(if tool == ZoneTool::Keepout {
                    settings.into_keepout()
                } else {
                    settings
                })
            }
        })
    }

    fn place_corner(&mut self, pos: BoardPoint) -> Result<BeginOutcome, ZoneEditError> {
        let Some(session) = self.session.as_mut() else {
            return Err(ZoneEditError::NoActiveSession);
        };
        let SessionZone::Candidate(zone) = &mut session.zone else {
            return Err(ZoneEditError::NoActiveSession);
        };
        session.capture.on_move(zone, pos).map_err(fatal)?;
        session.last_cursor = pos;

        let count = zone.corner_count();
        let placed = zone.corner_position(count - 1);
        if count < 2 || placed == zone.corner_position(count - 2) {
            return Ok(BeginOutcome::Unchanged);
        }

        if self.settings.legacy_drc_on && zone.is_on_copper_layer() {
            check_blocking(&mut self.checker, &self.board, zone, count - 2, |reason| {
                ZoneEditError::EdgeViolation {
                    index: count - 2,
                    reason,
                }
            })?;
        }

        if let Some(point) = placed {
            zone.outline_mut().append_corner(point, 0, true)?;
        }
        let id = zone.id();
        tracing::debug!("Zone {}: corner {} at {:?}", id, count, placed);
        self.notify(|l| l.on_outline_changed(id));
        Ok(BeginOutcome::CornerAdded { corners: count })
    }

    /// Closes the outline being drawn and commits it.
    ///
    /// Fewer than 3 distinct corners cancel the zone. On a copper layer a
    /// rule violation on the last or closing edge blocks the finish and
    /// leaves the session open.
    pub fn end_zone(&mut self) -> Result<FinishOutcome, ZoneEditError> {
        let Some(session) = self.session.as_ref() else {
            return Err(ZoneEditError::NoActiveSession);
        };
        let SessionZone::Candidate(candidate) = &session.zone else {
            return Err(ZoneEditError::NoActiveSession);
        };

        let mut closed = candidate.clone();
        closed.outline_mut().remove_null_segments();
        let count = closed.corner_count();
        if candidate.corner_count() <= 2 || count < 3 {
            tracing::debug!("Zone {} has {} corners: cancelled", closed.id(), count);
            self.abort()?;
            return Ok(FinishOutcome::Cancelled);
        }

        if self.settings.legacy_drc_on && closed.is_on_copper_layer() {
            check_blocking(&mut self.checker, &self.board, &closed, count - 2, |reason| {
                ZoneEditError::EdgeViolation {
                    index: count - 2,
                    reason,
                }
            })?;
            check_blocking(&mut self.checker, &self.board, &closed, count - 1, |reason| {
                ZoneEditError::ClosingEdgeViolation { reason }
            })?;
        }

        let cutout_target = session.cutout_target;
        self.release();
        closed.clear_flags();

        match cutout_target.filter(|target| self.board.contains(*target)) {
            Some(target) => {
                let filter = match self.board.zone(target) {
                    Some(zone) => ZoneFilter::for_zone(zone),
                    None => ZoneFilter::for_zone(&closed),
                };
                let tx = ZoneTransaction::begin(&self.board, filter, "Add zone cutout");
                let Some(hole) = closed.outline().exterior().cloned() else {
                    return Ok(FinishOutcome::Cancelled);
                };
                if let Some(zone) = self.board.zone_mut(target) {
                    zone.outline_mut().add_hole(hole).map_err(fatal)?;
                    zone.unfill();
                }
                tracing::info!("Added cutout to zone {}", target);
                Ok(FinishOutcome::Committed(self.finish_gesture(tx, target)))
            }
            None => {
                if cutout_target.is_some() {
                    tracing::warn!("Cutout target is gone, adding the outline as a zone");
                }
                let id = closed.id();
                let mut tx =
                    ZoneTransaction::begin(&self.board, ZoneFilter::for_zone(&closed), "Add zone");
                self.board.add(closed);
                tx.mark_new(id);
                tracing::info!("Added zone {} with {} corners", id, count);
                Ok(FinishOutcome::Committed(self.finish_gesture(tx, id)))
            }
        }
    }

    /// Removes the most recent corner of the zone being drawn. With two or
    /// fewer corners the whole zone is cancelled.
    pub fn delete_last_corner(&mut self) -> Result<LastCornerOutcome, ZoneEditError> {
        let Some(session) = self.session.as_mut() else {
            return Err(ZoneEditError::NoActiveSession);
        };
        let SessionZone::Candidate(zone) = &mut session.zone else {
            return Err(ZoneEditError::NoActiveSession);
        };

        let count = zone.corner_count();
        if count <= 2 {
            self.abort()?;
            return Ok(LastCornerOutcome::Cancelled);
        }

        let remaining = zone.outline_mut().remove_vertex(count - 1);
        session
            .capture
            .on_move(zone, session.last_cursor)
            .map_err(fatal)?;
        let id = zone.id();
        self.notify(|l| l.on_outline_changed(id));
        Ok(LastCornerOutcome::Removed {
            corners: remaining - 1,
        })
    }
}
