//! One-shot edits of committed zones.

use super::{fatal, CommitReport, CornerDeleteOutcome, ZoneEditor};
use crate::board::ZoneFilter;
use crate::drc::ZoneRuleChecker;
use crate::journal::ZoneTransaction;
use crate::prompt::{ZoneParamsOutcome, ZoneParamsPrompt};
use crate::zone::{Zone, ZoneSettings};
use zonekit_core::{OutlineError, ZoneEditError, ZoneId};

/// Smallest number of vertices a contour may keep
const MIN_CONTOUR_VERTICES: usize = 3;

impl<C: ZoneRuleChecker, P: ZoneParamsPrompt> ZoneEditor<C, P> {
    /// Deletes corner `corner` (global index) of a committed zone.
    ///
    /// When the exterior would keep 3 vertices or fewer the whole zone is
    /// deleted instead. A hole dropping below 3 vertices is removed. Rule
    /// violations after the edit are reported, never reverted.
    pub fn remove_zone_corner(
        &mut self,
        zone: ZoneId,
        corner: usize,
    ) -> Result<CornerDeleteOutcome, ZoneEditError> {
        self.require_idle()?;
        let z = self.zone_ref(zone)?;
        let Some(index) = z.outline().relative_indices(corner) else {
            return Err(fatal(OutlineError::VertexOutOfRange {
                index: corner,
                count: z.corner_count(),
            }));
        };
        let contour_len = z.outline().contour(index.contour).map_or(0, |c| c.len());
        let remaining = contour_len.saturating_sub(1);
        let tx = ZoneTransaction::begin(&self.board, ZoneFilter::for_zone(z), "Delete zone corner");

        // Counted after removal: a square loses the whole zone, not one corner
        if index.contour == 0 && remaining <= MIN_CONTOUR_VERTICES {
            self.board.remove(zone);
            tracing::info!("Zone {} left with {} corners: deleted", zone, remaining);
            self.commit(tx);
            return Ok(CornerDeleteOutcome::ZoneDeleted);
        }

        if let Some(z) = self.board.zone_mut(zone) {
            if index.contour > 0 && remaining < MIN_CONTOUR_VERTICES {
                z.outline_mut().remove_contour(index.contour).map_err(fatal)?;
            } else {
                z.outline_mut().remove_vertex(corner);
            }
            z.unfill();
        }
        Ok(CornerDeleteOutcome::CornerRemoved(self.finish_gesture(tx, zone)))
    }

    /// Removes the hole contour holding corner `corner`.
    /// The exterior cannot be removed this way: delete the zone instead.
    pub fn delete_zone_contour(&mut self, zone: ZoneId, corner: usize) -> Result<(), ZoneEditError> {
        self.require_idle()?;
        let z = self.zone_ref(zone)?;
        let Some(index) = z.outline().relative_indices(corner) else {
            return Err(fatal(OutlineError::VertexOutOfRange {
                index: corner,
                count: z.corner_count(),
            }));
        };
        if index.contour == 0 {
            return Err(fatal(OutlineError::ExteriorContour));
        }

        let tx = ZoneTransaction::begin(&self.board, ZoneFilter::for_zone(z), "Delete zone cutout");
        if let Some(z) = self.board.zone_mut(zone) {
            z.outline_mut().remove_contour(index.contour).map_err(fatal)?;
            z.unfill();
        }
        tracing::info!("Removed contour {} of zone {}", index.contour, zone);
        self.commit(tx);
        Ok(())
    }

    /// Deletes a whole zone
    pub fn remove_zone(&mut self, zone: ZoneId) -> Result<(), ZoneEditError> {
        self.require_idle()?;
        let tx = ZoneTransaction::begin(
            &self.board,
            ZoneFilter::for_zone(self.zone_ref(zone)?),
            "Delete zone",
        );
        self.board.remove(zone);
        self.commit(tx);
        Ok(())
    }

    /// Copies a zone onto the layer(s) chosen in the parameter prompt.
    /// Returns `None` when the prompt is cancelled.
    pub fn duplicate_zone(&mut self, zone: ZoneId) -> Result<Option<CommitReport>, ZoneEditError> {
        self.require_idle()?;
        let source = self.zone_ref(zone)?.clone();
        let settings = match self.prompt_for(&source) {
            ZoneParamsOutcome::Abort => return Ok(None),
            ZoneParamsOutcome::Accepted(settings) | ZoneParamsOutcome::ExportValues(settings) => {
                settings
            }
        };

        let same_layer = if source.is_keepout() {
            settings.layers.layer_set() == source.layer_set()
        } else {
            settings.layers.primary() == source.layer()
        };
        if same_layer {
            return Err(ZoneEditError::DuplicateOnSameLayer);
        }

        let id = self.board.new_zone_id();
        let mut copy = source.duplicate(id);
        settings.export_to(&mut copy);
        copy.unfill();

        let mut tx = ZoneTransaction::begin(&self.board, ZoneFilter::for_zone(&copy), "Duplicate zone");
        self.board.add(copy);
        tx.mark_new(id);
        tracing::info!("Duplicated zone {} as {}", zone, id);
        Ok(Some(self.finish_gesture(tx, id)))
    }

    /// Edits the parameters of a zone through the prompt.
    ///
    /// `Accepted` applies the settings and re-combines; `ExportValues` copies
    /// the fill parameters to every zone of the same kind without touching
    /// geometry. Zones filled beforehand are refilled. Returns `None` when
    /// the prompt is cancelled.
    pub fn edit_zone_params(&mut self, zone: ZoneId) -> Result<Option<CommitReport>, ZoneEditError> {
        self.require_idle()?;
        let source = self.zone_ref(zone)?.clone();
        // Net or layer may change, so every zone is a merge candidate
        let mut tx = ZoneTransaction::begin(&self.board, ZoneFilter::All, "Edit zone parameters");

        match self.prompt_for(&source) {
            ZoneParamsOutcome::Abort => Ok(None),
            ZoneParamsOutcome::ExportValues(settings) => {
                let keepout = source.is_keepout();
                let ids: Vec<ZoneId> = self
                    .board
                    .zones()
                    .iter()
                    .filter(|z| z.is_keepout() == keepout)
                    .map(Zone::id)
                    .collect();
                for id in ids {
                    let Some(z) = self.board.zone_mut(id) else {
                        continue;
                    };
                    let was_filled = z.is_filled();
                    let mut updated = z.settings().clone();
                    copy_fill_parameters(&settings, &mut updated);
                    updated.export_to(z);
                    if was_filled && !z.is_filled() {
                        self.refill(id);
                    }
                }
                tx.rename("Export zone parameters");
                self.commit(tx);
                Ok(Some(CommitReport {
                    zone: Some(zone),
                    ..CommitReport::default()
                }))
            }
            ZoneParamsOutcome::Accepted(settings) => {
                if let Some(z) = self.board.zone_mut(zone) {
                    settings.export_to(z);
                }
                if !settings.is_keepout() {
                    self.board.set_highlight_net(Some(settings.net));
                }
                Ok(Some(self.finish_gesture_with(tx, zone, source.is_filled())))
            }
        }
    }

    fn prompt_for(&mut self, zone: &Zone) -> ZoneParamsOutcome {
        let initial = ZoneSettings::from_zone(zone);
        if zone.is_keepout() {
            self.prompt.edit_keepout(&self.board, &initial)
        } else if zone.is_on_copper_layer() {
            self.prompt.edit_copper(&self.board, &initial)
        } else {
            self.prompt.edit_non_copper(&self.board, &initial)
        }
    }
}

/// Copies everything except identity (layers, net, keepout rules, priority)
fn copy_fill_parameters(from: &ZoneSettings, to: &mut ZoneSettings) {
    to.clearance = from.clearance;
    to.min_thickness = from.min_thickness;
    to.thermal_relief_gap = from.thermal_relief_gap;
    to.thermal_relief_copper_bridge = from.thermal_relief_copper_bridge;
    if !to.is_keepout() {
        to.corner_smoothing = from.corner_smoothing;
        to.corner_radius = from.corner_radius;
    }
}
