//! Filling and unfilling committed zones.

use super::ZoneEditor;
use crate::board::ZoneFilter;
use crate::drc::ZoneRuleChecker;
use crate::filler::compute_fill;
use crate::journal::ZoneTransaction;
use crate::prompt::ZoneParamsPrompt;
use crate::zone::Zone;
use zonekit_core::{ZoneEditError, ZoneId};

impl<C: ZoneRuleChecker, P: ZoneParamsPrompt> ZoneEditor<C, P> {
    /// Fills one zone. Returns `false` for keepouts, which carry no fill.
    pub fn fill_zone(&mut self, zone: ZoneId) -> Result<bool, ZoneEditError> {
        self.require_idle()?;
        let z = self.zone_ref(zone)?;
        if z.is_keepout() {
            tracing::debug!("Zone {} is a keepout: not filled", zone);
            return Ok(false);
        }
        let tx = ZoneTransaction::begin(&self.board, ZoneFilter::for_zone(z), "Fill zone");
        self.refill(zone);
        self.commit(tx);
        Ok(true)
    }

    /// Fills every copper zone as one undoable step; returns how many
    pub fn fill_all(&mut self) -> Result<usize, ZoneEditError> {
        self.require_idle()?;
        let ids = self.zones_where(|z| !z.is_keepout());
        let tx = ZoneTransaction::begin(&self.board, ZoneFilter::All, "Fill all zones");
        for id in &ids {
            self.refill(*id);
        }
        self.commit(tx);
        tracing::info!("Filled {} zone(s)", ids.len());
        Ok(ids.len())
    }

    /// Drops the fill of one zone. Returns `false` if it had none.
    pub fn unfill_zone(&mut self, zone: ZoneId) -> Result<bool, ZoneEditError> {
        self.require_idle()?;
        let z = self.zone_ref(zone)?;
        if !z.is_filled() {
            return Ok(false);
        }
        let tx = ZoneTransaction::begin(&self.board, ZoneFilter::for_zone(z), "Unfill zone");
        if let Some(z) = self.board.zone_mut(zone) {
            z.unfill();
        }
        self.commit(tx);
        Ok(true)
    }

    pub fn unfill_all(&mut self) -> Result<usize, ZoneEditError> {
        self.require_idle()?;
        let ids = self.zones_where(Zone::is_filled);
        let tx = ZoneTransaction::begin(&self.board, ZoneFilter::All, "Unfill all zones");
        for id in &ids {
            if let Some(z) = self.board.zone_mut(*id) {
                z.unfill();
            }
        }
        self.commit(tx);
        Ok(ids.len())
    }

    /// Recomputes the fill of `zone` against the current board
    pub(super) fn refill(&mut self, zone: ZoneId) {
        let Some(z) = self.board.zone(zone) else {
            return;
        };
        if z.is_keepout() {
            return;
        }
        let polygons = compute_fill(&self.board, z);
        if let Some(z) = self.board.zone_mut(zone) {
            z.set_filled_polygons(polygons);
        }
    }

    fn zones_where(&self, keep: impl Fn(&Zone) -> bool) -> Vec<ZoneId> {
        self.board
            .zones()
            .iter()
            .filter(|z| keep(*z))
            .map(Zone::id)
            .collect()
    }
}
