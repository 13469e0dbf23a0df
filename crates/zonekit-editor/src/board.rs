//! Board zone collection.

use crate::zone::{Zone, ZoneLayers};
use zonekit_core::{NetCode, NetList, ZoneId};

/// Which zones a pre-edit snapshot must cover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneFilter {
    /// Every zone on the board
    All,
    /// Zones sharing the net and layer placement of an edited zone
    NetAndLayers(NetCode, ZoneLayers),
}

impl ZoneFilter {
    pub fn for_zone(zone: &Zone) -> Self {
        ZoneFilter::NetAndLayers(zone.net(), zone.layers())
    }

    pub fn matches(&self, zone: &Zone) -> bool {
        match self {
            ZoneFilter::All => true,
            ZoneFilter::NetAndLayers(net, layers) => zone.net() == *net && zone.layers() == *layers,
        }
    }
}

/// The zones of one board, in board order, plus the net list
#[derive(Debug, Clone, Default)]
pub struct Board {
    zones: Vec<Zone>,
    nets: NetList,
    highlight_net: Option<NetCode>,
    last_zone_id: u64,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nets(&self) -> &NetList {
        &self.nets
    }

    pub fn nets_mut(&mut self) -> &mut NetList {
        &mut self.nets
    }

    /// Returns a fresh zone id. Ids are timestamp based and strictly increasing.
    pub fn new_zone_id(&mut self) -> ZoneId {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        self.last_zone_id = now.max(self.last_zone_id + 1);
        ZoneId(self.last_zone_id)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn index_of(&self, id: ZoneId) -> Option<usize> {
        self.zones.iter().position(|z| z.id() == id)
    }

    pub fn contains(&self, id: ZoneId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id() == id)
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> Option<&mut Zone> {
        self.zones.iter_mut().find(|z| z.id() == id)
    }

    pub fn add(&mut self, zone: Zone) {
        self.last_zone_id = self.last_zone_id.max(zone.id().0);
        self.zones.push(zone);
    }

    /// Inserts at `index`, clamped to the end of the collection
    pub fn insert(&mut self, index: usize, zone: Zone) {
        self.last_zone_id = self.last_zone_id.max(zone.id().0);
        let index = index.min(self.zones.len());
        self.zones.insert(index, zone);
    }

    pub fn remove(&mut self, id: ZoneId) -> Option<Zone> {
        let index = self.index_of(id)?;
        Some(self.zones.remove(index))
    }

    /// Replaces the zone carrying the same id and returns the previous state
    pub fn replace(&mut self, zone: Zone) -> Option<Zone> {
        let slot = self.zone_mut(zone.id())?;
        Some(std::mem::replace(slot, zone))
    }

    /// Deep copies of every zone matching `filter`, with their board positions
    pub fn snapshot(&self, filter: ZoneFilter) -> Vec<(usize, Zone)> {
        self.zones
            .iter()
            .enumerate()
            .filter(|(_, z)| filter.matches(z))
            .map(|(i, z)| {
                let mut copy = z.clone();
                copy.clear_flags();
                (i, copy)
            })
            .collect()
    }

    pub fn highlight_net(&self) -> Option<NetCode> {
        self.highlight_net
    }

    pub fn set_highlight_net(&mut self, net: Option<NetCode>) {
        self.highlight_net = net.filter(NetCode::is_connected);
    }
}
