//! Zone entity: an outline plus layer, net, keepout and fill metadata.

use crate::outline::PolygonOutline;
use serde::{Deserialize, Serialize};
use zonekit_core::{BoardPoint, BoardVector, LayerId, LayerSet, NetCode, OutlineError, ZoneId};
use zonekit_settings::{CornerSmoothing, ZoneDefaults};

/// Layer placement of a zone. Keepouts may span several layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneLayers {
    Single(LayerId),
    Set(LayerSet),
}

impl ZoneLayers {
    pub fn layer_set(&self) -> LayerSet {
        match self {
            ZoneLayers::Single(layer) => LayerSet::single(*layer),
            ZoneLayers::Set(set) => *set,
        }
    }

    /// The single layer, or the lowest layer of a set
    pub fn primary(&self) -> LayerId {
        match self {
            ZoneLayers::Single(layer) => *layer,
            ZoneLayers::Set(set) => set.first().unwrap_or(LayerId::F_CU),
        }
    }
}

/// What a keepout area forbids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeepoutRules {
    pub no_tracks: bool,
    pub no_vias: bool,
    pub no_copper_pour: bool,
}

impl Default for KeepoutRules {
    fn default() -> Self {
        Self {
            no_tracks: true,
            no_vias: true,
            no_copper_pour: true,
        }
    }
}

/// Parameters of a zone, as chosen in the zone parameter prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSettings {
    pub layers: ZoneLayers,
    pub net: NetCode,
    /// `Some` for keepout areas
    pub keepout: Option<KeepoutRules>,
    pub priority: u32,
    pub clearance: i64,
    pub min_thickness: i64,
    pub thermal_relief_gap: i64,
    pub thermal_relief_copper_bridge: i64,
    pub corner_smoothing: CornerSmoothing,
    pub corner_radius: i64,
}

impl ZoneSettings {
    /// Settings for a copper zone on `layer` using configured defaults
    pub fn from_defaults(defaults: &ZoneDefaults, layer: LayerId) -> Self {
        Self {
            layers: ZoneLayers::Single(layer),
            net: NetCode::UNCONNECTED,
            keepout: None,
            priority: 0,
            clearance: defaults.clearance(),
            min_thickness: defaults.min_thickness(),
            thermal_relief_gap: defaults.thermal_relief_gap(),
            thermal_relief_copper_bridge: defaults.thermal_relief_copper_width(),
            corner_smoothing: defaults.corner_smoothing,
            corner_radius: defaults.corner_radius(),
        }
    }

    /// Turns these settings into keepout settings: no net, no smoothing
    pub fn into_keepout(mut self) -> Self {
        self.keepout = Some(self.keepout.unwrap_or_default());
        self.net = NetCode::UNCONNECTED;
        self.corner_smoothing = CornerSmoothing::None;
        self.corner_radius = 0;
        if let ZoneLayers::Single(layer) = self.layers {
            self.layers = ZoneLayers::Set(LayerSet::single(layer));
        }
        self
    }

    pub fn from_zone(zone: &Zone) -> Self {
        zone.settings.clone()
    }

    pub fn export_to(&self, zone: &mut Zone) {
        if zone.settings != *self {
            zone.settings = self.clone();
            zone.unfill();
        }
    }

    pub fn is_keepout(&self) -> bool {
        self.keepout.is_some()
    }
}

/// Transient editing state of a zone. Never part of undo snapshots' meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditFlags {
    pub is_new: bool,
    pub in_edit: bool,
    pub moving: bool,
    pub dragging: bool,
    pub selected_corner: Option<usize>,
}

/// A copper, keepout or technical-layer zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    id: ZoneId,
    outline: PolygonOutline,
    settings: ZoneSettings,
    #[serde(skip)]
    filled: Option<Vec<PolygonOutline>>,
    #[serde(skip)]
    flags: EditFlags,
}

impl Zone {
    pub fn new(id: ZoneId, settings: ZoneSettings) -> Self {
        Self {
            id,
            outline: PolygonOutline::new(),
            settings,
            filled: None,
            flags: EditFlags::default(),
        }
    }

    pub fn with_outline(id: ZoneId, settings: ZoneSettings, outline: PolygonOutline) -> Self {
        Self {
            outline,
            ..Self::new(id, settings)
        }
    }

    pub fn id(&self) -> ZoneId {
        self.id
    }

    /// Copy of this zone under another identity, unfilled and without flags
    pub fn duplicate(&self, id: ZoneId) -> Self {
        Self::with_outline(id, self.settings.clone(), self.outline.clone())
    }

    pub fn outline(&self) -> &PolygonOutline {
        &self.outline
    }

    /// Mutable outline access. Invalidates the cached fill.
    pub fn outline_mut(&mut self) -> &mut PolygonOutline {
        self.filled = None;
        &mut self.outline
    }

    pub fn settings(&self) -> &ZoneSettings {
        &self.settings
    }

    pub fn corner_count(&self) -> usize {
        self.outline.total_vertices()
    }

    pub fn layers(&self) -> ZoneLayers {
        self.settings.layers
    }

    pub fn layer(&self) -> LayerId {
        self.settings.layers.primary()
    }

    pub fn layer_set(&self) -> LayerSet {
        self.settings.layers.layer_set()
    }

    pub fn net(&self) -> NetCode {
        self.settings.net
    }

    pub fn set_net(&mut self, net: NetCode) {
        self.settings.net = net;
    }

    pub fn is_keepout(&self) -> bool {
        self.settings.is_keepout()
    }

    pub fn is_on_copper_layer(&self) -> bool {
        match self.settings.layers {
            ZoneLayers::Single(layer) => layer.is_copper(),
            ZoneLayers::Set(set) => set.intersects(&LayerSet::all_copper()),
        }
    }

    /// Zones that may be merged with each other: same kind, net and layers
    pub fn is_combinable_with(&self, other: &Zone) -> bool {
        self.is_keepout() == other.is_keepout()
            && self.settings.layers == other.settings.layers
            && (self.is_keepout() || self.net() == other.net())
    }

    /// Same geometry, parameters and fill, ignoring edit flags
    pub fn same_state(&self, other: &Zone) -> bool {
        self.id == other.id
            && self.outline == other.outline
            && self.settings == other.settings
            && self.filled == other.filled
    }

    pub fn corner_position(&self, corner: usize) -> Option<BoardPoint> {
        self.outline.vertex(corner)
    }

    /// Translates the whole zone
    pub fn move_by(&mut self, offset: BoardVector) {
        self.outline_mut().translate(offset);
    }

    pub fn move_edge(&mut self, edge: usize, offset: BoardVector) -> Result<(), OutlineError> {
        self.outline_mut().move_edge(edge, offset)
    }

    pub fn is_filled(&self) -> bool {
        self.filled.is_some()
    }

    pub fn filled_polygons(&self) -> Option<&[PolygonOutline]> {
        self.filled.as_deref()
    }

    /// Stores the fill computed by an external filler
    pub fn set_filled_polygons(&mut self, polygons: Vec<PolygonOutline>) {
        self.filled = Some(polygons);
    }

    pub fn unfill(&mut self) {
        self.filled = None;
    }

    pub fn flags(&self) -> &EditFlags {
        &self.flags
    }

    pub fn flags_mut(&mut self) -> &mut EditFlags {
        &mut self.flags
    }

    pub fn clear_flags(&mut self) {
        self.flags = EditFlags::default();
    }
}
