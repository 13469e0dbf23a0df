//! Board layer identity.
//!
//! Layers 0..=31 are copper (front first, back last); the remaining ids are
//! technical layers. A [`LayerSet`] is a bit mask over all layer ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of copper layers addressable by a [`LayerId`]
pub const COPPER_LAYER_COUNT: u8 = 32;

/// A single board layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u8);

const TECHNICAL_NAMES: [&str; 18] = [
    "B.Adhes", "F.Adhes", "B.Paste", "F.Paste", "B.SilkS", "F.SilkS", "B.Mask", "F.Mask",
    "Dwgs.User", "Cmts.User", "Eco1.User", "Eco2.User", "Edge.Cuts", "Margin", "B.CrtYd",
    "F.CrtYd", "B.Fab", "F.Fab",
];

impl LayerId {
    pub const F_CU: LayerId = LayerId(0);
    pub const B_CU: LayerId = LayerId(COPPER_LAYER_COUNT - 1);
    pub const B_SILKS: LayerId = LayerId(COPPER_LAYER_COUNT + 4);
    pub const F_SILKS: LayerId = LayerId(COPPER_LAYER_COUNT + 5);
    pub const EDGE_CUTS: LayerId = LayerId(COPPER_LAYER_COUNT + 12);

    /// Total number of layer ids
    pub const COUNT: u8 = COPPER_LAYER_COUNT + TECHNICAL_NAMES.len() as u8;

    /// Inner copper layer `In<n>.Cu` (1-based)
    pub fn inner(n: u8) -> Option<LayerId> {
        (1..COPPER_LAYER_COUNT - 1).contains(&n).then_some(LayerId(n))
    }

    pub fn is_copper(&self) -> bool {
        self.0 < COPPER_LAYER_COUNT
    }

    pub fn is_valid(&self) -> bool {
        self.0 < Self::COUNT
    }

    /// Canonical layer name, e.g. `F.Cu`, `In2.Cu`, `Edge.Cuts`
    pub fn name(&self) -> String {
        match self.0 {
            0 => "F.Cu".to_string(),
            n if n == COPPER_LAYER_COUNT - 1 => "B.Cu".to_string(),
            n if n < COPPER_LAYER_COUNT => format!("In{}.Cu", n),
            n => TECHNICAL_NAMES
                .get((n - COPPER_LAYER_COUNT) as usize)
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("Layer{}", n)),
        }
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LayerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F.Cu" => return Ok(LayerId::F_CU),
            "B.Cu" => return Ok(LayerId::B_CU),
            _ => {}
        }

        if let Some(n) = s.strip_prefix("In").and_then(|rest| rest.strip_suffix(".Cu")) {
            return n
                .parse::<u8>()
                .ok()
                .and_then(LayerId::inner)
                .ok_or_else(|| format!("Unknown layer: {}", s));
        }

        TECHNICAL_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|i| LayerId(COPPER_LAYER_COUNT + i as u8))
            .ok_or_else(|| format!("Unknown layer: {}", s))
    }
}

/// A set of board layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerSet(u64);

impl LayerSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn single(layer: LayerId) -> Self {
        Self::empty().with(layer)
    }

    /// All copper layers
    pub fn all_copper() -> Self {
        Self((1u64 << COPPER_LAYER_COUNT) - 1)
    }

    pub fn with(mut self, layer: LayerId) -> Self {
        self.insert(layer);
        self
    }

    pub fn insert(&mut self, layer: LayerId) {
        if layer.is_valid() {
            self.0 |= 1u64 << layer.0;
        }
    }

    pub fn remove(&mut self, layer: LayerId) {
        if layer.is_valid() {
            self.0 &= !(1u64 << layer.0);
        }
    }

    pub fn contains(&self, layer: LayerId) -> bool {
        layer.is_valid() && self.0 & (1u64 << layer.0) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn intersects(&self, other: &LayerSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Lowest layer id in the set
    pub fn first(&self) -> Option<LayerId> {
        (!self.is_empty()).then(|| LayerId(self.0.trailing_zeros() as u8))
    }

    pub fn iter(&self) -> impl Iterator<Item = LayerId> + '_ {
        (0..LayerId::COUNT)
            .map(LayerId)
            .filter(move |layer| self.contains(*layer))
    }
}

impl FromIterator<LayerId> for LayerSet {
    fn from_iter<I: IntoIterator<Item = LayerId>>(iter: I) -> Self {
        iter.into_iter().fold(LayerSet::empty(), LayerSet::with)
    }
}

impl fmt::Display for LayerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|l| l.name()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}
