//! Net identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Net code of a board item. Code 0 means "not connected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NetCode(pub u32);

impl NetCode {
    pub const UNCONNECTED: NetCode = NetCode(0);

    pub fn is_connected(&self) -> bool {
        *self != Self::UNCONNECTED
    }
}

impl fmt::Display for NetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Net names of a board, indexed by net code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetList {
    names: Vec<String>,
}

impl Default for NetList {
    fn default() -> Self {
        Self::new()
    }
}

impl NetList {
    pub fn new() -> Self {
        Self {
            names: vec![String::new()],
        }
    }

    /// Returns the code for `name`, registering it if needed.
    pub fn add(&mut self, name: &str) -> NetCode {
        if name.is_empty() {
            return NetCode::UNCONNECTED;
        }
        if let Some(code) = self.find(name) {
            return code;
        }
        self.names.push(name.to_string());
        NetCode((self.names.len() - 1) as u32)
    }

    pub fn find(&self, name: &str) -> Option<NetCode> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| NetCode(i as u32))
    }

    pub fn name(&self, code: NetCode) -> Option<&str> {
        self.names.get(code.0 as usize).map(String::as_str)
    }

    pub fn contains(&self, code: NetCode) -> bool {
        (code.0 as usize) < self.names.len()
    }

    /// Number of nets, including the unconnected net
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.len() <= 1
    }
}
