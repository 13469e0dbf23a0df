//! Validation gateway: the seam to the external design rule checker.
//!
//! The checker only answers questions. Whether an answer blocks the edit
//! (drawing, closing) or is merely reported (after combine or delete) is
//! decided by the editor.

use crate::board::Board;
use crate::zone::Zone;

/// Answer of the rule checker for one candidate edge or corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrcVerdict {
    Pass,
    /// The candidate breaks a rule
    Violation(String),
    /// The checker could not evaluate the candidate at all
    Fatal(String),
}

impl DrcVerdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, DrcVerdict::Pass)
    }
}

/// External design rule checker
pub trait ZoneRuleChecker {
    /// Checks the edge of `zone` starting at corner `index` and ending at the
    /// next corner of the same contour (wrapping for the closing edge).
    /// `board` holds every committed zone; `zone` may not be on it yet.
    fn check_edge(&mut self, board: &Board, zone: &Zone, index: usize) -> DrcVerdict;

    /// Non-blocking check of a committed zone against its neighbours.
    /// Returns one message per violation found.
    fn check_zone(&mut self, _board: &Board, _zone: &Zone) -> Vec<String> {
        Vec::new()
    }
}

/// Rule checker that accepts everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ZoneRuleChecker for AcceptAll {
    fn check_edge(&mut self, _board: &Board, _zone: &Zone, _index: usize) -> DrcVerdict {
        DrcVerdict::Pass
    }
}
