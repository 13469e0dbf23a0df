//! Error handling for ZoneKit
//!
//! Provides the error types for all layers of the zone editor:
//! - Outline errors (structural misuse of a polygon outline)
//! - Zone edit errors (session misuse, blocking rule violations)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::types::ZoneId;
use thiserror::Error;

/// Outline error type
///
/// Raised when a caller addresses a vertex or contour that does not exist,
/// or asks for an operation the outline structure forbids. These are
/// contract breaches, not recoverable runtime conditions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    /// Global vertex index past the end of the outline
    #[error("Vertex index {index} out of range (outline has {count} vertices)")]
    VertexOutOfRange {
        /// The requested global vertex index.
        index: usize,
        /// The total vertex count of the outline.
        count: usize,
    },

    /// Contour index past the end of the outline
    #[error("Contour index {contour} out of range (outline has {count} contours)")]
    ContourOutOfRange {
        /// The requested contour index.
        contour: usize,
        /// The number of contours in the outline.
        count: usize,
    },

    /// The exterior contour was addressed through the hole removal path
    #[error("The main outline cannot be removed as a hole; delete the zone instead")]
    ExteriorContour,

    /// A hole was added to an outline without an exterior contour
    #[error("Cannot add a hole to an outline without an exterior contour")]
    NoExterior,
}

/// Zone edit error type
///
/// Represents errors raised by the interactive zone editor: blocking rule
/// violations the user must fix, and misuse of the editing API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneEditError {
    /// Zone id does not resolve on the board
    #[error("Zone {0} not found on board")]
    ZoneNotFound(ZoneId),

    /// Keepout requested while the active layer is not copper
    #[error("Error: a keepout area is allowed only on copper layers")]
    KeepoutNotOnCopper,

    /// First corner of a new zone rejected by the rule checker
    #[error("DRC error: this start point is inside or too close an other area")]
    StartPointViolation {
        /// Explanation from the rule checker.
        reason: String,
    },

    /// Edge rejected by the rule checker while drawing
    #[error("DRC error on edge {index}: {reason}")]
    EdgeViolation {
        /// Index of the first corner of the rejected edge.
        index: usize,
        /// Explanation from the rule checker.
        reason: String,
    },

    /// Closing edge rejected by the rule checker at finish
    #[error("DRC error: closing this area creates a DRC error with an other area")]
    ClosingEdgeViolation {
        /// Explanation from the rule checker.
        reason: String,
    },

    /// The rule checker itself could not evaluate the candidate
    #[error("Rule checker failure: {reason}")]
    RuleCheckerFailure {
        /// Explanation from the rule checker.
        reason: String,
    },

    /// Operation requires an active gesture but none holds capture
    #[error("No zone edit is in progress")]
    NoActiveSession,

    /// Operation requires an idle editor but a gesture holds capture
    #[error("A zone edit is already in progress ({state})")]
    SessionActive {
        /// Name of the state currently holding capture.
        state: String,
    },

    /// Duplicate requested onto the source zone's own layer(s)
    #[error("The duplicated zone cannot be on the same layer as the original zone")]
    DuplicateOnSameLayer,

    /// Structural misuse of an outline
    #[error(transparent)]
    Outline(#[from] OutlineError),
}

impl ZoneEditError {
    /// Check if this error is a programming contract breach
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ZoneEditError::Outline(_) | ZoneEditError::RuleCheckerFailure { .. }
        )
    }

    /// Check if this error is a blocking rule violation
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            ZoneEditError::StartPointViolation { .. }
                | ZoneEditError::EdgeViolation { .. }
                | ZoneEditError::ClosingEdgeViolation { .. }
        )
    }
}

/// Main error type for ZoneKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Outline error
    #[error(transparent)]
    Outline(#[from] OutlineError),

    /// Zone edit error
    #[error(transparent)]
    ZoneEdit(#[from] ZoneEditError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error is a programming contract breach
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Outline(_) => true,
            Error::ZoneEdit(e) => e.is_fatal(),
            _ => false,
        }
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
