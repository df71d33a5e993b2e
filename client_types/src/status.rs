//! Completion and rejection status values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a completed request
///
/// The protocol signals only whether an action succeeded; it never returns
/// data. A request that needs a reply payload is a different protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStatus {
    /// The peer carried out the action
    Success,
    /// The peer was busy with another action
    Busy,
    /// The peer considered the request invalid
    Invalid,
    /// The action started but did not finish
    Fail,
}

impl CompletionStatus {
    /// Checks if the action succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionStatus::Success => write!(f, "Success"),
            CompletionStatus::Busy => write!(f, "Busy"),
            CompletionStatus::Invalid => write!(f, "Invalid"),
            CompletionStatus::Fail => write!(f, "Fail"),
        }
    }
}

/// Why a peer declined an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The peer kind does not support the operation
    Unsupported,
    /// The offered buffer was empty or malformed
    InvalidBuffer,
    /// The peer-side resource table is full
    TableExhausted,
    /// The requested slot already holds a registration
    SlotOccupied,
    /// The peer is no longer installed
    PeerGone,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Unsupported => write!(f, "operation not supported"),
            RejectReason::InvalidBuffer => write!(f, "buffer empty or malformed"),
            RejectReason::TableExhausted => write!(f, "peer resource table exhausted"),
            RejectReason::SlotOccupied => write!(f, "slot already occupied"),
            RejectReason::PeerGone => write!(f, "peer no longer installed"),
        }
    }
}
