//! Protocol error taxonomy

use crate::{PeerIdentity, RejectReason};
use thiserror::Error;

/// Errors a protocol operation can report
///
/// None of these are fatal to the client process: a missing or misbehaving
/// peer results in a returned status, never a crash. `PeerNotFound` in
/// particular is an expected outcome (the peer is simply not installed in
/// this image) and callers should treat it as a normal branch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// No peer is installed under the given identity
    #[error("Peer not found: {0}")]
    PeerNotFound(PeerIdentity),

    /// The peer declined the shared buffer
    #[error("Buffer rejected: {0}")]
    BufferRejected(RejectReason),

    /// The peer declined the completion subscription
    #[error("Subscription rejected: {0}")]
    SubscriptionRejected(RejectReason),

    /// The peer declined the command
    #[error("Command rejected: {0}")]
    CommandRejected(RejectReason),

    /// The caller supplied an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A previous request to this peer has not completed yet
    #[error("A request is already in flight for this peer")]
    RequestInFlight,
}
