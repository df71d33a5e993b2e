//! The peer-facing wire contract

use crate::{SharedRegion, Upcall};
use client_types::{ClientError, Command, PeerHandle, PeerIdentity};

/// Subscription slot carrying the completion event
///
/// The protocol uses a single event type per peer: "the action you asked
/// for is done". Peers with richer event vocabularies would add slots.
pub const COMPLETION_SLOT: u32 = 0;

/// The contract between a client and the environment hosting its peers
///
/// Multiple implementations are possible:
/// - Simulated environment (for testing, see the `sim_peer` crate)
/// - Real kernel (syscalls into driver and IPC subsystems)
///
/// # Design Principles
///
/// **One boundary for both peer kinds**: drivers addressed by capability id
/// and services addressed by name resolve through the same method and obey
/// the same sharing, subscription, and command semantics afterwards.
///
/// **Cooperative delivery**: upcalls are only ever delivered inside
/// [`yield_wait`](PeerApi::yield_wait) or
/// [`yield_no_wait`](PeerApi::yield_no_wait), on the caller's stack. Code
/// that never yields never observes an upcall.
///
/// **Revocation cannot fail for the caller**: `share(peer, None)` and
/// `subscribe(peer, slot, None)` succeed even when the peer is gone, so
/// cleanup paths need no error handling of their own.
pub trait PeerApi {
    /// Resolves a peer identity to an opaque handle
    ///
    /// Absence is an expected outcome: a peer that is not installed in this
    /// image reports `PeerNotFound`, which callers treat as a normal
    /// branch, not a failure.
    fn resolve(&mut self, identity: &PeerIdentity) -> Result<PeerHandle, ClientError>;

    /// Grants or revokes peer visibility of a buffer
    ///
    /// # Arguments
    ///
    /// * `peer` - The resolved peer
    /// * `region` - `Some` grants the region to the peer, `None` revokes
    ///   whatever grant is current
    ///
    /// Revocation is idempotent and always succeeds from the caller's
    /// point of view.
    fn share(&mut self, peer: PeerHandle, region: Option<SharedRegion>)
        -> Result<(), ClientError>;

    /// Registers or cancels the completion upcall for a slot
    ///
    /// At most one upcall may be registered per (peer, slot) at a time.
    /// Cancelling an empty slot is a no-op.
    fn subscribe(
        &mut self,
        peer: PeerHandle,
        slot: u32,
        upcall: Option<Upcall>,
    ) -> Result<(), ClientError>;

    /// Sends a command frame to a peer
    ///
    /// Acceptance means the peer has started the action, not that the
    /// action is done; completion arrives later through the subscribed
    /// upcall. Commands that depend on a shared buffer must only be sent
    /// after both the grant and the subscription succeeded.
    fn send_command(&mut self, peer: PeerHandle, command: Command) -> Result<(), ClientError>;

    /// Suspends until the scheduler has delivered at least one upcall
    ///
    /// This is the blocking yield: the calling logical thread makes no
    /// progress until a completion is ready for it. A peer that never
    /// completes blocks the caller indefinitely.
    fn yield_wait(&mut self);

    /// Delivers one upcall if one is ready, without blocking
    ///
    /// # Returns
    ///
    /// `true` if an upcall ran, `false` if nothing was ready.
    fn yield_no_wait(&mut self) -> bool;
}
