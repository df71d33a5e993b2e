//! Request lifecycle: asynchronous facade and synchronous adapter
//!
//! Both faces share one handshake. `begin` orders
//! grant -> subscribe -> send_command, wires the completion upcall, and
//! returns right after dispatch; `run` is `begin` plus a cooperative wait.
//!
//! Cleanup discipline: every path that granted a lease revokes it exactly
//! once before the request is finished. A rejected subscription revokes in
//! the error branch; a rejected command cancels the subscription and then
//! revokes; an accepted command defers both to the completion upcall,
//! which releases the lease and clears the wire slot before the status
//! becomes observable.

use crate::dispatcher;
use crate::lease::BufferLease;
use crate::rendezvous::{CompletionFuture, CompletionSlot};
use crate::subscription::Subscription;
use client_types::{ClientError, Command, CompletionStatus, PeerHandle, RejectReason, RequestId};
use peer_api::{PeerApi, Upcall, COMPLETION_SLOT};
use std::cell::RefCell;
use std::rc::Rc;

/// A dispatched request awaiting completion
///
/// Returned by [`begin`]. The caller may poll, attach a continuation, or
/// block cooperatively with [`wait`](PendingRequest::wait). Dropping a
/// pending request does not cancel it - cancellation is not part of this
/// protocol - and the completion upcall still cleans up when it fires.
#[derive(Clone)]
pub struct PendingRequest {
    id: RequestId,
    peer: PeerHandle,
    future: CompletionFuture,
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequest")
            .field("id", &self.id)
            .field("peer", &self.peer)
            .finish_non_exhaustive()
    }
}

impl PendingRequest {
    /// Returns the request identifier
    pub fn id(&self) -> RequestId {
        self.id
    }

    /// Returns the peer the request was dispatched to
    pub fn peer(&self) -> PeerHandle {
        self.peer
    }

    /// Returns the status if the peer has signalled completion
    pub fn poll(&self) -> Option<CompletionStatus> {
        self.future.poll()
    }

    /// Checks if the peer has signalled completion
    pub fn is_done(&self) -> bool {
        self.future.is_done()
    }

    /// Attaches a continuation to run when completion is delivered
    ///
    /// The continuation observes the lease and subscription already
    /// released. If the request has already completed it runs immediately.
    pub fn on_complete<F: FnOnce(CompletionStatus) + 'static>(&self, f: F) {
        self.future.on_complete(f)
    }

    /// Yields cooperatively until completion and returns the status
    ///
    /// There is no timeout: a peer that never completes blocks the caller
    /// indefinitely.
    pub fn wait<E: PeerApi + ?Sized>(&self, env: &mut E) -> CompletionStatus {
        while !self.is_done() {
            env.yield_wait();
        }
        self.poll().unwrap_or(CompletionStatus::Fail)
    }
}

/// Starts a request and returns immediately after dispatch
///
/// # Arguments
///
/// * `env` - The peer environment
/// * `peer` - A resolved peer handle
/// * `buffer` - Bytes to lease to the peer for the duration of the
///   request, or `None` for commands that carry everything in their frame
/// * `command` - The command frame to dispatch
///
/// At most one request may be outstanding per (client, peer) pair.
/// Starting a second one before the first completes fails with
/// [`ClientError::RequestInFlight`] and leaves the first untouched.
pub fn begin<E: PeerApi + ?Sized>(
    env: &mut E,
    peer: PeerHandle,
    buffer: Option<Vec<u8>>,
    command: Command,
) -> Result<PendingRequest, ClientError> {
    let lease = match buffer {
        Some(bytes) => Some(BufferLease::grant(env, peer, bytes)?),
        None => None,
    };

    // The lease is reachable from two frames: this one (for the unwind
    // branches below) and the completion upcall (for the success path).
    let lease = Rc::new(RefCell::new(lease));
    let (slot, future) = CompletionSlot::new();

    let upcall = {
        let lease = Rc::clone(&lease);
        Upcall::new(move |env: &mut dyn PeerApi, status: CompletionStatus| {
            if let Some(lease) = lease.borrow_mut().as_mut() {
                lease.revoke(env);
            }
            let _ = env.subscribe(peer, COMPLETION_SLOT, None);
            slot.complete(status);
        })
    };

    let mut subscription = match Subscription::register(env, peer, upcall) {
        Ok(subscription) => subscription,
        Err(error) => {
            if let Some(lease) = lease.borrow_mut().as_mut() {
                lease.revoke(env);
            }
            return Err(match error {
                ClientError::SubscriptionRejected(RejectReason::SlotOccupied) => {
                    ClientError::RequestInFlight
                }
                other => other,
            });
        }
    };

    if let Err(error) = dispatcher::send(env, peer, command) {
        subscription.cancel(env);
        if let Some(lease) = lease.borrow_mut().as_mut() {
            lease.revoke(env);
        }
        return Err(error);
    }

    Ok(PendingRequest {
        id: RequestId::new(),
        peer,
        future,
    })
}

/// Runs a request to completion, blocking cooperatively
///
/// The synchronous adapter: Idle -> Leased -> Subscribed -> Dispatched ->
/// Waiting -> Done. Any rejected transition short-circuits to
/// cleanup-and-return without reaching Waiting.
pub fn run<E: PeerApi + ?Sized>(
    env: &mut E,
    peer: PeerHandle,
    buffer: Option<Vec<u8>>,
    command: Command,
) -> Result<CompletionStatus, ClientError> {
    let pending = begin(env, peer, buffer, command)?;
    Ok(pending.wait(env))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_peer::{PeerBehavior, ProtocolEvent, SimPeerEnv};
    use std::cell::Cell;

    fn show_command(len: usize, duration_ms: u32) -> Command {
        Command::new(1, len as u32, duration_ms)
    }

    #[test]
    fn test_run_completes_and_cleans_up() {
        let mut env = SimPeerEnv::new();
        let peer = env.install_capability(0xa0002, PeerBehavior::default());

        let status = run(
            &mut env,
            peer,
            Some(b"HELLO".to_vec()),
            show_command(5, 300),
        )
        .unwrap();

        assert_eq!(status, CompletionStatus::Success);
        assert!(!env.share_active(peer));
        assert!(!env.subscription_active(peer));
    }

    #[test]
    fn test_run_reports_peer_status() {
        let mut env = SimPeerEnv::new();
        let behavior = PeerBehavior {
            completion_status: CompletionStatus::Fail,
            ..PeerBehavior::default()
        };
        let peer = env.install_capability(0xa0002, behavior);

        let status = run(&mut env, peer, Some(b"HI".to_vec()), show_command(2, 100)).unwrap();
        assert_eq!(status, CompletionStatus::Fail);
        assert!(!env.share_active(peer));
    }

    #[test]
    fn test_subscribe_failure_revokes_lease() {
        use client_types::RejectReason;

        let mut env = SimPeerEnv::new();
        let behavior = PeerBehavior {
            reject_subscribe: Some(RejectReason::TableExhausted),
            ..PeerBehavior::default()
        };
        let peer = env.install_capability(0xa0002, behavior);

        let result = run(&mut env, peer, Some(b"HI".to_vec()), show_command(2, 100));
        assert_eq!(
            result.unwrap_err(),
            ClientError::SubscriptionRejected(RejectReason::TableExhausted)
        );
        assert!(!env.share_active(peer));
        assert_eq!(
            env.audit()
                .count_events(|e| matches!(e, ProtocolEvent::ShareGranted { .. })),
            1
        );
        assert_eq!(
            env.audit()
                .count_events(|e| matches!(e, ProtocolEvent::ShareRevoked { .. })),
            1
        );
    }

    #[test]
    fn test_command_failure_unwinds_subscription_and_lease() {
        use client_types::RejectReason;

        let mut env = SimPeerEnv::new();
        let behavior = PeerBehavior {
            reject_command: Some(RejectReason::Unsupported),
            ..PeerBehavior::default()
        };
        let peer = env.install_capability(0xa0002, behavior);

        let result = run(&mut env, peer, Some(b"HI".to_vec()), show_command(2, 100));
        assert_eq!(
            result.unwrap_err(),
            ClientError::CommandRejected(RejectReason::Unsupported)
        );
        assert!(!env.share_active(peer));
        assert!(!env.subscription_active(peer));
    }

    #[test]
    fn test_begin_returns_before_completion() {
        let mut env = SimPeerEnv::new();
        let behavior = PeerBehavior {
            auto_complete: false,
            ..PeerBehavior::default()
        };
        let peer = env.install_capability(0xa0002, behavior);

        let pending = begin(&mut env, peer, Some(b"HI".to_vec()), show_command(2, 100)).unwrap();
        assert!(!pending.is_done());
        assert!(env.share_active(peer));
        assert!(env.subscription_active(peer));

        env.signal_completion(peer, CompletionStatus::Success);
        assert!(env.yield_no_wait());
        assert_eq!(pending.poll(), Some(CompletionStatus::Success));
        assert!(!env.share_active(peer));
        assert!(!env.subscription_active(peer));
    }

    #[test]
    fn test_continuation_observes_released_resources() {
        let mut env = SimPeerEnv::new();
        let behavior = PeerBehavior {
            auto_complete: false,
            ..PeerBehavior::default()
        };
        let peer = env.install_capability(0xa0002, behavior);

        let pending = begin(&mut env, peer, Some(b"HI".to_vec()), show_command(2, 100)).unwrap();
        let fired = Rc::new(Cell::new(0u32));
        let fired_in_continuation = Rc::clone(&fired);
        pending.on_complete(move |status| {
            assert!(status.is_success());
            fired_in_continuation.set(fired_in_continuation.get() + 1);
        });

        env.signal_completion(peer, CompletionStatus::Success);
        env.yield_wait();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_second_begin_is_in_flight_error() {
        let mut env = SimPeerEnv::new();
        let behavior = PeerBehavior {
            auto_complete: false,
            ..PeerBehavior::default()
        };
        let peer = env.install_capability(0xa0002, behavior);

        let first = begin(&mut env, peer, None, Command::new(2, 0, 0)).unwrap();
        let second = begin(&mut env, peer, None, Command::new(2, 0, 0));
        assert_eq!(second.unwrap_err(), ClientError::RequestInFlight);

        // The first request is unharmed and still completes.
        env.signal_completion(peer, CompletionStatus::Success);
        env.yield_wait();
        assert_eq!(first.poll(), Some(CompletionStatus::Success));
    }

    #[test]
    fn test_command_only_request_needs_no_lease() {
        let mut env = SimPeerEnv::new();
        let peer = env.install_capability(0xa0001, PeerBehavior::default());

        let status = run(&mut env, peer, None, Command::new(1, u32::from(b'A'), 0)).unwrap();
        assert_eq!(status, CompletionStatus::Success);
        assert_eq!(
            env.audit()
                .count_events(|e| matches!(e, ProtocolEvent::ShareGranted { .. })),
            0
        );
    }
}
