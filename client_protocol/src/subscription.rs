//! Completion subscriptions

use client_types::{ClientError, PeerHandle};
use peer_api::{PeerApi, Upcall, COMPLETION_SLOT};

/// An active completion registration against a peer
///
/// At most one subscription may be active per (client, peer) pair. The
/// request layer never re-registers while one is active: the registered
/// upcall clears the wire slot itself as part of completion, and error
/// paths cancel before returning.
#[derive(Debug)]
pub struct Subscription {
    peer: PeerHandle,
    slot: u32,
    active: bool,
}

impl Subscription {
    /// Registers an upcall on the peer's completion slot
    pub fn register<E: PeerApi + ?Sized>(
        env: &mut E,
        peer: PeerHandle,
        upcall: Upcall,
    ) -> Result<Self, ClientError> {
        env.subscribe(peer, COMPLETION_SLOT, Some(upcall))?;
        Ok(Self {
            peer,
            slot: COMPLETION_SLOT,
            active: true,
        })
    }

    /// Returns the subscribed peer
    pub fn peer(&self) -> PeerHandle {
        self.peer
    }

    /// Returns the subscribed slot
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Checks if the registration is still considered active
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cancels the registration
    ///
    /// Idempotent and best effort: cancelling twice, or cancelling after
    /// the peer has gone away, does nothing.
    pub fn cancel<E: PeerApi + ?Sized>(&mut self, env: &mut E) {
        if !self.active {
            return;
        }
        let _ = env.subscribe(self.peer, self.slot, None);
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_types::CompletionStatus;
    use sim_peer::{PeerBehavior, SimPeerEnv};

    fn noop_upcall() -> Upcall {
        Upcall::new(|_env, _status: CompletionStatus| {})
    }

    #[test]
    fn test_register_and_cancel() {
        let mut env = SimPeerEnv::new();
        let peer = env.install_capability(0xa0002, PeerBehavior::default());

        let mut subscription = Subscription::register(&mut env, peer, noop_upcall()).unwrap();
        assert!(subscription.is_active());
        assert!(env.subscription_active(peer));

        subscription.cancel(&mut env);
        assert!(!subscription.is_active());
        assert!(!env.subscription_active(peer));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut env = SimPeerEnv::new();
        let peer = env.install_capability(0xa0002, PeerBehavior::default());

        let mut subscription = Subscription::register(&mut env, peer, noop_upcall()).unwrap();
        subscription.cancel(&mut env);
        subscription.cancel(&mut env);
        assert!(!subscription.is_active());
    }

    #[test]
    fn test_occupied_slot_rejected() {
        use client_types::RejectReason;

        let mut env = SimPeerEnv::new();
        let peer = env.install_capability(0xa0002, PeerBehavior::default());

        let _first = Subscription::register(&mut env, peer, noop_upcall()).unwrap();
        let second = Subscription::register(&mut env, peer, noop_upcall());
        assert_eq!(
            second.unwrap_err(),
            ClientError::SubscriptionRejected(RejectReason::SlotOccupied)
        );
    }
}
