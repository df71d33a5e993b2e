//! # Simulated Peer Environment
//!
//! This crate provides a simulated implementation of the peer API.
//!
//! ## Purpose
//!
//! The simulated environment allows testing client protocol behavior
//! without a kernel or sibling processes:
//! - Runs under `cargo test`
//! - Deterministic (completions are delivered only at yield points)
//! - Inspectable (share state, subscription state, and a full audit
//!   trail are accessible)
//!
//! ## Philosophy
//!
//! **Testability is a first-class design constraint.**
//!
//! This is not a "toy" or "mock" - it's a full implementation of the peer
//! contract that happens to host its peers in-process. Peers are installed
//! with a [`PeerBehavior`] describing how they respond; everything a real
//! environment could do to a client (decline a share, exhaust a table,
//! vanish, fail an action) is a behavior knob here.

pub mod audit;
pub mod behavior;

pub use audit::{ProtocolAuditLog, ProtocolEvent};
pub use behavior::PeerBehavior;

use client_types::{ClientError, Command, CompletionStatus, PeerHandle, PeerIdentity, RejectReason};
use peer_api::{PeerApi, SharedRegion, Upcall, COMPLETION_SLOT};
use std::collections::{HashMap, VecDeque};

/// One installed peer
#[derive(Debug)]
struct PeerSlot {
    behavior: PeerBehavior,
    share: Option<SharedRegion>,
    upcall: Option<Upcall>,
}

impl PeerSlot {
    fn new(behavior: PeerBehavior) -> Self {
        Self {
            behavior,
            share: None,
            upcall: None,
        }
    }
}

/// Simulated peer environment
///
/// Maintains the capability and named-service identity tables, per-peer
/// protocol state, the queue of completions awaiting delivery, and the
/// audit trail. Unlike a real environment, all state is directly
/// accessible for testing.
#[derive(Debug, Default)]
pub struct SimPeerEnv {
    /// Installed peers by handle
    peers: HashMap<PeerHandle, PeerSlot>,
    /// Capability identity space
    capabilities: HashMap<u32, PeerHandle>,
    /// Named-service identity space
    names: HashMap<String, PeerHandle>,
    /// Completions signalled but not yet delivered
    ready: VecDeque<(PeerHandle, CompletionStatus)>,
    /// Audit trail of protocol events
    audit: ProtocolAuditLog,
}

impl SimPeerEnv {
    /// Creates an empty environment with no peers installed
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a driver peer under a capability id
    pub fn install_capability(&mut self, id: u32, behavior: PeerBehavior) -> PeerHandle {
        let handle = PeerHandle::new();
        self.peers.insert(handle, PeerSlot::new(behavior));
        self.capabilities.insert(id, handle);
        handle
    }

    /// Installs a service peer under a symbolic name
    pub fn install_named(&mut self, name: impl Into<String>, behavior: PeerBehavior) -> PeerHandle {
        let handle = PeerHandle::new();
        self.peers.insert(handle, PeerSlot::new(behavior));
        self.names.insert(name.into(), handle);
        handle
    }

    /// Removes a peer, modelling a driver or service going away
    pub fn remove_peer(&mut self, peer: PeerHandle) {
        self.peers.remove(&peer);
        self.capabilities.retain(|_, handle| *handle != peer);
        self.names.retain(|_, handle| *handle != peer);
        self.ready.retain(|(handle, _)| *handle != peer);
    }

    /// Returns a peer's behavior for adjustment mid-test
    pub fn behavior_mut(&mut self, peer: PeerHandle) -> Option<&mut PeerBehavior> {
        self.peers.get_mut(&peer).map(|slot| &mut slot.behavior)
    }

    /// Queues a completion for delivery at the next yield
    ///
    /// Used by tests driving peers with `auto_complete` off, to control
    /// exactly when the peer "finishes" its action.
    pub fn signal_completion(&mut self, peer: PeerHandle, status: CompletionStatus) {
        self.ready.push_back((peer, status));
    }

    /// Checks if the peer currently holds a grant
    pub fn share_active(&self, peer: PeerHandle) -> bool {
        self.peers
            .get(&peer)
            .is_some_and(|slot| slot.share.is_some())
    }

    /// Checks if an upcall is registered on the peer's completion slot
    pub fn subscription_active(&self, peer: PeerHandle) -> bool {
        self.peers
            .get(&peer)
            .is_some_and(|slot| slot.upcall.is_some())
    }

    /// Returns the bytes the peer can currently see, if any
    pub fn shared_bytes(&self, peer: PeerHandle) -> Option<Vec<u8>> {
        self.peers
            .get(&peer)
            .and_then(|slot| slot.share.as_ref())
            .map(|region| region.data().to_vec())
    }

    /// Returns the number of completions awaiting delivery
    pub fn pending_completions(&self) -> usize {
        self.ready.len()
    }

    /// Returns the audit trail
    pub fn audit(&self) -> &ProtocolAuditLog {
        &self.audit
    }

    /// Returns the audit trail for mutation (test reset)
    pub fn audit_mut(&mut self) -> &mut ProtocolAuditLog {
        &mut self.audit
    }

    /// Delivers the next queued completion that still has a subscriber
    ///
    /// The upcall is taken out of the peer slot before it runs, so the
    /// delivery itself consumes the registration and the upcall is free
    /// to re-enter the environment. Completions whose subscriber is gone
    /// are discarded.
    fn deliver_next(&mut self) -> bool {
        while let Some((peer, status)) = self.ready.pop_front() {
            let upcall = self
                .peers
                .get_mut(&peer)
                .and_then(|slot| slot.upcall.take());
            if let Some(upcall) = upcall {
                self.audit
                    .record(ProtocolEvent::CompletionDelivered { peer, status });
                upcall.invoke(self, status);
                return true;
            }
        }
        false
    }
}

impl PeerApi for SimPeerEnv {
    fn resolve(&mut self, identity: &PeerIdentity) -> Result<PeerHandle, ClientError> {
        let handle = match identity {
            PeerIdentity::Capability(id) => self.capabilities.get(id).copied(),
            PeerIdentity::Named(name) => self.names.get(name.as_str()).copied(),
        };
        handle.ok_or_else(|| ClientError::PeerNotFound(identity.clone()))
    }

    fn share(
        &mut self,
        peer: PeerHandle,
        region: Option<SharedRegion>,
    ) -> Result<(), ClientError> {
        match region {
            Some(region) => {
                let slot = self
                    .peers
                    .get_mut(&peer)
                    .ok_or(ClientError::BufferRejected(RejectReason::PeerGone))?;
                if !slot.behavior.supports_sharing {
                    return Err(ClientError::BufferRejected(RejectReason::Unsupported));
                }
                if region.is_empty() {
                    return Err(ClientError::BufferRejected(RejectReason::InvalidBuffer));
                }
                if let Some(reason) = slot.behavior.reject_share {
                    return Err(ClientError::BufferRejected(reason));
                }
                let occupied = usize::from(slot.share.is_some());
                if occupied >= slot.behavior.share_table_capacity {
                    return Err(ClientError::BufferRejected(RejectReason::TableExhausted));
                }
                let len = region.len();
                slot.share = Some(region);
                self.audit.record(ProtocolEvent::ShareGranted { peer, len });
                Ok(())
            }
            None => {
                // Revocation is always a success for the caller, even when
                // the peer is already gone.
                if let Some(slot) = self.peers.get_mut(&peer) {
                    if slot.share.take().is_some() {
                        self.audit.record(ProtocolEvent::ShareRevoked { peer });
                    }
                }
                Ok(())
            }
        }
    }

    fn subscribe(
        &mut self,
        peer: PeerHandle,
        slot: u32,
        upcall: Option<Upcall>,
    ) -> Result<(), ClientError> {
        match upcall {
            Some(upcall) => {
                let peer_slot = self
                    .peers
                    .get_mut(&peer)
                    .ok_or(ClientError::SubscriptionRejected(RejectReason::PeerGone))?;
                if slot != COMPLETION_SLOT {
                    return Err(ClientError::SubscriptionRejected(RejectReason::Unsupported));
                }
                if let Some(reason) = peer_slot.behavior.reject_subscribe {
                    return Err(ClientError::SubscriptionRejected(reason));
                }
                if peer_slot.upcall.is_some() {
                    return Err(ClientError::SubscriptionRejected(RejectReason::SlotOccupied));
                }
                peer_slot.upcall = Some(upcall);
                self.audit
                    .record(ProtocolEvent::SubscriptionRegistered { peer });
                Ok(())
            }
            None => {
                if let Some(peer_slot) = self.peers.get_mut(&peer) {
                    if peer_slot.upcall.take().is_some() {
                        self.audit
                            .record(ProtocolEvent::SubscriptionCleared { peer });
                    }
                }
                Ok(())
            }
        }
    }

    fn send_command(&mut self, peer: PeerHandle, command: Command) -> Result<(), ClientError> {
        let slot = match self.peers.get_mut(&peer) {
            Some(slot) => slot,
            None => {
                self.audit.record(ProtocolEvent::CommandRejected {
                    peer,
                    opcode: command.opcode,
                });
                return Err(ClientError::CommandRejected(RejectReason::PeerGone));
            }
        };
        if let Some(reason) = slot.behavior.reject_command {
            self.audit.record(ProtocolEvent::CommandRejected {
                peer,
                opcode: command.opcode,
            });
            return Err(ClientError::CommandRejected(reason));
        }
        let completes = slot.behavior.auto_complete && slot.upcall.is_some();
        let status = slot.behavior.completion_status;
        self.audit.record(ProtocolEvent::CommandAccepted {
            peer,
            opcode: command.opcode,
        });
        if completes {
            self.ready.push_back((peer, status));
        }
        Ok(())
    }

    fn yield_wait(&mut self) {
        if !self.deliver_next() {
            // A real cooperative kernel would block this process forever;
            // a test that gets here has deadlocked, so fail loudly.
            panic!("yield_wait would block forever: no completion is pending");
        }
    }

    fn yield_no_wait(&mut self) -> bool {
        self.deliver_next()
    }
}
