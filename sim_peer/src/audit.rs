//! Protocol audit trail
//!
//! This module provides audit logging for protocol operations in the
//! simulated environment. It tracks every share, subscription, command,
//! and completion event for verification in tests.
//!
//! ## Philosophy
//!
//! - Test-only: this is NOT production logging, it's for test verification
//! - Deterministic: events are recorded in order for reproducible tests
//! - Queryable: tests assert on the trail to verify resource balance

use client_types::{CompletionStatus, PeerHandle};

/// One recorded protocol event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// A buffer grant was accepted
    ShareGranted { peer: PeerHandle, len: usize },
    /// An active grant was withdrawn
    ShareRevoked { peer: PeerHandle },
    /// An upcall was registered on the completion slot
    SubscriptionRegistered { peer: PeerHandle },
    /// A registered upcall was cancelled before delivery
    SubscriptionCleared { peer: PeerHandle },
    /// A command frame was accepted
    CommandAccepted { peer: PeerHandle, opcode: u32 },
    /// A command frame was declined
    CommandRejected { peer: PeerHandle, opcode: u32 },
    /// A completion upcall was delivered to the client
    CompletionDelivered {
        peer: PeerHandle,
        status: CompletionStatus,
    },
}

impl ProtocolEvent {
    /// Returns the peer the event concerns
    pub fn peer(&self) -> PeerHandle {
        match self {
            ProtocolEvent::ShareGranted { peer, .. }
            | ProtocolEvent::ShareRevoked { peer }
            | ProtocolEvent::SubscriptionRegistered { peer }
            | ProtocolEvent::SubscriptionCleared { peer }
            | ProtocolEvent::CommandAccepted { peer, .. }
            | ProtocolEvent::CommandRejected { peer, .. }
            | ProtocolEvent::CompletionDelivered { peer, .. } => *peer,
        }
    }
}

/// Ordered record of protocol events
///
/// Tests assert on this trail to verify the protocol's balance
/// properties: every grant revoked, every registration consumed or
/// cleared, exactly one completion per dispatched request.
#[derive(Debug, Default)]
pub struct ProtocolAuditLog {
    events: Vec<ProtocolEvent>,
}

impl ProtocolAuditLog {
    /// Creates a new empty audit log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Records an event
    pub fn record(&mut self, event: ProtocolEvent) {
        self.events.push(event);
    }

    /// Returns all recorded events in order
    pub fn events(&self) -> &[ProtocolEvent] {
        &self.events
    }

    /// Counts events matching the predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&ProtocolEvent) -> bool,
    {
        self.events.iter().filter(|e| predicate(e)).count()
    }

    /// Checks if any event matches the predicate
    pub fn has_event<F>(&self, predicate: F) -> bool
    where
        F: Fn(&ProtocolEvent) -> bool,
    {
        self.events.iter().any(|e| predicate(e))
    }

    /// Checks that every grant to the peer has a matching revoke
    pub fn leases_balanced(&self, peer: PeerHandle) -> bool {
        let granted = self.count_events(
            |e| matches!(e, ProtocolEvent::ShareGranted { peer: p, .. } if *p == peer),
        );
        let revoked = self
            .count_events(|e| matches!(e, ProtocolEvent::ShareRevoked { peer: p } if *p == peer));
        granted == revoked
    }

    /// Checks that every registration was consumed by a delivery or cleared
    pub fn subscriptions_balanced(&self, peer: PeerHandle) -> bool {
        let registered = self.count_events(
            |e| matches!(e, ProtocolEvent::SubscriptionRegistered { peer: p } if *p == peer),
        );
        let cleared = self.count_events(
            |e| matches!(e, ProtocolEvent::SubscriptionCleared { peer: p } if *p == peer),
        );
        let delivered = self.count_events(
            |e| matches!(e, ProtocolEvent::CompletionDelivered { peer: p, .. } if *p == peer),
        );
        registered == cleared + delivered
    }

    /// Clears all events (useful for test reset)
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Returns the number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Checks if the audit log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
