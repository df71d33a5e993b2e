//! Shared buffer leases

use client_types::{ClientError, PeerHandle, RegionId, RejectReason};
use peer_api::{PeerApi, SharedRegion};

/// Exclusive, revocable peer visibility of a buffer
///
/// While a lease is active the leased bytes live inside it - the client
/// moved them in at grant time and gets them back from [`revoke`]. There
/// is no way to read or write the buffer of an active lease, which is the
/// whole point: the peer may be looking at it.
///
/// Exactly one lease may be active per (client, peer) pair. The request
/// layer is the only construction site and enforces that sequencing.
///
/// [`revoke`]: BufferLease::revoke
#[derive(Debug)]
pub struct BufferLease {
    peer: PeerHandle,
    region: RegionId,
    buffer: Option<Vec<u8>>,
    active: bool,
}

impl BufferLease {
    /// Grants the peer visibility of the given bytes
    ///
    /// An empty buffer is rejected locally before the environment is
    /// involved. On success the lease is active and owns the bytes.
    pub fn grant<E: PeerApi + ?Sized>(
        env: &mut E,
        peer: PeerHandle,
        buffer: Vec<u8>,
    ) -> Result<Self, ClientError> {
        if buffer.is_empty() {
            return Err(ClientError::BufferRejected(RejectReason::InvalidBuffer));
        }
        let region = RegionId::new();
        env.share(peer, Some(SharedRegion::new(region, &buffer)))?;
        Ok(Self {
            peer,
            region,
            buffer: Some(buffer),
            active: true,
        })
    }

    /// Checks if the peer can currently see the buffer
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the peer holding the lease
    pub fn peer(&self) -> PeerHandle {
        self.peer
    }

    /// Returns the region id minted for this grant
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Returns the leased length in bytes
    pub fn len(&self) -> usize {
        self.buffer.as_ref().map_or(0, Vec::len)
    }

    /// Checks if the lease holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ends the lease and returns the bytes to the caller
    ///
    /// The first call tells the environment to withdraw the region - best
    /// effort, since the peer may already be gone - deactivates the lease,
    /// and hands the buffer back. Further calls are no-ops that return
    /// `None`.
    pub fn revoke<E: PeerApi + ?Sized>(&mut self, env: &mut E) -> Option<Vec<u8>> {
        if !self.active {
            return None;
        }
        let _ = env.share(self.peer, None);
        self.active = false;
        self.buffer.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_peer::{PeerBehavior, SimPeerEnv};

    fn env_with_peer() -> (SimPeerEnv, PeerHandle) {
        let mut env = SimPeerEnv::new();
        let peer = env.install_capability(0xa0002, PeerBehavior::default());
        (env, peer)
    }

    #[test]
    fn test_grant_then_revoke_round_trip() {
        let (mut env, peer) = env_with_peer();

        let mut lease = BufferLease::grant(&mut env, peer, b"HELLO".to_vec()).unwrap();
        assert!(lease.is_active());
        assert_eq!(lease.len(), 5);
        assert!(env.share_active(peer));
        assert_eq!(env.shared_bytes(peer).as_deref(), Some(&b"HELLO"[..]));

        let bytes = lease.revoke(&mut env);
        assert_eq!(bytes.as_deref(), Some(&b"HELLO"[..]));
        assert!(!lease.is_active());
        assert!(!env.share_active(peer));
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let (mut env, peer) = env_with_peer();

        let mut lease = BufferLease::grant(&mut env, peer, b"HI".to_vec()).unwrap();
        assert!(lease.revoke(&mut env).is_some());
        assert!(lease.revoke(&mut env).is_none());
        assert!(lease.revoke(&mut env).is_none());
        assert!(!lease.is_active());
    }

    #[test]
    fn test_empty_buffer_rejected_locally() {
        let (mut env, peer) = env_with_peer();

        let result = BufferLease::grant(&mut env, peer, Vec::new());
        assert_eq!(
            result.unwrap_err(),
            ClientError::BufferRejected(RejectReason::InvalidBuffer)
        );
        // The environment never saw the grant.
        assert!(env.audit().is_empty());
    }

    #[test]
    fn test_peer_without_sharing_rejects_grant() {
        let mut env = SimPeerEnv::new();
        let behavior = PeerBehavior {
            supports_sharing: false,
            ..PeerBehavior::default()
        };
        let peer = env.install_capability(0xa0003, behavior);

        let result = BufferLease::grant(&mut env, peer, b"HI".to_vec());
        assert_eq!(
            result.unwrap_err(),
            ClientError::BufferRejected(RejectReason::Unsupported)
        );
    }

    #[test]
    fn test_revoke_survives_vanished_peer() {
        let (mut env, peer) = env_with_peer();

        let mut lease = BufferLease::grant(&mut env, peer, b"HI".to_vec()).unwrap();
        env.remove_peer(peer);

        // Best effort: the bytes still come back and the lease deactivates.
        assert_eq!(lease.revoke(&mut env).as_deref(), Some(&b"HI"[..]));
        assert!(!lease.is_active());
    }
}
