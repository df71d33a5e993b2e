//! Peer location and handle memoization

use client_types::{ClientError, PeerHandle, PeerIdentity};
use peer_api::PeerApi;

/// Resolves a peer identity and caches the handle
///
/// Resolution happens at most once per locator: the first success is
/// memoized for the locator's lifetime and later calls are pure lookups.
/// `PeerNotFound` is not cached - a peer that appears later (a service
/// that finished starting up, say) resolves on the next attempt.
#[derive(Debug)]
pub struct PeerLocator {
    identity: PeerIdentity,
    handle: Option<PeerHandle>,
}

impl PeerLocator {
    /// Creates a locator for the given identity
    pub fn new(identity: PeerIdentity) -> Self {
        Self {
            identity,
            handle: None,
        }
    }

    /// Returns the identity this locator resolves
    pub fn identity(&self) -> &PeerIdentity {
        &self.identity
    }

    /// Checks if a handle has been memoized
    pub fn is_resolved(&self) -> bool {
        self.handle.is_some()
    }

    /// Resolves the identity, memoizing the first success
    pub fn resolve<E: PeerApi + ?Sized>(&mut self, env: &mut E) -> Result<PeerHandle, ClientError> {
        if let Some(handle) = self.handle {
            return Ok(handle);
        }
        let handle = env.resolve(&self.identity)?;
        self.handle = Some(handle);
        Ok(handle)
    }

    /// Checks whether the peer is installed
    pub fn is_present<E: PeerApi + ?Sized>(&mut self, env: &mut E) -> bool {
        self.resolve(env).is_ok()
    }
}
