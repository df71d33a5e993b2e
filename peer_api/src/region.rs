//! Peer-visible image of a leased buffer

use client_types::RegionId;
use serde::{Deserialize, Serialize};

/// The peer's view of a shared buffer
///
/// A region is constructed from the leased bytes at grant time and handed
/// to the peer; it models the mapping the peer holds while the lease is
/// active. The peer must not retain the region past revocation - the
/// environment takes it back on `share(peer, None)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedRegion {
    region: RegionId,
    data: Vec<u8>,
}

impl SharedRegion {
    /// Creates a region over the given bytes
    pub fn new(region: RegionId, data: &[u8]) -> Self {
        Self {
            region,
            data: data.to_vec(),
        }
    }

    /// Returns the region identifier
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Returns the bytes visible to the peer
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the region length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks if the region is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
