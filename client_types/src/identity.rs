//! Peer identities
//!
//! A client names its peer in one of two independent identity spaces:
//! kernel-resident drivers carry a small numeric capability id, sibling
//! services carry a short symbolic name. Both are cases of one type so the
//! rest of the protocol has a single resolution path.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical identity of a peer before resolution
///
/// The two identity spaces are independent: capability id `0xa0002` and a
/// service that happens to be named `"0xa0002"` are unrelated peers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeerIdentity {
    /// Numeric capability id of a kernel-resident driver
    Capability(u32),
    /// Symbolic name of a sibling service
    Named(String),
}

impl PeerIdentity {
    /// Creates a capability identity
    pub fn capability(id: u32) -> Self {
        Self::Capability(id)
    }

    /// Creates a named service identity
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Checks if this identity addresses a driver by capability id
    pub fn is_capability(&self) -> bool {
        matches!(self, Self::Capability(_))
    }

    /// Checks if this identity addresses a service by name
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named(_))
    }
}

impl fmt::Display for PeerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeerIdentity::Capability(id) => write!(f, "capability:{:#x}", id),
            PeerIdentity::Named(name) => write!(f, "service:{}", name),
        }
    }
}
