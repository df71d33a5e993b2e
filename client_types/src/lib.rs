//! # Client Types
//!
//! This crate defines the fundamental types of the peer client protocol.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: peer identities and handles are typed and
//!   cannot be confused with each other or with raw integers.
//! - **Status values, not exceptions**: every failure the protocol can
//!   report is an ordinary value a caller branches on.
//! - **One identity type**: drivers addressed by capability id and services
//!   addressed by name share a single polymorphic [`PeerIdentity`].
//!
//! ## Key Types
//!
//! - [`PeerIdentity`]: how a client names the peer it wants to talk to
//! - [`PeerHandle`]: opaque handle for a resolved peer
//! - [`Command`]: the small fixed command frame sent to a peer
//! - [`CompletionStatus`]: status-only outcome of a request
//! - [`ClientError`]: the full error taxonomy of the protocol

pub mod command;
pub mod error;
pub mod identity;
pub mod ids;
pub mod status;

pub use command::{Command, PROBE_OPCODE};
pub use error::ClientError;
pub use identity::PeerIdentity;
pub use ids::{PeerHandle, RegionId, RequestId};
pub use status::{CompletionStatus, RejectReason};
