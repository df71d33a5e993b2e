//! # Peer API
//!
//! This crate defines the wire contract between a client and the
//! environment that hosts its peers.
//!
//! ## Philosophy
//!
//! The environment provides **four primitives and a way to wait**:
//! - Resolution (identity to handle)
//! - Buffer sharing (grant and revoke visibility of client memory)
//! - Completion subscription (register and cancel one upcall)
//! - Command dispatch (a small fixed frame)
//! - Cooperative yield (block until an upcall is delivered, or poll)
//!
//! Everything else - ordering, cleanup, the sync/async faces - is client
//! protocol built on top, in the `client_protocol` crate.
//!
//! ## Design Goals
//!
//! 1. **Testability**: the entire contract can be implemented in-process
//! 2. **One boundary**: drivers and services sit behind the same trait
//! 3. **Run-to-completion**: upcalls execute on the client's own stack at
//!    yield points, never preemptively

pub mod api;
pub mod region;
pub mod upcall;

pub use api::{PeerApi, COMPLETION_SLOT};
pub use region::SharedRegion;
pub use upcall::Upcall;
