//! # Client Protocol
//!
//! This crate implements the client side of the peer request protocol: how
//! a cooperative, single-threaded client obtains exclusive, time-bounded
//! peer visibility of a buffer, issues a command, and learns of completion.
//!
//! ## Philosophy
//!
//! - **One implementation**: every device client goes through this crate;
//!   there is exactly one place where the handshake and its cleanup live.
//! - **Ownership is the guard**: leased bytes move into the lease, so the
//!   client cannot touch memory the peer can see. Revocation hands the
//!   bytes back.
//! - **Cleanup on every path**: each code path that grants a lease revokes
//!   it exactly once before its request is finished - including every
//!   error branch and the completion upcall itself.
//!
//! ## The handshake
//!
//! ```text
//! resolve -> grant -> subscribe -> send_command -> (yield) -> upcall
//!                                                               |
//!                                     revoke + unsubscribe + complete
//! ```
//!
//! [`request::run`] walks the whole sequence and blocks cooperatively;
//! [`request::begin`] returns a [`PendingRequest`] right after dispatch for
//! callers that poll or attach a continuation instead.

pub mod dispatcher;
pub mod lease;
pub mod locator;
pub mod rendezvous;
pub mod request;
pub mod subscription;

pub use lease::BufferLease;
pub use locator::PeerLocator;
pub use rendezvous::{CompletionFuture, CompletionSlot};
pub use request::{begin, run, PendingRequest};
pub use subscription::Subscription;
