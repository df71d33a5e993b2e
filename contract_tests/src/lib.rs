//! # Protocol Contract Tests
//!
//! This crate provides "golden" tests for the peer client protocol to
//! ensure its guarantees don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: the protocol's promises are written as code
//! - **Testability first**: contract tests fail when a guarantee changes
//! - **Resource balance is the contract**: every grant revoked, every
//!   registration consumed, exactly one completion per dispatched request
//!
//! ## Structure
//!
//! - [`lifecycle`]: lease/subscription lifecycle guarantees - exclusivity
//!   window, idempotence, long-run leak balance, the in-flight guard
//! - [`scenarios`]: end-to-end client scenarios over the display clients

pub mod lifecycle;
pub mod scenarios;
