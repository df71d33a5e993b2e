//! Lease and subscription lifecycle contracts
