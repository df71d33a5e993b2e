//! Per-peer behavior configuration

use client_types::{CompletionStatus, RejectReason};

/// How an installed simulated peer responds to the protocol
///
/// The default behavior is a well-behaved display-style peer: sharing
/// supported, one share-table entry, every operation accepted, and every
/// accepted action completed with `Success` at the next yield. Tests turn
/// individual knobs to exercise rejection and failure paths.
#[derive(Debug, Clone)]
pub struct PeerBehavior {
    /// Whether this peer kind supports buffer sharing at all
    pub supports_sharing: bool,
    /// Decline every grant with this reason
    pub reject_share: Option<RejectReason>,
    /// Decline every subscription with this reason
    pub reject_subscribe: Option<RejectReason>,
    /// Decline every command with this reason
    pub reject_command: Option<RejectReason>,
    /// How many concurrent grants the peer-side table holds
    pub share_table_capacity: usize,
    /// Queue a completion automatically when an action command is accepted
    /// while an upcall is registered; otherwise the test signals manually
    pub auto_complete: bool,
    /// Status reported by queued completions
    pub completion_status: CompletionStatus,
}

impl Default for PeerBehavior {
    fn default() -> Self {
        Self {
            supports_sharing: true,
            reject_share: None,
            reject_subscribe: None,
            reject_command: None,
            share_table_capacity: 1,
            auto_complete: true,
            completion_status: CompletionStatus::Success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_behavior_is_well_behaved() {
        let behavior = PeerBehavior::default();
        assert!(behavior.supports_sharing);
        assert!(behavior.reject_share.is_none());
        assert!(behavior.reject_subscribe.is_none());
        assert!(behavior.reject_command.is_none());
        assert_eq!(behavior.share_table_capacity, 1);
        assert!(behavior.auto_complete);
        assert_eq!(behavior.completion_status, CompletionStatus::Success);
    }
}
