//! Command frames
//!
//! A command is a small fixed frame: an operation code and two integer
//! arguments. Opcode 0 is reserved across all peers as the presence probe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opcode reserved for the presence probe
///
/// Every peer answers opcode 0 with plain acceptance; clients use it to
/// check that a resolved peer is actually willing to talk.
pub const PROBE_OPCODE: u32 = 0;

/// A command frame sent to a peer
///
/// The frame is intentionally tiny: anything larger travels through a
/// shared buffer, not through command arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Operation code; the peer defines the meaning of non-zero opcodes
    pub opcode: u32,
    /// First argument
    pub arg0: u32,
    /// Second argument
    pub arg1: u32,
}

impl Command {
    /// Creates a new command frame
    pub fn new(opcode: u32, arg0: u32, arg1: u32) -> Self {
        Self { opcode, arg0, arg1 }
    }

    /// Creates the presence probe command
    pub fn probe() -> Self {
        Self::new(PROBE_OPCODE, 0, 0)
    }

    /// Checks if this frame is the presence probe
    pub fn is_probe(&self) -> bool {
        self.opcode == PROBE_OPCODE
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command({}, {}, {})", self.opcode, self.arg0, self.arg1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_creation() {
        let command = Command::new(1, 5, 300);
        assert_eq!(command.opcode, 1);
        assert_eq!(command.arg0, 5);
        assert_eq!(command.arg1, 300);
        assert!(!command.is_probe());
    }

    #[test]
    fn test_probe_command() {
        let probe = Command::probe();
        assert_eq!(probe.opcode, PROBE_OPCODE);
        assert!(probe.is_probe());
    }

    #[test]
    fn test_command_serde_round_trip() {
        let command = Command::new(1, 5, 300);
        let json = serde_json::to_string(&command).unwrap();
        let decoded: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, command);
    }
}
