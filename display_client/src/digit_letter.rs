//! Digit and letter display client

use crate::DIGIT_LETTER_DISPLAY_CAPABILITY;
use client_protocol::{dispatcher, PeerLocator};
use client_types::{ClientError, Command, PeerIdentity};
use peer_api::PeerApi;

/// Opcode showing one character; arg0 carries the character code
const SHOW_CHARACTER_OPCODE: u32 = 1;

/// Client for the digit/letter display driver
///
/// The driver renders a single glyph; it only knows the digits and the
/// basic Latin letters, so anything else is rejected client-side.
#[derive(Debug)]
pub struct DigitLetterDisplay {
    locator: PeerLocator,
}

impl DigitLetterDisplay {
    /// Creates a client for a driver addressed by capability id
    pub fn capability(id: u32) -> Self {
        Self {
            locator: PeerLocator::new(PeerIdentity::capability(id)),
        }
    }

    /// Creates a client for the standard digit/letter display driver
    pub fn default_driver() -> Self {
        Self::capability(DIGIT_LETTER_DISPLAY_CAPABILITY)
    }

    /// Checks that the driver is installed and answers commands
    pub fn is_present<E: PeerApi + ?Sized>(&mut self, env: &mut E) -> bool {
        match self.locator.resolve(env) {
            Ok(peer) => dispatcher::probe(env, peer),
            Err(_) => false,
        }
    }

    /// Shows a single digit or letter
    pub fn show_character<E: PeerApi + ?Sized>(
        &mut self,
        env: &mut E,
        character: char,
    ) -> Result<(), ClientError> {
        if !character.is_ascii_alphanumeric() {
            return Err(ClientError::InvalidArgument(format!(
                "character {:?} has no glyph",
                character
            )));
        }
        let peer = self.locator.resolve(env)?;
        dispatcher::send(
            env,
            peer,
            Command::new(SHOW_CHARACTER_OPCODE, character as u32, 0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_peer::{PeerBehavior, ProtocolEvent, SimPeerEnv};

    #[test]
    fn test_show_character() {
        let mut env = SimPeerEnv::new();
        let peer = env.install_capability(DIGIT_LETTER_DISPLAY_CAPABILITY, PeerBehavior::default());

        let mut display = DigitLetterDisplay::default_driver();
        assert!(display.is_present(&mut env));
        display.show_character(&mut env, 'A').unwrap();
        display.show_character(&mut env, '7').unwrap();

        assert_eq!(
            env.audit().count_events(|e| matches!(
                e,
                ProtocolEvent::CommandAccepted { peer: p, opcode: SHOW_CHARACTER_OPCODE } if *p == peer
            )),
            2
        );
    }

    #[test]
    fn test_character_without_glyph_rejected() {
        let mut env = SimPeerEnv::new();
        env.install_capability(DIGIT_LETTER_DISPLAY_CAPABILITY, PeerBehavior::default());

        let mut display = DigitLetterDisplay::default_driver();
        let result = display.show_character(&mut env, '!');
        assert!(matches!(
            result.unwrap_err(),
            ClientError::InvalidArgument(_)
        ));
        assert!(env.audit().is_empty());
    }

    #[test]
    fn test_absent_driver() {
        let mut env = SimPeerEnv::new();

        let mut display = DigitLetterDisplay::default_driver();
        assert!(!display.is_present(&mut env));
    }
}
