//! LED-matrix text client

use crate::LED_MATRIX_TEXT_CAPABILITY;
use client_protocol::{dispatcher, PeerLocator};
use client_types::{ClientError, Command, PeerIdentity};
use peer_api::PeerApi;

/// Opcode setting the scroll period; arg0 carries milliseconds per column
const SET_SPEED_OPCODE: u32 = 1;

/// Client for the LED-matrix text driver
///
/// The matrix scrolls whatever the text screen holds; this client only
/// tunes how it scrolls. Commands carry everything in their frame, so no
/// buffer lease or completion subscription is involved.
#[derive(Debug)]
pub struct LedMatrixText {
    locator: PeerLocator,
}

impl LedMatrixText {
    /// Creates a client for a driver addressed by capability id
    pub fn capability(id: u32) -> Self {
        Self {
            locator: PeerLocator::new(PeerIdentity::capability(id)),
        }
    }

    /// Creates a client for the standard LED-matrix text driver
    pub fn default_driver() -> Self {
        Self::capability(LED_MATRIX_TEXT_CAPABILITY)
    }

    /// Checks that the driver is installed and answers commands
    pub fn is_present<E: PeerApi + ?Sized>(&mut self, env: &mut E) -> bool {
        match self.locator.resolve(env) {
            Ok(peer) => dispatcher::probe(env, peer),
            Err(_) => false,
        }
    }

    /// Sets the scroll period in milliseconds per column
    pub fn set_speed<E: PeerApi + ?Sized>(
        &mut self,
        env: &mut E,
        period_ms: u32,
    ) -> Result<(), ClientError> {
        let peer = self.locator.resolve(env)?;
        dispatcher::send(env, peer, Command::new(SET_SPEED_OPCODE, period_ms, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sim_peer::{PeerBehavior, ProtocolEvent, SimPeerEnv};

    #[test]
    fn test_set_speed() {
        let mut env = SimPeerEnv::new();
        let peer = env.install_capability(LED_MATRIX_TEXT_CAPABILITY, PeerBehavior::default());

        let mut matrix = LedMatrixText::default_driver();
        assert!(matrix.is_present(&mut env));
        matrix.set_speed(&mut env, 500).unwrap();

        assert!(env.audit().has_event(|e| matches!(
            e,
            ProtocolEvent::CommandAccepted { peer: p, opcode: SET_SPEED_OPCODE } if *p == peer
        )));
    }

    #[test]
    fn test_absent_driver() {
        let mut env = SimPeerEnv::new();

        let mut matrix = LedMatrixText::default_driver();
        assert!(!matrix.is_present(&mut env));
        assert_eq!(
            matrix.set_speed(&mut env, 500).unwrap_err(),
            ClientError::PeerNotFound(PeerIdentity::capability(LED_MATRIX_TEXT_CAPABILITY))
        );
    }
}
