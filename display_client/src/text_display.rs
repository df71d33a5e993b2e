//! Text display client

use crate::{DISPLAY_BUFFER_LEN, TEXT_DISPLAY_CAPABILITY, TEXT_DISPLAY_SERVICE};
use client_protocol::{dispatcher, request, PeerLocator, PendingRequest};
use client_types::{ClientError, Command, CompletionStatus, PeerIdentity};
use peer_api::PeerApi;

/// Opcode asking the peer to start showing the leased text
///
/// arg0 carries the text length in bytes, arg1 the display duration in
/// milliseconds.
const SHOW_TEXT_OPCODE: u32 = 1;

/// Client for a text-showing peer
///
/// The same client works against both addressings of the peer: the
/// kernel-resident driver (capability id) and the sibling service
/// (symbolic name). Texts longer than [`DISPLAY_BUFFER_LEN`] bytes are
/// truncated, matching what the peers themselves do.
#[derive(Debug)]
pub struct TextDisplay {
    locator: PeerLocator,
}

impl TextDisplay {
    /// Creates a client for an arbitrary peer identity
    pub fn new(identity: PeerIdentity) -> Self {
        Self {
            locator: PeerLocator::new(identity),
        }
    }

    /// Creates a client for a driver addressed by capability id
    pub fn capability(id: u32) -> Self {
        Self::new(PeerIdentity::capability(id))
    }

    /// Creates a client for a service addressed by name
    pub fn named(name: &str) -> Self {
        Self::new(PeerIdentity::named(name))
    }

    /// Creates a client for the standard text display driver
    pub fn default_driver() -> Self {
        Self::capability(TEXT_DISPLAY_CAPABILITY)
    }

    /// Creates a client for the standard text display service
    pub fn default_service() -> Self {
        Self::named(TEXT_DISPLAY_SERVICE)
    }

    /// Checks that the peer is installed and answers commands
    pub fn is_present<E: PeerApi + ?Sized>(&mut self, env: &mut E) -> bool {
        match self.locator.resolve(env) {
            Ok(peer) => dispatcher::probe(env, peer),
            Err(_) => false,
        }
    }

    /// Shows a text and waits cooperatively for the peer to finish
    ///
    /// Returns the peer's completion status. Fails without side effects if
    /// the peer is absent or the text is empty.
    pub fn show<E: PeerApi + ?Sized>(
        &mut self,
        env: &mut E,
        text: &str,
        duration_ms: u32,
    ) -> Result<CompletionStatus, ClientError> {
        let bytes = Self::encode(text)?;
        let peer = self.locator.resolve(env)?;
        let command = Command::new(SHOW_TEXT_OPCODE, bytes.len() as u32, duration_ms);
        request::run(env, peer, Some(bytes), command)
    }

    /// Starts showing a text and returns immediately
    ///
    /// The caller polls the returned request or attaches a continuation
    /// with [`PendingRequest::on_complete`], and keeps yielding so the
    /// scheduler can deliver the completion.
    pub fn show_async<E: PeerApi + ?Sized>(
        &mut self,
        env: &mut E,
        text: &str,
        duration_ms: u32,
    ) -> Result<PendingRequest, ClientError> {
        let bytes = Self::encode(text)?;
        let peer = self.locator.resolve(env)?;
        let command = Command::new(SHOW_TEXT_OPCODE, bytes.len() as u32, duration_ms);
        request::begin(env, peer, Some(bytes), command)
    }

    fn encode(text: &str) -> Result<Vec<u8>, ClientError> {
        if text.is_empty() {
            return Err(ClientError::InvalidArgument(
                "text must not be empty".to_string(),
            ));
        }
        let mut bytes = text.as_bytes().to_vec();
        bytes.truncate(DISPLAY_BUFFER_LEN);
        Ok(bytes)
    }
}
