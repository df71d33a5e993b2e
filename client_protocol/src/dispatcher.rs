//! Command dispatch

use client_types::{ClientError, Command, PeerHandle};
use peer_api::PeerApi;

/// Sends a command frame to a peer
///
/// Commands that depend on a shared buffer must only be dispatched after
/// both the grant and the subscription succeeded; the request layer owns
/// that ordering. Command-only device operations (presence probes, mode
/// settings) dispatch directly.
pub fn send<E: PeerApi + ?Sized>(
    env: &mut E,
    peer: PeerHandle,
    command: Command,
) -> Result<(), ClientError> {
    env.send_command(peer, command)
}

/// Probes whether a resolved peer answers commands
pub fn probe<E: PeerApi + ?Sized>(env: &mut E, peer: PeerHandle) -> bool {
    send(env, peer, Command::probe()).is_ok()
}
