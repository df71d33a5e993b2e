//! Demo: display clients against the simulated peer environment
//!
//! Installs the display peers, then walks through the synchronous call,
//! the asynchronous call with interleaved work, and the command-only
//! clients.

use client_types::CompletionStatus;
use display_client::{
    DigitLetterDisplay, LedMatrixText, TextDisplay, DIGIT_LETTER_DISPLAY_CAPABILITY,
    LED_MATRIX_TEXT_CAPABILITY, TEXT_DISPLAY_CAPABILITY, TEXT_DISPLAY_SERVICE,
};
use peer_api::PeerApi;
use sim_peer::{PeerBehavior, SimPeerEnv};

fn main() {
    let mut env = SimPeerEnv::new();
    env.install_capability(TEXT_DISPLAY_CAPABILITY, PeerBehavior::default());
    env.install_capability(LED_MATRIX_TEXT_CAPABILITY, PeerBehavior::default());
    env.install_capability(DIGIT_LETTER_DISPLAY_CAPABILITY, PeerBehavior::default());
    // The service peer completes only when told to, leaving a window for
    // the asynchronous caller to do other work in.
    env.install_named(
        TEXT_DISPLAY_SERVICE,
        PeerBehavior {
            auto_complete: false,
            ..PeerBehavior::default()
        },
    );

    synchronous_show(&mut env);
    asynchronous_show(&mut env);
    command_only_clients(&mut env);

    println!("protocol events recorded: {}", env.audit().len());
}

fn synchronous_show(env: &mut SimPeerEnv) {
    let mut display = TextDisplay::default_driver();
    if !display.is_present(env) {
        println!("text display driver is not present");
        return;
    }
    match display.show(env, "HELLO", 300) {
        Ok(status) => println!("show(\"HELLO\", 300) -> {}", status),
        Err(error) => println!("show failed: {}", error),
    }
}

fn asynchronous_show(env: &mut SimPeerEnv) {
    let mut display = TextDisplay::default_service();
    let pending = match display.show_async(env, "HI", 300) {
        Ok(pending) => pending,
        Err(error) => {
            println!("show_async failed: {}", error);
            return;
        }
    };

    let mut polls = 0u32;
    while !pending.is_done() {
        polls += 1;
        // Interleave "other work" with non-blocking polls; after a few
        // rounds the peer finishes its action.
        if polls == 3 {
            env.signal_completion(pending.peer(), CompletionStatus::Success);
        }
        env.yield_no_wait();
    }
    println!(
        "show_async(\"HI\", 300) -> {} after {} polls",
        pending.poll().map(|s| s.to_string()).unwrap_or_default(),
        polls
    );
}

fn command_only_clients(env: &mut SimPeerEnv) {
    let mut matrix = LedMatrixText::default_driver();
    if matrix.is_present(env) {
        match matrix.set_speed(env, 500) {
            Ok(()) => println!("led matrix scroll period set to 500 ms"),
            Err(error) => println!("set_speed failed: {}", error),
        }
    }

    let mut glyphs = DigitLetterDisplay::default_driver();
    for character in ['O', 'K'] {
        if let Err(error) = glyphs.show_character(env, character) {
            println!("show_character({}) failed: {}", character, error);
        }
    }
    println!("digit/letter display showed OK");
}
