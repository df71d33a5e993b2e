//! # Display Clients
//!
//! Thin device clients over the protocol core. Each client supplies only
//! its peer identity, opcodes, and argument encoding; the handshake,
//! cleanup, and waiting all live in `client_protocol`.
//!
//! ## Clients
//!
//! - [`TextDisplay`]: shows a text for a duration; runs the full
//!   lease + subscribe + dispatch protocol, synchronously or
//!   asynchronously. Works against the capability-addressed driver or the
//!   name-addressed service.
//! - [`LedMatrixText`]: command-only scroll-speed control.
//! - [`DigitLetterDisplay`]: command-only single character display.

pub mod digit_letter;
pub mod led_matrix;
pub mod text_display;

pub use digit_letter::DigitLetterDisplay;
pub use led_matrix::LedMatrixText;
pub use text_display::TextDisplay;

/// Capability id of the digit/letter display driver
pub const DIGIT_LETTER_DISPLAY_CAPABILITY: u32 = 0xa0001;

/// Capability id of the text display driver
pub const TEXT_DISPLAY_CAPABILITY: u32 = 0xa0002;

/// Capability id of the LED-matrix text driver
pub const LED_MATRIX_TEXT_CAPABILITY: u32 = 0xa0003;

/// Name of the text display service
pub const TEXT_DISPLAY_SERVICE: &str = "text_display.service";

/// Largest text a display peer accepts, in bytes
pub const DISPLAY_BUFFER_LEN: usize = 64;
