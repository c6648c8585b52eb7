//! # Utility Modules
//!
//! Helpers shared by the library and the CLI: parsing captured frame text and
//! rate-limited logging of rejected frames.

pub mod hex;
pub mod logging;

pub use hex::{decode_decimal, decode_hex, encode_hex, format_hex_compact, parse_frame_text, HexError};
pub use logging::{log_decode_error, log_frame_hex, LogThrottle, ThrottleStats};
