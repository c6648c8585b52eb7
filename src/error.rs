//! # UT61E Error Handling
//!
//! This module defines the `DecodeError` enum, which represents the ways a telegram
//! can fail to decode. Every variant is recoverable: the caller drops the frame and
//! reads the next one.

use thiserror::Error;

use crate::constants::UT61E_FRAME_LENGTH;

/// Represents the different error types that can occur while decoding a telegram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input is not exactly one telegram long.
    #[error("Invalid frame length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// One or more bytes failed the odd parity check.
    ///
    /// `raw` carries the telegram with the parity bits stripped so the caller can
    /// still log what was received.
    #[error("Parity check failed at byte(s) {positions:?}")]
    ParityMismatch {
        positions: Vec<usize>,
        raw: [u8; UT61E_FRAME_LENGTH],
    },

    /// The resolved mode has no table, or the unit index is past the end of it.
    #[error("Unknown mode/unit: mode 0x{mode:X}, unit index {unit_index}")]
    UnknownModeOrUnit { mode: u8, unit_index: u8 },
}

impl DecodeError {
    /// Short label used when counting failures by kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::InvalidLength { .. } => "length",
            DecodeError::ParityMismatch { .. } => "parity",
            DecodeError::UnknownModeOrUnit { .. } => "mode/unit",
        }
    }
}
