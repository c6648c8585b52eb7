//! # Frame Text Parsing
//!
//! Captures of UT61E telegrams come in two textual shapes: hex dumps from serial
//! sniffers (`34 32 32 b5 ...`) and decimal byte lists copied out of other tools,
//! often as signed bytes (`52, 50, 50, -75, ...`). This module turns either into bytes
//! and formats bytes back for logs.
//!
//! ## Usage
//!
//! ```rust
//! use ut61e_rs::util::hex::{parse_frame_text, format_hex_compact};
//!
//! let a = parse_frame_text("34 32 32 b5").unwrap();
//! let b = parse_frame_text("52, 50, 50, -75").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(format_hex_compact(&a), "34 32 32 b5");
//! ```

use thiserror::Error;

/// Errors that can occur while turning text into frame bytes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),

    #[error("Invalid decimal byte: {0}")]
    InvalidDecimal(String),
}

/// Encode bytes to lowercase hex string
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace, `:` and `-` separators are stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Parse a comma separated list of decimal bytes, signed (-128..=127) or unsigned (0..=255).
///
/// Surrounding braces or brackets are ignored.
pub fn decode_decimal(input: &str) -> Result<Vec<u8>, HexError> {
    let trimmed = input
        .trim()
        .trim_start_matches(['{', '['])
        .trim_end_matches(['}', ']']);

    if trimmed.trim().is_empty() {
        return Err(HexError::EmptyString);
    }

    trimmed
        .split(',')
        .map(str::trim)
        .map(|item| {
            let value: i16 = item
                .parse()
                .map_err(|_| HexError::InvalidDecimal(item.to_string()))?;
            match value {
                0..=255 => Ok(value as u8),
                -128..=-1 => Ok(value as i8 as u8),
                _ => Err(HexError::InvalidDecimal(item.to_string())),
            }
        })
        .collect()
}

/// Parse one frame written either as hex or as a comma separated decimal list.
///
/// Text containing a comma is read as decimal, anything else as hex.
pub fn parse_frame_text(input: &str) -> Result<Vec<u8>, HexError> {
    if input.contains(',') {
        decode_decimal(input)
    } else {
        decode_hex(input)
    }
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "34 32 32 b5" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
