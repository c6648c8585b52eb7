//! # UT61E Telegram Decoder
//!
//! Turns one 14-byte telegram into a [`Measurement`].
//!
//! Decoding runs strictly downstream:
//! 1. length and odd parity check ([`RawFrame::from_bytes`])
//! 2. field extraction from the masked bytes ([`RawFrame::fields`])
//! 3. mode resolution, where the Hz flag and then the duty flag override the function nibble
//! 4. unit and divisor lookup ([`lookup_range`])
//! 5. the five digits divided by the divisor, negated when the sign flag is set
//!
//! The decoder keeps no state between calls and never logs; failures come back as
//! [`DecodeError`].
//!
//! ```rust
//! use ut61e_rs::{decode, Mode};
//!
//! let frame = [
//!     0x34, 0x32, 0x32, 0xB5, 0x38, 0xB0, 0x3B, 0x31, 0xB0, 0xB0, 0x38, 0xB0, 0x0D, 0x8A,
//! ];
//! let m = decode(&frame).unwrap();
//! assert_eq!(m.mode, Mode::Voltage);
//! assert_eq!(m.to_string(), "225.8000 mV");
//! ```

use serde::Serialize;

use crate::error::DecodeError;
use crate::ut61e::frame::{DecodedFields, InfoFlags, RawFrame, TypeFlags};
use crate::ut61e::tables::{lookup_range, Mode};

/// A decoded multimeter reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub value: f64,
    pub mode: Mode,
    /// Display unit; empty only for the unitless frequency range
    pub unit: &'static str,
    pub unit_index: u8,
    pub negative: bool,
    pub overload: bool,
    pub underload: bool,
    pub frequency: bool,
    pub duty: bool,
    pub ac: bool,
    pub dc: bool,
    pub auto_range: bool,
    pub low_battery: bool,
}

/// Decodes a single telegram.
pub fn decode(input: &[u8]) -> Result<Measurement, DecodeError> {
    let raw = RawFrame::from_bytes(input)?;
    Measurement::from_raw(&raw)
}

/// Applies the Hz and duty overrides to the function nibble.
///
/// Hz wins when both flags are present.
pub fn resolve_mode_nibble(fields: &DecodedFields) -> u8 {
    if fields.is_frequency() {
        Mode::Frequency.nibble()
    } else if fields.is_duty() {
        Mode::Duty.nibble()
    } else {
        fields.mode_nibble
    }
}

impl Measurement {
    /// Decodes an already validated telegram.
    pub fn from_raw(raw: &RawFrame) -> Result<Self, DecodeError> {
        let fields = raw.fields();
        let mode_nibble = resolve_mode_nibble(&fields);

        let unknown = DecodeError::UnknownModeOrUnit {
            mode: mode_nibble,
            unit_index: fields.unit_index,
        };
        let mode = Mode::from_nibble(mode_nibble).ok_or_else(|| unknown.clone())?;
        let (unit, scale) = lookup_range(mode, fields.unit_index).ok_or(unknown)?;

        let mut value = f64::from(raw.magnitude()) / f64::from(scale);
        if fields.is_negative() {
            value = -value;
        }

        Ok(Measurement {
            value,
            mode,
            unit,
            unit_index: fields.unit_index,
            negative: fields.is_negative(),
            overload: fields.info_flags.contains(InfoFlags::OVERLOAD),
            underload: fields.underload,
            frequency: fields.is_frequency(),
            duty: fields.is_duty(),
            ac: fields.type_flags.contains(TypeFlags::AC),
            dc: fields.type_flags.contains(TypeFlags::DC),
            auto_range: fields.type_flags.contains(TypeFlags::AUTO),
            low_battery: fields.info_flags.contains(InfoFlags::LOW_BATTERY),
        })
    }
}

impl TryFrom<&[u8]> for Measurement {
    type Error = DecodeError;

    fn try_from(input: &[u8]) -> Result<Self, Self::Error> {
        decode(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLTAGE_DC: [u8; 14] = [
        0x34, 0x32, 0x32, 0xB5, 0x38, 0xB0, 0x3B, 0x31, 0xB0, 0xB0, 0x38, 0xB0, 0x0D, 0x8A,
    ];

    /// Sets bit 7 so the byte has odd parity.
    fn odd(byte: u8) -> u8 {
        let data = byte & 0x7F;
        if data.count_ones() % 2 == 0 {
            data | 0x80
        } else {
            data
        }
    }

    #[test]
    fn test_decode_voltage_dc() {
        let m = decode(&VOLTAGE_DC).unwrap();
        assert!((m.value - 225.8).abs() < 1e-4);
        assert_eq!(m.mode, Mode::Voltage);
        assert_eq!(m.unit, "mV");
        assert_eq!(m.unit_index, 4);
        assert!(m.overload);
        assert!(m.dc);
        assert!(!m.ac);
        assert!(!m.frequency);
        assert!(!m.duty);
        assert!(!m.negative);
    }

    #[test]
    fn test_frequency_overrides_duty() {
        let mut fields = RawFrame::from_bytes(&VOLTAGE_DC).unwrap().fields();
        fields.type_flags = TypeFlags::HZ;
        fields.info_flags = InfoFlags::DUTY;
        assert_eq!(resolve_mode_nibble(&fields), Mode::Frequency.nibble());
        fields.type_flags = TypeFlags::empty();
        assert_eq!(resolve_mode_nibble(&fields), Mode::Duty.nibble());
        fields.info_flags = InfoFlags::empty();
        assert_eq!(resolve_mode_nibble(&fields), Mode::Voltage.nibble());
    }

    #[test]
    fn test_negative_value() {
        let mut frame = VOLTAGE_DC;
        frame[7] = odd(0x34);
        let m = decode(&frame).unwrap();
        assert!(m.negative);
        assert!(!m.overload);
        assert!((m.value + 225.8).abs() < 1e-4);
    }

    #[test]
    fn test_unit_index_out_of_range() {
        let mut frame = VOLTAGE_DC;
        frame[0] = odd(0x35);
        assert_eq!(
            decode(&frame),
            Err(DecodeError::UnknownModeOrUnit {
                mode: 0xB,
                unit_index: 5
            })
        );
    }

    #[test]
    fn test_try_from_slice() {
        let m = Measurement::try_from(&VOLTAGE_DC[..]).unwrap();
        assert_eq!(m, decode(&VOLTAGE_DC).unwrap());
    }
}
