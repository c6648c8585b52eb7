//! # UT61E Telegram Framing
//!
//! Structural validation and field extraction for the 14-byte telegram.
//!
//! Every byte on the wire carries 7 data bits and an odd parity bit in bit 7. The
//! functions here check the parity, strip it, and cut the masked bytes into the
//! fields the decoder works with:
//!
//! | Byte  | Content                                   |
//! |-------|-------------------------------------------|
//! | 0     | range (unit index) in bits 0..=2          |
//! | 1..=5 | digits, most significant first            |
//! | 6     | function (mode nibble)                    |
//! | 7     | status: OL, low battery, sign, duty       |
//! | 8     | option 1 (unused)                         |
//! | 9     | option 2: underload in bit 3              |
//! | 10    | option 3: DC, AC, auto range, Hz button   |
//! | 11    | option 4 (unused)                         |
//! | 12,13 | CR LF                                     |

use bitflags::bitflags;

use crate::constants::{
    UT61E_DATA_MASK, UT61E_DIGITS_START, UT61E_DIGIT_COUNT, UT61E_DUTY_PATTERN,
    UT61E_FRAME_LENGTH, UT61E_FUNCTION_BYTE, UT61E_NIBBLE_MASK, UT61E_OPTION2_BYTE,
    UT61E_OPTION3_BYTE, UT61E_RANGE_BYTE, UT61E_RANGE_MASK, UT61E_STATUS_BYTE,
    UT61E_UNDERLOAD_MASK,
};
use crate::error::DecodeError;

bitflags! {
    /// Coupling and range flags from the low nibble of byte 10
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u8 {
        /// Hz/duty button pressed, frequency is shown
        const HZ   = 0b0001;
        /// Automatic range selection
        const AUTO = 0b0010;
        const AC   = 0b0100;
        const DC   = 0b1000;
    }
}

bitflags! {
    /// Status flags from the low nibble of byte 7
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct InfoFlags: u8 {
        /// Reading is above the selected range
        const OVERLOAD    = 0b0001;
        const LOW_BATTERY = 0b0010;
        /// Reading is negative
        const NEGATIVE    = 0b0100;
        /// Duty cycle is shown
        const DUTY        = 0b1000;
    }
}

/// Returns true when `byte` has an odd number of set bits.
///
/// The bits are folded onto bit 0 with successive shifts of 4, 2 and 1.
pub fn has_odd_parity(byte: u8) -> bool {
    let mut folded = byte;
    folded ^= folded >> 4;
    folded ^= folded >> 2;
    folded ^= folded >> 1;
    folded & 1 == 1
}

/// Positions of the bytes in `input` that fail the odd parity check.
pub fn parity_failures(input: &[u8]) -> Vec<usize> {
    input
        .iter()
        .enumerate()
        .filter(|(_, byte)| !has_odd_parity(**byte))
        .map(|(pos, _)| pos)
        .collect()
}

/// A telegram with the parity bits stripped.
///
/// Only the masked data bits are kept; the value is immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawFrame {
    bytes: [u8; UT61E_FRAME_LENGTH],
}

/// Result of [`RawFrame::inspect`]: the masked telegram and any parity failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameInspection {
    pub raw: RawFrame,
    pub parity_failures: Vec<usize>,
}

impl FrameInspection {
    pub fn parity_ok(&self) -> bool {
        self.parity_failures.is_empty()
    }
}

impl RawFrame {
    /// Checks length and parity and returns the masked telegram.
    pub fn from_bytes(input: &[u8]) -> Result<Self, DecodeError> {
        let inspection = Self::inspect(input)?;
        if !inspection.parity_ok() {
            return Err(DecodeError::ParityMismatch {
                positions: inspection.parity_failures,
                raw: inspection.raw.bytes,
            });
        }
        Ok(inspection.raw)
    }

    /// Masks the telegram without rejecting parity failures.
    ///
    /// Only the length is enforced. Useful for diagnostics on a noisy line.
    pub fn inspect(input: &[u8]) -> Result<FrameInspection, DecodeError> {
        let frame: &[u8; UT61E_FRAME_LENGTH] =
            input.try_into().map_err(|_| DecodeError::InvalidLength {
                expected: UT61E_FRAME_LENGTH,
                actual: input.len(),
            })?;

        let mut bytes = [0u8; UT61E_FRAME_LENGTH];
        for (masked, &byte) in bytes.iter_mut().zip(frame.iter()) {
            *masked = byte & UT61E_DATA_MASK;
        }

        Ok(FrameInspection {
            raw: RawFrame { bytes },
            parity_failures: parity_failures(frame),
        })
    }

    pub fn bytes(&self) -> &[u8; UT61E_FRAME_LENGTH] {
        &self.bytes
    }

    /// The five digit nibbles, most significant first.
    pub fn digits(&self) -> [u8; UT61E_DIGIT_COUNT] {
        let mut digits = [0u8; UT61E_DIGIT_COUNT];
        let src = &self.bytes[UT61E_DIGITS_START..UT61E_DIGITS_START + UT61E_DIGIT_COUNT];
        for (digit, &byte) in digits.iter_mut().zip(src) {
            *digit = byte & UT61E_NIBBLE_MASK;
        }
        digits
    }

    /// The digits read as one decimal integer.
    ///
    /// Nibbles above 9 are taken at face value, matching the meter's own arithmetic.
    pub fn magnitude(&self) -> u32 {
        self.digits()
            .iter()
            .fold(0u32, |acc, &digit| acc * 10 + u32::from(digit))
    }

    /// Splits the telegram into its flag and selector fields.
    pub fn fields(&self) -> DecodedFields {
        DecodedFields {
            mode_nibble: self.bytes[UT61E_FUNCTION_BYTE] & UT61E_NIBBLE_MASK,
            unit_index: self.bytes[UT61E_RANGE_BYTE] & UT61E_RANGE_MASK,
            type_flags: TypeFlags::from_bits_truncate(
                self.bytes[UT61E_OPTION3_BYTE] & UT61E_NIBBLE_MASK,
            ),
            info_flags: InfoFlags::from_bits_truncate(
                self.bytes[UT61E_STATUS_BYTE] & UT61E_NIBBLE_MASK,
            ),
            underload: self.bytes[UT61E_OPTION2_BYTE] & UT61E_UNDERLOAD_MASK
                == UT61E_UNDERLOAD_MASK,
        }
    }
}

/// Fields cut out of a masked telegram, before any table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFields {
    /// Function nibble as sent, before the Hz/duty override
    pub mode_nibble: u8,
    pub unit_index: u8,
    pub type_flags: TypeFlags,
    pub info_flags: InfoFlags,
    pub underload: bool,
}

impl DecodedFields {
    pub fn is_frequency(&self) -> bool {
        self.type_flags.contains(TypeFlags::HZ)
    }

    /// Duty cycle is flagged either by the duty bit or by a status nibble equal to
    /// the duty pattern alone. Both checks are kept.
    pub fn is_duty(&self) -> bool {
        self.info_flags.contains(InfoFlags::DUTY) || self.info_flags.bits() == UT61E_DUTY_PATTERN
    }

    pub fn is_negative(&self) -> bool {
        self.info_flags.contains(InfoFlags::NEGATIVE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLTAGE_DC: [u8; 14] = [
        0x34, 0x32, 0x32, 0xB5, 0x38, 0xB0, 0x3B, 0x31, 0xB0, 0xB0, 0x38, 0xB0, 0x0D, 0x8A,
    ];

    #[test]
    fn test_parity_fold() {
        assert!(has_odd_parity(0x01));
        assert!(has_odd_parity(0x80));
        assert!(has_odd_parity(0xB0));
        assert!(!has_odd_parity(0x00));
        assert!(!has_odd_parity(0x30));
        assert!(!has_odd_parity(0xFF));
    }

    #[test]
    fn test_parity_matches_popcount() {
        for byte in 0..=u8::MAX {
            assert_eq!(has_odd_parity(byte), byte.count_ones() % 2 == 1, "byte 0x{byte:02X}");
        }
    }

    #[test]
    fn test_masking() {
        let raw = RawFrame::from_bytes(&VOLTAGE_DC).unwrap();
        assert!(raw.bytes().iter().all(|b| b & 0x80 == 0));
        assert_eq!(raw.bytes()[3], 0x35);
        assert_eq!(raw.bytes()[13], 0x0A);
    }

    #[test]
    fn test_digits_and_magnitude() {
        let raw = RawFrame::from_bytes(&VOLTAGE_DC).unwrap();
        assert_eq!(raw.digits(), [2, 2, 5, 8, 0]);
        assert_eq!(raw.magnitude(), 22580);
    }

    #[test]
    fn test_fields() {
        let fields = RawFrame::from_bytes(&VOLTAGE_DC).unwrap().fields();
        assert_eq!(fields.mode_nibble, 0xB);
        assert_eq!(fields.unit_index, 4);
        assert_eq!(fields.type_flags, TypeFlags::DC);
        assert_eq!(fields.info_flags, InfoFlags::OVERLOAD);
        assert!(!fields.underload);
        assert!(!fields.is_frequency());
        assert!(!fields.is_duty());
    }

    #[test]
    fn test_inspect_keeps_raw_on_parity_failure() {
        let mut frame = VOLTAGE_DC;
        frame[3] = 0x35;
        frame[8] = 0x30;
        let inspection = RawFrame::inspect(&frame).unwrap();
        assert!(!inspection.parity_ok());
        assert_eq!(inspection.parity_failures, vec![3, 8]);
        assert_eq!(inspection.raw.bytes()[3], 0x35);

        match RawFrame::from_bytes(&frame) {
            Err(DecodeError::ParityMismatch { positions, raw }) => {
                assert_eq!(positions, vec![3, 8]);
                assert_eq!(&raw, inspection.raw.bytes());
            }
            other => panic!("expected parity mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_inspect_rejects_length() {
        assert_eq!(
            RawFrame::inspect(&VOLTAGE_DC[..13]),
            Err(DecodeError::InvalidLength {
                expected: 14,
                actual: 13
            })
        );
    }

    #[test]
    fn test_duty_detection_variants() {
        let mut fields = RawFrame::from_bytes(&VOLTAGE_DC).unwrap().fields();
        fields.info_flags = InfoFlags::DUTY;
        assert!(fields.is_duty());
        fields.info_flags = InfoFlags::DUTY | InfoFlags::NEGATIVE;
        assert!(fields.is_duty());
        fields.info_flags = InfoFlags::NEGATIVE | InfoFlags::OVERLOAD;
        assert!(!fields.is_duty());
    }
}
