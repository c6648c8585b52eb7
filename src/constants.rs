//! UT61E Telegram Constants
//!
//! Byte offsets and bit masks of the 14-byte telegram sent by the UT61E over its
//! optically isolated serial interface (19200 baud, 7 data bits, odd parity).

/// Length of one telegram in bytes, including the trailing CR LF
pub const UT61E_FRAME_LENGTH: usize = 14;

/// Mask that strips the parity bit from a received byte
pub const UT61E_DATA_MASK: u8 = 0x7F;

/// Mask for the low nibble of a byte
pub const UT61E_NIBBLE_MASK: u8 = 0x0F;

/// Byte holding the range (unit index) in its low three bits
pub const UT61E_RANGE_BYTE: usize = 0;

/// Mask for the unit index within the range byte
pub const UT61E_RANGE_MASK: u8 = 0x07;

/// First of the five digit bytes, most significant digit first
pub const UT61E_DIGITS_START: usize = 1;

/// Number of digit bytes
pub const UT61E_DIGIT_COUNT: usize = 5;

/// Byte holding the function (mode) nibble
pub const UT61E_FUNCTION_BYTE: usize = 6;

/// Byte holding the status (info) nibble
pub const UT61E_STATUS_BYTE: usize = 7;

/// Byte holding the underload flag
pub const UT61E_OPTION2_BYTE: usize = 9;

/// Underload bit within the option-2 byte
pub const UT61E_UNDERLOAD_MASK: u8 = 0x08;

/// Byte holding the coupling (type) nibble
pub const UT61E_OPTION3_BYTE: usize = 10;

/// Bit pattern that marks duty-cycle mode in the status nibble
pub const UT61E_DUTY_PATTERN: u8 = 0x08;

/// Header line for semicolon separated output
pub const CSV_HEADER: &str = "Value;Unit;Type;Overloaded";

/// Separator used in semicolon separated output
pub const CSV_SEPARATOR: char = ';';
