//! # ut61e-rs - A Rust Crate for Decoding UNI-T UT61E Multimeter Telegrams
//!
//! The UT61E digital multimeter streams its display over an optically isolated serial
//! interface as 14-byte telegrams. This crate decodes one telegram into a structured
//! measurement: value, unit, measurement mode and status flags.
//!
//! ## Features
//!
//! - Length and odd parity validation of each telegram
//! - Mode and range resolution through static lookup tables, failing closed on unknown codes
//! - Plain, semicolon separated and JSON renderings of a measurement
//! - Support for logging and error handling
//!
//! Reading the serial port is left to the caller; the decoder is a pure function over
//! the captured bytes and is safe to call from any number of threads.
//!
//! ## Usage
//!
//! ```rust
//! use ut61e_rs::{decode, DecodeError, Mode};
//!
//! let frame = [
//!     0xB0, 0xB0, 0xB0, 0xB3, 0x32, 0xB0, 0xB6, 0xB0, 0xB0, 0xB0, 0x32, 0xB0, 0x0D, 0x8A,
//! ];
//! let measurement = decode(&frame)?;
//! assert_eq!(measurement.mode, Mode::Capacitance);
//! assert_eq!(measurement.to_string(), "0.3200 nF");
//! # Ok::<(), DecodeError>(())
//! ```

pub mod constants;
pub mod error;
pub mod logging;
pub mod ut61e;
pub mod util;

pub use crate::error::DecodeError;
pub use crate::logging::{init_logger, log_info};

pub use constants::{CSV_HEADER, UT61E_FRAME_LENGTH};
pub use ut61e::{
    decode, DecodedFields, FrameInspection, FrameLog, FrameStats, InfoFlags, Measurement, Mode,
    OutputFormat, RawFrame, TypeFlags,
};
