//! The ut61e module contains the telegram decoder for the UNI-T UT61E: framing and
//! parity, the mode/range tables, value computation, and the text renderings.

pub mod decoder;
pub mod format;
pub mod frame;
pub mod output;
pub mod tables;

pub use decoder::{decode, resolve_mode_nibble, Measurement};
pub use format::csv_header;
pub use frame::{has_odd_parity, DecodedFields, FrameInspection, InfoFlags, RawFrame, TypeFlags};
pub use output::{FrameLog, FrameStats, OutputFormat};
pub use tables::{lookup_range, lookup_scale, lookup_unit, Mode};
