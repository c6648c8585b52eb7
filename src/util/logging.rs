//! # Capture Logging Utilities
//!
//! Logging helpers for long-running captures, where a loose cable or a meter switched
//! off mid-stream produces a burst of bad telegrams.
//!
//! ## Features
//!
//! - Rate-limited logging so a noisy line does not flood the log
//! - Hex dumps of rejected telegrams at debug level
//!
//! ## Usage
//!
//! ```rust
//! use ut61e_rs::util::logging::{LogThrottle, log_frame_hex};
//!
//! let mut throttle = LogThrottle::new(1000, 5); // 5 messages per second
//! if throttle.allow() {
//!     log::warn!("parity error");
//! }
//! log_frame_hex("Rejected frame", &[0x34, 0x32, 0x32]);
//! ```

use std::time::{Duration, Instant};

use crate::error::DecodeError;

/// Throttling structure for rate-limiting log messages
#[derive(Debug)]
pub struct LogThrottle {
    /// Time window for throttling (in milliseconds)
    window_ms: u64,
    /// Maximum messages allowed per window
    cap: u32,
    /// Current message count in window
    count: u32,
    /// Messages refused since the last allowed one
    suppressed: u32,
    /// Start time of current window
    t0: Instant,
}

impl LogThrottle {
    /// Create new throttle with time window and message cap
    ///
    /// # Arguments
    /// * `window_ms` - Time window in milliseconds
    /// * `cap` - Maximum messages allowed per window
    pub fn new(window_ms: u64, cap: u32) -> Self {
        Self {
            window_ms,
            cap,
            count: 0,
            suppressed: 0,
            t0: Instant::now(),
        }
    }

    /// Check if logging is allowed (resets counter after window expires)
    ///
    /// Returns `true` if the message should be logged, `false` if it
    /// should be throttled.
    pub fn allow(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.t0) > Duration::from_millis(self.window_ms) {
            self.t0 = now;
            self.count = 0;
        }

        self.count += 1;
        if self.count <= self.cap {
            true
        } else {
            self.suppressed += 1;
            false
        }
    }

    /// Number of messages refused so far; resetting the throttle clears it.
    pub fn suppressed(&self) -> u32 {
        self.suppressed
    }

    /// Get current throttle statistics
    pub fn stats(&self) -> ThrottleStats {
        ThrottleStats {
            window_ms: self.window_ms,
            cap: self.cap,
            count: self.count,
            suppressed: self.suppressed,
        }
    }

    /// Reset the throttle (start new window immediately)
    pub fn reset(&mut self) {
        self.t0 = Instant::now();
        self.count = 0;
        self.suppressed = 0;
    }
}

/// Statistics about a log throttle instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleStats {
    pub window_ms: u64,
    pub cap: u32,
    pub count: u32,
    pub suppressed: u32,
}

/// Log frame data in hex format for debugging
pub fn log_frame_hex(prefix: &str, data: &[u8]) {
    const MAX_LOG_BYTES: usize = 32;

    let display_data = &data[..data.len().min(MAX_LOG_BYTES)];
    let hex_str = crate::util::hex::format_hex_compact(display_data);
    let suffix = if data.len() > MAX_LOG_BYTES {
        format!(" ... ({} bytes total)", data.len())
    } else {
        String::new()
    };

    log::debug!(target: "ut61e::frame", "{prefix}: {hex_str}{suffix}");
}

/// Log a rejected telegram: the error at warn level, the bytes at debug level.
///
/// For parity failures the masked bytes are dumped too.
pub fn log_decode_error(err: &DecodeError, data: &[u8]) {
    log::warn!(target: "ut61e::frame", "Dropping frame: {err}");
    log_frame_hex("Received", data);
    if let DecodeError::ParityMismatch { raw, .. } = err {
        log_frame_hex("Masked", raw);
    }
}

/// Log an error with throttling
#[macro_export]
macro_rules! log_error_throttled {
    ($throttle:expr, $($arg:tt)*) => {
        if $throttle.allow() {
            log::error!($($arg)*);
        }
    };
}

/// Log a warning with throttling
#[macro_export]
macro_rules! log_warn_throttled {
    ($throttle:expr, $($arg:tt)*) => {
        if $throttle.allow() {
            log::warn!($($arg)*);
        }
    };
}
