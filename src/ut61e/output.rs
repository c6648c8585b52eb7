//! Writing decoded measurements to a sink.
//!
//! [`FrameLog`] is the consumer side of the decoder: it takes frames one at a time,
//! writes each good one in the chosen [`OutputFormat`], and logs and counts the bad
//! ones. Frames are independent; a failed frame never affects the next.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::error::DecodeError;
use crate::ut61e::decoder::{decode, Measurement};
use crate::ut61e::format::csv_header;
use crate::util::logging::{log_decode_error, LogThrottle};

/// Output line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// `225.8000 mV`
    #[default]
    Plain,
    /// `225.8000;mV;DC;OL`
    Csv,
    /// One JSON object per line
    Json,
}

/// Frame counters for one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub decoded: u64,
    pub failed: u64,
    /// Failures keyed by [`DecodeError::kind`]
    pub failures_by_kind: BTreeMap<&'static str, u64>,
}

impl FrameStats {
    pub fn total(&self) -> u64 {
        self.decoded + self.failed
    }

    fn record_failure(&mut self, err: &DecodeError) {
        self.failed += 1;
        *self.failures_by_kind.entry(err.kind()).or_insert(0) += 1;
    }
}

/// Decodes frames and writes the results to `W`.
#[derive(Debug)]
pub struct FrameLog<W: Write> {
    writer: W,
    format: OutputFormat,
    stats: FrameStats,
    throttle: LogThrottle,
}

impl<W: Write> FrameLog<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            stats: FrameStats::default(),
            throttle: LogThrottle::new(1000, 5),
        }
    }

    /// Writes the CSV header; other formats have none.
    pub fn write_header(&mut self) -> io::Result<()> {
        if self.format == OutputFormat::Csv {
            writeln!(self.writer, "{}", csv_header())?;
        }
        Ok(())
    }

    pub fn write_measurement(&mut self, measurement: &Measurement) -> io::Result<()> {
        match self.format {
            OutputFormat::Plain => writeln!(self.writer, "{measurement}"),
            OutputFormat::Csv => writeln!(self.writer, "{}", measurement.to_csv_line()),
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, measurement)?;
                writeln!(self.writer)
            }
        }
    }

    /// Decodes one frame and writes it.
    ///
    /// Decode failures are logged (rate limited), counted, and returned so a strict
    /// caller can stop; write failures come back as the outer `io::Error`.
    pub fn process(&mut self, frame: &[u8]) -> io::Result<Result<Measurement, DecodeError>> {
        match decode(frame) {
            Ok(measurement) => {
                self.write_measurement(&measurement)?;
                self.stats.decoded += 1;
                Ok(Ok(measurement))
            }
            Err(err) => {
                self.stats.record_failure(&err);
                if self.throttle.allow() {
                    log_decode_error(&err, frame);
                }
                Ok(Err(err))
            }
        }
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Messages held back by the warning throttle.
    pub fn suppressed_warnings(&self) -> u32 {
        self.throttle.suppressed()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VOLTAGE_DC: [u8; 14] = [
        0x34, 0x32, 0x32, 0xB5, 0x38, 0xB0, 0x3B, 0x31, 0xB0, 0xB0, 0x38, 0xB0, 0x0D, 0x8A,
    ];

    fn output(log: FrameLog<Vec<u8>>) -> String {
        String::from_utf8(log.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_output() {
        let mut log = FrameLog::new(Vec::new(), OutputFormat::Plain);
        log.write_header().unwrap();
        assert!(log.process(&VOLTAGE_DC).unwrap().is_ok());
        assert_eq!(output(log), "225.8000 mV\n");
    }

    #[test]
    fn test_csv_output_with_header() {
        let mut log = FrameLog::new(Vec::new(), OutputFormat::Csv);
        log.write_header().unwrap();
        log.process(&VOLTAGE_DC).unwrap().unwrap();
        assert_eq!(output(log), "Value;Unit;Type;Overloaded\n225.8000;mV;DC;OL\n");
    }

    #[test]
    fn test_json_output() {
        let mut log = FrameLog::new(Vec::new(), OutputFormat::Json);
        log.process(&VOLTAGE_DC).unwrap().unwrap();
        let text = output(log);
        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["mode"], "Voltage");
        assert_eq!(value["unit"], "mV");
        assert_eq!(value["overload"], true);
        assert!((value["value"].as_f64().unwrap() - 225.8).abs() < 1e-9);
    }

    #[test]
    fn test_failures_are_counted_not_written() {
        let mut log = FrameLog::new(Vec::new(), OutputFormat::Plain);
        let mut bad_parity = VOLTAGE_DC;
        bad_parity[0] = 0xB4;

        assert!(matches!(
            log.process(&VOLTAGE_DC[..10]).unwrap(),
            Err(DecodeError::InvalidLength { .. })
        ));
        assert!(matches!(
            log.process(&bad_parity).unwrap(),
            Err(DecodeError::ParityMismatch { .. })
        ));
        log.process(&VOLTAGE_DC).unwrap().unwrap();

        let stats = log.stats().clone();
        assert_eq!(stats.decoded, 1);
        assert_eq!(stats.failed, 2);
        assert_eq!(stats.total(), 3);
        assert_eq!(stats.failures_by_kind.get("length"), Some(&1));
        assert_eq!(stats.failures_by_kind.get("parity"), Some(&1));
        assert_eq!(output(log), "225.8000 mV\n");
    }
}
