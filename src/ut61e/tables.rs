//! Mode and Range Lookup Tables
//!
//! Unit strings and scale divisors for each measurement function of the UT61E,
//! indexed by the range (unit index) reported in byte 0 of the telegram.

use std::fmt;

use serde::Serialize;

/// Measurement function selected on the rotary switch.
///
/// The discriminant is the function nibble sent in byte 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum Mode {
    CurrentA = 0x0,
    Diode = 0x1,
    Frequency = 0x2,
    Resistance = 0x3,
    Continuity = 0x5,
    Capacitance = 0x6,
    Duty = 0x8,
    Voltage = 0xB,
    CurrentMicroA = 0xD,
    CurrentMilliA = 0xF,
}

impl Mode {
    /// All known modes in nibble order.
    pub const ALL: [Mode; 10] = [
        Mode::CurrentA,
        Mode::Diode,
        Mode::Frequency,
        Mode::Resistance,
        Mode::Continuity,
        Mode::Capacitance,
        Mode::Duty,
        Mode::Voltage,
        Mode::CurrentMicroA,
        Mode::CurrentMilliA,
    ];

    /// Maps a function nibble to its mode; 0x4, 0x7, 0x9, 0xA, 0xC and 0xE are unused.
    pub fn from_nibble(nibble: u8) -> Option<Mode> {
        match nibble {
            0x0 => Some(Mode::CurrentA),
            0x1 => Some(Mode::Diode),
            0x2 => Some(Mode::Frequency),
            0x3 => Some(Mode::Resistance),
            0x5 => Some(Mode::Continuity),
            0x6 => Some(Mode::Capacitance),
            0x8 => Some(Mode::Duty),
            0xB => Some(Mode::Voltage),
            0xD => Some(Mode::CurrentMicroA),
            0xF => Some(Mode::CurrentMilliA),
            _ => None,
        }
    }

    pub fn nibble(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::CurrentA => "Current (A)",
            Mode::Diode => "Diode",
            Mode::Frequency => "Frequency",
            Mode::Resistance => "Resistance",
            Mode::Continuity => "Continuity",
            Mode::Capacitance => "Capacitance",
            Mode::Duty => "Duty cycle",
            Mode::Voltage => "Voltage",
            Mode::CurrentMicroA => "Current (µA)",
            Mode::CurrentMilliA => "Current (mA)",
        }
    }

    /// Unit strings for each range of this mode.
    pub fn units(self) -> &'static [&'static str] {
        match self {
            Mode::Voltage => VOLTAGE_UNITS,
            Mode::CurrentA => CURRENT_A_UNITS,
            Mode::CurrentMilliA => CURRENT_MA_UNITS,
            Mode::CurrentMicroA => CURRENT_UA_UNITS,
            Mode::Resistance => RESISTANCE_UNITS,
            Mode::Frequency => FREQUENCY_UNITS,
            Mode::Capacitance => CAPACITANCE_UNITS,
            Mode::Diode => DIODE_UNITS,
            Mode::Continuity => CONTINUITY_UNITS,
            Mode::Duty => DUTY_UNITS,
        }
    }

    /// Scale divisors for each range of this mode.
    pub fn scales(self) -> &'static [u32] {
        match self {
            Mode::Voltage => VOLTAGE_SCALES,
            Mode::CurrentA => CURRENT_A_SCALES,
            Mode::CurrentMilliA => CURRENT_MA_SCALES,
            Mode::CurrentMicroA => CURRENT_UA_SCALES,
            Mode::Resistance => RESISTANCE_SCALES,
            Mode::Frequency => FREQUENCY_SCALES,
            Mode::Capacitance => CAPACITANCE_SCALES,
            Mode::Diode => DIODE_SCALES,
            Mode::Continuity => CONTINUITY_SCALES,
            Mode::Duty => DUTY_SCALES,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const VOLTAGE_UNITS: &[&str] = &["V", "V", "V", "V", "mV"];
const CURRENT_A_UNITS: &[&str] = &["A"];
const CURRENT_MA_UNITS: &[&str] = &["mA", "mA"];
const CURRENT_UA_UNITS: &[&str] = &["µA", "µA"];
const RESISTANCE_UNITS: &[&str] = &["Ω", "kΩ", "kΩ", "kΩ", "MΩ", "MΩ", "MΩ"];
// Range 2 of the frequency function has no unit on the meter's display.
const FREQUENCY_UNITS: &[&str] = &["Hz", "Hz", "", "kHz", "kHz", "MHz", "MHz", "MHz"];
const CAPACITANCE_UNITS: &[&str] = &["nF", "nF", "µF", "µF", "µF", "mF", "mF", "mF"];
const DIODE_UNITS: &[&str] = &["V"];
const CONTINUITY_UNITS: &[&str] = &["Ω"];
const DUTY_UNITS: &[&str] = &["%", "%"];

const VOLTAGE_SCALES: &[u32] = &[10000, 1000, 100, 10, 100];
const CURRENT_A_SCALES: &[u32] = &[10000, 1000, 100, 10, 100];
const CURRENT_MA_SCALES: &[u32] = &[1000, 100];
const CURRENT_UA_SCALES: &[u32] = &[100, 10];
const RESISTANCE_SCALES: &[u32] = &[100, 10000, 1000, 100, 10000, 1000, 100];
const FREQUENCY_SCALES: &[u32] = &[100, 10, 1, 1000, 100, 10000, 1000, 100];
const CAPACITANCE_SCALES: &[u32] = &[1000, 100, 10000, 1000, 100, 10000, 1000, 100];
const DIODE_SCALES: &[u32] = &[10000];
const CONTINUITY_SCALES: &[u32] = &[100];
const DUTY_SCALES: &[u32] = &[10, 10];

/// Unit string for `mode` at `unit_index`, if the range exists.
pub fn lookup_unit(mode: Mode, unit_index: u8) -> Option<&'static str> {
    mode.units().get(usize::from(unit_index)).copied()
}

/// Scale divisor for `mode` at `unit_index`, if the range exists.
pub fn lookup_scale(mode: Mode, unit_index: u8) -> Option<u32> {
    mode.scales().get(usize::from(unit_index)).copied()
}

/// Unit string and divisor together; `None` unless both tables cover the index.
pub fn lookup_range(mode: Mode, unit_index: u8) -> Option<(&'static str, u32)> {
    Some((lookup_unit(mode, unit_index)?, lookup_scale(mode, unit_index)?))
}
