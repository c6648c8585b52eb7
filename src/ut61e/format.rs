//! Text renderings of a [`Measurement`].
//!
//! Values always carry four decimals with `.` as separator, independent of locale.

use std::fmt;

use crate::constants::{CSV_HEADER, CSV_SEPARATOR};
use crate::ut61e::decoder::Measurement;

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} {}", self.value, self.unit)
    }
}

impl Measurement {
    /// Active coupling/mode tags in the order DC, AC, Freq., Duty.
    ///
    /// AC renders as "AC". Older capture tools printed "DC" for both couplings.
    pub fn type_tags(&self) -> String {
        let mut tags = String::new();
        if self.dc {
            tags.push_str("DC");
        }
        if self.ac {
            tags.push_str("AC");
        }
        if self.frequency {
            tags.push_str("Freq.");
        }
        if self.duty {
            tags.push_str("Duty");
        }
        tags
    }

    /// "OL" and/or "UL" for out-of-range readings.
    pub fn status_tags(&self) -> String {
        let mut tags = String::new();
        if self.overload {
            tags.push_str("OL");
        }
        if self.underload {
            tags.push_str("UL");
        }
        tags
    }

    /// One line matching [`csv_header`]: `value;unit;type;status`.
    pub fn to_csv_line(&self) -> String {
        format!(
            "{:.4}{sep}{}{sep}{}{sep}{}",
            self.value,
            self.unit,
            self.type_tags(),
            self.status_tags(),
            sep = CSV_SEPARATOR
        )
    }
}

/// Header line for [`Measurement::to_csv_line`] output.
pub fn csv_header() -> &'static str {
    CSV_HEADER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ut61e::tables::Mode;

    fn measurement() -> Measurement {
        Measurement {
            value: 225.8,
            mode: Mode::Voltage,
            unit: "mV",
            unit_index: 4,
            negative: false,
            overload: false,
            underload: false,
            frequency: false,
            duty: false,
            ac: false,
            dc: false,
            auto_range: false,
            low_battery: false,
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(measurement().to_string(), "225.8000 mV");
    }

    #[test]
    fn test_display_empty_unit() {
        let m = Measurement {
            value: 12.0,
            mode: Mode::Frequency,
            unit: "",
            unit_index: 2,
            ..measurement()
        };
        assert_eq!(m.to_string(), "12.0000 ");
    }

    #[test]
    fn test_csv_tags() {
        let m = Measurement {
            dc: true,
            overload: true,
            ..measurement()
        };
        assert_eq!(m.to_csv_line(), "225.8000;mV;DC;OL");

        let m = Measurement {
            ac: true,
            frequency: true,
            duty: true,
            underload: true,
            overload: true,
            ..measurement()
        };
        assert_eq!(m.to_csv_line(), "225.8000;mV;ACFreq.Duty;OLUL");
    }

    #[test]
    fn test_csv_no_tags() {
        assert_eq!(measurement().to_csv_line(), "225.8000;mV;;");
    }

    #[test]
    fn test_header() {
        assert_eq!(csv_header(), "Value;Unit;Type;Overloaded");
    }
}
