//! Measurement data types.

use crate::error::EvalError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Speed of light in m/s.
///
/// Dividing it by a wavelength in nm yields a frequency in GHz.
pub const SPEED_OF_LIGHT: f64 = 299792458.0;

/// Raw row of a log file, as written by the instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// Elapsed time in ms.
    pub time_ms: f64,
    /// Wavelength of the primary channel in nm.
    pub wavelength_nm: f64,
}

impl Row {
    pub fn new(time_ms: f64, wavelength_nm: f64) -> Self {
        Self {
            time_ms,
            wavelength_nm,
        }
    }
}

/// Single measurement after cleaning and unit conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Time in s.
    pub time: f64,
    /// Wavelength in nm.
    pub wavelength: f64,
    /// Frequency in GHz, always derived from the wavelength.
    pub frequency: f64,
}

impl Sample {
    /// Convert a raw row, shifting its time by `time_offset` seconds.
    pub fn from_row(row: Row, time_offset: f64) -> Self {
        Self {
            time: row.time_ms / 1000.0 + time_offset,
            wavelength: row.wavelength_nm,
            frequency: SPEED_OF_LIGHT / row.wavelength_nm,
        }
    }
}

/// Quantity selected for statistics and stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Wavelength,
    Frequency,
}

impl Mode {
    pub fn unit(self) -> &'static str {
        match self {
            Mode::Wavelength => "nm",
            Mode::Frequency => "GHz",
        }
    }
}

impl FromStr for Mode {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wavelength" => Ok(Mode::Wavelength),
            "frequency" => Ok(Mode::Frequency),
            other => Err(EvalError::InvalidArgument(format!(
                "mode must be \"wavelength\" or \"frequency\", but is {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Wavelength => write!(f, "wavelength"),
            Mode::Frequency => write!(f, "frequency"),
        }
    }
}

/// Text encoding of a log file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1, every byte maps to the code point of the same value.
    Latin1,
}

impl Encoding {
    /// Decode `bytes`, returning `None` if they are not valid in this encoding.
    pub fn decode(self, bytes: Vec<u8>) -> Option<String> {
        match self {
            Encoding::Utf8 => {
                let text = String::from_utf8(bytes).ok()?;
                match text.strip_prefix('\u{feff}') {
                    Some(stripped) => Some(stripped.to_owned()),
                    None => Some(text),
                }
            }
            Encoding::Latin1 => Some(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            _ => Err(EvalError::InvalidArgument(format!(
                "unsupported encoding {s:?}"
            ))),
        }
    }
}

impl TryFrom<String> for Encoding {
    type Error = EvalError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Encoding> for String {
    fn from(encoding: Encoding) -> Self {
        encoding.to_string()
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Latin1 => write!(f, "latin-1"),
        }
    }
}
