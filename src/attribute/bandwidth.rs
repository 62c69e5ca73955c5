use std::fmt::Display;

use crate::PlaylistError;

const BIT_UNITS: [&str; 5] = ["b", "Kb", "Mb", "Gb", "Tb"];
const BIT_UNITS_LONG: [&str; 5] = ["bits", "Kilobits", "Megabits", "Gigabits", "Terabits"];
const BYTE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const BYTE_UNITS_LONG: [&str; 5] = ["bytes", "Kilobytes", "Megabytes", "Gigabytes", "Terabytes"];

/// A bandwidth value in bits per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bandwidth {
    bps: u64,
}

impl Bandwidth {
    pub fn new(bps: u64) -> Self {
        Self { bps }
    }

    /// Parses a non-negative integer bits-per-second value.
    pub fn parse(raw: &str) -> Result<Self, PlaylistError> {
        let bps = raw
            .trim()
            .parse()
            .map_err(|_| PlaylistError::MalformedScalar {
                attribute: "BANDWIDTH",
                value: raw.to_owned(),
            })?;

        Ok(Self { bps })
    }

    pub fn bps(&self) -> u64 {
        self.bps
    }

    /// Human-readable bit-unit rendering, decimal system (base 1000).
    pub fn to_bits(&self, long_unit_names: bool) -> (f64, &'static str) {
        let units = if long_unit_names {
            BIT_UNITS_LONG
        } else {
            BIT_UNITS
        };
        convert(self.bps as f64, &units, 1000.0)
    }

    /// Human-readable byte-unit rendering, binary system (base 1024).
    pub fn to_bytes(&self, long_unit_names: bool) -> (f64, &'static str) {
        let units = if long_unit_names {
            BYTE_UNITS_LONG
        } else {
            BYTE_UNITS
        };
        convert(self.bps as f64 / 8.0, &units, 1024.0)
    }

    pub fn to_m3u8(&self) -> String {
        format!("BANDWIDTH={}", self.bps)
    }
}

/// Steps through the unit table while the running value still exceeds the
/// base; once it no longer does, the current unit is the answer. The last
/// unit in the table is used for anything larger.
fn convert(mut current: f64, units: &[&'static str; 5], base: f64) -> (f64, &'static str) {
    let mut chosen = units[0];

    for unit in units {
        chosen = unit;
        if current > base {
            current /= base;
        } else {
            break;
        }
    }

    (current, chosen)
}

impl Display for Bandwidth {
    /// Renders the byte-unit form rounded to two decimals, e.g. `183.11 KBps`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (size, unit) = self.to_bytes(false);
        write!(f, "{} {}ps", (size * 100.0).round() / 100.0, unit)
    }
}
