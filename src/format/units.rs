//! Unit conversion and timestamp synthesis.

use super::body::RawSample;
use crate::error::DecodeError;
use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;
use std::str::FromStr;

/// Raw byte value corresponding to 0 g.
pub const ZERO_G_OFFSET: f64 = 127.0;
/// Raw counts per g.
pub const COUNTS_PER_G: f64 = 63.0;
/// Standard gravity used for the g to m/s² conversion.
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Output units for the three acceleration channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    /// Multiples of standard gravity.
    #[default]
    #[serde(rename = "g")]
    G,
    /// Metres per second squared.
    #[serde(rename = "ms-2")]
    MetersPerSecondSquared,
    /// Untouched byte values.
    #[serde(rename = "raw")]
    Raw,
}

impl Units {
    /// Label recorded alongside the converted channels.
    pub fn label(self) -> &'static str {
        match self {
            Units::G => "g",
            Units::MetersPerSecondSquared => "ms-2",
            Units::Raw => "raw",
        }
    }

    /// Convert one raw channel byte.
    pub fn convert(self, raw: u8) -> f64 {
        let g = (f64::from(raw) - ZERO_G_OFFSET) / COUNTS_PER_G;
        match self {
            Units::Raw => f64::from(raw),
            Units::G => g,
            Units::MetersPerSecondSquared => g * STANDARD_GRAVITY,
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Units {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" => Ok(Units::G),
            "ms-2" => Ok(Units::MetersPerSecondSquared),
            "raw" => Ok(Units::Raw),
            _ => Err(DecodeError::InvalidUnits(s.to_string())),
        }
    }
}

/// Converted channel columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Channels {
    /// X channel.
    pub x: Vec<f64>,
    /// Y channel.
    pub y: Vec<f64>,
    /// Z channel.
    pub z: Vec<f64>,
}

/// Convert every sample to `units`, split into per-channel columns.
pub fn convert_samples(samples: &[RawSample], units: Units) -> Channels {
    let mut channels = Channels {
        x: Vec::with_capacity(samples.len()),
        y: Vec::with_capacity(samples.len()),
        z: Vec::with_capacity(samples.len()),
    };
    for s in samples {
        channels.x.push(units.convert(s.x));
        channels.y.push(units.convert(s.y));
        channels.z.push(units.convert(s.z));
    }
    channels
}

/// Timestamps for `count` samples.
///
/// Sample `i` (1-based) is stamped `start + i / sample_rate_hz` seconds, so the
/// first retained sample falls one period after the start time.
pub fn synthesize_timestamps(
    start: NaiveDateTime,
    sample_rate_hz: NonZeroU8,
    count: usize,
) -> Vec<NaiveDateTime> {
    let hz = i64::from(sample_rate_hz.get());
    (1..=count as i64)
        .map(|i| start + TimeDelta::nanoseconds(i * 1_000_000_000 / hz))
        .collect()
}
