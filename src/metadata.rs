//! Recording metadata decoded from the file header.

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Serialize, Serializer};
use std::fmt;

/// Sample bit depth reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 8-bit samples.
    Eight,
    /// 10-bit samples (stored truncated to a byte in the body).
    Ten,
}

impl BitDepth {
    /// Number of bits.
    pub fn bits(self) -> u8 {
        match self {
            BitDepth::Eight => 8,
            BitDepth::Ten => 10,
        }
    }
}

impl Serialize for BitDepth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

/// How the device was configured to begin recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StartCondition {
    /// Recording started on a trigger (e.g. device tap).
    Trigger,
    /// Recording started as soon as the device was unplugged.
    Immediately,
    /// Recording started at a programmed time.
    SetTime,
}

/// Why the device stopped recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopCondition {
    /// On-board memory filled up.
    MemoryFull,
    /// Battery dropped below the cut-off.
    LowBattery,
    /// Device was connected over USB.
    #[serde(rename = "USB")]
    Usb,
    /// Recording reached its programmed end time.
    ProgrammedTime,
}

impl fmt::Display for StartCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StartCondition::Trigger => "Trigger",
            StartCondition::Immediately => "Immediately",
            StartCondition::SetTime => "SetTime",
        };
        f.write_str(name)
    }
}

impl fmt::Display for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StopCondition::MemoryFull => "MemoryFull",
            StopCondition::LowBattery => "LowBattery",
            StopCondition::Usb => "USB",
            StopCondition::ProgrammedTime => "ProgrammedTime",
        };
        f.write_str(name)
    }
}

/// Descriptive metadata for one recording.
///
/// Serialises with the field names consumers of the decoded output expect
/// (`bitdepth`, `resolution`, `hz`, `axes`, `startTime`, `stopTime`,
/// `duration`, `stopCondition`, `startCondition`). `duration` is written as
/// whole seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    /// Sample bit depth.
    #[serde(rename = "bitdepth")]
    pub bit_depth: BitDepth,
    /// Full-scale range in g (2, 4 or 8).
    #[serde(rename = "resolution")]
    pub resolution_g: u8,
    /// Sample rate in Hz.
    #[serde(rename = "hz")]
    pub sample_rate_hz: u8,
    /// Number of axes (1 or 3).
    #[serde(rename = "axes")]
    pub axis_count: u8,
    /// Wall-clock time the recording started.
    #[serde(rename = "startTime")]
    pub start_time: NaiveDateTime,
    /// Wall-clock time the recording stopped.
    #[serde(rename = "stopTime")]
    pub stop_time: NaiveDateTime,
    /// `stop_time - start_time`. Negative if the header is malformed.
    #[serde(serialize_with = "serialize_seconds")]
    pub duration: TimeDelta,
    /// Configured start condition.
    #[serde(rename = "startCondition")]
    pub start_condition: StartCondition,
    /// Reason the recording ended.
    #[serde(rename = "stopCondition")]
    pub stop_condition: StopCondition,
}

fn serialize_seconds<S: Serializer>(
    duration: &TimeDelta,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_i64(duration.num_seconds())
}

impl Metadata {
    /// Number of samples implied by the declared duration and sample rate.
    pub fn expected_samples(&self) -> i64 {
        self.duration.num_seconds() * i64::from(self.sample_rate_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_metadata() -> Metadata {
        let start = NaiveDate::from_ymd_opt(2023, 5, 14)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap();
        let stop = start + TimeDelta::seconds(10);
        Metadata {
            bit_depth: BitDepth::Ten,
            resolution_g: 4,
            sample_rate_hz: 20,
            axis_count: 3,
            start_time: start,
            stop_time: stop,
            duration: stop - start,
            start_condition: StartCondition::Immediately,
            stop_condition: StopCondition::Usb,
        }
    }

    #[test]
    fn test_expected_samples() {
        assert_eq!(sample_metadata().expected_samples(), 200);
    }

    #[test]
    fn test_serialized_field_names() {
        let value = serde_json::to_value(sample_metadata()).unwrap();
        assert_eq!(value["bitdepth"], 10);
        assert_eq!(value["resolution"], 4);
        assert_eq!(value["hz"], 20);
        assert_eq!(value["axes"], 3);
        assert_eq!(value["duration"], 10);
        assert_eq!(value["startCondition"], "Immediately");
        assert_eq!(value["stopCondition"], "USB");
        assert_eq!(value["startTime"], "2023-05-14T09:30:00");
        assert_eq!(value["stopTime"], "2023-05-14T09:30:10");
    }
}
