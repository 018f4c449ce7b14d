//! Fixed-offset header decoding.
//!
//! Every field lives at a fixed byte index in the header region. The indices
//! are a compatibility contract with the device firmware, so they are kept
//! together in [`offsets`] and never computed.

use crate::error::FormatError;
use crate::metadata::{BitDepth, Metadata, StartCondition, StopCondition};
use chrono::{NaiveDate, NaiveDateTime};

/// Header byte indices (0-based).
pub mod offsets {
    /// Low firmware byte.
    pub const FIRMWARE_MINOR: usize = 17;
    /// Sample rate in Hz.
    pub const SAMPLE_RATE: usize = 35;
    /// Nonzero when the body is run-length compressed.
    pub const COMPRESSION: usize = 36;
    /// Resolution code, with the top bit selecting 10-bit samples.
    pub const RESOLUTION: usize = 38;
    /// High firmware byte.
    pub const FIRMWARE_MAJOR: usize = 39;
    /// Start time: hour, minute, second, day, month, year-2000.
    pub const START_TIME: usize = 256;
    /// Stop time, same layout as the start time.
    pub const STOP_TIME: usize = 262;
    /// Start condition code.
    pub const START_CONDITION: usize = 268;
    /// Stop condition code.
    pub const STOP_CONDITION: usize = 275;
    /// Axis-count code.
    pub const AXES: usize = 289;
    /// Smallest buffer that holds every field above.
    pub const MIN_LEN: usize = AXES + 1;
}

/// Firmware versions up to and including this one use the legacy run encoding.
pub const LEGACY_FIRMWARE_MAX: u32 = 217;

/// Device firmware discriminant, `major * 255 + minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FirmwareId(pub u32);

impl FirmwareId {
    /// Combine the two firmware header bytes.
    pub fn from_bytes(major: u8, minor: u8) -> Self {
        FirmwareId(u32::from(major) * 255 + u32::from(minor))
    }

    /// Whether this firmware writes consecutive run markers that must be summed.
    pub fn is_legacy(self) -> bool {
        self.0 <= LEGACY_FIRMWARE_MAX
    }
}

/// Everything the header tells the rest of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Descriptive recording metadata.
    pub metadata: Metadata,
    /// Firmware discriminant used to select the decompressor.
    pub firmware: FirmwareId,
    /// Whether the body is run-length compressed.
    pub compressed: bool,
}

/// Decode the header region.
///
/// `header` must be the first `header_len` bytes of the file. Input shorter
/// than `header_len`, or too short to hold the last field at
/// [`offsets::AXES`], is rejected before any field is read.
pub fn parse_header(header: &[u8], header_len: usize) -> Result<HeaderInfo, FormatError> {
    let expected = header_len.max(offsets::MIN_LEN);
    if header.len() < expected {
        return Err(FormatError::HeaderTooShort {
            len: header.len(),
            expected,
        });
    }

    let (bit_depth, resolution_code) = split_resolution(header[offsets::RESOLUTION]);
    let resolution_g = match resolution_code {
        0 => 2,
        1 => 4,
        2 => 8,
        code => {
            return Err(FormatError::UnknownResolution {
                index: offsets::RESOLUTION,
                code,
            })
        }
    };

    let axis_count = match header[offsets::AXES] {
        0 => 3,
        1 => 1,
        code => {
            return Err(FormatError::UnknownAxisCode {
                index: offsets::AXES,
                code,
            })
        }
    };

    let sample_rate_hz = header[offsets::SAMPLE_RATE];
    if sample_rate_hz == 0 {
        return Err(FormatError::ZeroSampleRate {
            index: offsets::SAMPLE_RATE,
        });
    }

    let start_time = read_datetime(header, offsets::START_TIME, "start")?;
    let stop_time = read_datetime(header, offsets::STOP_TIME, "stop")?;

    let metadata = Metadata {
        bit_depth,
        resolution_g,
        sample_rate_hz,
        axis_count,
        start_time,
        stop_time,
        duration: stop_time - start_time,
        start_condition: start_condition(header[offsets::START_CONDITION])?,
        stop_condition: stop_condition(header[offsets::STOP_CONDITION])?,
    };

    let info = HeaderInfo {
        metadata,
        firmware: FirmwareId::from_bytes(
            header[offsets::FIRMWARE_MAJOR],
            header[offsets::FIRMWARE_MINOR],
        ),
        compressed: header[offsets::COMPRESSION] != 0,
    };
    tracing::debug!(
        hz = info.metadata.sample_rate_hz,
        resolution = info.metadata.resolution_g,
        axes = info.metadata.axis_count,
        firmware = info.firmware.0,
        compressed = info.compressed,
        "parsed header"
    );
    Ok(info)
}

fn split_resolution(byte: u8) -> (BitDepth, u8) {
    if byte < 128 {
        (BitDepth::Eight, byte)
    } else {
        (BitDepth::Ten, byte - 128)
    }
}

fn read_datetime(
    header: &[u8],
    index: usize,
    field: &'static str,
) -> Result<NaiveDateTime, FormatError> {
    let mut bytes = [0u8; 6];
    bytes.copy_from_slice(&header[index..index + 6]);
    let [hour, minute, second, day, month, year] = bytes;

    NaiveDate::from_ymd_opt(i32::from(year) + 2000, u32::from(month), u32::from(day))
        .and_then(|date| {
            date.and_hms_opt(u32::from(hour), u32::from(minute), u32::from(second))
        })
        .ok_or(FormatError::InvalidTimestamp {
            field,
            index,
            bytes,
        })
}

fn start_condition(code: u8) -> Result<StartCondition, FormatError> {
    match code {
        0 => Ok(StartCondition::Trigger),
        1 => Ok(StartCondition::Immediately),
        2 => Ok(StartCondition::SetTime),
        code => Err(FormatError::UnknownStartCondition {
            index: offsets::START_CONDITION,
            code,
        }),
    }
}

fn stop_condition(code: u8) -> Result<StopCondition, FormatError> {
    match code {
        0 => Ok(StopCondition::MemoryFull),
        3 => Ok(StopCondition::LowBattery),
        64 => Ok(StopCondition::Usb),
        128 => Ok(StopCondition::ProgrammedTime),
        code => Err(FormatError::UnknownStopCondition {
            index: offsets::STOP_CONDITION,
            code,
        }),
    }
}
