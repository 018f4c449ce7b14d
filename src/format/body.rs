//! Body decoding: reshaping bytes into rows and dispatching decompression.

use super::decompress::{decompress_current, decompress_legacy};
use super::header::FirmwareId;
use crate::error::FormatError;

/// Only triaxial recordings can be decoded.
pub const SUPPORTED_AXES: u8 = 3;

/// One undecoded triaxial observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawSample {
    /// X channel byte.
    pub x: u8,
    /// Y channel byte.
    pub y: u8,
    /// Z channel byte.
    pub z: u8,
}

impl RawSample {
    /// Whether any channel equals `value`.
    pub fn contains(&self, value: u8) -> bool {
        self.x == value || self.y == value || self.z == value
    }
}

/// How the body rows are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionScheme {
    /// Rows are stored as-is.
    None,
    /// Independent run markers (firmware above the legacy cut-off).
    Current,
    /// Clustered run markers (legacy firmware).
    Legacy,
}

impl CompressionScheme {
    /// Choose the scheme from the header compression flag and firmware.
    pub fn select(compressed: bool, firmware: FirmwareId) -> Self {
        match (compressed, firmware.is_legacy()) {
            (false, _) => CompressionScheme::None,
            (true, false) => CompressionScheme::Current,
            (true, true) => CompressionScheme::Legacy,
        }
    }
}

/// Decode the body bytes into raw samples.
///
/// `axis_count` comes from the header and is checked before any bytes are
/// touched. A trailing partial row is dropped with a warning.
pub fn decode_body(
    body: &[u8],
    axis_count: u8,
    scheme: CompressionScheme,
) -> Result<Vec<RawSample>, FormatError> {
    if axis_count != SUPPORTED_AXES {
        return Err(FormatError::UnsupportedAxisCount(axis_count));
    }

    let chunks = body.chunks_exact(3);
    let remainder = chunks.remainder().len();
    if remainder != 0 {
        tracing::warn!(
            body_len = body.len(),
            dropped = remainder,
            "body length is not a multiple of 3, trailing bytes dropped"
        );
    }

    let rows: Vec<RawSample> = chunks
        .map(|c| RawSample {
            x: c[0],
            y: c[1],
            z: c[2],
        })
        .collect();
    tracing::debug!(rows = rows.len(), ?scheme, "reshaped body");

    match scheme {
        CompressionScheme::None => Ok(rows),
        CompressionScheme::Current => decompress_current(&rows),
        CompressionScheme::Legacy => decompress_legacy(&rows),
    }
}
