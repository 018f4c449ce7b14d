//! Custom error types for the decoder.
//!
//! Two layers are used, built with `thiserror`:
//!
//! - **`FormatError`**: raised by the individual pipeline stages (header, tail,
//!   body, cleaning, reconciliation). Stages only see bytes and rows, so these
//!   errors describe *what* is wrong with the data but not *which file* it came from.
//! - **`DecodeError`**: the error returned to callers. Every variant that concerns
//!   a file carries its path, and stage failures are wrapped in
//!   `DecodeError::Format` together with that path.
//!
//! All failures are terminal for the file being decoded; no partial result is
//! ever returned alongside an error.

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results using the decoder error type.
pub type AppResult<T> = std::result::Result<T, DecodeError>;

/// Errors raised while interpreting the bytes of a recording.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("file is {len} bytes, shorter than the {expected}-byte header")]
    HeaderTooShort { len: usize, expected: usize },

    #[error("unrecognised resolution code {code} at header byte {index}")]
    UnknownResolution { index: usize, code: u8 },

    #[error("unrecognised axis-count code {code} at header byte {index}")]
    UnknownAxisCode { index: usize, code: u8 },

    #[error("unrecognised start condition code {code} at header byte {index}")]
    UnknownStartCondition { index: usize, code: u8 },

    #[error("unrecognised stop condition code {code} at header byte {index}")]
    UnknownStopCondition { index: usize, code: u8 },

    #[error("{field} time bytes {bytes:?} at header byte {index} do not form a valid date-time")]
    InvalidTimestamp {
        field: &'static str,
        index: usize,
        bytes: [u8; 6],
    },

    #[error("sample rate byte at header byte {index} is zero")]
    ZeroSampleRate { index: usize },

    #[error("no {marker} found after byte {start}")]
    TailNotFound { marker: &'static str, start: usize },

    #[error("last tail marker at byte {found} lies inside the {header_len}-byte header")]
    TailInsideHeader { found: usize, header_len: usize },

    #[error("{0}-axis recordings are not supported, only 3 axes can be decoded")]
    UnsupportedAxisCount(u8),

    #[error("first sample contains sentinel value {sentinel} and has no predecessor to carry forward")]
    SentinelAtStart { sentinel: u8 },

    #[error("repeat counts ({counts}) do not match row count ({rows})")]
    RepeatLengthMismatch { rows: usize, counts: usize },

    #[error("decoded {actual} samples but header duration implies {expected} (tolerance {tolerance})")]
    SampleCountMismatch {
        actual: usize,
        expected: i64,
        tolerance: i64,
    },
}

/// Errors returned from the decode entry points.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Unsupported file extension '{extension}' for {}; expected one of: {allowed}", .path.display())]
    UnsupportedExtension {
        path: PathBuf,
        extension: String,
        allowed: String,
    },

    #[error("Invalid units '{0}'. Must be one of: g, ms-2, raw")]
    InvalidUnits(String),

    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },
}

impl DecodeError {
    /// Attach a file path to a stage-level failure.
    pub fn format(path: impl Into<PathBuf>, source: FormatError) -> Self {
        DecodeError::Format {
            path: path.into(),
            source,
        }
    }

    /// The stage-level cause, when this is a format failure.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            DecodeError::Format { source, .. } => Some(source),
            _ => None,
        }
    }
}
