//! # Accelerometer Log Decoder
//!
//! Decodes the binary `.datx` / `.dat` logs written by a wearable triaxial
//! accelerometer into a uniformly sampled `(timestamp, x, y, z)` series plus
//! descriptive metadata.
//!
//! ## Crate Structure
//!
//! - **`decoder`**: `Decoder` and `decode_file`, the end-to-end entry points.
//! - **`format`**: the individual decode stages (header, tail location, body
//!   decoding and decompression, sentinel cleaning, length reconciliation,
//!   unit conversion).
//! - **`series`**: the `SignalSeries` table and the `Recording` output record.
//! - **`metadata`**: the `Metadata` record decoded from the header.
//! - **`error`**: `DecodeError` and `FormatError`.
//! - **`config`**: figment-backed configuration loading.
//! - **`logging`**: tracing subscriber initialisation for binaries.
//! - **`validation`**: path and extension checks.
//!
//! ## Example
//!
//! ```no_run
//! use accel_decode::{decode_file, Units};
//!
//! let recording = decode_file("subject01.datx", Units::G)?;
//! println!("{} samples at {} Hz", recording.series.len(), recording.metadata.sample_rate_hz);
//! # Ok::<(), accel_decode::DecodeError>(())
//! ```

pub mod config;
pub mod decoder;
pub mod error;
pub mod format;
pub mod logging;
pub mod metadata;
pub mod series;
pub mod validation;

pub use decoder::{decode_file, Decoder};
pub use error::{AppResult, DecodeError, FormatError};
pub use format::Units;
pub use metadata::Metadata;
pub use series::{Recording, SignalSeries};
