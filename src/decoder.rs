//! End-to-end decoding of one recording.
//!
//! [`Decoder`] runs every stage of [`crate::format`] over an in-memory buffer
//! and attaches the file path to any stage failure. A call either returns a
//! complete [`Recording`] or an error; nothing partial escapes. Decoders hold
//! no mutable state, so one instance can decode many files, from many threads.

use crate::config::DecodeSettings;
use crate::error::{AppResult, DecodeError, FormatError};
use crate::format::body::decode_body;
use crate::format::clean::clean_sentinels;
use crate::format::header::{offsets, parse_header};
use crate::format::reconcile::LengthCheck;
use crate::format::source::read_source;
use crate::format::tail::locate_tail;
use crate::format::units::{convert_samples, synthesize_timestamps};
use crate::format::{CompressionScheme, FileFormat, Units};
use crate::series::{Recording, SignalSeries};
use std::num::NonZeroU8;
use std::path::Path;
use tracing::info_span;

/// Decodes `.datx` / `.dat` recordings with fixed settings.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    settings: DecodeSettings,
}

impl Decoder {
    /// Create a decoder with the given settings.
    pub fn new(settings: DecodeSettings) -> Self {
        Self { settings }
    }

    /// Validate, read and decode the file at `path`.
    pub fn decode(&self, path: impl AsRef<Path>) -> AppResult<Recording> {
        let path = path.as_ref();
        let span = info_span!("decode", path = %path.display());
        let _enter = span.enter();

        let (bytes, format) = read_source(path)?;
        self.decode_bytes(&bytes, format, path)
    }

    /// Decode an in-memory copy of a file.
    ///
    /// `path` is only used to label errors and log events.
    pub fn decode_bytes(
        &self,
        bytes: &[u8],
        format: FileFormat,
        path: &Path,
    ) -> AppResult<Recording> {
        self.run_stages(bytes, format)
            .map_err(|source| DecodeError::format(path, source))
            .inspect(|recording| {
                tracing::info!(
                    path = %path.display(),
                    samples = recording.series.len(),
                    units = %recording.series.units(),
                    "decoded recording"
                );
            })
    }

    fn run_stages(&self, bytes: &[u8], format: FileFormat) -> Result<Recording, FormatError> {
        let header_len = format.header_len();
        let header = bytes.get(..header_len).ok_or(FormatError::HeaderTooShort {
            len: bytes.len(),
            expected: header_len,
        })?;
        let info = parse_header(header, header_len)?;
        let metadata = info.metadata;
        let sample_rate_hz =
            NonZeroU8::new(metadata.sample_rate_hz).ok_or(FormatError::ZeroSampleRate {
                index: offsets::SAMPLE_RATE,
            })?;

        let tail = locate_tail(bytes, header_len, format)?;
        let scheme = CompressionScheme::select(info.compressed, info.firmware);
        let samples = decode_body(&bytes[header_len..tail], metadata.axis_count, scheme)?;
        let samples = clean_sentinels(&samples)?;

        let check = LengthCheck {
            expected: metadata.expected_samples(),
            sample_rate_hz: metadata.sample_rate_hz,
            tolerance_secs: self.settings.tolerance_secs,
            exact: self.settings.exact_length,
        };
        let (samples, reconciliation) = check.apply(samples)?;

        let units = self.settings.units;
        let channels = convert_samples(&samples, units);
        let timestamps = synthesize_timestamps(metadata.start_time, sample_rate_hz, samples.len());
        let series = SignalSeries::from_channels(timestamps, channels, units);

        Ok(Recording {
            series,
            metadata,
            firmware: info.firmware,
            scheme,
            reconciliation,
        })
    }
}

/// Decode `path` with default settings and the given output units.
pub fn decode_file(path: impl AsRef<Path>, units: Units) -> AppResult<Recording> {
    Decoder::new(DecodeSettings::default().with_units(units)).decode(path)
}
