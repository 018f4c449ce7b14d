//! Whole-file byte source and format variant selection.

use crate::error::{AppResult, DecodeError};
use crate::validation::{file_extension, validate_input};
use std::path::Path;

/// File extensions the decoder accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["datx", "dat"];

/// On-disk layout variant, chosen purely from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.datx`: 1024-byte header, body terminated by an ASCII `tail` marker.
    Datx,
    /// `.dat`: 1023-byte header, body terminated by a structural footer signature.
    Dat,
}

impl FileFormat {
    /// Select the variant for an extension token (case-insensitive, no leading dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "datx" => Some(FileFormat::Datx),
            "dat" => Some(FileFormat::Dat),
            _ => None,
        }
    }

    /// Length of the fixed header in bytes.
    pub fn header_len(self) -> usize {
        match self {
            FileFormat::Datx => 1024,
            FileFormat::Dat => 1023,
        }
    }
}

/// Validate `path` and read the whole file in one call.
///
/// Returns the bytes together with the layout variant implied by the extension.
pub fn read_source(path: &Path) -> AppResult<(Vec<u8>, FileFormat)> {
    validate_input(path, &SUPPORTED_EXTENSIONS)?;

    let format = file_extension(path)
        .as_deref()
        .and_then(FileFormat::from_extension)
        .ok_or_else(|| DecodeError::UnsupportedExtension {
            path: path.to_path_buf(),
            extension: file_extension(path).unwrap_or_default(),
            allowed: SUPPORTED_EXTENSIONS.join(", "),
        })?;

    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(bytes = bytes.len(), ?format, "read recording");

    Ok((bytes, format))
}
