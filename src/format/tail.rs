//! Locating the end of the data body.
//!
//! Neither layout stores the body length, so the end is found heuristically:
//!
//! - `.datx` files end with a trailer introduced by the ASCII bytes `tail`.
//!   The marker may also occur by chance inside sample data, so only the
//!   **last** occurrence in the file counts.
//! - `.dat` files have no marker. Their footer starts with an 8-byte signature
//!   `[0, 0, n, 0, 0, n, n, 0]` (`n` nonzero), and the **first** such window
//!   after the header is taken as the end of the body.

use super::source::FileFormat;
use crate::error::FormatError;

/// ASCII trailer marker used by `.datx` files.
pub const TAIL_MARKER: &[u8; 4] = b"tail";

const FOOTER_WINDOW: usize = 8;

/// Return the exclusive end index of the body within `bytes`.
pub fn locate_tail(
    bytes: &[u8],
    header_len: usize,
    format: FileFormat,
) -> Result<usize, FormatError> {
    let end = match format {
        FileFormat::Datx => find_last_marker(bytes, header_len)?,
        FileFormat::Dat => find_footer_signature(bytes, header_len)?,
    };
    tracing::debug!(end, body_len = end - header_len, ?format, "located tail");
    Ok(end)
}

fn find_last_marker(bytes: &[u8], header_len: usize) -> Result<usize, FormatError> {
    let found = bytes
        .windows(TAIL_MARKER.len())
        .rposition(|window| window == TAIL_MARKER)
        .ok_or(FormatError::TailNotFound {
            marker: "'tail' marker",
            start: 0,
        })?;

    if found < header_len {
        return Err(FormatError::TailInsideHeader { found, header_len });
    }
    Ok(found)
}

fn find_footer_signature(bytes: &[u8], header_len: usize) -> Result<usize, FormatError> {
    let not_found = FormatError::TailNotFound {
        marker: "footer signature",
        start: header_len,
    };
    let body = bytes.get(header_len..).ok_or(not_found.clone())?;

    body.windows(FOOTER_WINDOW)
        .position(is_footer_signature)
        .map(|offset| header_len + offset)
        .ok_or(not_found)
}

fn is_footer_signature(window: &[u8]) -> bool {
    matches!(
        window,
        [0, 0, a, 0, 0, b, c, 0] if *a != 0 && *b != 0 && *c != 0
    )
}
