//! Run-length decompression of body rows.
//!
//! A row `(0, 0, n)` is a run marker: the data row before it is repeated
//! `n + 1` times and the marker itself is dropped. Detection is purely by
//! value, so a genuine sample with `x == 0 && y == 0` is read as a marker.
//!
//! Two firmware generations encode runs differently:
//!
//! - [`decompress_current`]: each marker stands alone and applies to the row
//!   directly before it, whatever that row is.
//! - [`decompress_legacy`]: markers can be written back to back. A cluster of
//!   adjacent markers is summed into a single count applied to the data row
//!   before the whole cluster.

use super::body::RawSample;
use super::expand::expand_rows;
use crate::error::FormatError;

fn is_marker(row: &RawSample) -> bool {
    row.x == 0 && row.y == 0
}

fn run_length(marker: &RawSample) -> usize {
    usize::from(marker.z) + 1
}

/// Expand runs written by current firmware.
///
/// Markers are first zeroed, then each marker sets the count of the row
/// before it. Back-to-back markers therefore make the earlier marker row
/// itself a repeated row.
pub fn decompress_current(rows: &[RawSample]) -> Result<Vec<RawSample>, FormatError> {
    let mut counts = vec![1usize; rows.len()];

    for (i, row) in rows.iter().enumerate() {
        if is_marker(row) {
            counts[i] = 0;
        }
    }
    for (i, row) in rows.iter().enumerate() {
        if !is_marker(row) {
            continue;
        }
        match i.checked_sub(1) {
            Some(prev) => counts[prev] = run_length(row),
            None => tracing::warn!("run marker at start of body has no preceding row, dropped"),
        }
    }

    expand_rows(rows, &counts)
}

/// Expand runs written by legacy firmware.
pub fn decompress_legacy(rows: &[RawSample]) -> Result<Vec<RawSample>, FormatError> {
    let mut counts = vec![1usize; rows.len()];

    let mut i = 0;
    while i < rows.len() {
        if !is_marker(&rows[i]) {
            i += 1;
            continue;
        }

        let start = i;
        let mut total = 0usize;
        while i < rows.len() && is_marker(&rows[i]) {
            total += run_length(&rows[i]);
            counts[i] = 0;
            i += 1;
        }

        match start.checked_sub(1) {
            Some(prev) => counts[prev] = total,
            None => tracing::warn!(
                markers = i - start,
                "run markers at start of body have no preceding row, dropped"
            ),
        }
    }

    expand_rows(rows, &counts)
}
