//! Sentinel replacement by carry-forward.

use super::body::RawSample;
use crate::error::FormatError;

/// Byte values the device writes for invalid samples, in the order they are cleaned.
pub const SENTINELS: [u8; 2] = [254, 255];

/// Replace every row containing `sentinel` in any channel with the previous
/// (already cleaned) row.
///
/// The first row has no predecessor, so a sentinel there is an error.
pub fn carry_forward(rows: &[RawSample], sentinel: u8) -> Result<Vec<RawSample>, FormatError> {
    let mut out = Vec::with_capacity(rows.len());
    let mut last_good: Option<RawSample> = None;
    let mut replaced = 0usize;

    for row in rows {
        if row.contains(sentinel) {
            let previous = last_good.ok_or(FormatError::SentinelAtStart { sentinel })?;
            out.push(previous);
            replaced += 1;
        } else {
            out.push(*row);
            last_good = Some(*row);
        }
    }

    if replaced > 0 {
        tracing::debug!(sentinel, replaced, "carried forward sentinel rows");
    }
    Ok(out)
}

/// Apply [`carry_forward`] for each value in [`SENTINELS`], in order.
pub fn clean_sentinels(rows: &[RawSample]) -> Result<Vec<RawSample>, FormatError> {
    SENTINELS
        .iter()
        .try_fold(rows.to_vec(), |acc, &sentinel| carry_forward(&acc, sentinel))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(x: u8, y: u8, z: u8) -> RawSample {
        RawSample { x, y, z }
    }

    #[test]
    fn test_carry_forward_replaces_whole_row() {
        let rows = [row(1, 2, 3), row(4, 254, 6), row(254, 254, 254), row(7, 8, 9)];
        let out = carry_forward(&rows, 254).unwrap();
        assert_eq!(out, vec![row(1, 2, 3), row(1, 2, 3), row(1, 2, 3), row(7, 8, 9)]);
    }

    #[test]
    fn test_carry_forward_is_idempotent() {
        let rows = [row(1, 2, 3), row(255, 5, 6), row(7, 8, 9), row(7, 255, 9)];
        let once = carry_forward(&rows, 255).unwrap();
        let twice = carry_forward(&once, 255).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_sentinels_both_passes() {
        let rows = [row(10, 10, 10), row(254, 1, 1), row(2, 255, 2), row(3, 3, 3)];
        let out = clean_sentinels(&rows).unwrap();
        assert_eq!(
            out,
            vec![row(10, 10, 10), row(10, 10, 10), row(10, 10, 10), row(3, 3, 3)]
        );
        assert!(out.iter().all(|r| !r.contains(254) && !r.contains(255)));
    }

    #[test]
    fn test_first_row_sentinel_is_error() {
        let rows = [row(255, 1, 1), row(2, 2, 2)];
        assert_eq!(
            clean_sentinels(&rows),
            Err(FormatError::SentinelAtStart { sentinel: 255 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(clean_sentinels(&[]).unwrap().is_empty());
    }
}
