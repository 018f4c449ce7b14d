//! Row repetition.

use crate::error::FormatError;

/// Repeat each row `counts[i]` times, preserving order.
///
/// Rows with a count of zero are dropped. `rows` and `counts` must have the
/// same length.
pub fn expand_rows<T: Clone>(rows: &[T], counts: &[usize]) -> Result<Vec<T>, FormatError> {
    if rows.len() != counts.len() {
        return Err(FormatError::RepeatLengthMismatch {
            rows: rows.len(),
            counts: counts.len(),
        });
    }

    let total = counts.iter().sum();
    let mut out = Vec::with_capacity(total);
    for (row, &count) in rows.iter().zip(counts) {
        out.extend(std::iter::repeat(row).take(count).cloned());
    }
    Ok(out)
}
