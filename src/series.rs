//! Decoded output: the uniformly sampled series and its metadata.

use crate::format::units::Channels;
use crate::format::{CompressionScheme, FirmwareId, Reconciliation, Units};
use crate::metadata::Metadata;
use chrono::NaiveDateTime;

/// Name and unit of one output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column name.
    pub name: &'static str,
    /// Unit annotation.
    pub unit: &'static str,
}

/// One row of a [`SignalSeries`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesRow {
    /// Synthesised sample time.
    pub timestamp: NaiveDateTime,
    /// X channel value.
    pub x: f64,
    /// Y channel value.
    pub y: f64,
    /// Z channel value.
    pub z: f64,
}

/// Column-oriented `(timestamp, x, y, z)` table.
///
/// All four columns always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSeries {
    timestamps: Vec<NaiveDateTime>,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
    units: Units,
}

impl SignalSeries {
    /// Assemble a series, returning `None` if the columns differ in length.
    pub fn new(
        timestamps: Vec<NaiveDateTime>,
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        units: Units,
    ) -> Option<Self> {
        let n = timestamps.len();
        if x.len() != n || y.len() != n || z.len() != n {
            return None;
        }
        Some(Self {
            timestamps,
            x,
            y,
            z,
            units,
        })
    }

    pub(crate) fn from_channels(
        timestamps: Vec<NaiveDateTime>,
        channels: Channels,
        units: Units,
    ) -> Self {
        debug_assert_eq!(timestamps.len(), channels.x.len());
        Self {
            timestamps,
            x: channels.x,
            y: channels.y,
            z: channels.z,
            units,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether the series holds no samples.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Units applied to the channel columns.
    pub fn units(&self) -> Units {
        self.units
    }

    /// Column names with their unit annotations.
    pub fn columns(&self) -> [ColumnSpec; 4] {
        let unit = self.units.label();
        [
            ColumnSpec {
                name: "timestamp",
                unit: "datetime",
            },
            ColumnSpec { name: "x", unit },
            ColumnSpec { name: "y", unit },
            ColumnSpec { name: "z", unit },
        ]
    }

    /// Timestamp column.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// X channel column.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y channel column.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Z channel column.
    pub fn z(&self) -> &[f64] {
        &self.z
    }

    /// Row at `index`, if in range.
    pub fn row(&self, index: usize) -> Option<SeriesRow> {
        Some(SeriesRow {
            timestamp: *self.timestamps.get(index)?,
            x: self.x[index],
            y: self.y[index],
            z: self.z[index],
        })
    }

    /// Iterate rows in time order.
    pub fn rows(&self) -> impl Iterator<Item = SeriesRow> + '_ {
        (0..self.len()).filter_map(|i| self.row(i))
    }
}

/// Result of decoding one file.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    /// The decoded time series.
    pub series: SignalSeries,
    /// Recording metadata from the header.
    pub metadata: Metadata,
    /// Firmware discriminant read from the header.
    pub firmware: FirmwareId,
    /// Body encoding that was decoded.
    pub scheme: CompressionScheme,
    /// How the sample count was reconciled with the header duration.
    pub reconciliation: Reconciliation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_columns_annotated_with_units() {
        let series = SignalSeries::new(
            vec![],
            vec![],
            vec![],
            vec![],
            Units::MetersPerSecondSquared,
        )
        .unwrap();
        let columns = series.columns();
        assert_eq!(
            columns[0],
            ColumnSpec {
                name: "timestamp",
                unit: "datetime"
            }
        );
        assert!(columns[1..].iter().all(|c| c.unit == "ms-2"));
        assert_eq!(
            columns.iter().map(|c| c.name).collect::<Vec<_>>(),
            vec!["timestamp", "x", "y", "z"]
        );
        assert!(series.is_empty());
    }

    #[test]
    fn test_mismatched_columns_rejected() {
        assert!(SignalSeries::new(vec![start()], vec![1.0], vec![], vec![1.0], Units::G).is_none());
    }

    #[test]
    fn test_rows() {
        let series = SignalSeries::new(
            vec![start(), start()],
            vec![1.0, 2.0],
            vec![3.0, 4.0],
            vec![5.0, 6.0],
            Units::G,
        )
        .unwrap();
        let rows: Vec<SeriesRow> = series.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].x, 2.0);
        assert_eq!(rows[1].z, 6.0);
        assert!(series.row(2).is_none());
    }
}
