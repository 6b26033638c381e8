//! Raw motion samples keyed by `"<Segment> <axis>"`.
//!
//! A segment position export is a table with one column per segment axis
//! (`"Left Hand x"`, `"Left Hand y"`, ...) and one row per frame. Recording
//! software usually puts a few metadata rows (units, labels) between the header
//! and the first sample; those are dropped while normalizing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::ModelError;

/// Column key for a segment axis, e.g. `"Left Hand x"`.
pub fn segment_axis_key(segment: &str, axis: Axis) -> String {
    format!("{segment} {axis}")
}

/// Split a column key into segment name and axis, if it follows the
/// `"<Segment> <axis>"` convention.
pub fn split_segment_axis_key(key: &str) -> Option<(&str, Axis)> {
    let (segment, axis) = key.rsplit_once(' ')?;
    let axis = axis.parse().ok()?;
    if segment.is_empty() {
        return None;
    }
    Some((segment, axis))
}

/// A loosely typed table as handed over by a loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse a delimited text export. The first non-empty line is the header.
    ///
    /// Cells are trimmed; rows shorter than the header are padded with empty
    /// cells and extra trailing cells are ignored.
    pub fn parse_delimited(text: &str, delimiter: char) -> Result<Self, ModelError> {
        let mut lines = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty());

        let header = lines.next().ok_or(ModelError::EmptyTable)?;
        let columns: Vec<String> = header
            .split(delimiter)
            .map(|c| c.trim().to_string())
            .collect();

        let width = columns.len();
        let rows = lines
            .map(|line| {
                let mut row: Vec<String> = line
                    .split(delimiter)
                    .take(width)
                    .map(|c| c.trim().to_string())
                    .collect();
                row.resize(width, String::new());
                row
            })
            .collect();

        Ok(Self { columns, rows })
    }
}

/// Immutable per-frame samples for every segment axis in a recording.
///
/// All series share one length, the recording's frame count.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionFrameStore {
    columns: Vec<String>,
    series: HashMap<String, Vec<f64>>,
    frame_count: usize,
}

impl MotionFrameStore {
    /// Normalize a raw table.
    ///
    /// The first `skip_rows` rows are dropped unconditionally; any further
    /// leading rows that are mostly non-numeric (unit or label rows) are
    /// dropped too. Sampling starts at the first mostly-numeric row, and from
    /// there every cell must parse as a number.
    pub fn from_table(table: &RawTable, skip_rows: usize) -> Result<Self, ModelError> {
        if table.columns.is_empty() {
            return Err(ModelError::EmptyTable);
        }

        let mut rows = table.rows.iter().skip(skip_rows).peekable();
        let mut dropped = 0usize;
        while rows.next_if(|row| !is_sample_row(row)).is_some() {
            dropped += 1;
        }
        if dropped > 0 {
            tracing::warn!(dropped, "Skipped leading non-sample rows");
        }
        let data: Vec<&Vec<String>> = rows.collect();

        let mut columns = Vec::with_capacity(table.columns.len());
        let mut series = HashMap::with_capacity(table.columns.len());
        for (c, column) in table.columns.iter().enumerate() {
            let mut samples = Vec::with_capacity(data.len());
            for (r, row) in data.iter().enumerate() {
                let cell = row.get(c).map(String::as_str).unwrap_or("");
                let value = parse_sample(cell).ok_or_else(|| ModelError::MalformedSample {
                    column: column.clone(),
                    row: r,
                    value: cell.to_string(),
                })?;
                samples.push(value);
            }
            if series.insert(column.clone(), samples).is_some() {
                return Err(ModelError::DuplicateColumn {
                    key: column.clone(),
                });
            }
            columns.push(column.clone());
        }

        tracing::debug!(
            columns = columns.len(),
            frames = data.len(),
            skipped = skip_rows + dropped,
            "Normalized motion table"
        );

        Ok(Self {
            columns,
            series,
            frame_count: data.len(),
        })
    }

    /// Build a store from already-numeric series. All series must have the
    /// same length.
    pub fn from_series<I, K>(series: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = (K, Vec<f64>)>,
        K: Into<String>,
    {
        let mut columns = Vec::new();
        let mut map = HashMap::new();
        let mut frame_count = None;

        for (key, samples) in series {
            let key = key.into();
            let expected = *frame_count.get_or_insert(samples.len());
            if samples.len() != expected {
                return Err(ModelError::RaggedSeries {
                    key,
                    expected,
                    found: samples.len(),
                });
            }
            if map.contains_key(&key) {
                return Err(ModelError::DuplicateColumn { key });
            }
            columns.push(key.clone());
            map.insert(key, samples);
        }

        if columns.is_empty() {
            return Err(ModelError::EmptyTable);
        }

        Ok(Self {
            columns,
            series: map,
            frame_count: frame_count.unwrap_or(0),
        })
    }

    /// Number of frames (`F`) in the recording.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Column keys in table order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Raw series by column key.
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.series.get(key).map(Vec::as_slice)
    }

    /// Samples of one segment along one axis.
    pub fn series(&self, segment: &str, axis: Axis) -> Result<&[f64], ModelError> {
        self.get(&segment_axis_key(segment, axis))
            .ok_or_else(|| ModelError::unknown_segment_axis(segment, axis))
    }

    pub fn has_segment_axis(&self, segment: &str, axis: Axis) -> bool {
        self.series.contains_key(&segment_axis_key(segment, axis))
    }

    /// Segment names with at least one axis column, in column order.
    pub fn segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = Vec::new();
        for (segment, _) in self
            .columns
            .iter()
            .filter_map(|key| split_segment_axis_key(key))
        {
            if !segments.contains(&segment) {
                segments.push(segment);
            }
        }
        segments
    }
}

fn parse_sample(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok()
}

/// A row where most cells are numbers starts the sample section, even if a
/// few cells are dropouts.
fn is_sample_row(row: &[String]) -> bool {
    let numeric = row.iter().filter(|cell| parse_sample(cell).is_some()).count();
    numeric * 2 > row.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "Frame\tPelvis x\tPelvis z\tHead x\tHead z\n\
                          \tm\tm\tm\tm\n\
                          0\t0.0\t0.9\t0.1\t1.7\n\
                          1\t0.5\t0.9\t0.6\t1.7\n\
                          2\t1.0\t0.9\t1.1\t1.8\n";

    #[test]
    fn test_parse_delimited_header_and_rows() {
        let table = RawTable::parse_delimited(EXPORT, '\t').unwrap();
        assert_eq!(table.columns.len(), 5);
        assert_eq!(table.columns[1], "Pelvis x");
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0][0], "");
    }

    #[test]
    fn test_parse_delimited_pads_short_rows() {
        let table = RawTable::parse_delimited("a,b,c\n1,2\n", ',').unwrap();
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
    }

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(
            RawTable::parse_delimited("\n\n", '\t'),
            Err(ModelError::EmptyTable)
        );
    }

    #[test]
    fn test_from_table_skips_leading_rows() {
        let table = RawTable::parse_delimited(EXPORT, '\t').unwrap();
        let store = MotionFrameStore::from_table(&table, 1).unwrap();
        assert_eq!(store.frame_count(), 3);
        assert_eq!(store.series("Pelvis", Axis::X).unwrap(), &[0.0, 0.5, 1.0]);
        assert_eq!(store.series("Head", Axis::Z).unwrap(), &[1.7, 1.7, 1.8]);
    }

    #[test]
    fn test_from_table_drops_non_numeric_rows_without_skip() {
        let table = RawTable::parse_delimited(EXPORT, '\t').unwrap();
        let store = MotionFrameStore::from_table(&table, 0).unwrap();
        assert_eq!(store.frame_count(), 3);
    }

    #[test]
    fn test_explicit_skip_drops_data_rows_too() {
        // Mirrors exports whose first sample row is a calibration frame.
        let table = RawTable::parse_delimited(EXPORT, '\t').unwrap();
        let store = MotionFrameStore::from_table(&table, 2).unwrap();
        assert_eq!(store.frame_count(), 2);
        assert_eq!(store.series("Pelvis", Axis::X).unwrap(), &[0.5, 1.0]);
    }

    #[test]
    fn test_dropout_in_first_sample_row_is_malformed() {
        let text = "Frame\tPelvis x\tPelvis z\n\tm\tm\n0\t\t1.0\n1\t0.5\t1.0\n";
        let table = RawTable::parse_delimited(text, '\t').unwrap();
        let err = MotionFrameStore::from_table(&table, 0).unwrap_err();
        assert_eq!(
            err,
            ModelError::MalformedSample {
                column: "Pelvis x".to_string(),
                row: 0,
                value: String::new(),
            }
        );

        // Same dropout one row later is reported the same way.
        let text = "Frame\tPelvis x\tPelvis z\n\tm\tm\n0\t0.0\t1.0\n1\t\t1.0\n";
        let table = RawTable::parse_delimited(text, '\t').unwrap();
        assert!(matches!(
            MotionFrameStore::from_table(&table, 0),
            Err(ModelError::MalformedSample { row: 1, .. })
        ));
    }

    #[test]
    fn test_malformed_sample_in_data_section() {
        let text = "Pelvis x\tPelvis z\n0.0\t1.0\nbad\t1.0\n";
        let table = RawTable::parse_delimited(text, '\t').unwrap();
        let err = MotionFrameStore::from_table(&table, 0).unwrap_err();
        assert_eq!(
            err,
            ModelError::MalformedSample {
                column: "Pelvis x".to_string(),
                row: 1,
                value: "bad".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let table = RawTable::parse_delimited("Head x,Head x\n1,2\n", ',').unwrap();
        assert!(matches!(
            MotionFrameStore::from_table(&table, 0),
            Err(ModelError::DuplicateColumn { .. })
        ));
    }

    #[test]
    fn test_unknown_segment_axis_is_lazy() {
        let table = RawTable::parse_delimited(EXPORT, '\t').unwrap();
        let store = MotionFrameStore::from_table(&table, 1).unwrap();
        assert_eq!(
            store.series("Pelvis", Axis::Y).unwrap_err(),
            ModelError::unknown_segment_axis("Pelvis", 'y')
        );
        assert!(!store.has_segment_axis("Neck", Axis::X));
    }

    #[test]
    fn test_segments_listing() {
        let table = RawTable::parse_delimited(EXPORT, '\t').unwrap();
        let store = MotionFrameStore::from_table(&table, 1).unwrap();
        assert_eq!(store.segments(), vec!["Pelvis", "Head"]);
    }

    #[test]
    fn test_from_series_requires_equal_lengths() {
        let err = MotionFrameStore::from_series([
            ("Pelvis x", vec![0.0, 1.0]),
            ("Pelvis z", vec![0.0]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::RaggedSeries {
                key: "Pelvis z".to_string(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn test_split_key() {
        assert_eq!(
            split_segment_axis_key("Left Upper Leg z"),
            Some(("Left Upper Leg", Axis::Z))
        );
        assert_eq!(split_segment_axis_key("Frame"), None);
        assert_eq!(split_segment_axis_key("Pelvis w"), None);
    }
}
