//! In-memory columnar table model
//!
//! A [`Frame`] is an ordered collection of equal-length typed columns, the
//! unit of exchange for the whole pipeline: the loader produces one, the
//! normalizer canonicalizes it, the anomaly scorer appends a label column.
//! All transforms return new frames; nothing mutates a caller's frame.

use chrono::NaiveDate;
use std::fmt;

/// A single cell value. `Missing` is a real sentinel, distinct from
/// `0.0` and `""`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    Bool(bool),
    Missing,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Missing => Ok(()),
        }
    }
}

/// Typed column storage. `None` entries are the missing-marker for the
/// numeric and date types; text columns store empty strings instead.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Number(Vec<Option<f64>>),
    Text(Vec<String>),
    Date(Vec<Option<NaiveDate>>),
    Bool(Vec<bool>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Number(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Date(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extract the rows at `indices`, preserving their order.
    fn take(&self, indices: &[usize]) -> ColumnData {
        match self {
            ColumnData::Number(v) => {
                ColumnData::Number(indices.iter().map(|&i| v[i]).collect())
            }
            ColumnData::Text(v) => {
                ColumnData::Text(indices.iter().map(|&i| v[i].clone()).collect())
            }
            ColumnData::Date(v) => ColumnData::Date(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Bool(v) => ColumnData::Bool(indices.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether this column carries numbers (missing entries included).
    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Number(_))
    }

    pub fn as_number(&self) -> Option<&[Option<f64>]> {
        match &self.data {
            ColumnData::Number(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&[String]> {
        match &self.data {
            ColumnData::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&[Option<NaiveDate>]> {
        match &self.data {
            ColumnData::Date(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<&[bool]> {
        match &self.data {
            ColumnData::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Cell value at `row`. Out-of-range rows read as missing.
    pub fn value(&self, row: usize) -> Value {
        match &self.data {
            ColumnData::Number(v) => match v.get(row) {
                Some(Some(n)) => Value::Number(*n),
                _ => Value::Missing,
            },
            ColumnData::Text(v) => match v.get(row) {
                Some(s) => Value::Text(s.clone()),
                None => Value::Missing,
            },
            ColumnData::Date(v) => match v.get(row) {
                Some(Some(d)) => Value::Date(*d),
                _ => Value::Missing,
            },
            ColumnData::Bool(v) => match v.get(row) {
                Some(b) => Value::Bool(*b),
                None => Value::Missing,
            },
        }
    }
}

/// An ordered collection of equal-length columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub(crate) columns: Vec<Column>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from columns, verifying equal lengths.
    pub fn from_columns(columns: Vec<Column>) -> crate::error::Result<Self> {
        if let Some(first) = columns.first() {
            let n = first.len();
            for col in &columns {
                if col.len() != n {
                    return Err(crate::error::Error::Data(format!(
                        "column '{}' has {} rows, expected {}",
                        col.name(),
                        col.len(),
                        n
                    )));
                }
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name() == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// Names of all numeric columns, in declaration order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name().to_string())
            .collect()
    }

    /// New frame containing only the rows at `indices`, in the given order.
    pub fn take_rows(&self, indices: &[usize]) -> Frame {
        Frame {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.take(indices),
                })
                .collect(),
        }
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Frame {
        let take = n.min(self.row_count());
        let indices: Vec<usize> = (0..take).collect();
        self.take_rows(&indices)
    }

    /// Append a boolean column. Used for the anomaly label; the value
    /// vector length must match the frame's row count.
    pub(crate) fn with_bool_column(&self, name: &str, values: Vec<bool>) -> Frame {
        debug_assert_eq!(values.len(), self.row_count());
        let mut columns = self.columns.clone();
        columns.push(Column::new(name, ColumnData::Bool(values)));
        Frame { columns }
    }

    /// Render the first `n` rows as CSV text (header included). This is the
    /// sample handed to the insight backend, not a full export.
    pub fn head_csv(&self, n: usize) -> String {
        let mut out = String::new();
        let escape = |s: &str| -> String {
            if s.contains(',') || s.contains('"') || s.contains('\n') {
                format!("\"{}\"", s.replace('"', "\"\""))
            } else {
                s.to_string()
            }
        };

        let header: Vec<String> = self.columns.iter().map(|c| escape(c.name())).collect();
        out.push_str(&header.join(","));
        out.push('\n');

        let rows = n.min(self.row_count());
        for row in 0..rows {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| escape(&c.value(row).to_string()))
                .collect();
            out.push_str(&cells.join(","));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> Frame {
        Frame::from_columns(vec![
            Column::new(
                "Amount",
                ColumnData::Number(vec![Some(10.0), None, Some(12.5)]),
            ),
            Column::new(
                "Merchant",
                ColumnData::Text(vec!["A".into(), "B".into(), "A".into()]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_row_and_column_counts() {
        let frame = sample_frame();
        assert_eq!(frame.row_count(), 3);
        assert_eq!(frame.column_count(), 2);
        assert!(!frame.is_empty());
        assert!(Frame::new().is_empty());
    }

    #[test]
    fn test_from_columns_rejects_ragged_input() {
        let result = Frame::from_columns(vec![
            Column::new("A", ColumnData::Number(vec![Some(1.0)])),
            Column::new("B", ColumnData::Text(vec!["x".into(), "y".into()])),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_column_selection() {
        let frame = sample_frame();
        assert_eq!(frame.numeric_column_names(), vec!["Amount".to_string()]);
    }

    #[test]
    fn test_take_rows_preserves_order_and_values() {
        let frame = sample_frame();
        let taken = frame.take_rows(&[2, 0]);
        assert_eq!(taken.row_count(), 2);
        assert_eq!(
            taken.column("Amount").unwrap().as_number().unwrap(),
            &[Some(12.5), Some(10.0)]
        );
        assert_eq!(
            taken.column("Merchant").unwrap().as_text().unwrap(),
            &["A".to_string(), "A".to_string()]
        );
    }

    #[test]
    fn test_missing_cell_renders_empty() {
        let frame = sample_frame();
        let col = frame.column("Amount").unwrap();
        assert_eq!(col.value(1), Value::Missing);
        assert_eq!(col.value(1).to_string(), "");
    }

    #[test]
    fn test_head_csv_escapes_commas() {
        let frame = Frame::from_columns(vec![Column::new(
            "Merchant",
            ColumnData::Text(vec!["Acme, Inc".into()]),
        )])
        .unwrap();
        let csv = frame.head_csv(5);
        assert_eq!(csv, "Merchant\n\"Acme, Inc\"\n");
    }

    #[test]
    fn test_head_limits_rows() {
        let frame = sample_frame();
        assert_eq!(frame.head(2).row_count(), 2);
        assert_eq!(frame.head(10).row_count(), 3);
    }
}
