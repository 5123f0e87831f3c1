//! CSV loading
//!
//! Reads a transaction export from any platform into a [`Frame`]. Headers
//! become column names verbatim; each column is inferred as numeric when
//! every non-empty cell parses as a number, otherwise it stays text. Date
//! recognition is deliberately left to the normalizer.

use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::frame::{Column, ColumnData, Frame};

/// Load a CSV file from a path.
pub fn load_csv_path(path: impl AsRef<Path>) -> Result<Frame> {
    let file = File::open(path.as_ref())?;
    load_csv_reader(file)
}

/// Load CSV data from any reader.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Frame> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for result in rdr.records() {
        let record = result?;
        for (i, col) in cells.iter_mut().enumerate() {
            col.push(record.get(i).unwrap_or("").to_string());
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column::new(name, infer_column(raw)))
        .collect();

    let frame = Frame::from_columns(columns)?;
    debug!(
        rows = frame.row_count(),
        columns = frame.column_count(),
        "Loaded CSV"
    );
    Ok(frame)
}

/// Infer a column's type from its raw cells.
///
/// Numeric when every non-empty cell parses as f64 (empty cells become the
/// missing-marker); text otherwise. An all-empty column is numeric-missing,
/// matching the behavior of dataframe loaders.
fn infer_column(raw: Vec<String>) -> ColumnData {
    let all_numeric = raw
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .all(|s| s.parse::<f64>().is_ok());

    if all_numeric {
        ColumnData::Number(
            raw.iter()
                .map(|s| {
                    let s = s.trim();
                    if s.is_empty() {
                        None
                    } else {
                        s.parse::<f64>().ok()
                    }
                })
                .collect(),
        )
    } else {
        ColumnData::Text(raw)
    }
}
