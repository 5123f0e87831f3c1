//! Schema normalization
//!
//! Canonicalizes a raw frame into the fixed schema downstream components
//! rely on: trimmed column names, recognized aliases of Amount/Merchant/Date
//! renamed to canonical capitalization, Date and Amount coerced to their
//! types cell-by-cell, and the optional text columns guaranteed to exist.
//!
//! Normalization never fails. A cell that cannot be coerced becomes the
//! missing-marker; one bad cell never aborts the table.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::frame::{Column, ColumnData, Frame};

/// Canonical column names recognized via case-insensitive aliases.
const CANONICAL_ALIASES: [&str; 3] = ["Amount", "Merchant", "Date"];

/// Text columns guaranteed to exist after normalization.
const DEFAULT_TEXT_COLUMNS: [&str; 3] = ["Description", "Merchant", "Type"];

/// Canonicalize a raw frame. Pure: the input is left untouched.
///
/// When two raw columns collide onto the same canonical name (for example
/// "amount" and "Amount" both present), the later column replaces the
/// earlier one. The replacement is logged but never fails.
pub fn normalize(raw: &Frame) -> Frame {
    let row_count = raw.row_count();
    let mut columns: Vec<Column> = Vec::with_capacity(raw.column_count());

    for col in raw.columns() {
        let name = canonical_name(col.name().trim());

        // Last column wins on collision
        if let Some(pos) = columns.iter().position(|c| c.name() == name) {
            warn!(column = %name, "Duplicate column after canonicalization; keeping the later one");
            columns.remove(pos);
        }
        columns.push(Column::new(name, col.data().clone()));
    }

    for col in columns.iter_mut() {
        match col.name() {
            "Date" => *col = Column::new("Date", coerce_dates(col.data())),
            "Amount" => *col = Column::new("Amount", coerce_amounts(col.data())),
            _ => {}
        }
    }

    for name in DEFAULT_TEXT_COLUMNS {
        if !columns.iter().any(|c| c.name() == name) {
            columns.push(Column::new(
                name,
                ColumnData::Text(vec![String::new(); row_count]),
            ));
        }
    }

    Frame { columns }
}

/// Map a trimmed name onto its canonical capitalization, if it is a
/// recognized alias spelled differently.
fn canonical_name(trimmed: &str) -> String {
    for canonical in CANONICAL_ALIASES {
        if trimmed != canonical && trimmed.eq_ignore_ascii_case(canonical) {
            return canonical.to_string();
        }
    }
    trimmed.to_string()
}

/// Coerce every cell of a Date column to a date; unparseable cells become
/// missing.
fn coerce_dates(data: &ColumnData) -> ColumnData {
    match data {
        ColumnData::Date(v) => ColumnData::Date(v.clone()),
        ColumnData::Text(v) => {
            ColumnData::Date(v.iter().map(|s| parse_date(s)).collect())
        }
        // Numbers and booleans have no date interpretation here
        ColumnData::Number(v) => ColumnData::Date(vec![None; v.len()]),
        ColumnData::Bool(v) => ColumnData::Date(vec![None; v.len()]),
    }
}

/// Coerce every cell of an Amount column to a number; unparseable cells
/// become missing.
fn coerce_amounts(data: &ColumnData) -> ColumnData {
    match data {
        ColumnData::Number(v) => ColumnData::Number(v.clone()),
        ColumnData::Text(v) => {
            ColumnData::Number(v.iter().map(|s| parse_amount(s)).collect())
        }
        ColumnData::Date(v) => ColumnData::Number(vec![None; v.len()]),
        ColumnData::Bool(v) => ColumnData::Number(vec![None; v.len()]),
    }
}

/// Parse a date from the common bank-export formats.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%m-%d-%Y", // 01-15-2024
        "%d/%m/%Y", // 15/01/2024 (European)
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // Timestamps with a time component
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// Parse an amount string, handling currency symbols, thousands separators,
/// and parentheses-negation.
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}
