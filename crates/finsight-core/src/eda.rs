//! Exploratory summaries over normalized frames
//!
//! Pure data producers; chart rendering belongs to the dashboard layer.
//! Each function degrades to an empty result when the columns it needs are
//! absent, so a partial dataset still gets whatever summaries apply.

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::frame::Frame;

/// Basic dataset shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    pub row_count: usize,
    pub column_count: usize,
}

/// Total Amount for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Total Amount for one merchant.
#[derive(Debug, Clone, PartialEq)]
pub struct MerchantTotal {
    pub merchant: String,
    pub total: f64,
}

pub fn overview(frame: &Frame) -> Overview {
    Overview {
        row_count: frame.row_count(),
        column_count: frame.column_count(),
    }
}

/// Amount summed per calendar date, ascending by date. Rows with a missing
/// date or amount are skipped; empty when Date or Amount is absent.
pub fn daily_totals(frame: &Frame) -> Vec<DailyTotal> {
    let (Some(dates), Some(amounts)) = (
        frame.column("Date").and_then(|c| c.as_date()),
        frame.column("Amount").and_then(|c| c.as_number()),
    ) else {
        debug!("Date or Amount column missing; skipping trend summary");
        return Vec::new();
    };

    let mut totals: HashMap<NaiveDate, f64> = HashMap::new();
    for (date, amount) in dates.iter().zip(amounts) {
        if let (Some(date), Some(amount)) = (date, amount) {
            *totals.entry(*date).or_insert(0.0) += amount;
        }
    }

    let mut result: Vec<DailyTotal> = totals
        .into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect();
    result.sort_by_key(|t| t.date);
    result
}

/// Amount summed per merchant, descending by total, capped at `limit`.
/// Rows with a missing amount or empty merchant are skipped; empty when
/// Merchant or Amount is absent.
pub fn top_merchants(frame: &Frame, limit: usize) -> Vec<MerchantTotal> {
    let (Some(merchants), Some(amounts)) = (
        frame.column("Merchant").and_then(|c| c.as_text()),
        frame.column("Amount").and_then(|c| c.as_number()),
    ) else {
        debug!("Merchant or Amount column missing; skipping merchant summary");
        return Vec::new();
    };

    let mut totals: HashMap<&str, f64> = HashMap::new();
    for (merchant, amount) in merchants.iter().zip(amounts) {
        if merchant.is_empty() {
            continue;
        }
        if let Some(amount) = amount {
            *totals.entry(merchant.as_str()).or_insert(0.0) += amount;
        }
    }

    let mut result: Vec<MerchantTotal> = totals
        .into_iter()
        .map(|(merchant, total)| MerchantTotal {
            merchant: merchant.to_string(),
            total,
        })
        .collect();
    result.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    result.truncate(limit);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Column, ColumnData, Frame};

    fn sample() -> Frame {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day);
        Frame::from_columns(vec![
            Column::new(
                "Date",
                ColumnData::Date(vec![d(2024, 1, 1), d(2024, 1, 1), d(2024, 1, 2), None]),
            ),
            Column::new(
                "Amount",
                ColumnData::Number(vec![Some(10.0), Some(5.0), Some(7.5), Some(99.0)]),
            ),
            Column::new(
                "Merchant",
                ColumnData::Text(vec!["A".into(), "B".into(), "A".into(), "".into()]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_overview_counts() {
        let o = overview(&sample());
        assert_eq!(
            o,
            Overview {
                row_count: 4,
                column_count: 3
            }
        );
    }

    #[test]
    fn test_daily_totals_groups_and_sorts() {
        let totals = daily_totals(&sample());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(totals[0].total, 15.0);
        assert_eq!(totals[1].total, 7.5);
    }

    #[test]
    fn test_daily_totals_without_date_column_is_empty() {
        let frame = Frame::from_columns(vec![Column::new(
            "Amount",
            ColumnData::Number(vec![Some(1.0)]),
        )])
        .unwrap();
        assert!(daily_totals(&frame).is_empty());
    }

    #[test]
    fn test_top_merchants_ranks_by_total() {
        let top = top_merchants(&sample(), 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].merchant, "A");
        assert_eq!(top[0].total, 17.5);
        assert_eq!(top[1].merchant, "B");
    }

    #[test]
    fn test_top_merchants_respects_limit() {
        let top = top_merchants(&sample(), 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].merchant, "A");
    }
}
