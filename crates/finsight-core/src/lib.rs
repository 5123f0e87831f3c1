//! FinSight Core Library
//!
//! One-shot analysis pipeline for tabular financial-transaction data:
//! - CSV loading into a typed columnar frame
//! - Schema normalization into a canonical column set
//! - Unsupervised anomaly detection (seeded isolation forest)
//! - Exploratory summaries (trend, merchant ranking)
//! - Pluggable insight backend (Groq chat completions, mock)
//! - Plain-text report assembly
//!
//! Control flow: raw frame → [`normalize::normalize`] → normalized frame →
//! [`anomaly::detect_anomalies`] → labeled frame. Every stage is a pure
//! transform over in-memory data; callers own all state.

pub mod ai;
pub mod anomaly;
pub mod config;
pub mod eda;
pub mod error;
pub mod frame;
pub mod loader;
pub mod normalize;
pub mod report;

pub use ai::{GroqBackend, InsightBackend, InsightClient, MockBackend, SAMPLE_ROWS};
pub use anomaly::{
    detect_anomalies, detect_anomalies_with, AnomalyDetector, DetectorConfig, IsolationForest,
    OutlierDetector, ANOMALY_COLUMN,
};
pub use config::Settings;
pub use eda::{DailyTotal, MerchantTotal, Overview};
pub use error::{Error, Result};
pub use frame::{Column, ColumnData, Frame, Value};
pub use loader::{load_csv_path, load_csv_reader};
pub use normalize::normalize;
pub use report::{render_report, ReportSection};
