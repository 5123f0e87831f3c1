//! Error types for FinSight

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required column: {0}")]
    Schema(String),

    #[error("Invalid data: {0}")]
    Data(String),

    #[error("Model must be fitted before detection")]
    NotFitted,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Insight backend error: {0}")]
    Insight(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
