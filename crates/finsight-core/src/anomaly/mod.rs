//! Anomaly scoring over normalized frames
//!
//! Two entry points:
//!
//! - [`detect_anomalies`] - one-shot: select numeric columns, drop rows with
//!   missing numeric data, fit a fresh forest, and return the retained rows
//!   with an `is_anomaly` column appended. Re-fits on every call.
//! - [`AnomalyDetector`] - reusable fit/detect lifecycle for "fit on
//!   historical data, score new data" workflows. The caller pre-cleans its
//!   input; detect scores every row against the threshold frozen at fit time.
//!
//! `contamination` is the expected anomaly fraction in the *training* data.
//! It calibrates the decision threshold once, at fit time; detect-time input
//! with a different distribution may flag a very different fraction.

mod forest;

pub use forest::{ForestConfig, IsolationForest};

use tracing::debug;

use crate::error::{Error, Result};
use crate::frame::Frame;

/// Name of the boolean label column appended to scored frames.
pub const ANOMALY_COLUMN: &str = "is_anomaly";

/// Outlier-model capability: fit on a numeric matrix, then score rows.
/// Scores are lower-is-more-anomalous. Alternative algorithms (for example
/// local-density methods) substitute here without touching the scorer
/// contract.
pub trait OutlierDetector: Send {
    fn fit(&mut self, x: &[Vec<f64>]) -> Result<()>;
    fn score(&self, x: &[Vec<f64>]) -> Result<Vec<f64>>;
}

/// Scorer configuration.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Expected fraction of anomalous rows in the training set, in (0, 1)
    pub contamination: f64,
    /// Seed for reproducible fits
    pub seed: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            contamination: 0.05,
            seed: 42,
        }
    }
}

impl DetectorConfig {
    fn validate(&self) -> Result<()> {
        if !(self.contamination > 0.0 && self.contamination < 1.0) {
            return Err(Error::Config(format!(
                "contamination must be in (0, 1), got {}",
                self.contamination
            )));
        }
        Ok(())
    }
}

/// One-shot anomaly detection with the default configuration
/// (contamination 0.05, seed 42).
///
/// Fails with a schema error when no "Amount" column exists, and a data
/// error when no numeric columns exist or no rows survive dropping missing
/// numeric values. The output contains exactly the retained rows, every
/// original column unchanged, plus the boolean `is_anomaly` column.
pub fn detect_anomalies(frame: &Frame) -> Result<Frame> {
    detect_anomalies_with(frame, &DetectorConfig::default())
}

/// One-shot anomaly detection with an explicit configuration.
pub fn detect_anomalies_with(frame: &Frame, config: &DetectorConfig) -> Result<Frame> {
    config.validate()?;

    if !frame.has_column("Amount") {
        return Err(Error::Schema("Amount".into()));
    }

    let numeric = frame.numeric_column_names();
    if numeric.is_empty() {
        return Err(Error::Data(
            "no numeric columns found for anomaly detection".into(),
        ));
    }

    // Retain only rows with a value in every numeric column
    let columns: Vec<_> = numeric
        .iter()
        .filter_map(|name| frame.column(name))
        .collect();
    let mut retained = Vec::new();
    let mut matrix = Vec::new();
    for row in 0..frame.row_count() {
        let cells: Option<Vec<f64>> = columns
            .iter()
            .map(|c| c.as_number().and_then(|v| v[row]))
            .collect();
        if let Some(cells) = cells {
            retained.push(row);
            matrix.push(cells);
        }
    }

    if retained.is_empty() {
        return Err(Error::Data(
            "no valid numeric data after dropping missing values".into(),
        ));
    }

    let mut model = IsolationForest::with_seed(config.seed);
    model.fit(&matrix)?;
    let scores = model.score(&matrix)?;
    let threshold = lower_quantile(&scores, config.contamination);
    let labels: Vec<bool> = scores.iter().map(|&s| s < threshold).collect();

    debug!(
        rows = retained.len(),
        dropped = frame.row_count() - retained.len(),
        features = numeric.len(),
        anomalies = labels.iter().filter(|&&l| l).count(),
        "Anomaly detection complete"
    );

    Ok(frame
        .take_rows(&retained)
        .with_bool_column(ANOMALY_COLUMN, labels))
}

/// Reusable fit/detect anomaly scorer.
///
/// Created unfitted; each instance owns its model and threshold, so
/// concurrent analysis sessions each use their own instance.
pub struct AnomalyDetector {
    config: DetectorConfig,
    model: Box<dyn OutlierDetector>,
    threshold: Option<f64>,
    n_features: usize,
}

impl AnomalyDetector {
    /// Create an unfitted detector backed by the default isolation forest.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let model = Box::new(IsolationForest::with_seed(config.seed));
        Ok(Self {
            config,
            model,
            threshold: None,
            n_features: 0,
        })
    }

    /// Create a detector with a substitute outlier model.
    pub fn with_model(config: DetectorConfig, model: Box<dyn OutlierDetector>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            model,
            threshold: None,
            n_features: 0,
        })
    }

    pub fn is_fitted(&self) -> bool {
        self.threshold.is_some()
    }

    /// Fit the model on the numeric columns of `frame` and freeze the
    /// decision threshold at the contamination-quantile of the training
    /// scores. A repeated fit discards the previous parameters.
    ///
    /// Fails with a data error on zero rows, on a frame without numeric
    /// columns, or on a missing numeric cell (pre-clean the input; the
    /// stateless path owns the row-dropping policy).
    pub fn fit(&mut self, frame: &Frame) -> Result<()> {
        if frame.row_count() == 0 {
            return Err(Error::Data("input data is empty".into()));
        }
        let matrix = strict_numeric_matrix(frame)?;
        let n_features = matrix[0].len();

        self.model.fit(&matrix)?;
        let scores = self.model.score(&matrix)?;
        self.threshold = Some(lower_quantile(&scores, self.config.contamination));
        self.n_features = n_features;
        Ok(())
    }

    /// Score every row of `frame` against the fitted threshold and return
    /// the input with the boolean `is_anomaly` column appended. The model
    /// is not mutated; no rows are dropped.
    pub fn detect(&self, frame: &Frame) -> Result<Frame> {
        let threshold = self.threshold.ok_or(Error::NotFitted)?;
        let scores = self.score_rows(frame)?;
        let labels: Vec<bool> = scores.iter().map(|&s| s < threshold).collect();
        Ok(frame.with_bool_column(ANOMALY_COLUMN, labels))
    }

    /// Raw scores for every row (lower = more anomalous). Useful for
    /// ranking without committing to the threshold.
    pub fn score_samples(&self, frame: &Frame) -> Result<Vec<f64>> {
        if self.threshold.is_none() {
            return Err(Error::NotFitted);
        }
        self.score_rows(frame)
    }

    fn score_rows(&self, frame: &Frame) -> Result<Vec<f64>> {
        let matrix = strict_numeric_matrix(frame)?;
        if matrix.is_empty() {
            return Ok(Vec::new());
        }
        if matrix[0].len() != self.n_features {
            return Err(Error::Data(format!(
                "expected {} numeric feature columns, got {}",
                self.n_features,
                matrix[0].len()
            )));
        }
        self.model.score(&matrix)
    }
}

/// Extract the numeric columns of a frame into row-major form, rejecting
/// missing cells.
fn strict_numeric_matrix(frame: &Frame) -> Result<Vec<Vec<f64>>> {
    let columns: Vec<_> = frame.columns().iter().filter(|c| c.is_numeric()).collect();
    if columns.is_empty() {
        return Err(Error::Data(
            "no numeric columns found for anomaly detection".into(),
        ));
    }

    (0..frame.row_count())
        .map(|row| {
            columns
                .iter()
                .map(|c| {
                    c.as_number().and_then(|v| v[row]).ok_or_else(|| {
                        Error::Data(format!(
                            "missing value in numeric column '{}' at row {}",
                            c.name(),
                            row
                        ))
                    })
                })
                .collect()
        })
        .collect()
}

/// Linear-interpolated lower quantile of `values`; `q` in (0, 1).
fn lower_quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
