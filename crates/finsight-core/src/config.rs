//! Host configuration
//!
//! Settings are read from the environment and validated by an explicit
//! [`Settings::validate`] call at application startup. Loading never warns
//! or fails on its own; a missing API key only matters when the host
//! actually wants insight generation, and it decides when to check.

use crate::anomaly::DetectorConfig;
use crate::error::{Error, Result};

/// Default Groq model when GROQ_MODEL is unset.
pub const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Groq API key; empty when unset
    pub groq_api_key: String,
    /// Groq model name
    pub groq_model: String,
    /// Expected anomaly fraction for the detector
    pub contamination: f64,
    /// Detector RNG seed
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let detector = DetectorConfig::default();
        Self {
            groq_api_key: String::new(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            contamination: detector.contamination,
            seed: detector.seed,
        }
    }
}

impl Settings {
    /// Read settings from the environment.
    ///
    /// - `GROQ_API_KEY` - insight backend credential
    /// - `GROQ_MODEL` - model name (default llama3-70b-8192)
    /// - `FINSIGHT_CONTAMINATION` - detector contamination (default 0.05)
    /// - `FINSIGHT_SEED` - detector seed (default 42)
    ///
    /// Unparseable numeric overrides fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            groq_api_key: std::env::var("GROQ_API_KEY").unwrap_or_default(),
            groq_model: std::env::var("GROQ_MODEL").unwrap_or(defaults.groq_model),
            contamination: std::env::var("FINSIGHT_CONTAMINATION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.contamination),
            seed: std::env::var("FINSIGHT_SEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.seed),
        }
    }

    /// Validate detector settings. Called before any analysis run.
    pub fn validate(&self) -> Result<()> {
        if !(self.contamination > 0.0 && self.contamination < 1.0) {
            return Err(Error::Config(format!(
                "contamination must be in (0, 1), got {}",
                self.contamination
            )));
        }
        Ok(())
    }

    /// Validate settings needed for insight generation, on top of
    /// [`Self::validate`].
    pub fn validate_for_insights(&self) -> Result<()> {
        self.validate()?;
        if self.groq_api_key.is_empty() {
            return Err(Error::Config(
                "GROQ_API_KEY is not set; insight generation requires it".into(),
            ));
        }
        Ok(())
    }

    /// Detector configuration derived from these settings.
    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            contamination: self.contamination,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.groq_model, DEFAULT_GROQ_MODEL);
        assert_eq!(settings.contamination, 0.05);
        assert_eq!(settings.seed, 42);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_api_key_fails_insight_validation_only() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!(settings.validate_for_insights().is_err());

        let with_key = Settings {
            groq_api_key: "gsk_test".into(),
            ..Settings::default()
        };
        assert!(with_key.validate_for_insights().is_ok());
    }

    #[test]
    fn test_bad_contamination_rejected() {
        let settings = Settings {
            contamination: 1.0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
