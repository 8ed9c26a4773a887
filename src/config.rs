// Threshold configuration for token attribution analysis
//
// Defaults reproduce the reference report exactly; a TOML file or CLI flags
// can move the thresholds for engines with different phase lengths.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds driving the anomaly detector and the recommendation rules
///
/// # Example
/// ```
/// use cuenta::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.suspicious_duration_secs, 300.0); // five minutes
/// assert_eq!(config.top_suspicious, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Zero-token phases strictly longer than this are suspicious
    ///
    /// A phase that ran for minutes without any attributed tokens is a much
    /// stronger bug signal than a fast no-op phase.
    ///
    /// Default: 300 seconds
    pub suspicious_duration_secs: f64,

    /// Number of suspicious phases listed in the report
    ///
    /// Default: 10
    pub top_suspicious: usize,

    /// Suspicious count above which a systemic attribution bug is reported
    ///
    /// Default: 10
    pub systemic_bug_min_suspicious: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            suspicious_duration_secs: 300.0,
            top_suspicious: 10,
            systemic_bug_min_suspicious: 10,
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, AnalysisError> {
        let config: Self =
            toml::from_str(content).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.suspicious_duration_secs.is_finite() || self.suspicious_duration_secs < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "suspicious_duration_secs must be a non-negative number, got {}",
                self.suspicious_duration_secs
            )));
        }

        if self.top_suspicious == 0 {
            return Err(AnalysisError::InvalidConfig(
                "top_suspicious must be >= 1".to_string(),
            ));
        }

        Ok(())
    }
}
