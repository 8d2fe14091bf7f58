//! Serializable analysis configuration.
//!
//! One TOML file carries a section per engine component plus the `[run]`
//! section for orchestration. Every field has a default, so an empty file
//! (or no file) reproduces the stock constants.
//!
//! ```toml
//! [series]
//! days = 100
//!
//! [paths]
//! sims = 200
//!
//! [run]
//! seed = 42
//! delay_ms = 0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use titan_core::{
    series, spectrum, PathParams, RiskParams, SeriesParams, SignalParams, SpectrumParams,
};

/// Errors from loading or validating an [`AnalysisConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Orchestration settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSettings {
    /// Master seed. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
    /// Artificial delay before results are surfaced, in milliseconds.
    pub delay_ms: u64,
    /// Run the post-series computations and the ensemble on rayon.
    /// Output is identical either way for a fixed seed.
    pub parallel: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            seed: None,
            delay_ms: 0,
            parallel: true,
        }
    }
}

/// Complete configuration for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub series: SeriesParams,
    pub signal: SignalParams,
    pub risk: RiskParams,
    pub paths: PathParams,
    pub spectrum: SpectrumParams,
    pub run: RunSettings,
}

impl AnalysisConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject combinations the engine would refuse at run time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let days = self.series.days;
        if days < self.signal.min_len() {
            return Err(ConfigError::Invalid(format!(
                "series.days = {days} is shorter than the {} points signal scoring needs",
                self.signal.min_len()
            )));
        }
        if days > series::MAX_DAYS {
            return Err(ConfigError::Invalid(format!(
                "series.days = {days} exceeds the limit of {}",
                series::MAX_DAYS
            )));
        }
        if self.signal.lookback == 0 {
            return Err(ConfigError::Invalid("signal.lookback must be >= 1".into()));
        }
        if !(self.series.start_low > 0.0 && self.series.start_high >= self.series.start_low) {
            return Err(ConfigError::Invalid(
                "series start range must be positive with start_low <= start_high".into(),
            ));
        }
        if !(self.risk.confidence > 0.0 && self.risk.confidence < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "risk.confidence must lie in (0, 1), got {}",
                self.risk.confidence
            )));
        }
        self.paths
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.spectrum.bins == 0 {
            return Err(ConfigError::Invalid("spectrum.bins must be >= 1".into()));
        }
        if self.spectrum.bins > spectrum::MAX_BINS {
            return Err(ConfigError::Invalid(format!(
                "spectrum.bins = {} exceeds the limit of {}",
                self.spectrum.bins,
                spectrum::MAX_BINS
            )));
        }
        Ok(())
    }
}
