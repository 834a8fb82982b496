//! Run settings loaded via OrthoConfig.
//!
//! Values merge from command-line flags, `GROWTH_PROJECTION_*` environment
//! variables and configuration files. Every field is optional; the accessors
//! supply the dashboard defaults, except `past_periods`, which defaults
//! to five when loaded.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::rates::RateRange;

/// Settings controlling a projection run.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GROWTH_PROJECTION")]
pub struct ProjectionSettings {
    /// Seed for the random source; drawn at random when omitted.
    pub seed: Option<u64>,
    /// Number of simulated (past) years.
    #[ortho_config(default = 5)]
    pub past_periods: u32,
    /// Number of forecast years; enables the forecast phase when present.
    pub future_periods: Option<u32>,
    /// Lower bound of the past growth rate range.
    pub rate_min: Option<f64>,
    /// Upper bound of the past growth rate range.
    pub rate_max: Option<f64>,
    /// Lower bound of the future growth rate range.
    pub future_rate_min: Option<f64>,
    /// Upper bound of the future growth rate range.
    pub future_rate_max: Option<f64>,
    /// Comma-separated states to chart; the first five when omitted.
    pub states: Option<String>,
    /// Output format, `text` or `json`.
    pub format: Option<String>,
    /// File to write the report to instead of standard output.
    pub output: Option<PathBuf>,
}

impl ProjectionSettings {
    /// Return the past rate bounds, falling back to the defaults.
    #[must_use]
    pub fn past_rate_bounds(&self) -> (f64, f64) {
        (
            self.rate_min.unwrap_or(RateRange::DEFAULT_LOW),
            self.rate_max.unwrap_or(RateRange::DEFAULT_HIGH),
        )
    }

    /// Return the future rate bounds, falling back to the defaults.
    #[must_use]
    pub fn future_rate_bounds(&self) -> (f64, f64) {
        (
            self.future_rate_min.unwrap_or(RateRange::DEFAULT_LOW),
            self.future_rate_max.unwrap_or(RateRange::DEFAULT_HIGH),
        )
    }

    /// Return the configured output format name, defaulting to `text`.
    #[must_use]
    pub fn format_name(&self) -> &str {
        self.format.as_deref().unwrap_or("text")
    }
}
