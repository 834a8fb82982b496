//! Command-line support for running projections.
//!
//! The binary loads [`ProjectionSettings`], resolves them into a validated
//! [`RunPlan`] and calls [`execute`]. Keeping that flow here lets tests drive
//! it without spawning a process.

mod error;
mod settings;

use std::str::FromStr;

use camino::Utf8PathBuf;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

pub use error::CliError;
pub use settings::ProjectionSettings;

use crate::atomic_io::write_report_file;
use crate::catalogue::is_catalogue_state;
use crate::error::{ProjectionError, SelectionError};
use crate::generator::generate_initial_data;
use crate::projection::{project, project_with_forecast};
use crate::rates::RateRange;
use crate::report::ProjectionReport;
use crate::selection::{ChartOutcome, default_selection};

/// Largest total number of periods (past plus future) a run accepts.
pub const MAX_PERIODS: u32 = 1_000;

/// How the rendered report is formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text tables.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(CliError::InvalidFormat {
                value: value.to_owned(),
            }),
        }
    }
}

/// Projection phases selected for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Project the past phase only.
    Single,
    /// Project the past phase and forecast from its last value.
    Forecast {
        /// Number of forecast periods.
        future_periods: u32,
        /// Range the future rates are drawn from.
        future_rates: RateRange,
    },
}

/// Validated settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPlan {
    seed: Option<u64>,
    past_periods: u32,
    past_rates: RateRange,
    phase: Phase,
    states: Option<Vec<String>>,
    format: OutputFormat,
    output: Option<Utf8PathBuf>,
}

impl RunPlan {
    /// Validates `settings` before any data is generated.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] when a rate range is invalid, a forecast is
    /// requested with zero past periods, the total period count exceeds
    /// [`MAX_PERIODS`], states are selected without a forecast, a state is
    /// not in the catalogue, the format is unknown or the output path is not
    /// UTF-8.
    ///
    /// # Example
    ///
    /// ```
    /// use growth_projection::cli::{Phase, ProjectionSettings, RunPlan};
    ///
    /// let settings = ProjectionSettings {
    ///     seed: Some(7),
    ///     past_periods: 5,
    ///     future_periods: Some(3),
    ///     rate_min: None,
    ///     rate_max: None,
    ///     future_rate_min: None,
    ///     future_rate_max: None,
    ///     states: Some("Colima, Durango".to_owned()),
    ///     format: None,
    ///     output: None,
    /// };
    ///
    /// let plan = RunPlan::from_settings(&settings).expect("valid settings");
    /// assert_eq!(plan.past_periods(), 5);
    /// assert!(matches!(plan.phase(), Phase::Forecast { future_periods: 3, .. }));
    /// ```
    pub fn from_settings(settings: &ProjectionSettings) -> Result<Self, CliError> {
        let past_periods = settings.past_periods;
        let total_periods = past_periods.saturating_add(settings.future_periods.unwrap_or(0));
        if total_periods > MAX_PERIODS {
            return Err(ProjectionError::invalid(format!(
                "at most {MAX_PERIODS} periods are supported, got {total_periods}"
            ))
            .into());
        }
        let (past_low, past_high) = settings.past_rate_bounds();
        let past_rates = RateRange::new(past_low, past_high)?;

        let phase = match settings.future_periods {
            None => Phase::Single,
            Some(_) if past_periods == 0 => {
                return Err(ProjectionError::invalid("anchor undefined when past_periods = 0").into());
            }
            Some(future_periods) => {
                let (future_low, future_high) = settings.future_rate_bounds();
                Phase::Forecast {
                    future_periods,
                    future_rates: RateRange::new(future_low, future_high)?,
                }
            }
        };

        if settings.states.is_some() && phase == Phase::Single {
            return Err(CliError::SelectionWithoutForecast);
        }
        let states = settings.states.as_deref().map(parse_states).transpose()?;
        let format = settings.format_name().parse()?;
        let output = settings
            .output
            .clone()
            .map(|path| {
                Utf8PathBuf::from_path_buf(path).map_err(|rejected| CliError::NonUtf8Path {
                    path: rejected.display().to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            seed: settings.seed,
            past_periods,
            past_rates,
            phase,
            states,
            format,
            output,
        })
    }

    /// Returns the explicit seed, if one was configured.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of past periods.
    #[must_use]
    pub const fn past_periods(&self) -> u32 {
        self.past_periods
    }

    /// Returns the selected phases.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the explicit chart selection, if any. Only forecast runs
    /// carry one.
    #[must_use]
    pub fn states(&self) -> Option<&[String]> {
        self.states.as_deref()
    }

    /// Returns the output format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns the report file path, if the report goes to a file.
    #[must_use]
    pub const fn output(&self) -> Option<&Utf8PathBuf> {
        self.output.as_ref()
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Seed the run used.
    pub seed: u64,
    /// Rendered report.
    pub rendered: String,
    /// File the report was written to, if any.
    pub written_to: Option<Utf8PathBuf>,
}

/// Generates data, projects it and assembles the report for `plan`.
///
/// Draws 32 initial counts, then the past rates, then (for a forecast) the
/// future rates from `rng`.
///
/// # Errors
///
/// Returns [`CliError`] if the projection or chart selection is rejected.
pub fn run_projection<R: Rng + ?Sized>(
    plan: &RunPlan,
    rng: &mut R,
) -> Result<ProjectionReport, CliError> {
    let entities = generate_initial_data(rng);
    let table = match plan.phase {
        Phase::Single => project(rng, &entities, plan.past_periods, &plan.past_rates),
        Phase::Forecast {
            future_periods,
            future_rates,
        } => project_with_forecast(
            rng,
            &entities,
            plan.past_periods,
            future_periods,
            &plan.past_rates,
            &future_rates,
        )?,
    };

    let selection = match (plan.phase, &plan.states) {
        (Phase::Forecast { .. }, Some(states)) => states.clone(),
        _ => default_selection(&table),
    };
    let chart = ChartOutcome::from_selection(&table, &selection)?;

    Ok(ProjectionReport::new(entities, table, chart))
}

/// Runs `plan` end to end: seeds the RNG, builds and renders the report, and
/// writes it to the configured file.
///
/// # Errors
///
/// Returns [`CliError`] if the projection fails or the report cannot be
/// rendered or written.
pub fn execute(plan: &RunPlan) -> Result<RunOutcome, CliError> {
    let seed = plan.seed.unwrap_or_else(random_seed);
    info!(
        seed,
        past_periods = plan.past_periods,
        forecast = matches!(plan.phase, Phase::Forecast { .. }),
        "starting growth projection"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let report = run_projection(plan, &mut rng)?.with_seed(seed);
    let rendered = render(&report, plan.format)?;

    if let Some(path) = &plan.output {
        write_report_file(path, &rendered)?;
    }
    info!(
        seed,
        rows = report.projection().len(),
        periods = report.projection().periods(),
        "growth projection complete"
    );

    Ok(RunOutcome {
        seed,
        rendered,
        written_to: plan.output.clone(),
    })
}

/// Renders `report` in `format`.
///
/// # Errors
///
/// Returns [`CliError::Report`] if JSON serialisation fails.
pub fn render(report: &ProjectionReport, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Text => Ok(report.render_text()),
        OutputFormat::Json => Ok(report.to_json()?),
    }
}

/// Formats the message printed after a report is written to a file.
///
/// # Example
///
/// ```
/// use camino::Utf8PathBuf;
/// use growth_projection::cli::{RunOutcome, success_message};
///
/// let outcome = RunOutcome {
///     seed: 2026,
///     rendered: String::new(),
///     written_to: Some(Utf8PathBuf::from("report.txt")),
/// };
///
/// assert_eq!(
///     success_message(&outcome),
///     "Wrote growth projection (seed=2026) to report.txt"
/// );
/// ```
#[must_use]
pub fn success_message(outcome: &RunOutcome) -> String {
    outcome.written_to.as_ref().map_or_else(
        || format!("Rendered growth projection (seed={})", outcome.seed),
        |path| format!("Wrote growth projection (seed={}) to {path}", outcome.seed),
    )
}

fn parse_states(raw: &str) -> Result<Vec<String>, CliError> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| {
            if is_catalogue_state(name) {
                Ok(name.to_owned())
            } else {
                Err(CliError::from(SelectionError::UnknownEntity {
                    name: name.to_owned(),
                }))
            }
        })
        .collect()
}

fn random_seed() -> u64 {
    rand::rng().random()
}

#[cfg(test)]
mod tests;
