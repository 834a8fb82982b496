//! Exponential growth projections.
//!
//! Every projected value is computed in closed form from its base value and
//! the period exponent, `base * (1 + rate) ^ period`, rather than by
//! multiplying the previous period's value. The past phase uses each entity's
//! initial count as the base; the optional future phase uses the last past
//! value (the anchor) and a second, independently drawn rate.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::entity::Entity;
use crate::error::ProjectionError;
use crate::rates::{GrowthRate, RateRange, sample_rates};

/// Projected counts for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRow {
    name: String,
    initial_count: u32,
    past_rate: GrowthRate,
    #[serde(skip_serializing_if = "Option::is_none")]
    future_rate: Option<GrowthRate>,
    counts: Vec<f64>,
}

impl ProjectionRow {
    /// Returns the entity name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the count the projection started from.
    #[must_use]
    pub const fn initial_count(&self) -> u32 {
        self.initial_count
    }

    /// Returns the rate applied during the past phase.
    #[must_use]
    pub const fn past_rate(&self) -> GrowthRate {
        self.past_rate
    }

    /// Returns the rate applied during the future phase, if one ran.
    #[must_use]
    pub const fn future_rate(&self) -> Option<GrowthRate> {
        self.future_rate
    }

    /// Returns the projected counts, one per period in order.
    #[must_use]
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Returns the count for a 1-based period index.
    #[must_use]
    pub fn count(&self, period: usize) -> Option<f64> {
        period
            .checked_sub(1)
            .and_then(|index| self.counts.get(index))
            .copied()
    }
}

/// Projected counts for every entity, keyed by name in catalogue order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionTable {
    past_periods: u32,
    future_periods: u32,
    rows: Vec<ProjectionRow>,
}

impl ProjectionTable {
    /// Returns the number of past-phase periods.
    #[must_use]
    pub const fn past_periods(&self) -> u32 {
        self.past_periods
    }

    /// Returns the number of future-phase periods.
    #[must_use]
    pub const fn future_periods(&self) -> u32 {
        self.future_periods
    }

    /// Returns the total number of period columns.
    #[must_use]
    pub const fn periods(&self) -> u32 {
        self.past_periods.saturating_add(self.future_periods)
    }

    /// Returns all rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[ProjectionRow] {
        &self.rows
    }

    /// Looks up the row for `name`.
    #[must_use]
    pub fn row(&self, name: &str) -> Option<&ProjectionRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the column labels, `Year 1` through `Year N`.
    ///
    /// # Example
    ///
    /// ```
    /// use growth_projection::{Entity, GrowthRate, project_with_rates};
    ///
    /// let entities = vec![Entity::new("Colima", 100_000)];
    /// let rates = vec![GrowthRate::new(0.02).expect("valid rate")];
    /// let table = project_with_rates(&entities, 2, &rates).expect("projected");
    ///
    /// assert_eq!(table.period_labels(), vec!["Year 1", "Year 2"]);
    /// ```
    #[must_use]
    pub fn period_labels(&self) -> Vec<String> {
        (1..=self.periods()).map(|period| format!("Year {period}")).collect()
    }
}

/// Returns `base * (1 + rate) ^ p` for `p` in `1..=periods`.
///
/// Each value is computed directly from its exponent, so no rounding error
/// accumulates across periods.
///
/// # Example
///
/// ```
/// use growth_projection::{GrowthRate, compound_series};
///
/// let rate = GrowthRate::new(0.03).expect("valid rate");
/// let series = compound_series(110_000.0, rate, 2);
///
/// assert_eq!(series.len(), 2);
/// assert!((series[0] - 113_300.0).abs() < 1e-6);
/// assert!((series[1] - 116_699.0).abs() < 1e-6);
/// ```
#[must_use]
pub fn compound_series(base: f64, rate: GrowthRate, periods: u32) -> Vec<f64> {
    let factor = rate.factor();
    (1..=periods)
        .map(|period| base * factor.powf(f64::from(period)))
        .collect()
}

/// Projects every entity over `periods` periods with freshly sampled rates.
///
/// Draws one rate per entity from `rate_range`, in entity order, then applies
/// [`project_with_rates`]. `periods = 0` yields one empty row per entity.
///
/// # Example
///
/// ```
/// use growth_projection::{RateRange, generate_initial_data, project};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let entities = generate_initial_data(&mut rng);
/// let table = project(&mut rng, &entities, 5, &RateRange::default());
///
/// assert_eq!(table.len(), 32);
/// assert_eq!(table.periods(), 5);
/// ```
pub fn project<R: Rng + ?Sized>(
    rng: &mut R,
    entities: &[Entity],
    periods: u32,
    rate_range: &RateRange,
) -> ProjectionTable {
    let rates = sample_rates(rng, rate_range, entities.len());
    debug!(
        entity_count = entities.len(),
        periods,
        rate_low = rate_range.low(),
        rate_high = rate_range.high(),
        "sampled growth rates"
    );
    ProjectionTable {
        past_periods: periods,
        future_periods: 0,
        rows: single_phase_rows(entities, periods, &rates),
    }
}

/// Projects every entity over `periods` periods using explicit rates.
///
/// `rates` pairs with `entities` by position.
///
/// # Errors
///
/// Returns [`ProjectionError::InvalidConfiguration`] when the number of rates
/// differs from the number of entities.
pub fn project_with_rates(
    entities: &[Entity],
    periods: u32,
    rates: &[GrowthRate],
) -> Result<ProjectionTable, ProjectionError> {
    ensure_rate_count("past", entities.len(), rates.len())?;
    Ok(ProjectionTable {
        past_periods: periods,
        future_periods: 0,
        rows: single_phase_rows(entities, periods, rates),
    })
}

/// Projects a past phase and then forecasts a future phase.
///
/// Validates the configuration first, then draws one past rate per entity
/// followed by one future rate per entity. The future phase compounds from
/// each entity's last past value using a single fixed future rate.
///
/// # Errors
///
/// Returns [`ProjectionError::InvalidConfiguration`] when `past_periods` is
/// zero (the anchor value would be undefined) or when the total number of
/// periods overflows.
///
/// # Example
///
/// ```
/// use growth_projection::{RateRange, generate_initial_data, project_with_forecast};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let entities = generate_initial_data(&mut rng);
/// let range = RateRange::default();
/// let table = project_with_forecast(&mut rng, &entities, 5, 3, &range, &range)
///     .expect("valid configuration");
///
/// assert_eq!(table.periods(), 8);
/// ```
pub fn project_with_forecast<R: Rng + ?Sized>(
    rng: &mut R,
    entities: &[Entity],
    past_periods: u32,
    future_periods: u32,
    past_rate_range: &RateRange,
    future_rate_range: &RateRange,
) -> Result<ProjectionTable, ProjectionError> {
    validate_forecast_periods(past_periods, future_periods)?;

    let past_rates = sample_rates(rng, past_rate_range, entities.len());
    let future_rates = sample_rates(rng, future_rate_range, entities.len());
    debug!(
        entity_count = entities.len(),
        past_periods,
        future_periods,
        "sampled past and future growth rates"
    );

    forecast_with_rates(
        entities,
        past_periods,
        future_periods,
        &past_rates,
        &future_rates,
    )
}

/// Projects a past phase and forecasts a future phase using explicit rates.
///
/// # Errors
///
/// Returns [`ProjectionError::InvalidConfiguration`] when `past_periods` is
/// zero, when the total number of periods overflows, or when either rate
/// list differs in length from `entities`.
pub fn forecast_with_rates(
    entities: &[Entity],
    past_periods: u32,
    future_periods: u32,
    past_rates: &[GrowthRate],
    future_rates: &[GrowthRate],
) -> Result<ProjectionTable, ProjectionError> {
    validate_forecast_periods(past_periods, future_periods)?;
    ensure_rate_count("past", entities.len(), past_rates.len())?;
    ensure_rate_count("future", entities.len(), future_rates.len())?;

    let rows = entities
        .iter()
        .zip(past_rates.iter().zip(future_rates))
        .map(|(entity, (past_rate, future_rate))| {
            forecast_row(entity, past_periods, future_periods, *past_rate, *future_rate)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProjectionTable {
        past_periods,
        future_periods,
        rows,
    })
}

fn single_phase_rows(entities: &[Entity], periods: u32, rates: &[GrowthRate]) -> Vec<ProjectionRow> {
    entities
        .iter()
        .zip(rates)
        .map(|(entity, rate)| ProjectionRow {
            name: entity.name.clone(),
            initial_count: entity.initial_count,
            past_rate: *rate,
            future_rate: None,
            counts: compound_series(f64::from(entity.initial_count), *rate, periods),
        })
        .collect()
}

fn forecast_row(
    entity: &Entity,
    past_periods: u32,
    future_periods: u32,
    past_rate: GrowthRate,
    future_rate: GrowthRate,
) -> Result<ProjectionRow, ProjectionError> {
    let mut counts = compound_series(f64::from(entity.initial_count), past_rate, past_periods);
    let anchor = counts.last().copied().ok_or_else(anchor_undefined)?;
    counts.extend(compound_series(anchor, future_rate, future_periods));

    Ok(ProjectionRow {
        name: entity.name.clone(),
        initial_count: entity.initial_count,
        past_rate,
        future_rate: Some(future_rate),
        counts,
    })
}

fn validate_forecast_periods(past_periods: u32, future_periods: u32) -> Result<(), ProjectionError> {
    if past_periods == 0 {
        return Err(anchor_undefined());
    }
    if past_periods.checked_add(future_periods).is_none() {
        return Err(ProjectionError::invalid(format!(
            "{past_periods} past and {future_periods} future periods exceed the supported total"
        )));
    }
    Ok(())
}

fn ensure_rate_count(phase: &str, entities: usize, rates: usize) -> Result<(), ProjectionError> {
    if entities == rates {
        return Ok(());
    }
    Err(ProjectionError::invalid(format!(
        "expected {entities} {phase} rates, got {rates}"
    )))
}

fn anchor_undefined() -> ProjectionError {
    ProjectionError::invalid("anchor undefined when past_periods = 0")
}
