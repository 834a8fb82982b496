//! Chart series selection.
//!
//! Picks the projection rows to chart. An empty selection is a user-facing
//! warning state, so callers receive [`SelectionError::EmptySelection`]
//! rather than an empty chart.

use serde::Serialize;
use tracing::warn;

use crate::catalogue::DEFAULT_SELECTION_SIZE;
use crate::error::SelectionError;
use crate::projection::{ProjectionRow, ProjectionTable};

/// Returns the names charted when no explicit choice was made: the first
/// five rows in catalogue order.
///
/// # Example
///
/// ```
/// use growth_projection::{RateRange, default_selection, generate_initial_data, project};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let entities = generate_initial_data(&mut rng);
/// let table = project(&mut rng, &entities, 5, &RateRange::default());
///
/// assert_eq!(
///     default_selection(&table),
///     vec!["Aguascalientes", "Baja California", "Baja California Sur", "Campeche", "Chiapas"]
/// );
/// ```
#[must_use]
pub fn default_selection(table: &ProjectionTable) -> Vec<String> {
    table
        .rows()
        .iter()
        .take(DEFAULT_SELECTION_SIZE)
        .map(|row| row.name().to_owned())
        .collect()
}

/// Filters `table` down to the rows named in `selected`.
///
/// Rows come back in table order regardless of the order of `selected`, and
/// duplicate names select a row once.
///
/// # Errors
///
/// Returns [`SelectionError::EmptySelection`] when `selected` is empty and
/// [`SelectionError::UnknownEntity`] when a name is not in the table.
pub fn select_series<'table, S: AsRef<str>>(
    table: &'table ProjectionTable,
    selected: &[S],
) -> Result<Vec<&'table ProjectionRow>, SelectionError> {
    if selected.is_empty() {
        return Err(SelectionError::EmptySelection);
    }
    if let Some(unknown) = selected
        .iter()
        .map(AsRef::as_ref)
        .find(|name| table.row(name).is_none())
    {
        return Err(SelectionError::UnknownEntity {
            name: unknown.to_owned(),
        });
    }

    Ok(table
        .rows()
        .iter()
        .filter(|row| selected.iter().any(|name| name.as_ref() == row.name()))
        .collect())
}

/// One charted line: an entity name and its value per period.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// Entity name used as the legend label.
    pub name: String,
    /// Projected counts, one per period.
    pub values: Vec<f64>,
}

impl From<&ProjectionRow> for ChartSeries {
    fn from(row: &ProjectionRow) -> Self {
        Self {
            name: row.name().to_owned(),
            values: row.counts().to_vec(),
        }
    }
}

/// Warning shown in place of a chart when nothing is selected.
pub const EMPTY_SELECTION_WARNING: &str = "Please select at least one state to chart.";

/// What the chart area should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ChartOutcome {
    /// Series to plot.
    Series {
        /// Selected series in table order.
        series: Vec<ChartSeries>,
    },
    /// Nothing was selected; show the warning instead of a chart.
    Warning {
        /// User-facing warning text.
        message: String,
    },
}

impl ChartOutcome {
    /// Resolves a selection into chart content.
    ///
    /// An empty selection becomes [`ChartOutcome::Warning`].
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::UnknownEntity`] when a name is not in the
    /// table.
    pub fn from_selection<S: AsRef<str>>(
        table: &ProjectionTable,
        selected: &[S],
    ) -> Result<Self, SelectionError> {
        match select_series(table, selected) {
            Ok(rows) => Ok(Self::Series {
                series: rows.into_iter().map(ChartSeries::from).collect(),
            }),
            Err(SelectionError::EmptySelection) => {
                warn!("no states selected; chart skipped");
                Ok(Self::Warning {
                    message: EMPTY_SELECTION_WARNING.to_owned(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Returns `true` if there are series to plot.
    #[must_use]
    pub const fn has_series(&self) -> bool {
        matches!(self, Self::Series { .. })
    }
}
