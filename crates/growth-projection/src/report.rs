//! Report assembly and rendering.
//!
//! A [`ProjectionReport`] carries everything the dashboards display: the
//! initial table, the projection table, the chart content and the map link.
//! It renders as aligned plain-text tables or as JSON.

use std::fmt;

use serde::Serialize;

use crate::catalogue::MAP_EMBED_URL;
use crate::entity::Entity;
use crate::error::ReportError;
use crate::projection::ProjectionTable;
use crate::selection::ChartOutcome;

const SINGLE_PHASE_TITLE: &str = "Account growth simulation by state";
const FORECAST_TITLE: &str = "Account growth simulation and forecast by state";

const INITIAL_DATA_HELP: &str = "Initial data: every state starts with a random account count.";
const GROWTH_HELP: &str =
    "Growth: random growth rates project how the account count could evolve over several years.";
const SINGLE_PHASE_CHART_HELP: &str =
    "Chart: the projected growth is charted for the first five states.";
const FORECAST_CHART_HELP: &str = "Chart: the projected growth is charted for the selected states.";
const MAP_HELP: &str = "Map: an interactive map shows the geographic area of interest.";

/// Complete display content for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionReport {
    title: String,
    seed: Option<u64>,
    help: Vec<String>,
    initial_data: Vec<Entity>,
    period_labels: Vec<String>,
    projection: ProjectionTable,
    chart: ChartOutcome,
    map_url: String,
}

impl ProjectionReport {
    /// Assembles a report.
    ///
    /// The title and the chart help line reflect whether `projection`
    /// includes a forecast phase.
    #[must_use]
    pub fn new(initial_data: Vec<Entity>, projection: ProjectionTable, chart: ChartOutcome) -> Self {
        let (title, chart_help) = if projection.future_periods() > 0 {
            (FORECAST_TITLE, FORECAST_CHART_HELP)
        } else {
            (SINGLE_PHASE_TITLE, SINGLE_PHASE_CHART_HELP)
        };
        let help = [INITIAL_DATA_HELP, GROWTH_HELP, chart_help, MAP_HELP]
            .into_iter()
            .map(str::to_owned)
            .collect();
        Self {
            title: title.to_owned(),
            seed: None,
            help,
            initial_data,
            period_labels: projection.period_labels(),
            projection,
            chart,
            map_url: MAP_EMBED_URL.to_owned(),
        }
    }

    /// Records the seed that reproduces this report.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the report title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the seed, if one was recorded.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the initial dataset.
    #[must_use]
    pub fn initial_data(&self) -> &[Entity] {
        &self.initial_data
    }

    /// Returns the projection table.
    #[must_use]
    pub const fn projection(&self) -> &ProjectionTable {
        &self.projection
    }

    /// Returns the chart content.
    #[must_use]
    pub const fn chart(&self) -> &ChartOutcome {
        &self.chart
    }

    /// Renders the report as plain-text tables.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// Serialises the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::SerializeError`] if serialisation fails.
    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string_pretty(self).map_err(|err| ReportError::SerializeError {
            message: err.to_string(),
        })
    }

    fn write_initial_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<String> = self
            .initial_data
            .iter()
            .map(|entity| entity.initial_count.to_string())
            .collect();
        let header = ["Initial accounts".to_owned()];
        let rows: Vec<(&str, &[String])> = self
            .initial_data
            .iter()
            .zip(&counts)
            .map(|(entity, count)| (entity.name.as_str(), std::slice::from_ref(count)))
            .collect();
        write_table(f, &header, &rows)
    }

    fn write_projection_table(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted: Vec<Vec<String>> = self
            .projection
            .rows()
            .iter()
            .map(|row| row.counts().iter().map(|count| format!("{count:.2}")).collect())
            .collect();
        let rows: Vec<(&str, &[String])> = self
            .projection
            .rows()
            .iter()
            .zip(&formatted)
            .map(|(row, cells)| (row.name(), cells.as_slice()))
            .collect();
        write_table(f, &self.period_labels, &rows)?;
        if self.projection.future_periods() > 0 {
            writeln!(
                f,
                "Years after Year {} are forecast from the last simulated year.",
                self.projection.past_periods()
            )?;
        }
        Ok(())
    }

    fn write_chart(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.chart {
            ChartOutcome::Warning { message } => writeln!(f, "Warning: {message}"),
            ChartOutcome::Series { series } => {
                for line in series {
                    let values: Vec<String> =
                        line.values.iter().map(|value| format!("{value:.2}")).collect();
                    writeln!(f, "{}: {}", line.name, values.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ProjectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(seed) = self.seed {
            writeln!(f, "Seed: {seed}")?;
        }
        writeln!(f)?;

        writeln!(f, "Help")?;
        for line in &self.help {
            writeln!(f, "- {line}")?;
        }
        writeln!(f)?;

        writeln!(f, "Initial data")?;
        self.write_initial_table(f)?;
        writeln!(f)?;

        writeln!(f, "Projected accounts")?;
        self.write_projection_table(f)?;
        writeln!(f)?;

        writeln!(f, "Growth chart")?;
        self.write_chart(f)?;
        writeln!(f)?;

        writeln!(f, "Map: {}", self.map_url)
    }
}

/// Writes a table whose first column holds state names.
fn write_table(
    f: &mut fmt::Formatter<'_>,
    headers: &[String],
    rows: &[(&str, &[String])],
) -> fmt::Result {
    const NAME_HEADER: &str = "State";

    let name_width = rows
        .iter()
        .map(|(name, _)| name.chars().count())
        .chain(std::iter::once(NAME_HEADER.len()))
        .max()
        .unwrap_or_default();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter()
                .filter_map(|(_, cells)| cells.get(column))
                .map(String::len)
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    write!(f, "{NAME_HEADER:<name_width$}")?;
    for (header, width) in headers.iter().zip(&widths) {
        write!(f, "  {header:>width$}")?;
    }
    writeln!(f)?;

    for (name, cells) in rows {
        write!(f, "{name:<name_width$}")?;
        for (cell, width) in cells.iter().zip(&widths) {
            write!(f, "  {cell:>width$}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}
