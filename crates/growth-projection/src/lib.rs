//! Deterministic account growth projections for the Mexican states.
//!
//! This crate generates a synthetic starting account count for each of the
//! 32 Mexican states, projects exponential growth over a number of years, and
//! optionally forecasts further years from the last simulated value. The
//! random source is always supplied by the caller, so a seeded RNG reproduces
//! a run exactly.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Generating initial data from the fixed state catalogue
//! - Single-phase closed-form growth projections
//! - Two-phase projections that forecast from the last past value
//! - Selecting series to chart, with an explicit empty-selection state
//! - Rendering reports as plain text or JSON
//!
//! # Example
//!
//! ```
//! use growth_projection::{
//!     RateRange, default_selection, generate_initial_data, project, select_series,
//! };
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(2024);
//! let entities = generate_initial_data(&mut rng);
//! let table = project(&mut rng, &entities, 5, &RateRange::default());
//!
//! let selected = default_selection(&table);
//! let series = select_series(&table, &selected).expect("non-empty selection");
//!
//! assert_eq!(table.len(), 32);
//! assert_eq!(series.len(), 5);
//! ```

mod atomic_io;
mod catalogue;
pub mod cli;
mod entity;
mod error;
mod generator;
mod projection;
mod rates;
mod report;
mod selection;

pub use atomic_io::write_report_file;
pub use catalogue::{
    DEFAULT_SELECTION_SIZE, MAP_EMBED_URL, STATE_COUNT, STATE_NAMES, is_catalogue_state,
};
pub use entity::{Entity, InitialCountRange};
pub use error::{ProjectionError, ReportError, SelectionError};
pub use generator::{generate_initial_data, generate_with_range};
pub use projection::{
    ProjectionRow, ProjectionTable, compound_series, forecast_with_rates, project,
    project_with_forecast, project_with_rates,
};
pub use rates::{GrowthRate, RateRange, sample_rates};
pub use report::ProjectionReport;
pub use selection::{
    ChartOutcome, ChartSeries, EMPTY_SELECTION_WARNING, default_selection, select_series,
};
