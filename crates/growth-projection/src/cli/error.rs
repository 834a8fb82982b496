//! Error types for the projection CLI.

use thiserror::Error;

use crate::error::{ProjectionError, ReportError, SelectionError};

/// Errors surfaced while resolving settings and running a projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// Settings could not be loaded from flags, environment or files.
    #[error("failed to load settings: {message}")]
    Settings {
        /// Loader error message.
        message: String,
    },
    /// The output format is not recognised.
    #[error("unsupported output format '{value}'; expected 'text' or 'json'")]
    InvalidFormat {
        /// Format value that was supplied.
        value: String,
    },
    /// A chart selection was given for a single-phase run, which always
    /// charts the first five states.
    #[error("--states requires --future-periods; single-phase runs chart the first five states")]
    SelectionWithoutForecast,
    /// The output path cannot be represented as UTF-8.
    #[error("output path is not valid UTF-8: {path}")]
    NonUtf8Path {
        /// Lossy rendering of the rejected path.
        path: String,
    },
    /// The projection configuration was rejected.
    #[error("projection error: {source}")]
    Projection {
        /// Underlying projection error.
        #[from]
        #[source]
        source: ProjectionError,
    },
    /// The chart selection was rejected.
    #[error("selection error: {source}")]
    Selection {
        /// Underlying selection error.
        #[from]
        #[source]
        source: SelectionError,
    },
    /// The report could not be rendered or written.
    #[error("report error: {source}")]
    Report {
        /// Underlying report error.
        #[from]
        #[source]
        source: ReportError,
    },
}
