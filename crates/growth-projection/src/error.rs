//! Error types for the growth-projection crate.
//!
//! Configuration problems are reported before any entropy is drawn, chart
//! selection problems are recoverable and user-facing, and report errors cover
//! serialisation and file output.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while validating or running a projection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// The requested projection cannot be computed as configured.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the rejected setting.
        message: String,
    },
}

impl ProjectionError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

/// Errors raised while choosing which series to chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// No entity was selected, so there is nothing to render.
    #[error("no states selected; select at least one state to chart")]
    EmptySelection,

    /// A selected name does not appear in the projection table.
    #[error("state '{name}' is not in the projection table")]
    UnknownEntity {
        /// The unrecognised name.
        name: String,
    },
}

/// Errors raised while serialising or writing a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// The report could not be serialised to JSON.
    #[error("failed to serialise report: {message}")]
    SerializeError {
        /// Description of the serialisation failure.
        message: String,
    },

    /// The report file could not be written.
    #[error("failed to write report to '{path}': {message}")]
    WriteError {
        /// Path of the report file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
