//! Growth projection CLI.
//!
//! Loads settings from flags, `GROWTH_PROJECTION_*` environment variables and
//! configuration files, then delegates to `growth_projection::cli` to run the
//! projection and emit the report.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use growth_projection::cli::{CliError, ProjectionSettings, RunPlan, execute, success_message};
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "growth projection failed");
            if let Err(write_err) = writeln!(io::stderr().lock(), "{err}") {
                drop(write_err);
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let settings = ProjectionSettings::load_from_iter(env::args_os()).map_err(|err| {
        CliError::Settings {
            message: err.to_string(),
        }
    })?;
    let plan = RunPlan::from_settings(&settings)?;
    let outcome = execute(&plan)?;

    let message = if outcome.written_to.is_some() {
        success_message(&outcome)
    } else {
        outcome.rendered
    };
    if let Err(err) = writeln!(io::stdout().lock(), "{message}") {
        drop(err);
    }
    Ok(())
}
