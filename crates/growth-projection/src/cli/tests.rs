//! Unit tests for the projection CLI helpers.

use camino::Utf8PathBuf;
use cap_std::{ambient_authority, fs::Dir};
use rstest::{fixture, rstest};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::catalogue::STATE_COUNT;
use crate::error::ReportError;

#[fixture]
fn settings() -> ProjectionSettings {
    ProjectionSettings {
        seed: Some(2026),
        past_periods: 5,
        future_periods: None,
        rate_min: None,
        rate_max: None,
        future_rate_min: None,
        future_rate_max: None,
        states: None,
        format: None,
        output: None,
    }
}

fn scratch_report_path(file_name: &str) -> Utf8PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = Utf8PathBuf::from("target")
        .join("growth-projection-cli")
        .join(format!("run-{}-{counter}", std::process::id()));
    let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open cwd");
    root.create_dir_all(&dir).expect("create scratch dir");
    dir.join(file_name)
}

#[rstest]
fn plan_defaults_to_single_phase(settings: ProjectionSettings) {
    let plan = RunPlan::from_settings(&settings).expect("valid settings");

    assert_eq!(plan.seed(), Some(2026));
    assert_eq!(plan.past_periods(), 5);
    assert_eq!(plan.phase(), Phase::Single);
    assert_eq!(plan.format(), OutputFormat::Text);
    assert!(plan.states().is_none());
    assert!(plan.output().is_none());
}

#[rstest]
fn plan_rejects_forecast_without_past_periods(mut settings: ProjectionSettings) {
    settings.past_periods = 0;
    settings.future_periods = Some(3);

    let err = RunPlan::from_settings(&settings).expect_err("expected error");

    assert_eq!(
        err,
        CliError::Projection {
            source: ProjectionError::InvalidConfiguration {
                message: "anchor undefined when past_periods = 0".to_owned(),
            },
        }
    );
}

#[rstest]
fn plan_allows_zero_periods_without_forecast(mut settings: ProjectionSettings) {
    settings.past_periods = 0;

    let plan = RunPlan::from_settings(&settings).expect("valid settings");

    assert_eq!(plan.past_periods(), 0);
}

#[rstest]
#[case(Some(0.05), Some(0.01))]
#[case(Some(-1.5), None)]
#[case(None, Some(f64::NAN))]
fn plan_rejects_invalid_past_rates(
    mut settings: ProjectionSettings,
    #[case] rate_min: Option<f64>,
    #[case] rate_max: Option<f64>,
) {
    settings.rate_min = rate_min;
    settings.rate_max = rate_max;

    let err = RunPlan::from_settings(&settings).expect_err("expected error");

    assert!(matches!(err, CliError::Projection { .. }));
}

#[rstest]
fn plan_rejects_invalid_future_rates(mut settings: ProjectionSettings) {
    settings.future_periods = Some(2);
    settings.future_rate_min = Some(0.2);
    settings.future_rate_max = Some(0.1);

    let err = RunPlan::from_settings(&settings).expect_err("expected error");

    assert!(matches!(err, CliError::Projection { .. }));
}

#[rstest]
fn plan_parses_state_list(mut settings: ProjectionSettings) {
    settings.future_periods = Some(3);
    settings.states = Some(" Yucatán, Colima ,,".to_owned());

    let plan = RunPlan::from_settings(&settings).expect("valid settings");

    assert_eq!(
        plan.states(),
        Some(["Yucatán".to_owned(), "Colima".to_owned()].as_slice())
    );
}

#[rstest]
fn plan_rejects_unknown_states(mut settings: ProjectionSettings) {
    settings.future_periods = Some(3);
    settings.states = Some("Colima,Texas".to_owned());

    let err = RunPlan::from_settings(&settings).expect_err("expected error");

    assert_eq!(
        err,
        CliError::Selection {
            source: SelectionError::UnknownEntity {
                name: "Texas".to_owned(),
            },
        }
    );
}

#[rstest]
#[case(Some("Zacatecas".to_owned()))]
#[case(Some(String::new()))]
fn plan_rejects_states_for_single_phase(
    mut settings: ProjectionSettings,
    #[case] states: Option<String>,
) {
    settings.states = states;

    let err = RunPlan::from_settings(&settings).expect_err("expected error");

    assert_eq!(err, CliError::SelectionWithoutForecast);
}

#[rstest]
fn single_phase_charts_first_five_states(settings: ProjectionSettings) {
    let plan = RunPlan::from_settings(&settings).expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    let report = run_projection(&plan, &mut rng).expect("run succeeds");

    let ChartOutcome::Series { series } = report.chart() else {
        panic!("expected series");
    };
    assert_eq!(
        series.iter().map(|line| line.name.as_str()).collect::<Vec<_>>(),
        vec![
            "Aguascalientes",
            "Baja California",
            "Baja California Sur",
            "Campeche",
            "Chiapas"
        ]
    );
}

#[rstest]
#[case(MAX_PERIODS + 1, None)]
#[case(4_000_000_000, None)]
#[case(MAX_PERIODS, Some(1))]
#[case(5, Some(u32::MAX))]
fn plan_rejects_too_many_periods(
    mut settings: ProjectionSettings,
    #[case] past_periods: u32,
    #[case] future_periods: Option<u32>,
) {
    settings.past_periods = past_periods;
    settings.future_periods = future_periods;

    let err = RunPlan::from_settings(&settings).expect_err("expected error");

    let CliError::Projection {
        source: ProjectionError::InvalidConfiguration { message },
    } = &err
    else {
        panic!("expected InvalidConfiguration, got {err:?}");
    };
    assert!(message.starts_with("at most 1000 periods"), "message: {message}");
}

#[rstest]
fn plan_accepts_the_period_limit(mut settings: ProjectionSettings) {
    settings.past_periods = MAX_PERIODS - 2;
    settings.future_periods = Some(2);

    let plan = RunPlan::from_settings(&settings).expect("valid settings");

    assert_eq!(plan.past_periods(), MAX_PERIODS - 2);
}

#[rstest]
#[case("text", OutputFormat::Text)]
#[case("JSON", OutputFormat::Json)]
#[case(" json ", OutputFormat::Json)]
fn format_names_parse(#[case] value: &str, #[case] expected: OutputFormat) {
    assert_eq!(value.parse::<OutputFormat>(), Ok(expected));
}

#[rstest]
fn plan_rejects_unknown_format(mut settings: ProjectionSettings) {
    settings.format = Some("yaml".to_owned());

    let err = RunPlan::from_settings(&settings).expect_err("expected error");

    assert_eq!(
        err,
        CliError::InvalidFormat {
            value: "yaml".to_owned(),
        }
    );
}

#[rstest]
fn run_projection_produces_full_table(settings: ProjectionSettings) {
    let plan = RunPlan::from_settings(&settings).expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let report = run_projection(&plan, &mut rng).expect("run succeeds");

    assert_eq!(report.initial_data().len(), STATE_COUNT);
    assert_eq!(report.projection().len(), STATE_COUNT);
    assert_eq!(report.projection().periods(), 5);
    let ChartOutcome::Series { series } = report.chart() else {
        panic!("expected series");
    };
    assert_eq!(series.len(), 5);
}

#[rstest]
fn run_projection_forecasts_when_requested(mut settings: ProjectionSettings) {
    settings.future_periods = Some(3);
    settings.states = Some("Sonora".to_owned());
    let plan = RunPlan::from_settings(&settings).expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let report = run_projection(&plan, &mut rng).expect("run succeeds");

    assert_eq!(report.projection().periods(), 8);
    let ChartOutcome::Series { series } = report.chart() else {
        panic!("expected series");
    };
    assert_eq!(
        series.iter().map(|line| line.name.as_str()).collect::<Vec<_>>(),
        vec!["Sonora"]
    );
}

#[rstest]
fn run_projection_warns_on_empty_selection(mut settings: ProjectionSettings) {
    settings.future_periods = Some(3);
    settings.states = Some(String::new());
    let plan = RunPlan::from_settings(&settings).expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let report = run_projection(&plan, &mut rng).expect("run succeeds");

    assert!(!report.chart().has_series());
}

#[rstest]
fn execute_is_reproducible_for_a_seed(settings: ProjectionSettings) {
    let plan = RunPlan::from_settings(&settings).expect("valid settings");

    let first = execute(&plan).expect("first run");
    let second = execute(&plan).expect("second run");

    assert_eq!(first.seed, 2026);
    assert_eq!(first, second);
    assert!(first.rendered.contains("Seed: 2026"));
}

#[rstest]
fn execute_draws_a_seed_when_missing(mut settings: ProjectionSettings) {
    settings.seed = None;
    let plan = RunPlan::from_settings(&settings).expect("valid settings");

    let outcome = execute(&plan).expect("run succeeds");

    assert!(
        outcome
            .rendered
            .contains(&format!("Seed: {}", outcome.seed))
    );
}

#[rstest]
fn execute_writes_json_report(mut settings: ProjectionSettings) {
    let path = scratch_report_path("report.json");
    settings.format = Some("json".to_owned());
    settings.output = Some(PathBuf::from(path.as_str()));
    let plan = RunPlan::from_settings(&settings).expect("valid settings");

    let outcome = execute(&plan).expect("run succeeds");

    assert_eq!(outcome.written_to.as_ref(), Some(&path));
    let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open cwd");
    let contents = root.read_to_string(&path).expect("read report");
    assert_eq!(contents, outcome.rendered);
    let value: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
    assert_eq!(value["seed"], 2026);
    assert_eq!(
        success_message(&outcome),
        format!("Wrote growth projection (seed=2026) to {path}")
    );
}

#[rstest]
fn execute_reports_write_failures(mut settings: ProjectionSettings) {
    let path = scratch_report_path("missing").join("nested").join("report.txt");
    settings.output = Some(PathBuf::from(path.as_str()));
    let plan = RunPlan::from_settings(&settings).expect("valid settings");

    let err = execute(&plan).expect_err("expected write failure");

    assert!(matches!(
        err,
        CliError::Report {
            source: ReportError::WriteError { .. }
        }
    ));
}

#[test]
fn success_message_without_file_mentions_seed() {
    let outcome = RunOutcome {
        seed: 9,
        rendered: String::new(),
        written_to: None,
    };

    assert_eq!(
        success_message(&outcome),
        "Rendered growth projection (seed=9)"
    );
}
