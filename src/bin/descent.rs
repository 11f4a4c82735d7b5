use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use lander_descent::config::{ScenarioConfig, load_scenario};
use lander_descent::common::constants::LUNAR_GRAVITY_M_S2;
use lander_descent::common::defaults::SAMPLE_STEP_S;
use lander_descent::export::report::write_report;
use lander_descent::export::samples::writer_for_path;
use lander_descent::input::read_initial_state;
use lander_descent::run::{ReportLabels, build_report, run, write_samples};
use lander_descent::solver::scenario::from_config;
use lander_descent::solver::{DescentParameters, SearchConfig, SolveError, Vehicle};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Solve the free-fall and burn durations of a soft lander touchdown"
)]
struct Cli {
    /// Initial vertical speed in m/s, positive downward (read from stdin when omitted)
    #[arg(long, allow_hyphen_values = true)]
    start_speed: Option<f64>,

    /// Initial height above the surface in m (read from stdin when omitted)
    #[arg(long, allow_hyphen_values = true)]
    start_height: Option<f64>,

    /// Scenario file: YAML list, single TOML file, or directory of TOML files
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Scenario name inside the file (defaults to the first entry)
    #[arg(long)]
    name: Option<String>,

    /// Time step of the sampled curves in seconds
    #[arg(long, default_value_t = SAMPLE_STEP_S)]
    sample_step: f64,

    /// Write sampled speed/altitude/acceleration curves as CSV (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write a JSON report of the solved profile
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let scenario = match &cli.scenario {
        Some(path) => Some(
            load_scenario(path, cli.name.as_deref())
                .with_context(|| format!("loading scenario from {}", path.display()))?,
        ),
        None => None,
    };

    let (start_speed, start_height) = initial_state(&cli, scenario.as_ref())?;
    let (params, search) = match &scenario {
        Some(cfg) => from_config(cfg, start_speed, start_height)?,
        None => default_inputs(start_speed, start_height)?,
    };

    let outcome = run(&params, &search, cli.sample_step)?;
    let summary = &outcome.summary;

    let csv_to_stdout = cli.csv.as_deref() == Some(Path::new("-"));
    let mut out: Box<dyn Write> = if csv_to_stdout {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    let scenario_name = scenario
        .as_ref()
        .map(|s| s.name.as_str())
        .unwrap_or("default");
    writeln!(out, "=== Descent Profile ===")?;
    writeln!(out, "Scenario        : {}", scenario_name)?;
    writeln!(
        out,
        "Start           : h = {:.2} m, v = {:.3} m/s",
        params.start_height_m(),
        params.start_speed_m_s()
    )?;
    writeln!(
        out,
        "Free fall       : t = {:.3} s, ignition at h = {:.2} m, v = {:.3} m/s",
        summary.fall_time_s, summary.ignition_altitude_m, summary.ignition_speed_m_s
    )?;
    writeln!(
        out,
        "Burn            : t = {:.2} s, propellant used = {:.1} kg ({:.1} kg left)",
        summary.burn_time_s, summary.propellant_used_kg, summary.propellant_remaining_kg
    )?;
    writeln!(
        out,
        "Delta-v         : {:.2} m/s used, {:.2} m/s left (Isp {:.1} s)",
        summary.delta_v_used_m_s, summary.delta_v_remaining_m_s, summary.specific_impulse_s
    )?;
    writeln!(
        out,
        "Touchdown speed : {:.3} m/s (height error {:+.3} m, total time {:.3} s)",
        summary.touchdown_speed_m_s, summary.height_error_m, summary.total_time_s
    )?;

    if let Some(path) = &cli.csv {
        let mut writer = writer_for_path(path)
            .with_context(|| format!("opening CSV output {}", path.display()))?;
        write_samples(writer.as_mut(), &outcome.samples)?;
        info!(path = %path.display(), "wrote descent samples");
    }

    if let Some(path) = &cli.json {
        let labels = ReportLabels {
            scenario: scenario_name,
            body: scenario
                .as_ref()
                .map(|s| s.body.name.as_str())
                .unwrap_or("MOON"),
            generated_utc: chrono::Utc::now().to_rfc3339(),
        };
        let report = build_report(&params, &outcome, labels);
        write_report(path, &report)
            .with_context(|| format!("writing JSON report {}", path.display()))?;
        info!(path = %path.display(), "wrote descent report");
    }

    Ok(())
}

/// Flags take precedence over the scenario's initial state. Stdin is read when neither has one.
fn initial_state(
    cli: &Cli,
    scenario: Option<&ScenarioConfig>,
) -> anyhow::Result<(Option<f64>, Option<f64>)> {
    let from_scenario = scenario.and_then(|s| s.initial).is_some();
    if (cli.start_speed.is_some() && cli.start_height.is_some()) || from_scenario {
        return Ok((cli.start_speed, cli.start_height));
    }
    let state = read_initial_state(io::stdin().lock()).context("reading initial state")?;
    Ok((
        cli.start_speed.or(Some(state.start_speed_m_s)),
        cli.start_height.or(Some(state.start_height_m)),
    ))
}

fn default_inputs(
    start_speed: Option<f64>,
    start_height: Option<f64>,
) -> anyhow::Result<(DescentParameters, SearchConfig)> {
    let speed = start_speed.context("start speed not provided")?;
    let height = start_height.context("start height not provided")?;
    let params = DescentParameters::new(Vehicle::default(), LUNAR_GRAVITY_M_S2, speed, height)
        .map_err(SolveError::from)?;
    Ok((params, SearchConfig::default()))
}
