//! End-to-end run of one descent: solve, summarize, sample, and shape the results for export.

use std::io::{self, Write};

use lander_export::report::DescentReport;
use lander_export::samples::{Record, write_header};
use lander_solver::sampling::{self, SampleRequest};
use lander_solver::{
    DescentParameters, DescentSolution, DescentSummary, KinematicsError, SampleError,
    SearchConfig, SolveError, TrajectorySamples,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Solve(#[from] SolveError),
    #[error("sampling failed: {0}")]
    Sample(#[from] SampleError),
    #[error("summary failed: {0}")]
    Summary(#[from] KinematicsError),
}

/// Everything produced by a successful run.
#[derive(Debug, Clone)]
pub struct DescentRun {
    pub solution: DescentSolution,
    pub summary: DescentSummary,
    pub samples: TrajectorySamples,
}

/// Solve the descent and sample its curves every `sample_step_s` seconds.
pub fn run(
    params: &DescentParameters,
    search: &SearchConfig,
    sample_step_s: f64,
) -> Result<DescentRun, RunError> {
    let solution = lander_solver::solve(params, search)?;
    let summary = DescentSummary::new(params, &solution)?;
    let request = SampleRequest::full(&solution, sample_step_s);
    let samples = sampling::sample(params, &solution, &request)?;
    debug!(
        free_fall = samples.speed.free_fall.len(),
        powered = samples.speed.powered.len(),
        step_s = sample_step_s,
        "sampled descent curves"
    );
    Ok(DescentRun {
        solution,
        summary,
        samples,
    })
}

/// Write the sampled curves as CSV, one row per sampled instant.
pub fn write_samples(writer: &mut dyn Write, samples: &TrajectorySamples) -> io::Result<()> {
    write_header(writer)?;
    let phases = [
        (
            "free_fall",
            &samples.speed.free_fall,
            &samples.altitude.free_fall,
            &samples.acceleration.free_fall,
        ),
        (
            "powered",
            &samples.speed.powered,
            &samples.altitude.powered,
            &samples.acceleration.powered,
        ),
    ];
    for (phase, speed, altitude, acceleration) in phases {
        for ((v, h), a) in speed.iter().zip(altitude).zip(acceleration) {
            Record {
                phase,
                time_s: v.time_s,
                speed_m_s: v.value,
                altitude_m: h.value,
                acceleration_m_s2: a.value,
            }
            .write_to(writer)?;
        }
    }
    writer.flush()
}

/// Labels attached to the JSON report.
#[derive(Debug, Clone)]
pub struct ReportLabels<'a> {
    pub scenario: &'a str,
    pub body: &'a str,
    pub generated_utc: String,
}

pub fn build_report(
    params: &DescentParameters,
    run: &DescentRun,
    labels: ReportLabels<'_>,
) -> DescentReport {
    let summary = &run.summary;
    DescentReport {
        scenario: labels.scenario.to_string(),
        vehicle: params.vehicle().name.clone(),
        body: labels.body.to_string(),
        generated_utc: labels.generated_utc,
        start_speed_m_s: params.start_speed_m_s(),
        start_height_m: params.start_height_m(),
        fall_time_s: summary.fall_time_s,
        burn_time_s: summary.burn_time_s,
        total_time_s: summary.total_time_s,
        ignition_altitude_m: summary.ignition_altitude_m,
        ignition_speed_m_s: summary.ignition_speed_m_s,
        touchdown_speed_m_s: summary.touchdown_speed_m_s,
        height_error_m: summary.height_error_m,
        propellant_used_kg: summary.propellant_used_kg,
        propellant_remaining_kg: summary.propellant_remaining_kg,
        final_mass_kg: summary.final_mass_kg,
        final_acceleration_m_s2: summary.final_acceleration_m_s2,
        delta_v_used_m_s: summary.delta_v_used_m_s,
        delta_v_remaining_m_s: summary.delta_v_remaining_m_s,
        specific_impulse_s: summary.specific_impulse_s,
        evaluations: run.solution.evaluations,
    }
}
