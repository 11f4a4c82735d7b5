//! Display curves sampled along a solved descent.

use lander_core::grid;
use lander_kinematics::{DescentParameters, KinematicsError};
use thiserror::Error;

use crate::search::DescentSolution;

/// Mission-time window and spacing of the sampled curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRequest {
    pub start_s: f64,
    pub end_s: f64,
    pub step_s: f64,
}

impl SampleRequest {
    /// Whole descent, from release to touchdown.
    pub fn full(solution: &DescentSolution, step_s: f64) -> Self {
        Self {
            start_s: 0.0,
            end_s: solution.total_time_s(),
            step_s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub time_s: f64,
    pub value: f64,
}

/// One quantity split at the ignition instant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseSeries {
    pub free_fall: Vec<SeriesPoint>,
    pub powered: Vec<SeriesPoint>,
}

impl PhaseSeries {
    /// Both phases in time order.
    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint> {
        self.free_fall.iter().chain(self.powered.iter())
    }

    pub fn len(&self) -> usize {
        self.free_fall.len() + self.powered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Speed, altitude above the surface, and net acceleration over mission time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectorySamples {
    pub speed: PhaseSeries,
    pub altitude: PhaseSeries,
    pub acceleration: PhaseSeries,
}

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("sample step must be positive and finite, got {0} s")]
    InvalidStep(f64),
    #[error("sample window [{start_s}, {end_s}] s is empty, negative or not finite")]
    InvalidWindow { start_s: f64, end_s: f64 },
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
}

/// Evaluate the model along the solved profile.
///
/// Free-fall points use mission time directly; powered points run the burn clock from
/// ignition, so the ignition instant appears once in each phase. Points outside
/// `[start_s, end_s]` are dropped. A burn ending exactly at burnout samples up to, but
/// not including, the empty-tank instant.
pub fn sample(
    params: &DescentParameters,
    solution: &DescentSolution,
    request: &SampleRequest,
) -> Result<TrajectorySamples, SampleError> {
    if !request.step_s.is_finite() || request.step_s <= 0.0 {
        return Err(SampleError::InvalidStep(request.step_s));
    }
    if !request.start_s.is_finite()
        || !request.end_s.is_finite()
        || request.start_s < 0.0
        || request.end_s < request.start_s
    {
        return Err(SampleError::InvalidWindow {
            start_s: request.start_s,
            end_s: request.end_s,
        });
    }

    let start_height = params.start_height_m();
    let gravity = params.gravity_m_s2();
    let mut samples = TrajectorySamples::default();

    let fall_end = request.end_s.min(solution.fall_time_s);
    for k in 0..grid::count(request.start_s, fall_end, request.step_s) {
        let t = grid::point(request.start_s, request.step_s, k);
        samples.speed.free_fall.push(SeriesPoint {
            time_s: t,
            value: params.free_fall_speed(t),
        });
        samples.altitude.free_fall.push(SeriesPoint {
            time_s: t,
            value: start_height - params.free_fall_height(t),
        });
        samples.acceleration.free_fall.push(SeriesPoint {
            time_s: t,
            value: gravity,
        });
    }

    let fall_height = params.free_fall_height(solution.fall_time_s);
    for k in 0..grid::count(0.0, solution.burn_time_s, request.step_s) {
        let tau = grid::point(0.0, request.step_s, k);
        let t = solution.fall_time_s + tau;
        if t < request.start_s {
            continue;
        }
        if t > request.end_s {
            break;
        }
        let speed = match params.powered_speed(solution.fall_time_s, tau) {
            Ok(speed) => speed,
            Err(KinematicsError::PropellantExhausted { .. }) => break,
            Err(err) => return Err(err.into()),
        };
        let height = params.powered_height(solution.fall_time_s, tau)?;
        let acceleration = params.powered_acceleration(tau)?;
        samples.speed.powered.push(SeriesPoint {
            time_s: t,
            value: speed,
        });
        samples.altitude.powered.push(SeriesPoint {
            time_s: t,
            value: start_height - (fall_height + height),
        });
        samples.acceleration.powered.push(SeriesPoint {
            time_s: t,
            value: acceleration,
        });
    }

    Ok(samples)
}
