//! Brute-force search over (free-fall time, burn time) for a soft touchdown.
//!
//! The powered height and speed are transcendental in the burn time, so the boundary
//! conditions are solved by scanning a fixed grid. The outer scan walks free-fall times
//! until free fall alone would carry the lander past the surface; the inner scan walks
//! burn times up to the configured maximum or until the propellant would run out. The
//! first candidate meeting both the height and touchdown-speed tests ends the search.

use lander_core::grid;
use lander_kinematics::{DescentParameters, InputError, KinematicsError};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Step sizes, bounds and tolerances of the grid search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// First free-fall duration tried (s).
    pub fall_start_s: f64,
    /// Free-fall grid spacing (s).
    pub fall_step_s: f64,
    pub burn_min_s: f64,
    pub burn_max_s: f64,
    /// Burn-time grid spacing (s).
    pub burn_step_s: f64,
    /// Maximum |landed height - start height| (m).
    pub height_tolerance_m: f64,
    /// Touchdown speed window, positive downward (m/s).
    pub speed_min_m_s: f64,
    pub speed_max_m_s: f64,
    /// Upper bound on scanned grid cells before the search gives up.
    pub max_evaluations: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fall_start_s: 1.0,
            fall_step_s: 0.001,
            burn_min_s: 0.5,
            burn_max_s: 10.0,
            burn_step_s: 0.05,
            height_tolerance_m: 0.5,
            speed_min_m_s: 0.0,
            speed_max_m_s: 3.0,
            max_evaluations: 100_000_000,
        }
    }
}

impl SearchConfig {
    /// Reject grids that are empty, inverted, or would never advance.
    pub fn validate(&self) -> Result<(), SolveError> {
        let non_negative = [
            ("fall_start_s", self.fall_start_s),
            ("burn_min_s", self.burn_min_s),
            ("height_tolerance_m", self.height_tolerance_m),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SolveError::InvalidSearch { field, value });
            }
        }
        let positive = [
            ("fall_step_s", self.fall_step_s),
            ("burn_step_s", self.burn_step_s),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SolveError::InvalidSearch { field, value });
            }
        }
        if !self.burn_max_s.is_finite() || self.burn_max_s < self.burn_min_s {
            return Err(SolveError::InvalidSearch {
                field: "burn_max_s",
                value: self.burn_max_s,
            });
        }
        if !self.speed_min_m_s.is_finite() {
            return Err(SolveError::InvalidSearch {
                field: "speed_min_m_s",
                value: self.speed_min_m_s,
            });
        }
        if !self.speed_max_m_s.is_finite() || self.speed_max_m_s < self.speed_min_m_s {
            return Err(SolveError::InvalidSearch {
                field: "speed_max_m_s",
                value: self.speed_max_m_s,
            });
        }
        if self.max_evaluations == 0 {
            return Err(SolveError::InvalidSearch {
                field: "max_evaluations",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Acceptance test for one evaluated candidate.
    pub fn accepts(&self, start_height_m: f64, landed_height_m: f64, speed_m_s: f64) -> bool {
        (landed_height_m - start_height_m).abs() <= self.height_tolerance_m
            && (self.speed_min_m_s..=self.speed_max_m_s).contains(&speed_m_s)
    }
}

/// Accepted descent profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentSolution {
    pub fall_time_s: f64,
    pub burn_time_s: f64,
    /// Speed at the end of the burn, from the evaluation that passed the acceptance test.
    pub touchdown_speed_m_s: f64,
    /// Free-fall plus powered distance descended (m).
    pub landed_height_m: f64,
    /// Grid cells scanned before acceptance, including ones rejected by the model.
    pub evaluations: u64,
}

impl DescentSolution {
    pub fn total_time_s(&self) -> f64 {
        self.fall_time_s + self.burn_time_s
    }
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("invalid search setting `{field}` = {value}")]
    InvalidSearch { field: &'static str, value: f64 },
    #[error("no feasible descent profile after {evaluations} evaluations")]
    NoFeasibleProfile { evaluations: u64 },
    #[error("search stopped after exhausting its budget of {evaluations} evaluations")]
    EvaluationBudgetExhausted { evaluations: u64 },
}

struct Candidate {
    landed_height_m: f64,
    speed_m_s: f64,
}

fn evaluate(
    params: &DescentParameters,
    fall_height_m: f64,
    fall_time: f64,
    burn_time: f64,
) -> Result<Candidate, KinematicsError> {
    let powered_height = params.powered_height(fall_time, burn_time)?;
    let speed = params.powered_speed(fall_time, burn_time)?;
    Ok(Candidate {
        landed_height_m: fall_height_m + powered_height,
        speed_m_s: speed,
    })
}

/// Scan the (fall, burn) grid and return the first profile that lands softly.
///
/// Ties resolve to the earliest free-fall time, then the earliest burn time.
pub fn solve(
    params: &DescentParameters,
    config: &SearchConfig,
) -> Result<DescentSolution, SolveError> {
    config.validate()?;

    let start_height = params.start_height_m();
    let burn_points = grid::count(config.burn_min_s, config.burn_max_s, config.burn_step_s);
    info!(
        start_speed_m_s = params.start_speed_m_s(),
        start_height_m = start_height,
        burn_points,
        "starting descent search"
    );
    debug!(
        burnout_time_s = params.burnout_time(),
        burn_max_s = config.burn_max_s,
        "burn scan bounds"
    );

    let mut evaluations: u64 = 0;
    for i in 0_u64.. {
        let fall_time = grid::point(config.fall_start_s, config.fall_step_s, i);
        let fall_height = params.free_fall_height(fall_time);
        if fall_height > start_height {
            if i == 0 {
                debug!(
                    fall_time_s = fall_time,
                    fall_height_m = fall_height,
                    "first free-fall sample already passes the surface"
                );
            }
            break;
        }
        if evaluations >= config.max_evaluations {
            return Err(budget_exhausted(evaluations));
        }

        for j in 0..burn_points {
            let burn_time = grid::point(config.burn_min_s, config.burn_step_s, j);
            if evaluations >= config.max_evaluations {
                return Err(budget_exhausted(evaluations));
            }
            // Rejected cells count too, so rows that end at burnout still spend budget.
            evaluations += 1;
            let candidate = match evaluate(params, fall_height, fall_time, burn_time) {
                Ok(candidate) => candidate,
                Err(err @ KinematicsError::PropellantExhausted { .. }) => {
                    trace!(%err, "burn scan reached burnout");
                    break;
                }
                Err(err) => {
                    trace!(%err, "skipping candidate");
                    continue;
                }
            };

            if config.accepts(start_height, candidate.landed_height_m, candidate.speed_m_s) {
                let solution = DescentSolution {
                    fall_time_s: fall_time,
                    burn_time_s: burn_time,
                    touchdown_speed_m_s: candidate.speed_m_s,
                    landed_height_m: candidate.landed_height_m,
                    evaluations,
                };
                info!(
                    fall_time_s = solution.fall_time_s,
                    burn_time_s = solution.burn_time_s,
                    touchdown_speed_m_s = solution.touchdown_speed_m_s,
                    evaluations,
                    "descent profile accepted"
                );
                return Ok(solution);
            }
        }
    }

    warn!(evaluations, "no feasible descent profile");
    Err(SolveError::NoFeasibleProfile { evaluations })
}

fn budget_exhausted(evaluations: u64) -> SolveError {
    warn!(evaluations, "descent search budget exhausted");
    SolveError::EvaluationBudgetExhausted { evaluations }
}
