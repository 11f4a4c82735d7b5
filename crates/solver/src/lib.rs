//! Descent solver façade: grid search, trajectory sampling and run summaries.

pub mod sampling;
pub mod scenario;
pub mod search;
pub mod summary;

pub use lander_kinematics::{DescentParameters, InputError, KinematicsError};
pub use lander_propulsion::Vehicle;
pub use sampling::{PhaseSeries, SampleError, SampleRequest, SeriesPoint, TrajectorySamples};
pub use scenario::ScenarioError;
pub use search::{DescentSolution, SearchConfig, SolveError, solve};
pub use summary::DescentSummary;
