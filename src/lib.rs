//! Powered-descent solver for a lander.
//!
//! The physics and the grid search live in workspace crates; this library re-exports
//! them under one path and adds the pieces shared by the command-line front-ends:
//! parsing the initial state and running a scenario end to end.

pub mod input;
pub mod run;

pub use lander_config as config;
pub use lander_core as common;
pub use lander_export as export;
pub use lander_kinematics as kinematics;
pub use lander_propulsion as propulsion;
pub use lander_solver as solver;
