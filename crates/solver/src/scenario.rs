//! Conversion from parsed scenario files into solver inputs.

use lander_config::{ScenarioConfig, SearchSettings, VehicleConfig};
use lander_kinematics::DescentParameters;
use lander_propulsion::Vehicle;
use thiserror::Error;

use crate::search::{SearchConfig, SolveError};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("scenario `{0}` has no initial state and none was supplied")]
    MissingInitialState(String),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Convert a `VehicleConfig` into the runtime `Vehicle`.
pub fn vehicle_from_config(config: &VehicleConfig) -> Vehicle {
    Vehicle {
        name: config.name.clone(),
        dry_mass_kg: config.dry_mass_kg,
        propellant_mass_kg: config.propellant_mass_kg,
        jet_speed_m_s: config.jet_speed_m_s,
        flow_rate_kg_s: config.flow_rate_kg_s,
    }
}

/// Apply file overrides on top of the default search grid.
pub fn search_from_settings(settings: &SearchSettings) -> SearchConfig {
    let defaults = SearchConfig::default();
    SearchConfig {
        fall_start_s: settings.fall_start_s.unwrap_or(defaults.fall_start_s),
        fall_step_s: settings.fall_step_s.unwrap_or(defaults.fall_step_s),
        burn_min_s: settings.burn_min_s.unwrap_or(defaults.burn_min_s),
        burn_max_s: settings.burn_max_s.unwrap_or(defaults.burn_max_s),
        burn_step_s: settings.burn_step_s.unwrap_or(defaults.burn_step_s),
        height_tolerance_m: settings
            .height_tolerance_m
            .unwrap_or(defaults.height_tolerance_m),
        speed_min_m_s: settings.speed_min_m_s.unwrap_or(defaults.speed_min_m_s),
        speed_max_m_s: settings.speed_max_m_s.unwrap_or(defaults.speed_max_m_s),
        max_evaluations: settings.max_evaluations.unwrap_or(defaults.max_evaluations),
    }
}

/// Build validated parameters and search settings for a scenario.
///
/// `start_speed_m_s` and `start_height_m` override the scenario's initial state; both
/// must be available from one source or the other.
pub fn from_config(
    config: &ScenarioConfig,
    start_speed_m_s: Option<f64>,
    start_height_m: Option<f64>,
) -> Result<(DescentParameters, SearchConfig), ScenarioError> {
    let initial = config.initial;
    let speed = start_speed_m_s.or(initial.map(|i| i.start_speed_m_s));
    let height = start_height_m.or(initial.map(|i| i.start_height_m));
    let (Some(speed), Some(height)) = (speed, height) else {
        return Err(ScenarioError::MissingInitialState(config.name.clone()));
    };

    let params = DescentParameters::new(
        vehicle_from_config(&config.vehicle),
        config.body.surface_gravity_m_s2,
        speed,
        height,
    )
    .map_err(SolveError::from)?;
    let search = search_from_settings(&config.search);
    search.validate()?;
    Ok((params, search))
}
