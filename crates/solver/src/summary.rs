//! Derived figures for reporting a solved descent.

use lander_kinematics::{DescentParameters, KinematicsError};

use crate::search::DescentSolution;

#[derive(Debug, Clone, PartialEq)]
pub struct DescentSummary {
    pub fall_time_s: f64,
    pub burn_time_s: f64,
    pub total_time_s: f64,
    pub ignition_altitude_m: f64,
    pub ignition_speed_m_s: f64,
    pub touchdown_speed_m_s: f64,
    /// Landed height minus start height; positive when the profile overshoots the surface.
    pub height_error_m: f64,
    pub propellant_used_kg: f64,
    pub propellant_remaining_kg: f64,
    pub final_mass_kg: f64,
    /// Net acceleration at the end of the burn (most negative value of the burn).
    pub final_acceleration_m_s2: f64,
    pub delta_v_used_m_s: f64,
    /// Ideal delta-v left in the tanks after touchdown.
    pub delta_v_remaining_m_s: f64,
    pub specific_impulse_s: f64,
}

impl DescentSummary {
    pub fn new(
        params: &DescentParameters,
        solution: &DescentSolution,
    ) -> Result<Self, KinematicsError> {
        let vehicle = params.vehicle();
        let burn = solution.burn_time_s;
        let final_mass = params.mass_at(burn)?;
        let propellant_used = params.propellant_used(burn)?;
        let delta_v_used = vehicle.jet_speed_m_s * (params.total_mass_kg() / final_mass).ln();

        Ok(Self {
            fall_time_s: solution.fall_time_s,
            burn_time_s: burn,
            total_time_s: solution.total_time_s(),
            ignition_altitude_m: params.start_height_m()
                - params.free_fall_height(solution.fall_time_s),
            ignition_speed_m_s: params.free_fall_speed(solution.fall_time_s),
            touchdown_speed_m_s: solution.touchdown_speed_m_s,
            height_error_m: solution.landed_height_m - params.start_height_m(),
            propellant_used_kg: propellant_used,
            propellant_remaining_kg: vehicle.propellant_mass_kg - propellant_used,
            final_mass_kg: final_mass,
            final_acceleration_m_s2: params.powered_acceleration(burn)?,
            delta_v_used_m_s: delta_v_used,
            delta_v_remaining_m_s: vehicle.total_delta_v_m_s() - delta_v_used,
            specific_impulse_s: vehicle.isp_seconds(),
        })
    }
}
