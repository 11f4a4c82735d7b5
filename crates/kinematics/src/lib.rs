//! Closed-form kinematics of a vertical lander descent.
//!
//! The descent has two phases: an unpowered free fall followed by a single continuous
//! burn at constant mass flow. Speeds are positive downward and heights are measured as
//! the distance descended from the starting point. The burn clock restarts at zero on
//! ignition, so every powered quantity takes the free-fall duration and the burn time as
//! separate arguments.

use lander_core::constants::LUNAR_GRAVITY_M_S2;
use lander_propulsion::Vehicle;
use thiserror::Error;

/// Candidate burn times the model refuses to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum KinematicsError {
    #[error("burn time {burn_time_s} s is negative or not finite")]
    InvalidBurnTime { burn_time_s: f64 },
    #[error("burn time {burn_time_s} s exhausts the propellant (burnout at {burnout_time_s} s)")]
    PropellantExhausted {
        burn_time_s: f64,
        burnout_time_s: f64,
    },
}

/// Rejected physical parameters or initial state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("start height must be positive and finite, got {0} m")]
    InvalidStartHeight(f64),
    #[error("start speed must be finite, got {0} m/s")]
    InvalidStartSpeed(f64),
    #[error("gravity must be positive and finite, got {0} m/s²")]
    InvalidGravity(f64),
    #[error("vehicle {field} must be positive and finite, got {value}")]
    InvalidVehicle { field: &'static str, value: f64 },
}

/// Immutable parameter set for one descent run.
#[derive(Debug, Clone, PartialEq)]
pub struct DescentParameters {
    vehicle: Vehicle,
    gravity_m_s2: f64,
    start_speed_m_s: f64,
    start_height_m: f64,
}

impl DescentParameters {
    /// Validate and freeze the parameters of a run.
    pub fn new(
        vehicle: Vehicle,
        gravity_m_s2: f64,
        start_speed_m_s: f64,
        start_height_m: f64,
    ) -> Result<Self, InputError> {
        validate_vehicle(&vehicle)?;
        if !gravity_m_s2.is_finite() || gravity_m_s2 <= 0.0 {
            return Err(InputError::InvalidGravity(gravity_m_s2));
        }
        if !start_speed_m_s.is_finite() {
            return Err(InputError::InvalidStartSpeed(start_speed_m_s));
        }
        if !start_height_m.is_finite() || start_height_m <= 0.0 {
            return Err(InputError::InvalidStartHeight(start_height_m));
        }
        Ok(Self {
            vehicle,
            gravity_m_s2,
            start_speed_m_s,
            start_height_m,
        })
    }

    /// Default lander descending on the Moon.
    pub fn lunar(start_speed_m_s: f64, start_height_m: f64) -> Result<Self, InputError> {
        Self::new(
            Vehicle::default(),
            LUNAR_GRAVITY_M_S2,
            start_speed_m_s,
            start_height_m,
        )
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn gravity_m_s2(&self) -> f64 {
        self.gravity_m_s2
    }

    pub fn start_speed_m_s(&self) -> f64 {
        self.start_speed_m_s
    }

    pub fn start_height_m(&self) -> f64 {
        self.start_height_m
    }

    /// Dry mass plus propellant.
    pub fn total_mass_kg(&self) -> f64 {
        self.vehicle.initial_mass_kg()
    }

    /// Speed after falling unpowered for `t` seconds.
    pub fn free_fall_speed(&self, t: f64) -> f64 {
        self.start_speed_m_s + self.gravity_m_s2 * t
    }

    /// Distance descended after falling unpowered for `t` seconds.
    pub fn free_fall_height(&self, t: f64) -> f64 {
        self.start_speed_m_s * t + self.gravity_m_s2 * t * t / 2.0
    }

    /// Speed `burn_time` seconds after ignition, following `fall_time` seconds of free fall.
    ///
    /// Free-fall terminal speed, plus gravity during the burn, minus the rocket-equation
    /// delta-v gained so far.
    pub fn powered_speed(&self, fall_time: f64, burn_time: f64) -> Result<f64, KinematicsError> {
        let mass = self.mass_after(burn_time)?;
        let m0 = self.total_mass_kg();
        Ok(self.free_fall_speed(fall_time) + self.gravity_m_s2 * burn_time
            - self.vehicle.jet_speed_m_s * (m0 / mass).ln())
    }

    /// Distance descended during the first `burn_time` seconds of the burn.
    ///
    /// Closed-form integral of [`powered_speed`](Self::powered_speed) over `[0, burn_time]`.
    pub fn powered_height(&self, fall_time: f64, burn_time: f64) -> Result<f64, KinematicsError> {
        let mass = self.mass_after(burn_time)?;
        let m0 = self.total_mass_kg();
        let f = self.vehicle.flow_rate_kg_s;
        let t = burn_time;

        let ln_m0 = m0.ln();
        // integral of ln(m0 - f*s) ds over [0, t], times -1
        let depletion = (mass * mass.ln() - m0 * ln_m0 + f * t) / f;

        Ok(self.free_fall_speed(fall_time) * t + self.gravity_m_s2 * t * t / 2.0
            - self.vehicle.jet_speed_m_s * (ln_m0 * t + depletion))
    }

    /// Net downward acceleration `burn_time` seconds after ignition.
    pub fn powered_acceleration(&self, burn_time: f64) -> Result<f64, KinematicsError> {
        let mass = self.mass_after(burn_time)?;
        Ok(self.gravity_m_s2 - self.vehicle.thrust_newtons() / mass)
    }

    /// Vehicle mass `burn_time` seconds after ignition.
    pub fn mass_at(&self, burn_time: f64) -> Result<f64, KinematicsError> {
        self.mass_after(burn_time)
    }

    /// Propellant consumed `burn_time` seconds after ignition.
    pub fn propellant_used(&self, burn_time: f64) -> Result<f64, KinematicsError> {
        self.mass_after(burn_time)?;
        Ok(self.vehicle.propellant_used_kg(burn_time))
    }

    pub fn burnout_time(&self) -> f64 {
        self.vehicle.burnout_time_s()
    }

    /// Mass precondition shared by every powered quantity: the burn must not have
    /// consumed the whole propellant load.
    fn mass_after(&self, burn_time: f64) -> Result<f64, KinematicsError> {
        if !burn_time.is_finite() || burn_time < 0.0 {
            return Err(KinematicsError::InvalidBurnTime {
                burn_time_s: burn_time,
            });
        }
        if self.vehicle.propellant_used_kg(burn_time) >= self.vehicle.propellant_mass_kg {
            return Err(KinematicsError::PropellantExhausted {
                burn_time_s: burn_time,
                burnout_time_s: self.burnout_time(),
            });
        }
        Ok(self.vehicle.mass_at_kg(burn_time))
    }
}

fn validate_vehicle(vehicle: &Vehicle) -> Result<(), InputError> {
    let fields = [
        ("dry mass", vehicle.dry_mass_kg),
        ("propellant mass", vehicle.propellant_mass_kg),
        ("jet speed", vehicle.jet_speed_m_s),
        ("flow rate", vehicle.flow_rate_kg_s),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value <= 0.0 {
            return Err(InputError::InvalidVehicle { field, value });
        }
    }
    Ok(())
}
