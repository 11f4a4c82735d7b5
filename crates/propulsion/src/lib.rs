//! Vehicle mass properties and the constant-flow descent engine.

use lander_core::constants::G0;
use lander_core::defaults;

/// Descent vehicle with a single throttle-less engine burning at a constant mass-flow rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub dry_mass_kg: f64,
    pub propellant_mass_kg: f64,
    pub jet_speed_m_s: f64,
    pub flow_rate_kg_s: f64,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            name: "Lunar lander".to_string(),
            dry_mass_kg: defaults::DRY_MASS_KG,
            propellant_mass_kg: defaults::PROPELLANT_MASS_KG,
            jet_speed_m_s: defaults::JET_SPEED_M_S,
            flow_rate_kg_s: defaults::FLOW_RATE_KG_S,
        }
    }
}

impl Vehicle {
    /// Convenience accessor for total initial mass.
    pub fn initial_mass_kg(&self) -> f64 {
        self.dry_mass_kg + self.propellant_mass_kg
    }

    /// Burn duration after which the tanks are empty.
    pub fn burnout_time_s(&self) -> f64 {
        self.propellant_mass_kg / self.flow_rate_kg_s
    }

    /// Propellant consumed after burning for `burn_time_s`.
    pub fn propellant_used_kg(&self, burn_time_s: f64) -> f64 {
        self.flow_rate_kg_s * burn_time_s
    }

    /// Vehicle mass `burn_time_s` seconds after ignition. Not clamped at the dry mass.
    pub fn mass_at_kg(&self, burn_time_s: f64) -> f64 {
        self.initial_mass_kg() - self.propellant_used_kg(burn_time_s)
    }

    /// Engine thrust (N).
    pub fn thrust_newtons(&self) -> f64 {
        self.jet_speed_m_s * self.flow_rate_kg_s
    }

    /// Specific impulse equivalent of the jet speed (s).
    pub fn isp_seconds(&self) -> f64 {
        self.jet_speed_m_s / G0
    }

    /// Ideal delta-v of the full propellant load (rocket equation).
    pub fn total_delta_v_m_s(&self) -> f64 {
        self.jet_speed_m_s * (self.initial_mass_kg() / self.dry_mass_kg).ln()
    }
}
