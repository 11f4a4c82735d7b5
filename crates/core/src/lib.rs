//! Core constants and shared primitives for the lander descent workspace.

/// Physical constants expressed in SI units.
pub mod constants {
    /// Surface gravity of the Moon (m/s²).
    pub const LUNAR_GRAVITY_M_S2: f64 = 1.62;
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
}

/// Reference lander used when no scenario file is supplied.
pub mod defaults {
    /// Dry mass of the vehicle including crew (kg).
    pub const DRY_MASS_KG: f64 = 2_150.0;
    /// Propellant loaded at the start of the descent (kg).
    pub const PROPELLANT_MASS_KG: f64 = 150.0;
    /// Effective exhaust velocity (m/s).
    pub const JET_SPEED_M_S: f64 = 3_660.0;
    /// Propellant consumed per second of burn (kg/s).
    pub const FLOW_RATE_KG_S: f64 = 15.0;
    /// Step used when sampling display curves (s).
    pub const SAMPLE_STEP_S: f64 = 0.01;
}

/// Small helpers for uniform time grids.
pub mod grid {
    /// Value of the `index`-th point on a grid starting at `start` with spacing `step`.
    ///
    /// Computing from the index keeps long scans free of accumulated rounding.
    #[inline]
    pub fn point(start: f64, step: f64, index: u64) -> f64 {
        start + step * index as f64
    }

    /// Number of grid points in `[start, end]` (inclusive, with a small slack for rounding).
    pub fn count(start: f64, end: f64, step: f64) -> u64 {
        if step.is_nan() || step <= 0.0 || end < start {
            return 0;
        }
        ((end - start) / step + 1e-9).floor() as u64 + 1
    }
}
