use lander_descent::kinematics::{DescentParameters, InputError, KinematicsError};
use lander_descent::propulsion::Vehicle;

const G_MOON: f64 = 1.62;

fn lunar(start_speed: f64, start_height: f64) -> DescentParameters {
    DescentParameters::lunar(start_speed, start_height).expect("valid lunar parameters")
}

#[test]
fn free_fall_speed_is_non_decreasing() {
    let params = lunar(-4.0, 1_000.0);
    let mut previous = params.free_fall_speed(0.0);
    for i in 1..=1_000 {
        let v = params.free_fall_speed(i as f64 * 0.1);
        assert!(v >= previous, "speed dropped at step {i}: {v} < {previous}");
        previous = v;
    }
}

#[test]
fn free_fall_matches_constant_acceleration_formulas() {
    let params = lunar(3.0, 1_000.0);
    let t = 12.5;
    assert!((params.free_fall_speed(t) - (3.0 + G_MOON * t)).abs() < 1e-12);
    assert!((params.free_fall_height(t) - (3.0 * t + 0.5 * G_MOON * t * t)).abs() < 1e-9);
    assert_eq!(params.free_fall_height(0.0), 0.0);
}

#[test]
fn powered_phase_starts_from_free_fall_state() {
    let params = lunar(0.0, 1_000.0);
    let fall = 20.0;
    let v = params.powered_speed(fall, 0.0).expect("speed at ignition");
    let h = params.powered_height(fall, 0.0).expect("height at ignition");
    assert!((v - params.free_fall_speed(fall)).abs() < 1e-12);
    assert!(h.abs() < 1e-9, "no distance covered at ignition, got {h}");
}

#[test]
fn powered_values_are_finite_before_burnout() {
    let params = lunar(0.0, 1_000.0);
    let burnout = params.burnout_time();
    assert!((burnout - 10.0).abs() < 1e-12);
    for i in 0..1_000 {
        let t = i as f64 * 0.00999;
        assert!(t < burnout);
        let v = params.powered_speed(15.0, t).expect("speed");
        let h = params.powered_height(15.0, t).expect("height");
        let a = params.powered_acceleration(t).expect("acceleration");
        assert!(v.is_finite() && h.is_finite() && a.is_finite(), "t = {t}");
    }
}

#[test]
fn powered_height_integrates_powered_speed() {
    let params = lunar(2.0, 1_000.0);
    let fall = 18.0;
    let burn = 6.0;
    let steps = 20_000;
    let dt = burn / steps as f64;
    let mut integral = 0.0;
    for k in 0..steps {
        let t0 = k as f64 * dt;
        let v0 = params.powered_speed(fall, t0).unwrap();
        let v1 = params.powered_speed(fall, t0 + dt).unwrap();
        integral += 0.5 * (v0 + v1) * dt;
    }
    let closed_form = params.powered_height(fall, burn).unwrap();
    assert!(
        (closed_form - integral).abs() < 1e-4,
        "closed form {closed_form} vs trapezoid {integral}"
    );
}

#[test]
fn powered_acceleration_is_derivative_of_speed() {
    let params = lunar(0.0, 1_000.0);
    let h = 1e-4;
    for t in [0.5, 3.0, 7.5, 9.5] {
        let numeric = (params.powered_speed(10.0, t + h).unwrap()
            - params.powered_speed(10.0, t - h).unwrap())
            / (2.0 * h);
        let analytic = params.powered_acceleration(t).unwrap();
        assert!((numeric - analytic).abs() < 1e-5, "t = {t}");
    }
}

#[test]
fn acceleration_at_ignition_uses_full_mass() {
    let params = lunar(0.0, 1_000.0);
    let expected = G_MOON - 3_660.0 * 15.0 / 2_300.0;
    let a = params.powered_acceleration(0.0).unwrap();
    assert!((a - expected).abs() < 1e-12);
}

#[test]
fn thrust_term_grows_toward_burnout() {
    let params = lunar(0.0, 1_000.0);
    let a0 = params.powered_acceleration(0.0).unwrap();
    let a_mid = params.powered_acceleration(5.0).unwrap();
    let a_late = params.powered_acceleration(9.999).unwrap();
    assert!(a_late < a_mid && a_mid < a0);
}

#[test]
fn burnout_and_beyond_are_rejected() {
    let params = lunar(0.0, 1_000.0);
    for t in [10.0, 10.5, 20.0, 1e6] {
        assert!(matches!(
            params.powered_speed(5.0, t),
            Err(KinematicsError::PropellantExhausted { .. })
        ));
        assert!(matches!(
            params.powered_height(5.0, t),
            Err(KinematicsError::PropellantExhausted { .. })
        ));
        assert!(matches!(
            params.powered_acceleration(t),
            Err(KinematicsError::PropellantExhausted { .. })
        ));
    }
}

#[test]
fn negative_or_nan_burn_times_are_rejected() {
    let params = lunar(0.0, 1_000.0);
    for t in [-0.1, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            params.powered_acceleration(t),
            Err(KinematicsError::InvalidBurnTime { .. })
        ));
    }
}

#[test]
fn mass_depletes_linearly() {
    let params = lunar(0.0, 1_000.0);
    assert_eq!(params.total_mass_kg(), 2_300.0);
    let m = params.mass_at(4.0).unwrap();
    assert!((m - (2_300.0 - 60.0)).abs() < 1e-12);
    assert!(params.mass_at(9.99).unwrap() > params.vehicle().dry_mass_kg);
    assert!((params.propellant_used(4.0).unwrap() - 60.0).abs() < 1e-12);
    assert!(params.propellant_used(10.0).is_err());
}

#[test]
fn invalid_inputs_are_rejected() {
    assert_eq!(
        DescentParameters::lunar(0.0, 0.0),
        Err(InputError::InvalidStartHeight(0.0))
    );
    assert_eq!(
        DescentParameters::lunar(0.0, -10.0),
        Err(InputError::InvalidStartHeight(-10.0))
    );
    assert!(matches!(
        DescentParameters::lunar(f64::NAN, 100.0),
        Err(InputError::InvalidStartSpeed(_))
    ));
    assert_eq!(
        DescentParameters::new(Vehicle::default(), 0.0, 0.0, 100.0),
        Err(InputError::InvalidGravity(0.0))
    );

    let no_flow = Vehicle {
        flow_rate_kg_s: 0.0,
        ..Vehicle::default()
    };
    assert_eq!(
        DescentParameters::new(no_flow, G_MOON, 0.0, 100.0),
        Err(InputError::InvalidVehicle {
            field: "flow rate",
            value: 0.0
        })
    );
}

#[test]
fn vehicle_figures_match_rocket_equation() {
    let vehicle = Vehicle::default();
    assert_eq!(vehicle.initial_mass_kg(), 2_300.0);
    assert!((vehicle.thrust_newtons() - 54_900.0).abs() < 1e-9);
    let expected_dv = 3_660.0 * (2_300.0_f64 / 2_150.0).ln();
    assert!((vehicle.total_delta_v_m_s() - expected_dv).abs() < 1e-9);
    assert!(vehicle.isp_seconds() > 370.0 && vehicle.isp_seconds() < 375.0);
}
