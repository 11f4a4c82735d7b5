use lander_descent::solver::{DescentParameters, SearchConfig, SolveError, solve};

/// Ten times coarser free-fall scan with a looser height tolerance, for fast tests.
fn coarse() -> SearchConfig {
    SearchConfig {
        fall_step_s: 0.01,
        height_tolerance_m: 2.0,
        ..SearchConfig::default()
    }
}

fn lunar(start_speed: f64, start_height: f64) -> DescentParameters {
    DescentParameters::lunar(start_speed, start_height).expect("valid lunar parameters")
}

#[test]
fn lunar_descent_lands_softly_with_default_grid() {
    let params = lunar(0.0, 1_000.0);
    let config = SearchConfig::default();
    let solution = solve(&params, &config).expect("feasible profile");

    assert!(solution.fall_time_s >= config.fall_start_s);
    assert!(params.free_fall_height(solution.fall_time_s) < params.start_height_m());
    assert!(solution.burn_time_s >= config.burn_min_s);
    assert!(solution.burn_time_s < params.burnout_time());

    let landed = params.free_fall_height(solution.fall_time_s)
        + params
            .powered_height(solution.fall_time_s, solution.burn_time_s)
            .unwrap();
    assert!((landed - 1_000.0).abs() <= config.height_tolerance_m);
    assert!((landed - solution.landed_height_m).abs() < 1e-9);

    let touchdown = params
        .powered_speed(solution.fall_time_s, solution.burn_time_s)
        .unwrap();
    assert!((0.0..=3.0).contains(&touchdown), "touchdown = {touchdown}");
    assert_eq!(touchdown, solution.touchdown_speed_m_s);
    assert!(solution.evaluations > 0);
}

#[test]
fn upward_start_speed_still_finds_profile() {
    let params = lunar(-5.0, 200.0);
    let solution = solve(&params, &coarse()).expect("feasible profile");
    assert!((0.0..=3.0).contains(&solution.touchdown_speed_m_s));
    assert!((solution.landed_height_m - 200.0).abs() <= 2.0);
}

#[test]
fn search_is_deterministic() {
    let params = lunar(0.0, 500.0);
    let first = solve(&params, &coarse()).expect("first run");
    let second = solve(&params, &coarse()).expect("second run");
    assert_eq!(first, second);
}

#[test]
fn earliest_burn_in_earliest_row_wins() {
    let params = lunar(0.0, 500.0);
    let config = coarse();
    let solution = solve(&params, &config).expect("feasible profile");

    // Restarting the scan at the accepted row reproduces the same pair.
    let restarted = SearchConfig {
        fall_start_s: solution.fall_time_s,
        ..config.clone()
    };
    let again = solve(&params, &restarted).expect("restarted scan");
    assert_eq!(again.fall_time_s, solution.fall_time_s);
    assert_eq!(again.burn_time_s, solution.burn_time_s);

    // Without the accepted burn time no earlier row or burn qualifies.
    let steps_to_burn = ((solution.burn_time_s - config.burn_min_s) / config.burn_step_s).round();
    if steps_to_burn >= 1.0 {
        let truncated = SearchConfig {
            burn_max_s: config.burn_min_s + (steps_to_burn - 1.0) * config.burn_step_s,
            ..config.clone()
        };
        match solve(&params, &truncated) {
            Ok(other) => assert!(other.fall_time_s > solution.fall_time_s),
            Err(SolveError::NoFeasibleProfile { .. }) => {}
            Err(err) => panic!("unexpected error: {err}"),
        }
    }
}

#[test]
fn height_below_first_fall_sample_reports_no_profile() {
    // The first scanned free fall (1 s at 1.62 m/s²) already covers 0.81 m.
    let params = lunar(0.0, 0.5);
    match solve(&params, &SearchConfig::default()) {
        Err(SolveError::NoFeasibleProfile { evaluations }) => assert_eq!(evaluations, 0),
        other => panic!("expected NoFeasibleProfile, got {other:?}"),
    }
}

#[test]
fn too_fast_to_stop_reports_no_profile() {
    let params = lunar(200.0, 500.0);
    match solve(&params, &coarse()) {
        Err(SolveError::NoFeasibleProfile { evaluations }) => assert!(evaluations > 0),
        other => panic!("expected NoFeasibleProfile, got {other:?}"),
    }
}

#[test]
fn evaluation_budget_stops_the_search() {
    let params = lunar(0.0, 1_000.0);
    let config = SearchConfig {
        max_evaluations: 1_000,
        ..SearchConfig::default()
    };
    match solve(&params, &config) {
        Err(SolveError::EvaluationBudgetExhausted { evaluations }) => {
            assert_eq!(evaluations, 1_000)
        }
        other => panic!("expected EvaluationBudgetExhausted, got {other:?}"),
    }
}

#[test]
fn rows_ending_at_burnout_still_spend_the_budget() {
    // Every burn candidate lies past the 10 s burnout, so each row is rejected at once.
    let params = lunar(0.0, 1e6);
    let config = SearchConfig {
        burn_min_s: 12.0,
        burn_max_s: 20.0,
        max_evaluations: 1_000,
        ..SearchConfig::default()
    };
    match solve(&params, &config) {
        Err(SolveError::EvaluationBudgetExhausted { evaluations }) => {
            assert_eq!(evaluations, 1_000)
        }
        other => panic!("expected EvaluationBudgetExhausted, got {other:?}"),
    }
}

#[test]
fn burn_scan_never_reaches_burnout() {
    // A burn range reaching past burnout must still solve; candidates at or past
    // 10 s are excluded rather than evaluated.
    let params = lunar(0.0, 500.0);
    let config = SearchConfig {
        burn_max_s: 25.0,
        ..coarse()
    };
    let solution = solve(&params, &config).expect("feasible profile");
    assert!(solution.burn_time_s < params.burnout_time());
}

#[test]
fn invalid_search_settings_are_rejected() {
    let params = lunar(0.0, 500.0);
    let cases = [
        SearchConfig {
            fall_step_s: 0.0,
            ..SearchConfig::default()
        },
        SearchConfig {
            burn_step_s: -0.05,
            ..SearchConfig::default()
        },
        SearchConfig {
            burn_max_s: 0.1,
            ..SearchConfig::default()
        },
        SearchConfig {
            speed_max_m_s: -1.0,
            ..SearchConfig::default()
        },
        SearchConfig {
            height_tolerance_m: f64::NAN,
            ..SearchConfig::default()
        },
        SearchConfig {
            max_evaluations: 0,
            ..SearchConfig::default()
        },
    ];
    for config in cases {
        assert!(
            matches!(
                solve(&params, &config),
                Err(SolveError::InvalidSearch { .. })
            ),
            "{config:?} should be rejected"
        );
    }
}

#[test]
fn acceptance_window_is_inclusive() {
    let config = SearchConfig::default();
    assert!(config.accepts(100.0, 100.5, 0.0));
    assert!(config.accepts(100.0, 99.5, 3.0));
    assert!(!config.accepts(100.0, 100.6, 1.0));
    assert!(!config.accepts(100.0, 100.0, -0.01));
    assert!(!config.accepts(100.0, 100.0, 3.01));
}
