use approx::{assert_abs_diff_eq, assert_relative_eq};
use hab_dynamics::{
    errors::SimulationError, find_helium_mass, integrate, integrate_descent, AtmosphericState,
    DescentProfile, FlightReport, MassSearch, SearchResult, SimulationConfig, DEFAULT_CONSTANT_MASS,
    TIME_STEP,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

// Helper for the reference flight: 30 km burst from sea level at 5 m/s
fn run_reference_search() -> SearchResult {
    let result = find_helium_mass(30_000.0, 0.0, 5.0, 50.0, 5, 80)
        .expect("reference search inputs are valid");
    println!(
        "mass={:.5} kg | rate={:.5} m/s | gage={:.4} N | lower={:.5} kg | iterations={}",
        result.mass_kg,
        result.achieved_rate,
        result.gage_force,
        result.lower_bound_kg,
        result.iterations
    );
    result
}

#[test]
fn test_reference_pressures_at_layer_bases() {
    let references = [
        (0.0, 101_325.0),
        (11_000.0, 22_632.1),
        (20_000.0, 5_474.89),
        (32_000.0, 868.019),
        (47_000.0, 110.906),
    ];
    for (geopotential, expected) in references {
        let state = AtmosphericState::at_geopotential(geopotential).unwrap();
        assert_relative_eq!(state.pressure, expected, max_relative = 3e-4);
    }
}

#[test]
fn test_sea_level_state() {
    let state = AtmosphericState::at_altitude(0.0).unwrap();
    assert_abs_diff_eq!(state.temperature, 288.15, epsilon = 1e-9);
    assert_relative_eq!(state.density, 1.225, max_relative = 1e-3);
}

#[test]
fn test_zero_helium_never_ascends() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let start = rng.gen_range(1.0..40_000.0);
        let result = integrate(0.0, start, 45_000.0, TIME_STEP, DEFAULT_CONSTANT_MASS, true);
        assert!(
            matches!(result.error, Some(SimulationError::NonAscendingForce { .. })),
            "start {} gave {:?}",
            start,
            result.error
        );
    }
}

#[test]
fn test_reference_search_converges() {
    let result = run_reference_search();
    assert!(result.feasible);
    assert!(result.mass_kg.is_finite());
    assert!(result.mass_kg > 0.0 && result.mass_kg <= 50.0);
    assert!(result.achieved_rate >= 5.0);
    assert_abs_diff_eq!(result.achieved_rate, 5.0, epsilon = 1e-5);
    assert!(result.gage_force > 0.0);
    assert!(result.iterations <= 80);
}

#[test]
fn test_search_result_is_reproducible() {
    let result = run_reference_search();
    let rerun = integrate(
        result.mass_kg,
        0.0,
        30_000.0,
        TIME_STEP,
        DEFAULT_CONSTANT_MASS,
        true,
    );
    assert!(rerun.is_success());
    assert_eq!(rerun.mean_rate, result.achieved_rate);
    assert_eq!(rerun.first_step_net_force, Some(result.gage_force));

    let report = FlightReport::from_result(&rerun);
    assert!(report.max_altitude >= 30_000.0);
    assert!(report.flight_time > 0.0);
}

#[test]
fn test_masses_below_lower_bound_fall_short() {
    let result = run_reference_search();
    for fraction in [0.5, 0.9, 0.98] {
        let mass = result.lower_bound_kg * fraction;
        let run = integrate(mass, 0.0, 30_000.0, TIME_STEP, DEFAULT_CONSTANT_MASS, true);
        assert!(
            !run.is_success() || run.mean_rate < 5.0,
            "mass {} reached {}",
            mass,
            run.mean_rate
        );
    }
}

#[test]
fn test_unreachable_rate_is_infeasible() {
    let result = find_helium_mass(5_000.0, 0.0, 100.0, 50.0, 5, 80).unwrap();
    assert!(!result.feasible);
    assert_eq!(result.mass_kg, 50.0);
    assert!(result.achieved_rate > 0.0 && result.achieved_rate < 100.0);
    assert!(matches!(
        result.ensure_feasible(),
        Err(SimulationError::InfeasibleTarget { max_mass, .. }) if max_mass == 50.0
    ));
}

#[test]
fn test_custom_config_search() {
    let config = SimulationConfig {
        constant_mass_kg: 4.0,
        rate_precision_decimals: 3,
        ..SimulationConfig::default()
    };
    let light = MassSearch::new(config).find(3_000.0, 0.0, 5.0).unwrap();
    let heavy = find_helium_mass(3_000.0, 0.0, 5.0, 50.0, 3, 80).unwrap();
    assert!(light.feasible && heavy.feasible);
    assert!(light.mass_kg < heavy.mass_kg);
}

#[test]
fn test_descent_from_reference_burst() {
    let profile = DescentProfile::default();
    let result = integrate_descent(30_000.0, 0.0, 0.0, TIME_STEP, &profile);
    assert!(result.is_success(), "{:?}", result.error);
    let report = FlightReport::from_result(&result);
    assert_eq!(report.final_altitude, 0.0);
    assert!(report.final_velocity < 0.0);
    assert!(result.mean_rate < 0.0);
    // Thin air at altitude makes the early fall much faster than the landing.
    assert!(report.max_velocity > -report.final_velocity * 2.0);
}

#[test]
fn test_invalid_inputs_are_reported() {
    let ascent = integrate(1.0, 500.0, 400.0, TIME_STEP, DEFAULT_CONSTANT_MASS, true);
    assert!(matches!(ascent.error, Some(SimulationError::InvalidInput(_))));

    assert!(matches!(
        find_helium_mass(30_000.0, 0.0, -5.0, 50.0, 5, 80),
        Err(SimulationError::InvalidInput(_))
    ));
    assert!(matches!(
        find_helium_mass(120_000.0, 0.0, 5.0, 50.0, 5, 80),
        Err(SimulationError::InvalidInput(_))
    ));

    let descent = integrate_descent(100.0, 200.0, 0.0, TIME_STEP, &DescentProfile::default());
    assert!(matches!(descent.error, Some(SimulationError::InvalidInput(_))));

    assert!(matches!(
        AtmosphericState::at_altitude(100_001.0),
        Err(SimulationError::AltitudeOutOfRange { .. })
    ));
}
