//! Integration tests for the full load-build-solve pipeline.
use dualcredit::model::ParameterSet;
use dualcredit::optimisation::{build_model, solve_model};
use dualcredit::vehicle::ProductionBounds;
use float_cmp::assert_approx_eq;
use std::path::{Path, PathBuf};

/// Get the path to a bundled demo model
fn get_model_dir(name: &str) -> PathBuf {
    Path::new(file!())
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
        .join(name)
}

#[test]
fn test_solve_demand_bounds_model() {
    let set = ParameterSet::from_path(get_model_dir("simple")).unwrap();
    let model = build_model(&set, set.regulation.credit_price).unwrap();
    let solution = solve_model(model).unwrap();

    // All margins are positive, so every quantity saturates its demand maximum
    assert_approx_eq!(f64, solution.production("fuel_a").unwrap(), 8000.0, epsilon = 1e-6);
    assert_approx_eq!(f64, solution.production("fuel_b").unwrap(), 7000.0, epsilon = 1e-6);
    assert_approx_eq!(f64, solution.production("ev_a").unwrap(), 5000.0, epsilon = 1e-6);
    assert_approx_eq!(f64, solution.production("ev_b").unwrap(), 3000.0, epsilon = 1e-6);

    // CAFC surplus 500 plus NEV surplus 27750, all sold at 3000 per credit
    assert_approx_eq!(f64, solution.credits_bought(), 0.0, epsilon = 1e-6);
    assert_approx_eq!(f64, solution.credits_sold(), 28250.0, epsilon = 1e-6);
    assert_approx_eq!(
        f64,
        solution.objective_value(),
        1_034_750_000.0,
        epsilon = 1e-3
    );
}

#[test]
fn test_solve_production_shares_model() {
    let set = ParameterSet::from_path(get_model_dir("shares")).unwrap();
    let model = build_model(&set, set.regulation.credit_price).unwrap();
    let solution = solve_model(model).unwrap();

    let total: f64 = solution.iter_production().map(|(_, value)| value).sum();
    assert!(total >= 1.0);
    assert!(total <= 300000.0 + 1e-6);

    // Each model's share of total production lies within its configured band
    for vehicle in set.vehicles.values() {
        let quantity = solution.production(&vehicle.id.0).unwrap();
        let ProductionBounds::Share { min, max } = vehicle.bounds else {
            panic!("expected share bounds");
        };
        assert!(quantity >= min * total - 1e-6);
        assert!(quantity <= max * total + 1e-6);
        assert!(quantity <= vehicle.capacity + 1e-6);
    }

    // Never buy and sell simultaneously at a positive credit price
    assert_approx_eq!(
        f64,
        solution.credits_bought().min(solution.credits_sold()),
        0.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_demand_min_above_capacity_is_rejected() {
    let mut set = ParameterSet::from_path(get_model_dir("simple")).unwrap();
    set.vehicles["fuel_a"].bounds = ProductionBounds::Demand {
        min: 10001.0,
        max: 10002.0,
    };

    // The model builder must reject the set before it reaches the solver
    assert!(build_model(&set, set.regulation.credit_price).is_err());
}
