//! Fixtures for tests
use crate::model::ParameterSet;
use crate::regulation::{Regulation, RegulationMode};
use crate::vehicle::{Family, FuelEconomy, ProductionBounds, Vehicle, VehicleMap};
use rstest::fixture;

/// A fuel-powered vehicle model
pub fn fuel_vehicle(
    id: &str,
    price: f64,
    cost: f64,
    capacity: f64,
    bounds: ProductionBounds,
    actual: f64,
    target: f64,
) -> Vehicle {
    Vehicle {
        id: id.into(),
        family: Family::Fuel,
        price,
        cost,
        capacity,
        bounds,
        fuel: Some(FuelEconomy { actual, target }),
        credit_rate: None,
    }
}

/// An electric vehicle model
pub fn electric_vehicle(
    id: &str,
    price: f64,
    cost: f64,
    capacity: f64,
    bounds: ProductionBounds,
    credit_rate: f64,
) -> Vehicle {
    Vehicle {
        id: id.into(),
        family: Family::Electric,
        price,
        cost,
        capacity,
        bounds,
        fuel: None,
        credit_rate: Some(credit_rate),
    }
}

fn collect(vehicles: impl IntoIterator<Item = Vehicle>) -> VehicleMap {
    vehicles
        .into_iter()
        .map(|vehicle| (vehicle.id.clone(), vehicle))
        .collect()
}

/// Two fuel and two electric models with fixed demand bands
#[fixture]
pub fn demand_set() -> ParameterSet {
    let demand = |min, max| ProductionBounds::Demand { min, max };
    ParameterSet {
        vehicles: collect([
            fuel_vehicle(
                "fuel_a",
                150000.0,
                120000.0,
                10000.0,
                demand(5000.0, 8000.0),
                6.0,
                6.5,
            ),
            fuel_vehicle(
                "fuel_b",
                200000.0,
                160000.0,
                8000.0,
                demand(4000.0, 7000.0),
                7.0,
                6.5,
            ),
            electric_vehicle(
                "ev_a",
                250000.0,
                200000.0,
                6000.0,
                demand(2000.0, 5000.0),
                3.0,
            ),
            electric_vehicle(
                "ev_b",
                300000.0,
                240000.0,
                4000.0,
                demand(1000.0, 3000.0),
                5.0,
            ),
        ]),
        regulation: Regulation {
            mode: RegulationMode::DemandBounds,
            compliance_multiplier: 1.0,
            credit_ratio: 0.15,
            credit_price: 3000.0,
            whole_credits: false,
            max_total_production: None,
        },
    }
}

/// Two fuel and two electric models with share bands and a plant-wide ceiling
#[fixture]
pub fn shares_set() -> ParameterSet {
    let share = |min, max| ProductionBounds::Share { min, max };
    ParameterSet {
        vehicles: collect([
            fuel_vehicle(
                "fuel_a",
                120000.0,
                96000.0,
                100000.0,
                share(0.20, 0.40),
                9.0,
                4.75,
            ),
            fuel_vehicle(
                "fuel_b",
                320000.0,
                256000.0,
                100000.0,
                share(0.20, 0.30),
                11.0,
                5.85,
            ),
            electric_vehicle(
                "ev_a",
                280000.0,
                260000.0,
                100000.0,
                share(0.10, 0.25),
                2.87,
            ),
            electric_vehicle(
                "ev_b",
                200000.0,
                185000.0,
                100000.0,
                share(0.20, 0.25),
                2.19,
            ),
        ]),
        regulation: Regulation {
            mode: RegulationMode::ProductionShares,
            compliance_multiplier: 1.08,
            credit_ratio: 0.28,
            credit_price: 1525.0,
            whole_credits: false,
            max_total_production: Some(300000.0),
        },
    }
}

/// A parameter set with no fuel vehicles at all
#[fixture]
pub fn electric_only_set() -> ParameterSet {
    let demand = |min, max| ProductionBounds::Demand { min, max };
    ParameterSet {
        vehicles: collect([
            electric_vehicle(
                "ev_a",
                250000.0,
                200000.0,
                6000.0,
                demand(2000.0, 5000.0),
                3.0,
            ),
            electric_vehicle(
                "ev_b",
                300000.0,
                240000.0,
                4000.0,
                demand(1000.0, 3000.0),
                5.0,
            ),
        ]),
        regulation: Regulation {
            mode: RegulationMode::DemandBounds,
            compliance_multiplier: 1.0,
            credit_ratio: 0.15,
            credit_price: 3000.0,
            whole_credits: false,
            max_total_production: None,
        },
    }
}
