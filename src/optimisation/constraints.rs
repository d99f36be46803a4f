//! Constraint rows for the production-planning problem.
//!
//! Everything the regulation states is emitted here in linear form. The two non-linearities of
//! the natural formulation are already gone by this point: the weighted-average compliance
//! target is expressed per-unit (the fractional form multiplied through by total fuel
//! production, with a positivity floor on that total in share mode), and the shortfall rule is
//! carried by the non-negative buy/sell pair in the balance row. No big-M disjunction and no
//! `buy * sell = 0` constraint is added; see [`crate::optimisation`].
use super::VariableMap;
use crate::credits::{cafc_balance, nev_balance};
use crate::id::VehicleID;
use crate::model::ParameterSet;
use crate::regulation::RegulationMode;
use crate::vehicle::{Family, ProductionBounds};
use highs::RowProblem as Problem;
use indexmap::IndexMap;

/// Add all constraint rows for the given parameter set
pub fn add_constraints(problem: &mut Problem, variables: &VariableMap, set: &ParameterSet) {
    match set.regulation.mode {
        RegulationMode::DemandBounds => add_demand_band_constraints(problem, variables, set),
        RegulationMode::ProductionShares => {
            add_share_band_constraints(problem, variables, set);
            add_fuel_floor_constraint(problem, variables, set);
        }
    }

    add_total_production_constraint(problem, variables, set);
    add_credit_balance_constraint(problem, variables, set);
}

/// Add per-model demand bands: demand_min <= quantity <= demand_max
fn add_demand_band_constraints(problem: &mut Problem, variables: &VariableMap, set: &ParameterSet) {
    for vehicle in set.vehicles.values() {
        let ProductionBounds::Demand { min, max } = vehicle.bounds else {
            panic!("Demand bounds expected in demand_bounds mode");
        };

        let var = variables.production(&vehicle.id);
        problem.add_row(min..=max, [(var, 1.0)]);
    }
}

/// Add per-model share bands relative to total production.
///
/// `share_min * total <= quantity <= share_max * total` is emitted as two single-sided rows
/// with the total folded into the coefficients, e.g. the lower band becomes
/// `(1 - share_min) * quantity - share_min * (total - quantity) >= 0`.
fn add_share_band_constraints(problem: &mut Problem, variables: &VariableMap, set: &ParameterSet) {
    let mut terms = Vec::with_capacity(set.vehicles.len());
    for vehicle in set.vehicles.values() {
        let ProductionBounds::Share { min, max } = vehicle.bounds else {
            panic!("Share bounds expected in production_shares mode");
        };

        for (share, lower) in [(min, true), (max, false)] {
            terms.extend(set.vehicles.values().map(|other| {
                let indicator = if other.id == vehicle.id { 1.0 } else { 0.0 };
                (variables.production(&other.id), indicator - share)
            }));

            if lower {
                problem.add_row(0.0.., terms.drain(0..));
            } else {
                problem.add_row(..=0.0, terms.drain(0..));
            }
        }
    }
}

/// Add the total-fuel-production floor for share mode.
///
/// This is the positivity safeguard from the fractional-to-linear rewrite of the compliance
/// target: the weighted-average form is undefined at zero fuel production, so the total is kept
/// at one unit or more.
fn add_fuel_floor_constraint(problem: &mut Problem, variables: &VariableMap, set: &ParameterSet) {
    let terms: Vec<_> = set
        .iter_family(Family::Fuel)
        .map(|vehicle| (variables.production(&vehicle.id), 1.0))
        .collect();

    problem.add_row(1.0.., terms);
}

/// Add the plant-wide production ceiling, if one is configured
fn add_total_production_constraint(
    problem: &mut Problem,
    variables: &VariableMap,
    set: &ParameterSet,
) {
    let Some(ceiling) = set.regulation.max_total_production else {
        return;
    };

    let terms: Vec<_> = set
        .vehicles
        .values()
        .map(|vehicle| (variables.production(&vehicle.id), 1.0))
        .collect();

    problem.add_row(..=ceiling, terms);
}

/// Add the combined credit balance row: `cafc + nev + buy - sell = 0`.
///
/// The two balances both carry terms for fuel-vehicle quantities, so coefficients are merged
/// per vehicle before the row is emitted.
fn add_credit_balance_constraint(
    problem: &mut Problem,
    variables: &VariableMap,
    set: &ParameterSet,
) {
    let mut coefficients: IndexMap<VehicleID, f64> = IndexMap::new();
    for (id, coeff) in cafc_balance(set).into_iter().chain(nev_balance(set)) {
        *coefficients.entry(id).or_insert(0.0) += coeff;
    }

    let mut terms: Vec<_> = coefficients
        .into_iter()
        .map(|(id, coeff)| (variables.production(&id), coeff))
        .collect();
    terms.push((variables.credits_bought(), 1.0));
    terms.push((variables.credits_sold(), -1.0));

    problem.add_row(0.0..=0.0, terms);
}
