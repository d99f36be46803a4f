//! Code for building and solving the production-planning MILP.
//!
//! The model builder assembles a solver-ready problem from a parameter set and an explicit
//! credit price; the solver adapter submits it to HiGHS and maps the outcome onto a three-way
//! result contract (optimal / infeasible or unbounded / solver error). Nothing outside this
//! module touches the solver API.
use crate::id::VehicleID;
use crate::model::ParameterSet;
use crate::regulation::RegulationMode;
use crate::vehicle::{Family, ProductionBounds};
use anyhow::{Result, bail, ensure};
use highs::{HighsModelStatus, RowProblem as Problem, Sense};
use indexmap::IndexMap;
use thiserror::Error;

pub mod constraints;
use constraints::add_constraints;

/// A decision variable in the optimisation
///
/// Note that this type does **not** include the value of the variable; it just refers to a
/// particular column of the problem.
pub type Variable = highs::Col;

/// A key identifying what a decision variable represents
#[derive(Eq, PartialEq, Hash, Clone, Debug)]
pub enum VariableKey {
    /// Production quantity for one vehicle model
    Production(VehicleID),
    /// Credits bought on the market
    CreditsBought,
    /// Credits sold on the market
    CreditsSold,
}

/// A map for easy lookup of variables in the problem.
///
/// The entries are ordered (see [`IndexMap`]) and match the column order of the problem. We use
/// this both to define constraints and to read variable values back out of the solution.
#[derive(Default)]
pub struct VariableMap(IndexMap<VariableKey, Variable>);

impl VariableMap {
    /// Get the production variable for the given vehicle model
    pub fn production(&self, id: &VehicleID) -> Variable {
        *self
            .0
            .get(&VariableKey::Production(id.clone()))
            .expect("No production variable for vehicle")
    }

    /// Get the credit-buy variable
    pub fn credits_bought(&self) -> Variable {
        *self
            .0
            .get(&VariableKey::CreditsBought)
            .expect("No credit-buy variable")
    }

    /// Get the credit-sell variable
    pub fn credits_sold(&self) -> Variable {
        *self
            .0
            .get(&VariableKey::CreditsSold)
            .expect("No credit-sell variable")
    }

    /// The number of variables in the map
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, key: VariableKey, var: Variable) {
        let existing = self.0.insert(key, var).is_some();
        assert!(!existing, "Duplicate entry for var");
    }
}

/// A fully assembled, solver-ready MILP.
///
/// Created once per solve request, consumed exactly once by [`solve_model`], then discarded.
pub struct BuiltModel {
    problem: Problem,
    variables: VariableMap,
    /// Objective coefficient per column, in column order
    objective: Vec<f64>,
}

impl BuiltModel {
    /// The number of decision variables in the model
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// The number of constraint rows in the model
    pub fn num_constraints(&self) -> usize {
        self.problem.num_rows()
    }

    /// The objective coefficient for each variable, in column order
    pub fn objective_coefficients(&self) -> &[f64] {
        &self.objective
    }
}

/// An error returned by the solver adapter.
///
/// `Infeasible` and `Unbounded` indicate a structurally valid model the solver could not
/// optimise; `Solver` indicates an internal solver failure (including resource limits).
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SolveError {
    /// The solver reported the problem infeasible
    #[error("solver reported the problem infeasible")]
    Infeasible,
    /// The solver reported the problem unbounded
    #[error("solver reported the problem unbounded")]
    Unbounded,
    /// The solver itself failed
    #[error("solver error: {0}")]
    Solver(String),
}

/// The solution to the production-planning problem
#[derive(Debug)]
pub struct Solution {
    keys: Vec<VariableKey>,
    columns: Vec<f64>,
    objective_value: f64,
}

impl Solution {
    /// Iterate over the optimal production quantity for each vehicle model
    pub fn iter_production(&self) -> impl Iterator<Item = (&VehicleID, f64)> {
        self.keys
            .iter()
            .zip(self.columns.iter().copied())
            .filter_map(|(key, value)| match key {
                VariableKey::Production(id) => Some((id, value)),
                _ => None,
            })
    }

    /// The optimal production quantity for the given vehicle model, if it is in the solution
    pub fn production(&self, id: &str) -> Option<f64> {
        self.iter_production()
            .find(|(vehicle_id, _)| &*vehicle_id.0 == id)
            .map(|(_, value)| value)
    }

    /// The number of credits bought at the optimum
    pub fn credits_bought(&self) -> f64 {
        self.variable_value(&VariableKey::CreditsBought)
    }

    /// The number of credits sold at the optimum
    pub fn credits_sold(&self) -> f64 {
        self.variable_value(&VariableKey::CreditsSold)
    }

    /// The objective value (net profit) at the optimum
    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    fn variable_value(&self, key: &VariableKey) -> f64 {
        self.keys
            .iter()
            .zip(self.columns.iter().copied())
            .find(|(k, _)| **k == *key)
            .expect("No value for variable")
            .1
    }
}

/// Build a solver-ready model from a parameter set and an explicit credit price.
///
/// The credit price is a parameter rather than being read from the regulation so that the
/// sensitivity sweep can re-parameterise the objective without mutating shared state.
///
/// # Errors
///
/// Returns an error for parameter sets that are infeasible by construction (see
/// [`check_parameters`]); these never reach the solver.
pub fn build_model(set: &ParameterSet, credit_price: f64) -> Result<BuiltModel> {
    ensure!(
        credit_price.is_finite() && credit_price >= 0.0,
        "credit price must be a finite non-negative number"
    );
    check_parameters(set)?;

    let mut problem = Problem::default();
    let mut variables = VariableMap::default();
    let mut objective = Vec::with_capacity(set.vehicles.len() + 2);

    // Production quantities: non-negative integers bounded by capacity. Demand bands and share
    // bands are added as constraint rows.
    for vehicle in set.vehicles.values() {
        let coeff = vehicle.margin();
        let var = problem.add_integer_column(coeff, 0.0..=vehicle.capacity);
        variables.insert(VariableKey::Production(vehicle.id.clone()), var);
        objective.push(coeff);
    }

    // Credit-buy and credit-sell, both priced at the market credit price. The opposite signs are
    // what make the buy/sell split exact: buying beyond the strict shortfall, or buying and
    // selling simultaneously, can only reduce profit.
    for (key, coeff) in [
        (VariableKey::CreditsBought, -credit_price),
        (VariableKey::CreditsSold, credit_price),
    ] {
        let var = if set.regulation.whole_credits {
            problem.add_integer_column(coeff, 0.0..)
        } else {
            problem.add_column(coeff, 0.0..)
        };
        variables.insert(key, var);
        objective.push(coeff);
    }

    add_constraints(&mut problem, &variables, set);

    Ok(BuiltModel {
        problem,
        variables,
        objective,
    })
}

/// Check that a parameter set is not infeasible by construction.
///
/// These are the error conditions that must be caught before a model reaches the solver:
/// production bounds whose variant disagrees with the regulation mode, demand bounds exceeding
/// capacity, inverted bands, a production ceiling below the sum of demand minimums, and share
/// configurations that force zero fuel-vehicle production (for which the ratio-based compliance
/// formula is undefined).
pub fn check_parameters(set: &ParameterSet) -> Result<()> {
    for vehicle in set.vehicles.values() {
        match (set.regulation.mode, vehicle.bounds) {
            (RegulationMode::DemandBounds, ProductionBounds::Demand { min, max }) => {
                ensure!(
                    min <= max,
                    "Vehicle {}: demand_min exceeds demand_max",
                    vehicle.id
                );
                ensure!(
                    min <= vehicle.capacity,
                    "Vehicle {}: demand_min exceeds capacity",
                    vehicle.id
                );
            }
            (RegulationMode::ProductionShares, ProductionBounds::Share { min, max }) => {
                ensure!(
                    min <= max,
                    "Vehicle {}: share_min exceeds share_max",
                    vehicle.id
                );
            }
            _ => bail!(
                "Vehicle {}: production bounds do not match the regulation mode",
                vehicle.id
            ),
        }
    }

    match set.regulation.mode {
        RegulationMode::DemandBounds => {
            if let Some(ceiling) = set.regulation.max_total_production {
                let demand_floor: f64 = set
                    .vehicles
                    .values()
                    .map(|vehicle| match vehicle.bounds {
                        ProductionBounds::Demand { min, .. } => min,
                        ProductionBounds::Share { .. } => 0.0,
                    })
                    .sum();
                ensure!(
                    ceiling >= demand_floor,
                    "max_total_production is smaller than the sum of demand minimums"
                );
            }
        }
        RegulationMode::ProductionShares => {
            let share_floor: f64 = set
                .vehicles
                .values()
                .map(|vehicle| match vehicle.bounds {
                    ProductionBounds::Share { min, .. } => min,
                    ProductionBounds::Demand { .. } => 0.0,
                })
                .sum();
            ensure!(
                share_floor <= 1.0,
                "Production share minimums sum to more than 1"
            );

            // The share formulation carries a total-fuel-production floor, so a set whose bounds
            // force zero fuel production is rejected here rather than submitted as an ill-posed
            // model.
            let fuel_possible = set.iter_family(Family::Fuel).any(|vehicle| {
                vehicle.capacity >= 1.0
                    && matches!(vehicle.bounds, ProductionBounds::Share { max, .. } if max > 0.0)
            });
            ensure!(
                fuel_possible,
                "Production shares force zero fuel-vehicle production, for which the \
                compliance ratio is undefined"
            );
        }
    }

    Ok(())
}

/// Submit a built model to the HiGHS solver.
///
/// # Returns
///
/// The optimal variable assignment and objective value, or a [`SolveError`] describing why no
/// optimum was found. The model is consumed either way.
pub fn solve_model(model: BuiltModel) -> Result<Solution, SolveError> {
    let BuiltModel {
        problem,
        variables,
        objective,
    } = model;

    let solved = problem.optimise(Sense::Maximise).solve();
    match solved.status() {
        HighsModelStatus::Optimal => {
            let columns = solved.get_solution().columns().to_vec();
            let objective_value = objective
                .iter()
                .zip(columns.iter())
                .map(|(coeff, value)| coeff * value)
                .sum();

            Ok(Solution {
                keys: variables.0.keys().cloned().collect(),
                columns,
                objective_value,
            })
        }
        HighsModelStatus::Infeasible => Err(SolveError::Infeasible),
        HighsModelStatus::Unbounded => Err(SolveError::Unbounded),
        status => Err(SolveError::Solver(format!("{status:?}"))),
    }
}
