//! Credit accounting for the dual-credit regulation.
//!
//! The two regulation balances are produced as symbolic linear expressions over the production
//! quantities, as (vehicle ID, coefficient) terms. The model builder maps them onto problem
//! columns; nothing here touches the solver.
use crate::id::VehicleID;
use crate::model::ParameterSet;
use crate::vehicle::Family;

/// A linear expression over production quantities, as (vehicle, coefficient) terms
pub type ProductionExpr = Vec<(VehicleID, f64)>;

/// The fuel-economy (CAFC) compliance balance.
///
/// Positive means surplus, negative means deficit:
///
/// k·Σ target·q − Σ actual·q, over fuel vehicles
///
/// The regulatory text states the requirement as a weighted *average* consumption against a
/// threshold; multiplying through by total fuel production gives this per-unit form, which is
/// linear and well defined even when no fuel vehicles are produced. If there are no fuel
/// vehicles at all, the balance is the empty sum.
pub fn cafc_balance(set: &ParameterSet) -> ProductionExpr {
    let k = set.regulation.compliance_multiplier;
    set.iter_family(Family::Fuel)
        .map(|vehicle| {
            let economy = vehicle.fuel_economy();
            (vehicle.id.clone(), k * economy.target - economy.actual)
        })
        .collect()
}

/// The new-energy vehicle (NEV) credit balance.
///
/// Credits generated by electric production, less the ratio requirement tied to fuel production:
///
/// Σ rate·q over electric vehicles − beta·Σ q over fuel vehicles
///
/// Either family may be empty; the corresponding sum is then empty.
pub fn nev_balance(set: &ParameterSet) -> ProductionExpr {
    let beta = set.regulation.credit_ratio;
    let generated = set
        .iter_family(Family::Electric)
        .map(|vehicle| (vehicle.id.clone(), vehicle.credit_rate()));
    let required = set
        .iter_family(Family::Fuel)
        .map(|vehicle| (vehicle.id.clone(), -beta));

    generated.chain(required).collect()
}
