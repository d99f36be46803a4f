//! Code for vehicle models (product lines).
use crate::id::VehicleID;
use indexmap::IndexMap;
use serde_string_enum::{DeserializeLabeledStringEnum, SerializeLabeledStringEnum};

/// A map of vehicle models, keyed and ordered by ID
pub type VehicleMap = IndexMap<VehicleID, Vehicle>;

/// The product family a vehicle model belongs to
#[derive(
    PartialEq, Eq, Clone, Copy, Debug, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum Family {
    /// A conventional fuel-powered vehicle, subject to fuel-consumption compliance
    #[string = "fuel"]
    Fuel,
    /// A new-energy (electric) vehicle, generating credits per unit produced
    #[string = "electric"]
    Electric,
}

/// Real-world and regulatory fuel-consumption figures for a fuel-powered vehicle
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct FuelEconomy {
    /// Actual fuel consumption per unit (e.g. L/100km)
    pub actual: f64,
    /// The regulatory target fuel consumption for this model
    pub target: f64,
}

/// The production bounds for one vehicle model.
///
/// Which variant is used must agree with the regulation mode: fixed demand bands for
/// [`RegulationMode::DemandBounds`] and share-of-total bands for
/// [`RegulationMode::ProductionShares`].
///
/// [`RegulationMode::DemandBounds`]: crate::regulation::RegulationMode::DemandBounds
/// [`RegulationMode::ProductionShares`]: crate::regulation::RegulationMode::ProductionShares
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ProductionBounds {
    /// Fixed demand band, in units of production
    Demand {
        /// Minimum production required to meet contracted demand
        min: f64,
        /// Maximum sellable production
        max: f64,
    },
    /// Band on this model's share of total production across all models
    Share {
        /// Minimum fraction of total production
        min: f64,
        /// Maximum fraction of total production
        max: f64,
    },
}

/// One vehicle model in the parameter set.
///
/// Immutable once loaded; owned by the [`ParameterSet`](crate::model::ParameterSet).
#[derive(PartialEq, Debug, Clone)]
pub struct Vehicle {
    /// A unique identifier for the vehicle model
    pub id: VehicleID,
    /// The product family this model belongs to
    pub family: Family,
    /// Unit sale price
    pub price: f64,
    /// Unit production cost
    pub cost: f64,
    /// Production capacity in units
    pub capacity: f64,
    /// Demand or production-share bounds, depending on regulation mode
    pub bounds: ProductionBounds,
    /// Fuel-consumption figures. Present iff the family is [`Family::Fuel`].
    pub fuel: Option<FuelEconomy>,
    /// Credits generated per unit produced. Present iff the family is [`Family::Electric`].
    pub credit_rate: Option<f64>,
}

impl Vehicle {
    /// The profit margin per unit produced and sold
    pub fn margin(&self) -> f64 {
        self.price - self.cost
    }

    /// Fuel-consumption figures for a fuel-powered vehicle.
    ///
    /// # Panics
    ///
    /// Panics if called on an electric vehicle. Input validation guarantees the data is present
    /// for every fuel vehicle.
    pub fn fuel_economy(&self) -> &FuelEconomy {
        self.fuel
            .as_ref()
            .expect("No fuel economy data for fuel vehicle")
    }

    /// Credit generation rate for an electric vehicle.
    ///
    /// # Panics
    ///
    /// Panics if called on a fuel vehicle. Input validation guarantees the rate is present for
    /// every electric vehicle.
    pub fn credit_rate(&self) -> f64 {
        self.credit_rate
            .expect("No credit generation rate for electric vehicle")
    }
}
