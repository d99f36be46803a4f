//! Code for reading the vehicle models CSV file.
use crate::input::{input_err_msg, read_vec_from_csv};
use crate::regulation::RegulationMode;
use crate::vehicle::{Family, FuelEconomy, ProductionBounds, Vehicle, VehicleMap};
use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

const VEHICLES_FILE_NAME: &str = "vehicles.csv";

/// A row of the vehicles CSV file, before mode-dependent validation
#[derive(PartialEq, Debug, Deserialize)]
struct VehicleRaw {
    id: String,
    family: Family,
    price: f64,
    cost: f64,
    capacity: f64,
    demand_min: Option<f64>,
    demand_max: Option<f64>,
    share_min: Option<f64>,
    share_max: Option<f64>,
    fuel_consumption: Option<f64>,
    fuel_target: Option<f64>,
    credit_rate: Option<f64>,
}

impl VehicleRaw {
    /// Convert to a [`Vehicle`], validating fields against the regulation mode
    fn into_vehicle(self, mode: RegulationMode) -> Result<Vehicle> {
        ensure!(
            self.price.is_finite() && self.cost.is_finite(),
            "Error in vehicle {}: price and cost must be finite numbers",
            self.id
        );
        ensure!(
            self.capacity.is_finite() && self.capacity >= 0.0,
            "Error in vehicle {}: capacity must be a finite non-negative number",
            self.id
        );

        let bounds = self.read_bounds(mode)?;

        let fuel = match self.family {
            Family::Fuel => {
                let (actual, target) = self
                    .fuel_consumption
                    .zip(self.fuel_target)
                    .with_context(|| {
                        format!(
                            "Error in vehicle {}: fuel vehicles require fuel_consumption and \
                            fuel_target",
                            self.id
                        )
                    })?;
                ensure!(
                    actual > 0.0 && target > 0.0,
                    "Error in vehicle {}: fuel consumption figures must be greater than zero",
                    self.id
                );

                Some(FuelEconomy { actual, target })
            }
            Family::Electric => None,
        };

        let credit_rate = match self.family {
            Family::Electric => {
                let rate = self.credit_rate.with_context(|| {
                    format!(
                        "Error in vehicle {}: electric vehicles require credit_rate",
                        self.id
                    )
                })?;
                ensure!(
                    rate.is_finite() && rate > 0.0,
                    "Error in vehicle {}: credit_rate must be greater than zero",
                    self.id
                );

                Some(rate)
            }
            Family::Fuel => None,
        };

        Ok(Vehicle {
            id: self.id.into(),
            family: self.family,
            price: self.price,
            cost: self.cost,
            capacity: self.capacity,
            bounds,
            fuel,
            credit_rate,
        })
    }

    /// Read the production bounds matching the regulation mode
    fn read_bounds(&self, mode: RegulationMode) -> Result<ProductionBounds> {
        match mode {
            RegulationMode::DemandBounds => {
                let (min, max) = self.demand_min.zip(self.demand_max).with_context(|| {
                    format!(
                        "Error in vehicle {}: demand_min and demand_max are required in \
                        demand_bounds mode",
                        self.id
                    )
                })?;
                ensure!(
                    min.is_finite() && max.is_finite() && min >= 0.0,
                    "Error in vehicle {}: demand bounds must be finite and non-negative",
                    self.id
                );

                Ok(ProductionBounds::Demand { min, max })
            }
            RegulationMode::ProductionShares => {
                let (min, max) = self.share_min.zip(self.share_max).with_context(|| {
                    format!(
                        "Error in vehicle {}: share_min and share_max are required in \
                        production_shares mode",
                        self.id
                    )
                })?;
                ensure!(
                    (0.0..=1.0).contains(&min) && (0.0..=1.0).contains(&max),
                    "Error in vehicle {}: production shares must be between 0 and 1",
                    self.id
                );

                Ok(ProductionBounds::Share { min, max })
            }
        }
    }
}

/// Read vehicle models from the specified model directory.
///
/// # Arguments
///
/// * `model_dir` - Folder containing model configuration files
/// * `mode` - The regulation mode, which determines the required per-vehicle columns
///
/// # Returns
///
/// A map of vehicle models in file order, keyed by ID, or an error.
pub fn read_vehicles(model_dir: &Path, mode: RegulationMode) -> Result<VehicleMap> {
    let file_path = model_dir.join(VEHICLES_FILE_NAME);
    let vehicles_raw: Vec<VehicleRaw> = read_vec_from_csv(&file_path)?;

    let mut vehicles = VehicleMap::new();
    for raw in vehicles_raw {
        let vehicle = raw
            .into_vehicle(mode)
            .with_context(|| input_err_msg(&file_path))?;
        let id = vehicle.id.clone();
        ensure!(
            vehicles.insert(id.clone(), vehicle).is_none(),
            "Duplicate vehicle ID: {id}"
        );
    }

    Ok(vehicles)
}
