//! The parameter set: all input data for one planning problem.
use crate::input::regulation::read_regulation;
use crate::input::vehicle::read_vehicles;
use crate::regulation::Regulation;
use crate::vehicle::{Family, Vehicle, VehicleMap};
use anyhow::Result;
use std::path::Path;

/// The full set of input data for one planning problem.
///
/// Immutable once loaded; shared read-only by the model builder and the sweep controller.
pub struct ParameterSet {
    /// Vehicle models, in file order
    pub vehicles: VehicleMap,
    /// Scalar parameters of the regulation
    pub regulation: Regulation,
}

impl ParameterSet {
    /// Read a parameter set from the specified model directory.
    ///
    /// # Arguments
    ///
    /// * `model_dir` - Folder containing model configuration files
    pub fn from_path<P: AsRef<Path>>(model_dir: P) -> Result<ParameterSet> {
        let regulation = read_regulation(model_dir.as_ref())?;
        let vehicles = read_vehicles(model_dir.as_ref(), regulation.mode)?;

        Ok(ParameterSet {
            vehicles,
            regulation,
        })
    }

    /// Iterate over the vehicle models belonging to the given family.
    ///
    /// May yield no items; a family with no members contributes empty sums downstream.
    pub fn iter_family(&self, family: Family) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values().filter(move |v| v.family == family)
    }
}
