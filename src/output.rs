//! The module responsible for writing output data to disk.
use crate::id::VehicleID;
use crate::model::ParameterSet;
use crate::optimisation::{SolveError, Solution};
use crate::sweep::{SweepOutcome, SweepResult};
use crate::vehicle::Family;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The root folder in which model-specific output folders will be created
const OUTPUT_DIRECTORY_ROOT: &str = "dualcredit_results";

/// The output file name for optimal production quantities
const PRODUCTION_FILE_NAME: &str = "production.csv";

/// The output file name for the credit trade summary
const CREDITS_FILE_NAME: &str = "credits.csv";

/// The output file name for sweep curves
const SWEEP_FILE_NAME: &str = "sweep.csv";

/// Get the default output directory for the model at the specified path
pub fn get_output_dir(model_dir: &Path) -> Result<PathBuf> {
    // Canonicalise in case the user has specified "."
    let model_dir = model_dir
        .canonicalize()
        .context("Could not resolve path to model")?;

    let model_name = model_dir
        .file_name()
        .context("Model cannot be in root folder")?
        .to_str()
        .context("Invalid chars in model dir name")?;

    Ok([OUTPUT_DIRECTORY_ROOT, model_name].iter().collect())
}

/// Create the output directory for the model, if it does not already exist
pub fn create_output_directory(output_dir: &Path) -> Result<()> {
    if output_dir.is_dir() {
        // already exists
        return Ok(());
    }

    fs::create_dir_all(output_dir)?;

    Ok(())
}

/// Represents one vehicle model's plan in the production CSV file
#[derive(Serialize, Debug, PartialEq)]
struct ProductionRow {
    vehicle_id: VehicleID,
    family: Family,
    quantity: f64,
    profit: f64,
}

/// Represents the credit trade summary CSV file
#[derive(Serialize, Debug, PartialEq)]
struct CreditsRow {
    credits_bought: f64,
    credits_sold: f64,
    net_profit: f64,
}

/// Represents one point of a sweep in the sweep CSV file
#[derive(Serialize, Debug, PartialEq)]
struct SweepRow {
    credit_price: f64,
    status: &'static str,
    profit: Option<f64>,
}

/// Write a single-solve result to CSV files in the specified output directory.
///
/// Two files are written: per-model quantities and margins, and the credit trade summary.
pub fn write_solution_to_csv(
    output_dir: &Path,
    set: &ParameterSet,
    solution: &Solution,
) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_dir.join(PRODUCTION_FILE_NAME))?;
    for (id, quantity) in solution.iter_production() {
        let vehicle = &set.vehicles[id];
        writer.serialize(ProductionRow {
            vehicle_id: id.clone(),
            family: vehicle.family,
            quantity,
            profit: vehicle.margin() * quantity,
        })?;
    }
    writer.flush()?;

    let mut writer = csv::Writer::from_path(output_dir.join(CREDITS_FILE_NAME))?;
    writer.serialize(CreditsRow {
        credits_bought: solution.credits_bought(),
        credits_sold: solution.credits_sold(),
        net_profit: solution.objective_value(),
    })?;
    writer.flush()?;

    Ok(())
}

/// Write a sweep result to a CSV file in the specified output directory.
///
/// Failed points are written with an empty profit column and a status describing the failure.
pub fn write_sweep_to_csv(output_dir: &Path, sweep: &SweepResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_dir.join(SWEEP_FILE_NAME))?;
    for point in sweep {
        writer.serialize(SweepRow {
            credit_price: point.credit_price,
            status: outcome_status(&point.outcome),
            profit: point.outcome.profit(),
        })?;
    }
    writer.flush()?;

    Ok(())
}

/// A short status label for a sweep outcome
fn outcome_status(outcome: &SweepOutcome) -> &'static str {
    match outcome {
        SweepOutcome::Optimal(_) => "optimal",
        SweepOutcome::InvalidParameters(_) => "invalid_parameters",
        SweepOutcome::SolveFailed(SolveError::Infeasible) => "infeasible",
        SweepOutcome::SolveFailed(SolveError::Unbounded) => "unbounded",
        SweepOutcome::SolveFailed(SolveError::Solver(_)) => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::demand_set;
    use crate::optimisation::{build_model, solve_model};
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_create_output_directory() {
        let dir = tempdir().unwrap();
        let output_dir = dir.path().join("results");
        create_output_directory(&output_dir).unwrap();
        assert!(output_dir.is_dir());

        // Idempotent
        create_output_directory(&output_dir).unwrap();
    }

    #[rstest]
    fn test_write_solution_to_csv(demand_set: ParameterSet) {
        let solution =
            solve_model(build_model(&demand_set, 3000.0).unwrap()).unwrap();

        let dir = tempdir().unwrap();
        write_solution_to_csv(dir.path(), &demand_set, &solution).unwrap();

        let production = fs::read_to_string(dir.path().join(PRODUCTION_FILE_NAME)).unwrap();
        assert!(production.starts_with("vehicle_id,family,quantity,profit"));
        assert_eq!(production.lines().count(), 5);

        let credits = fs::read_to_string(dir.path().join(CREDITS_FILE_NAME)).unwrap();
        assert!(credits.starts_with("credits_bought,credits_sold,net_profit"));
    }

    #[rstest]
    fn test_write_sweep_to_csv(demand_set: ParameterSet) {
        let sweep = crate::sweep::run_sweep(&demand_set, &[1000.0, 3000.0]);

        let dir = tempdir().unwrap();
        write_sweep_to_csv(dir.path(), &sweep).unwrap();

        let contents = fs::read_to_string(dir.path().join(SWEEP_FILE_NAME)).unwrap();
        assert!(contents.starts_with("credit_price,status,profit"));
        assert_eq!(contents.lines().count(), 3);
        assert!(contents.contains("optimal"));
    }
}
