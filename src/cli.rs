//! The command line interface for the tool.
use crate::log;
use crate::model::ParameterSet;
use crate::optimisation::{build_model, check_parameters, solve_model};
use crate::output::{
    create_output_directory, get_output_dir, write_solution_to_csv, write_sweep_to_csv,
};
use crate::sweep::{price_range, run_sweep};
use ::log::info;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use itertools::Itertools;
use std::path::{Path, PathBuf};

/// The command line interface for the tool.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The available commands.
    #[command(subcommand)]
    command: Commands,
}

/// Common options for commands that write output files
#[derive(Args)]
pub struct RunOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Compute the optimal production plan at the configured credit price.
    Solve {
        /// Path to the model directory.
        model_dir: PathBuf,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Solve across a range of credit prices and record the profit trajectory.
    Sweep {
        /// Path to the model directory.
        model_dir: PathBuf,
        /// The lowest credit price to solve at
        #[arg(long)]
        from: f64,
        /// The highest credit price to solve at
        #[arg(long)]
        to: f64,
        /// The number of equally spaced prices to solve at
        #[arg(long, default_value_t = 10)]
        steps: usize,
        /// Other run options
        #[command(flatten)]
        opts: RunOpts,
    },
    /// Load and validate a parameter set without solving.
    Validate {
        /// Path to the model directory.
        model_dir: PathBuf,
    },
}

impl Commands {
    /// Execute the supplied CLI command
    fn execute(self) -> Result<()> {
        match self {
            Self::Solve { model_dir, opts } => handle_solve_command(&model_dir, &opts),
            Self::Sweep {
                model_dir,
                from,
                to,
                steps,
                opts,
            } => handle_sweep_command(&model_dir, from, to, steps, &opts),
            Self::Validate { model_dir } => handle_validate_command(&model_dir),
        }
    }
}

/// Parse CLI arguments and run the program
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    log::init().context("Failed to initialise logging.")?;

    cli.command.execute()
}

/// Handle the `solve` command.
pub fn handle_solve_command(model_dir: &Path, opts: &RunOpts) -> Result<()> {
    let set = ParameterSet::from_path(model_dir).context("Failed to load parameter set.")?;

    let model = build_model(&set, set.regulation.credit_price)?;
    let solution = solve_model(model)?;

    for (id, quantity) in solution.iter_production() {
        info!("{id}: {quantity} units");
    }
    info!(
        "Credits bought: {}; credits sold: {}",
        solution.credits_bought(),
        solution.credits_sold()
    );
    info!("Net profit: {}", solution.objective_value());

    let output_dir = output_dir_for(model_dir, opts)?;
    write_solution_to_csv(&output_dir, &set, &solution)?;
    info!("Results written to {}", output_dir.display());

    Ok(())
}

/// Handle the `sweep` command.
pub fn handle_sweep_command(
    model_dir: &Path,
    from: f64,
    to: f64,
    steps: usize,
    opts: &RunOpts,
) -> Result<()> {
    let set = ParameterSet::from_path(model_dir).context("Failed to load parameter set.")?;

    let prices = price_range(from, to, steps);
    let sweep = run_sweep(&set, &prices);

    let output_dir = output_dir_for(model_dir, opts)?;
    write_sweep_to_csv(&output_dir, &sweep)?;
    info!("Sweep results written to {}", output_dir.display());

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(model_dir: &Path) -> Result<()> {
    let set = ParameterSet::from_path(model_dir).context("Failed to load parameter set.")?;
    check_parameters(&set)?;

    info!(
        "Parameter set is valid: {} vehicle models ({})",
        set.vehicles.len(),
        set.vehicles.keys().join(", ")
    );

    Ok(())
}

/// Resolve and create the output directory for a command
fn output_dir_for(model_dir: &Path, opts: &RunOpts) -> Result<PathBuf> {
    let output_dir = match &opts.output_dir {
        Some(output_dir) => output_dir.clone(),
        None => get_output_dir(model_dir)?,
    };
    create_output_directory(&output_dir)?;

    Ok(output_dir)
}
