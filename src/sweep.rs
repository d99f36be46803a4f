//! The credit-price sensitivity sweep.
//!
//! The sweep controller owns the iteration state: for each candidate price it rebuilds the
//! objective (prices affect only the buy/sell coefficients) and solves, recording the outcome.
//! A failed point is recorded and the sweep continues; no price is skipped or reordered.
use crate::model::ParameterSet;
use crate::optimisation::{SolveError, build_model, solve_model};
use log::{error, info, warn};

/// The outcome of one sweep iteration
#[derive(Debug, PartialEq, Clone)]
pub enum SweepOutcome {
    /// The solver found an optimal plan with this net profit
    Optimal(f64),
    /// The parameter set was rejected at model-build time
    InvalidParameters(String),
    /// The solver failed to produce an optimal solution
    SolveFailed(SolveError),
}

impl SweepOutcome {
    /// The profit at this point, if the solve was successful
    pub fn profit(&self) -> Option<f64> {
        match self {
            SweepOutcome::Optimal(profit) => Some(*profit),
            _ => None,
        }
    }
}

/// One point of a sweep result
#[derive(Debug, PartialEq, Clone)]
pub struct SweepPoint {
    /// The candidate credit price for this point
    pub credit_price: f64,
    /// What happened when solving at this price
    pub outcome: SweepOutcome,
}

/// An ordered sequence of sweep points, one per input price
pub type SweepResult = Vec<SweepPoint>;

/// Run a sensitivity sweep over the given credit prices.
///
/// The result has exactly one entry per input price, in input order. Re-running with the same
/// parameter set and prices yields identical results; no state is carried across iterations
/// other than the read-only parameter set.
pub fn run_sweep(set: &ParameterSet, prices: &[f64]) -> SweepResult {
    prices
        .iter()
        .map(|&credit_price| SweepPoint {
            credit_price,
            outcome: solve_at_price(set, credit_price),
        })
        .collect()
}

/// Build and solve at one candidate price, logging the outcome
fn solve_at_price(set: &ParameterSet, credit_price: f64) -> SweepOutcome {
    let model = match build_model(set, credit_price) {
        Ok(model) => model,
        Err(err) => {
            error!("Credit price {credit_price}: model rejected: {err:#}");
            return SweepOutcome::InvalidParameters(format!("{err:#}"));
        }
    };

    match solve_model(model) {
        Ok(solution) => {
            info!(
                "Credit price {credit_price}: profit {}",
                solution.objective_value()
            );
            SweepOutcome::Optimal(solution.objective_value())
        }
        Err(err @ SolveError::Solver(_)) => {
            error!("Credit price {credit_price}: {err}");
            SweepOutcome::SolveFailed(err)
        }
        Err(err) => {
            warn!("Credit price {credit_price}: {err}");
            SweepOutcome::SolveFailed(err)
        }
    }
}

/// Equally spaced candidate prices covering the closed interval from `start` to `stop`
pub fn price_range(start: f64, stop: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let gap = (stop - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + gap * i as f64).collect()
        }
    }
}
