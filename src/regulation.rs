//! Scalar parameters of the dual-credit regulation.
use anyhow::{Result, ensure};
use serde::Deserialize;
use serde_string_enum::DeserializeLabeledStringEnum;

/// How the regulation encodes per-model production limits.
///
/// The mode is an explicit tag in the regulation file; it is never inferred from which columns
/// happen to be populated in the vehicles file.
#[derive(DeserializeLabeledStringEnum, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum RegulationMode {
    /// Per-model fixed demand bands
    #[default]
    #[string = "demand_bounds"]
    DemandBounds,
    /// Per-model bands on the share of total production, plus a plant-wide production ceiling
    #[string = "production_shares"]
    ProductionShares,
}

/// Scalar constants of the regulation, immutable for the duration of one solve.
///
/// The credit price is the one parameter varied between solves by the sensitivity sweep; it is
/// passed explicitly to the model builder rather than mutated here.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Regulation {
    /// Regulation mode (see [`RegulationMode`])
    #[serde(default)]
    pub mode: RegulationMode,
    /// The compliance multiplier applied to target fuel consumption (k)
    pub compliance_multiplier: f64,
    /// Required ratio of electric credits to fuel-vehicle production (beta)
    pub credit_ratio: f64,
    /// Market price per credit (p)
    pub credit_price: f64,
    /// Whether credits are traded in whole units
    #[serde(default)]
    pub whole_credits: bool,
    /// Plant-wide ceiling on total production across all models.
    ///
    /// Required in production-shares mode; optional otherwise.
    pub max_total_production: Option<f64>,
}

impl Regulation {
    /// Validate the regulation scalars after reading in file
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.compliance_multiplier.is_finite() && self.compliance_multiplier > 0.0,
            "compliance_multiplier must be a finite number greater than zero"
        );
        ensure!(
            self.credit_ratio.is_finite() && self.credit_ratio >= 0.0,
            "credit_ratio must be a finite non-negative number"
        );
        ensure!(
            self.credit_price.is_finite() && self.credit_price >= 0.0,
            "credit_price must be a finite non-negative number"
        );

        if let Some(ceiling) = self.max_total_production {
            ensure!(
                ceiling.is_finite() && ceiling > 0.0,
                "max_total_production must be a finite number greater than zero"
            );
        }

        ensure!(
            self.mode != RegulationMode::ProductionShares || self.max_total_production.is_some(),
            "max_total_production is required in production_shares mode"
        );

        Ok(())
    }
}
