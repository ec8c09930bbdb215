//! Risk classification of a target outcome
//!
//! Maps a desired final standing's simulated probability to a qualitative
//! risk level, for callers that want a one-word answer to "how safe is it
//! to bank on this?".

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::DesiredOutcome;

use super::MonteCarloResult;

/// Qualitative likelihood that a target outcome fails to materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    /// Probability >= 0.80
    VeryLow,
    /// >= 0.60
    Low,
    /// >= 0.35
    Moderate,
    /// >= 0.15
    High,
    /// Below 0.15
    VeryHigh,
}

impl RiskLevel {
    /// Bucket a simulated probability into a risk level
    pub fn from_probability(probability: f64) -> RiskLevel {
        if probability >= 0.80 {
            RiskLevel::VeryLow
        } else if probability >= 0.60 {
            RiskLevel::Low
        } else if probability >= 0.35 {
            RiskLevel::Moderate
        } else if probability >= 0.15 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::VeryLow => write!(f, "very-low"),
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::VeryHigh => write!(f, "very-high"),
        }
    }
}

/// Probability, bucket, and human-readable summary for one target outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub risk: RiskLevel,
    pub message: String,
}

/// Assess how risky it is to count on the desired outcome
///
/// The probability comes from the simulation's outcome frequency table; an
/// outcome never observed across all iterations reads as probability 0
/// (very-high risk).
pub fn assess_risk(outcome: &DesiredOutcome, simulation: &MonteCarloResult) -> RiskAssessment {
    let probability = simulation.outcome_probability(outcome);
    let risk = RiskLevel::from_probability(probability);
    let message = format!(
        "{} occurred in {:.1}% of {} simulated completions ({} risk)",
        outcome,
        probability * 100.0,
        simulation.iterations,
        risk
    );
    RiskAssessment {
        probability,
        risk,
        message,
    }
}
