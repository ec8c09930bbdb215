//! Monte Carlo outcome simulation and risk assessment
//!
//! The descriptive half of the crate: instead of asking "can this outcome
//! still happen?", sample many randomized matchup continuations from
//! historical placement tendencies and report how the final standings
//! distribute.

pub mod monte_carlo;
pub mod risk;

pub use monte_carlo::{
    simulate, MonteCarloResult, OutcomeFrequency, RankProbabilities, ScoreInterval,
    SimulationError,
};
pub use risk::{assess_risk, RiskAssessment, RiskLevel};
