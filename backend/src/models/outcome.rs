//! Desired outcomes, solver results, and solve budgets

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use super::event::{ModelError, Scenario};
use super::team::{ScoreVector, Team};

/// Maximum number of remaining events a solve call will accept
///
/// The search space is 6^N; beyond 50 events even well-pruned searches can
/// blow past any reasonable budget, so the orchestrator rejects larger
/// inputs outright.
pub const MAX_EVENTS: usize = 50;

/// A strict total order over the three teams: the final standings the caller
/// wants to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredOutcome {
    pub first: Team,
    pub second: Team,
    pub third: Team,
}

impl DesiredOutcome {
    pub fn new(first: Team, second: Team, third: Team) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// Reject outcomes naming the same team twice
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.first == self.second || self.first == self.third {
            return Err(ModelError::DuplicateTeam(self.first));
        }
        if self.second == self.third {
            return Err(ModelError::DuplicateTeam(self.second));
        }
        Ok(())
    }
}

impl fmt::Display for DesiredOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {} > {}", self.first, self.second, self.third)
    }
}

/// Definitive status of a solve call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    /// A witness scenario was found
    Achievable,

    /// Proven (by bounds or exhaustion) or reported (by the heuristic) to
    /// have no solution; `reason` says which
    Infeasible,

    /// Budget exhausted without proving either way; retry with a larger
    /// budget or accept the heuristic answer
    Inconclusive,
}

/// Which strategy produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// No search needed (degenerate input or whole-horizon bound rejection)
    Obvious,
    /// Branch-and-bound exact search
    Exact,
    /// Deterministic greedy construction with binary search over effort
    Heuristic,
    /// Randomized permutation-order descents
    Random,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Obvious => write!(f, "obvious"),
            Strategy::Exact => write!(f, "exact"),
            Strategy::Heuristic => write!(f, "heuristic"),
            Strategy::Random => write!(f, "random"),
        }
    }
}

/// How demanding an achievable scenario is for the desired winner
///
/// Classified by the fraction of events where the desired winner must take
/// first place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Difficulty {
    /// Winner firsts in at most 40% of events
    Easy,
    /// At most 60%
    Moderate,
    /// At most 80%
    Hard,
    /// More than 80%
    VeryHard,
}

impl Difficulty {
    /// Bucket a firsts-fraction into a difficulty level
    pub fn from_first_fraction(fraction: f64) -> Difficulty {
        if fraction <= 0.40 {
            Difficulty::Easy
        } else if fraction <= 0.60 {
            Difficulty::Moderate
        } else if fraction <= 0.80 {
            Difficulty::Hard
        } else {
            Difficulty::VeryHard
        }
    }
}

/// One entry of the orchestrator's diagnostics trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyAttempt {
    pub strategy: Strategy,
    pub status: SolveStatus,
    pub iterations: u64,
}

/// Result of a solve call
///
/// `scenario`, `final_scores`, and `margin` are present iff the status is
/// [`SolveStatus::Achievable`]; `reason` is present iff it is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub status: SolveStatus,
    pub scenario: Option<Scenario>,
    pub final_scores: Option<ScoreVector>,
    /// Final gap between the desired first and second teams
    pub margin: Option<i64>,
    pub reason: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub strategy_used: Strategy,
    pub iterations: u64,
    /// Strategies tried, in order, with their individual outcomes
    #[serde(default)]
    pub attempts: Vec<StrategyAttempt>,
}

impl SolverResult {
    pub fn is_achievable(&self) -> bool {
        self.status == SolveStatus::Achievable
    }
}

/// Cooperative budget for the exact and random strategies
///
/// Both limits are checked inside the search loops; exceeding either turns
/// the call into an [`SolveStatus::Inconclusive`] result rather than an
/// error or a hang.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveBudget {
    /// Maximum permutation trials across the whole search
    pub max_iterations: u64,

    /// Optional wall-clock limit; `None` means iteration-bounded only
    pub time_limit: Option<Duration>,
}

impl SolveBudget {
    pub fn new(max_iterations: u64, time_limit: Option<Duration>) -> Self {
        Self {
            max_iterations,
            time_limit,
        }
    }

    /// Iteration-only budget, for deterministic tests
    pub fn iterations(max_iterations: u64) -> Self {
        Self {
            max_iterations,
            time_limit: None,
        }
    }
}

impl Default for SolveBudget {
    fn default() -> Self {
        Self {
            max_iterations: 2_000_000,
            time_limit: Some(Duration::from_secs(5)),
        }
    }
}

/// Input rejection errors
///
/// Raised synchronously before any search runs; no partial result exists
/// when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid desired outcome: {0}")]
    InvalidOutcome(#[from] ModelError),

    #[error("too many remaining events: {count} exceeds the cap of {max}")]
    TooManyEvents { count: usize, max: usize },
}
