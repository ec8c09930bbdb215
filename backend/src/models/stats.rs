//! Historical placement statistics
//!
//! The Monte Carlo simulator consumes empirical per-team placement
//! probabilities, optionally segmented by time-of-day window. Where a team
//! has no window-specific sample, the overall triple is used.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::event::{ModelError, TimeWindow};
use super::team::Team;

/// Tolerance for the "probabilities sum to one" validation
const PROB_SUM_TOLERANCE: f64 = 1e-6;

/// Empirical probability of a team taking each placement in one event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementProbs {
    pub p_first: f64,
    pub p_second: f64,
    pub p_third: f64,
}

impl PlacementProbs {
    /// Create a validated probability triple (non-negative, sums to ~1)
    pub fn new(team: Team, p_first: f64, p_second: f64, p_third: f64) -> Result<Self, ModelError> {
        if p_first < 0.0 || p_second < 0.0 || p_third < 0.0 {
            return Err(ModelError::InvalidProbabilities {
                team,
                detail: format!(
                    "negative probability ({}, {}, {})",
                    p_first, p_second, p_third
                ),
            });
        }
        let sum = p_first + p_second + p_third;
        if (sum - 1.0).abs() > PROB_SUM_TOLERANCE {
            return Err(ModelError::InvalidProbabilities {
                team,
                detail: format!("probabilities sum to {} instead of 1", sum),
            });
        }
        Ok(Self {
            p_first,
            p_second,
            p_third,
        })
    }

    /// Uniform triple, the no-information prior
    pub fn uniform() -> Self {
        Self {
            p_first: 1.0 / 3.0,
            p_second: 1.0 / 3.0,
            p_third: 1.0 / 3.0,
        }
    }
}

/// One team's historical tendencies, overall and per time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub overall: PlacementProbs,

    /// Window-specific overrides; absent windows fall back to `overall`
    #[serde(default)]
    pub by_window: HashMap<TimeWindow, PlacementProbs>,
}

impl TeamStats {
    pub fn new(overall: PlacementProbs) -> Self {
        Self {
            overall,
            by_window: HashMap::new(),
        }
    }

    pub fn with_window(mut self, window: TimeWindow, probs: PlacementProbs) -> Self {
        self.by_window.insert(window, probs);
        self
    }

    /// Probabilities applicable in the given window
    pub fn probs_for(&self, window: TimeWindow) -> &PlacementProbs {
        self.by_window.get(&window).unwrap_or(&self.overall)
    }
}

/// Historical stats for all three teams
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalStats {
    red: TeamStats,
    blue: TeamStats,
    green: TeamStats,
}

impl HistoricalStats {
    pub fn new(red: TeamStats, blue: TeamStats, green: TeamStats) -> Self {
        Self { red, blue, green }
    }

    /// Uniform stats for every team
    pub fn uniform() -> Self {
        Self {
            red: TeamStats::new(PlacementProbs::uniform()),
            blue: TeamStats::new(PlacementProbs::uniform()),
            green: TeamStats::new(PlacementProbs::uniform()),
        }
    }

    pub fn team(&self, team: Team) -> &TeamStats {
        match team {
            Team::Red => &self.red,
            Team::Blue => &self.blue,
            Team::Green => &self.green,
        }
    }

    /// Re-check the probability invariants after deserialization
    pub fn validate(&self) -> Result<(), ModelError> {
        for team in Team::ALL {
            let stats = self.team(team);
            revalidate(team, &stats.overall)?;
            for probs in stats.by_window.values() {
                revalidate(team, probs)?;
            }
        }
        Ok(())
    }
}

fn revalidate(team: Team, probs: &PlacementProbs) -> Result<(), ModelError> {
    PlacementProbs::new(team, probs.p_first, probs.p_second, probs.p_third).map(|_| ())
}
