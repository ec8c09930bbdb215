//! Monte Carlo outcome simulator
//!
//! Each iteration replays the remaining schedule once: for every event, a
//! consistent joint placement assignment is drawn from the teams' historical
//! placement probabilities (resolved per time window), and the awards are
//! accumulated into a running score. Final rankings and scores are tallied
//! across iterations into rank probabilities, an outcome frequency table,
//! and per-team score percentile intervals.
//!
//! # Joint sampling
//!
//! Three marginal probability triples do not by themselves form a valid
//! bijection for one event, so the sampler draws sequentially: the
//! first-place team from the three renormalized `p_first` values, the
//! second-place team from the remaining pair's renormalized `p_second`
//! values, and the third is forced. Marginals are preserved in aggregate; a
//! degenerate (all-zero) weight pool falls back to a uniform draw.
//!
//! # Performance
//!
//! The hot loop works entirely on fixed-size arrays; the only heap
//! allocations are the three per-team sample vectors, sized once up front.
//! Tens of thousands of iterations over a 50-event schedule complete well
//! inside a second.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    DesiredOutcome, Event, HistoricalStats, PlacementAssignment, ScoreVector, Team,
};
use crate::rng::RngManager;

/// Simulation input rejection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("iteration count must be positive")]
    ZeroIterations,
}

/// Probability of one team finishing the matchup in each rank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankProbabilities {
    pub team: Team,
    pub p_first: f64,
    pub p_second: f64,
    pub p_third: f64,
}

/// One distinct final standing and how often it was observed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeFrequency {
    pub first: Team,
    pub second: Team,
    pub third: Team,
    pub probability: f64,
    pub count: u64,
}

/// Percentile interval of one team's simulated final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreInterval {
    pub team: Team,
    pub p10: i64,
    pub p50: i64,
    pub p90: i64,
}

/// Aggregated simulation output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResult {
    pub iterations: u64,

    /// Indexed by [`Team::index`]; each triple sums to ~1
    pub rank_probabilities: [RankProbabilities; 3],

    /// All observed final standings, sorted by descending probability
    /// (probabilities sum to ~1)
    pub outcome_table: Vec<OutcomeFrequency>,

    /// Indexed by [`Team::index`]
    pub score_intervals: [ScoreInterval; 3],

    /// Head of the outcome table
    pub most_likely: OutcomeFrequency,
}

impl MonteCarloResult {
    /// Rank probabilities for one team
    pub fn rank_probs(&self, team: Team) -> &RankProbabilities {
        &self.rank_probabilities[team.index()]
    }

    /// Score percentile interval for one team
    pub fn score_interval(&self, team: Team) -> &ScoreInterval {
        &self.score_intervals[team.index()]
    }

    /// Simulated probability of a specific final standing (0 if never seen)
    pub fn outcome_probability(&self, outcome: &DesiredOutcome) -> f64 {
        self.outcome_table
            .iter()
            .find(|entry| {
                entry.first == outcome.first
                    && entry.second == outcome.second
                    && entry.third == outcome.third
            })
            .map(|entry| entry.probability)
            .unwrap_or(0.0)
    }
}

/// Simulate `iterations` randomized completions of the remaining schedule
pub fn simulate(
    scores: &ScoreVector,
    events: &[Event],
    stats: &HistoricalStats,
    iterations: u64,
    rng: &mut RngManager,
) -> Result<MonteCarloResult, SimulationError> {
    if iterations == 0 {
        return Err(SimulationError::ZeroIterations);
    }

    // Resolve each event's window probabilities once, outside the hot loop.
    let event_probs: Vec<([f64; 3], [f64; 3])> = events
        .iter()
        .map(|event| {
            let window = event.time_window();
            let mut firsts = [0.0; 3];
            let mut seconds = [0.0; 3];
            for team in Team::ALL {
                let probs = stats.team(team).probs_for(window);
                firsts[team.index()] = probs.p_first;
                seconds[team.index()] = probs.p_second;
            }
            (firsts, seconds)
        })
        .collect();

    let mut rank_counts = [[0u64; 3]; 3]; // [team][placement]
    let mut outcome_counts = [0u64; 6]; // by canonical assignment index
    let mut samples: [Vec<i64>; 3] = [
        Vec::with_capacity(iterations as usize),
        Vec::with_capacity(iterations as usize),
        Vec::with_capacity(iterations as usize),
    ];

    for _ in 0..iterations {
        let mut running = *scores;
        for (event, (firsts, seconds)) in events.iter().zip(&event_probs) {
            let assignment = draw_assignment(firsts, seconds, rng);
            running = running.apply(&assignment, &event.awards);
        }

        let ranking = running.ranking();
        outcome_counts[ranking.canonical_index()] += 1;
        rank_counts[ranking.first.index()][0] += 1;
        rank_counts[ranking.second.index()][1] += 1;
        rank_counts[ranking.third.index()][2] += 1;
        for team in Team::ALL {
            samples[team.index()].push(running.get(team));
        }
    }

    let total = iterations as f64;
    let rank_probabilities = Team::ALL.map(|team| {
        let counts = rank_counts[team.index()];
        RankProbabilities {
            team,
            p_first: counts[0] as f64 / total,
            p_second: counts[1] as f64 / total,
            p_third: counts[2] as f64 / total,
        }
    });

    let mut outcome_table: Vec<OutcomeFrequency> = outcome_counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(index, count)| {
            let assignment = PlacementAssignment::ALL[index];
            OutcomeFrequency {
                first: assignment.first,
                second: assignment.second,
                third: assignment.third,
                probability: *count as f64 / total,
                count: *count,
            }
        })
        .collect();
    // Stable sort: equal probabilities keep canonical assignment order.
    outcome_table.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .expect("probabilities are finite")
    });

    let score_intervals = Team::ALL.map(|team| {
        let team_samples = &mut samples[team.index()];
        team_samples.sort_unstable();
        ScoreInterval {
            team,
            p10: percentile(team_samples, 0.10),
            p50: percentile(team_samples, 0.50),
            p90: percentile(team_samples, 0.90),
        }
    });

    let most_likely = outcome_table[0].clone();

    Ok(MonteCarloResult {
        iterations,
        rank_probabilities,
        outcome_table,
        score_intervals,
        most_likely,
    })
}

/// Draw one consistent placement assignment for an event
fn draw_assignment(firsts: &[f64; 3], seconds: &[f64; 3], rng: &mut RngManager) -> PlacementAssignment {
    let first_idx = rng.pick_weighted(firsts);

    let mut rest = [0usize; 2];
    let mut k = 0;
    for idx in 0..3 {
        if idx != first_idx {
            rest[k] = idx;
            k += 1;
        }
    }
    let pair_weights = [seconds[rest[0]], seconds[rest[1]]];
    let second_idx = rest[rng.pick_weighted(&pair_weights)];
    let third_idx = 3 - first_idx - second_idx;

    PlacementAssignment {
        first: Team::from_index(first_idx),
        second: Team::from_index(second_idx),
        third: Team::from_index(third_idx),
    }
}

/// Nearest-rank percentile over sorted samples
fn percentile(sorted: &[i64], q: f64) -> i64 {
    let idx = (((sorted.len() - 1) as f64) * q).round() as usize;
    sorted[idx]
}
