//! Orchestrator engine
//!
//! The strategy ladder for a solve call:
//!
//! ```text
//! 1. Validate input (distinct outcome teams, event count <= cap)
//! 2. Obvious:   zero events -> decide from current scores;
//!               whole-horizon bound rejection -> proven infeasible
//! 3. Exact:     branch-and-bound under the budget
//! 4. Random:    randomized descents with a slice of the budget
//!               (only if exact was inconclusive)
//! 5. Heuristic: deterministic construction, always answers
//! ```
//!
//! The first definitive result (achievable or proven infeasible) wins. The
//! returned result carries a trace of every attempted strategy for
//! diagnostics, and a difficulty classification when achievable.

use crate::feasibility::check_feasibility;
use crate::models::{
    DesiredOutcome, Difficulty, Event, Scenario, ScoreVector, SolveBudget, SolveError,
    SolveStatus, SolverResult, Strategy, StrategyAttempt, MAX_EVENTS,
};
use crate::rng::RngManager;
use crate::solver::{
    ExactSolver, HeuristicSolver, RandomSolver, SolveRequest, SolveStrategy,
};

/// Fraction of the iteration budget granted to the random strategy after an
/// inconclusive exact search
const RANDOM_BUDGET_DIVISOR: u64 = 4;

/// Configurable solve pipeline
///
/// Owns the budget and the seed for the random strategy. Each call to
/// [`Orchestrator::solve`] is stateless: a fresh RNG is derived from the
/// seed, and nothing survives the call.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    budget: SolveBudget,
    random_seed: u64,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self {
            budget: SolveBudget::default(),
            random_seed: 0x5EED_CAFE,
        }
    }
}

impl Orchestrator {
    pub fn new(budget: SolveBudget) -> Self {
        Self {
            budget,
            ..Self::default()
        }
    }

    /// Override the random strategy's seed (tests inject fixed seeds;
    /// production callers can thread in entropy)
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Solve for the desired outcome, attributing the winning strategy
    pub fn solve(
        &self,
        scores: &ScoreVector,
        events: &[Event],
        outcome: &DesiredOutcome,
        min_margin: i64,
    ) -> Result<SolverResult, SolveError> {
        outcome.validate()?;
        if events.len() > MAX_EVENTS {
            return Err(SolveError::TooManyEvents {
                count: events.len(),
                max: MAX_EVENTS,
            });
        }

        let mut attempts = Vec::new();

        // Degenerate: no events left, the scoreboard is final.
        if events.is_empty() {
            let result = decide_from_scores(scores, outcome, min_margin);
            return Ok(finalize(result, events, outcome, attempts));
        }

        // Whole-horizon bound rejection needs no search.
        let bounds = check_feasibility(scores, events, outcome, min_margin);
        if !bounds.possible {
            attempts.push(StrategyAttempt {
                strategy: Strategy::Obvious,
                status: SolveStatus::Infeasible,
                iterations: 0,
            });
            let result = SolverResult {
                status: SolveStatus::Infeasible,
                scenario: None,
                final_scores: None,
                margin: None,
                reason: bounds.reason,
                difficulty: None,
                strategy_used: Strategy::Obvious,
                iterations: 0,
                attempts: Vec::new(),
            };
            return Ok(finalize(result, events, outcome, attempts));
        }

        let request = SolveRequest {
            scores: *scores,
            events,
            outcome: *outcome,
            min_margin,
        };

        // Exact search under the full budget.
        let exact = ExactSolver.solve(&request, &self.budget);
        attempts.push(StrategyAttempt {
            strategy: Strategy::Exact,
            status: exact.status,
            iterations: exact.iterations,
        });
        if exact.status != SolveStatus::Inconclusive {
            return Ok(finalize(exact, events, outcome, attempts));
        }

        // Exact timed out: randomized descents may stumble on a witness the
        // ordered DFS was far from.
        let random_budget = SolveBudget {
            max_iterations: (self.budget.max_iterations / RANDOM_BUDGET_DIVISOR).max(1),
            time_limit: self.budget.time_limit,
        };
        let random =
            RandomSolver::new(RngManager::new(self.random_seed)).solve(&request, &random_budget);
        attempts.push(StrategyAttempt {
            strategy: Strategy::Random,
            status: random.status,
            iterations: random.iterations,
        });
        if random.status == SolveStatus::Achievable {
            return Ok(finalize(random, events, outcome, attempts));
        }

        // Last resort: the heuristic always produces an answer.
        let heuristic = HeuristicSolver.solve(&request, &self.budget);
        attempts.push(StrategyAttempt {
            strategy: Strategy::Heuristic,
            status: heuristic.status,
            iterations: heuristic.iterations,
        });
        Ok(finalize(heuristic, events, outcome, attempts))
    }
}

/// Orchestrated solve with explicit budget (free-function form)
pub fn solve(
    scores: &ScoreVector,
    events: &[Event],
    outcome: &DesiredOutcome,
    min_margin: i64,
    budget: SolveBudget,
) -> Result<SolverResult, SolveError> {
    Orchestrator::new(budget).solve(scores, events, outcome, min_margin)
}

/// Zero-events case: achievability is read straight off the scoreboard
fn decide_from_scores(
    scores: &ScoreVector,
    outcome: &DesiredOutcome,
    min_margin: i64,
) -> SolverResult {
    if scores.satisfies(outcome, min_margin) {
        SolverResult {
            status: SolveStatus::Achievable,
            scenario: Some(Scenario::new()),
            final_scores: Some(*scores),
            margin: Some(scores.margin_between(outcome.first, outcome.second)),
            reason: None,
            difficulty: None,
            strategy_used: Strategy::Obvious,
            iterations: 0,
            attempts: Vec::new(),
        }
    } else {
        SolverResult {
            status: SolveStatus::Infeasible,
            scenario: None,
            final_scores: None,
            margin: None,
            reason: Some(format!(
                "no events remain and current scores do not satisfy {} with margin {} \
                 ({} leads {} by {}, {} leads {} by {})",
                outcome,
                min_margin,
                outcome.first,
                outcome.second,
                scores.margin_between(outcome.first, outcome.second),
                outcome.second,
                outcome.third,
                scores.margin_between(outcome.second, outcome.third),
            )),
            difficulty: None,
            strategy_used: Strategy::Obvious,
            iterations: 0,
            attempts: Vec::new(),
        }
    }
}

/// Attach the attempt trace and, for achievable results, the difficulty
fn finalize(
    mut result: SolverResult,
    events: &[Event],
    outcome: &DesiredOutcome,
    mut attempts: Vec<StrategyAttempt>,
) -> SolverResult {
    if result.status == SolveStatus::Achievable {
        result.difficulty = Some(classify_difficulty(&result, events, outcome));
    }
    if attempts.is_empty() || attempts.last().map(|a| a.strategy) != Some(result.strategy_used) {
        attempts.push(StrategyAttempt {
            strategy: result.strategy_used,
            status: result.status,
            iterations: result.iterations,
        });
    }
    result.attempts = attempts;
    result
}

/// Fraction of events where the desired winner must take first place,
/// bucketed into difficulty levels
fn classify_difficulty(
    result: &SolverResult,
    events: &[Event],
    outcome: &DesiredOutcome,
) -> Difficulty {
    if events.is_empty() {
        return Difficulty::Easy;
    }
    let firsts = result
        .scenario
        .as_ref()
        .map(|scenario| {
            scenario
                .iter()
                .filter(|step| step.assignment.first == outcome.first)
                .count()
        })
        .unwrap_or(0);
    Difficulty::from_first_fraction(firsts as f64 / events.len() as f64)
}
