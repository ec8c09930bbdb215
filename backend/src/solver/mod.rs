//! Scenario solving strategies
//!
//! Each strategy answers the same question - "which per-event placements
//! realize the desired final order?" - with different guarantees:
//!
//! - [`exact`]: branch-and-bound, complete within budget, deterministic
//! - [`random`]: randomized descents, fast witnesses, never proves absence
//! - [`heuristic`]: greedy construction, minimum-effort answer, no optimality
//!
//! Strategies implement [`SolveStrategy`] so the orchestrator can compose
//! them without special-casing any one of them.

pub mod exact;
pub mod heuristic;
pub mod random;

use std::time::Instant;

use crate::feasibility::AwardSuffixes;
use crate::models::{
    DesiredOutcome, Event, Scenario, ScenarioStep, ScoreVector, SolveBudget, SolveStatus,
    SolverResult, Strategy,
};
use crate::models::PlacementAssignment;

pub use exact::{solve_exact, ExactSolver};
pub use heuristic::{solve_heuristic, HeuristicSolver};
pub use random::RandomSolver;

/// Immutable inputs shared by every strategy
#[derive(Debug, Clone, Copy)]
pub struct SolveRequest<'a> {
    pub scores: ScoreVector,
    pub events: &'a [Event],
    pub outcome: DesiredOutcome,
    pub min_margin: i64,
}

/// A solving strategy the orchestrator can try
pub trait SolveStrategy {
    /// Tag recorded in results and the attempt trace
    fn name(&self) -> Strategy;

    /// Attempt to solve within the budget
    fn solve(&mut self, request: &SolveRequest<'_>, budget: &SolveBudget) -> SolverResult;
}

/// Events in canonical search order: descending first-place award
///
/// Higher-leverage events first improves pruning yield, and a stable sort
/// keeps the order (and therefore every solver's output) reproducible.
pub fn canonical_order(events: &[Event]) -> Vec<Event> {
    let mut ordered = events.to_vec();
    ordered.sort_by_key(|e| std::cmp::Reverse(e.awards.first));
    ordered
}

/// Canonically ordered events plus their award suffix sums
///
/// Built once per solve call; shared by the exact and random searches.
pub(crate) struct SearchContext {
    pub events: Vec<Event>,
    pub suffixes: AwardSuffixes,
}

impl SearchContext {
    pub fn new(events: &[Event]) -> Self {
        let events = canonical_order(events);
        let suffixes = AwardSuffixes::new(&events);
        Self { events, suffixes }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Final scores after realizing `chosen` (one permutation index per
    /// event, canonical order)
    pub fn final_scores(&self, start: &ScoreVector, chosen: &[usize]) -> ScoreVector {
        let mut scores = *start;
        for (event, &perm) in self.events.iter().zip(chosen) {
            scores = scores.apply(&PlacementAssignment::ALL[perm], &event.awards);
        }
        scores
    }

    /// Scenario steps for `chosen`
    pub fn scenario(&self, chosen: &[usize]) -> Scenario {
        self.events
            .iter()
            .zip(chosen)
            .map(|(event, &perm)| ScenarioStep {
                event_id: event.id.clone(),
                assignment: PlacementAssignment::ALL[perm],
            })
            .collect()
    }
}

/// Cooperative budget tracking for search loops
///
/// Iteration counts are checked on every trial; the wall clock only every
/// `TIME_CHECK_MASK + 1` trials to keep `Instant::now` out of the hot path.
pub(crate) struct BudgetGuard {
    max_iterations: u64,
    deadline: Option<Instant>,
}

const TIME_CHECK_MASK: u64 = 0x3FF;

impl BudgetGuard {
    pub fn new(budget: &SolveBudget) -> Self {
        Self {
            max_iterations: budget.max_iterations,
            deadline: budget.time_limit.map(|limit| Instant::now() + limit),
        }
    }

    pub fn exhausted(&self, iterations: u64) -> bool {
        if iterations >= self.max_iterations {
            return true;
        }
        if iterations & TIME_CHECK_MASK == 0 {
            if let Some(deadline) = self.deadline {
                return Instant::now() >= deadline;
            }
        }
        false
    }
}

/// Assemble an achievable result from a chosen assignment sequence
pub(crate) fn achievable_result(
    ctx: &SearchContext,
    request: &SolveRequest<'_>,
    chosen: &[usize],
    strategy: Strategy,
    iterations: u64,
) -> SolverResult {
    let final_scores = ctx.final_scores(&request.scores, chosen);
    SolverResult {
        status: SolveStatus::Achievable,
        scenario: Some(ctx.scenario(chosen)),
        final_scores: Some(final_scores),
        margin: Some(final_scores.margin_between(request.outcome.first, request.outcome.second)),
        reason: None,
        difficulty: None,
        strategy_used: strategy,
        iterations,
        attempts: Vec::new(),
    }
}

/// Assemble a non-achievable result
pub(crate) fn terminal_result(
    status: SolveStatus,
    reason: String,
    strategy: Strategy,
    iterations: u64,
) -> SolverResult {
    SolverResult {
        status,
        scenario: None,
        final_scores: None,
        margin: None,
        reason: Some(reason),
        difficulty: None,
        strategy_used: strategy,
        iterations,
        attempts: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AwardTable;

    fn event(id: &str, first: i64) -> Event {
        Event::new(id, 0, AwardTable::new(first, first - 1, first - 2).unwrap()).unwrap()
    }

    #[test]
    fn test_canonical_order_is_descending_and_stable() {
        let events = vec![event("a", 5), event("b", 9), event("c", 5), event("d", 7)];
        let ordered = canonical_order(&events);
        let ids: Vec<&str> = ordered.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"], "ties keep input order");
    }

    #[test]
    fn test_budget_guard_iteration_limit() {
        let guard = BudgetGuard::new(&SolveBudget::iterations(10));
        assert!(!guard.exhausted(9));
        assert!(guard.exhausted(10));
        assert!(guard.exhausted(11));
    }
}
