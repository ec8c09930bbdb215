//! Exact branch-and-bound solver
//!
//! Deterministic depth-first search over per-event placement assignments.
//! Events are visited in canonical order (descending first-place award) and
//! the six permutations of each event are tried in the fixed
//! [`PlacementAssignment::ALL`] order, so identical inputs always produce
//! identical scenarios and iteration counts.
//!
//! Every branch is pruned with the feasibility bounds over the unassigned
//! suffix: if even a best-case continuation cannot realize the desired
//! order, the branch is dead and is never entered. The search frame stack is
//! explicit, which keeps iteration counting and budget checks out of closure
//! captures and makes backtracking state visible.
//!
//! Worst case is O(6^N); the orchestrator caps N at
//! [`crate::models::MAX_EVENTS`]. Clearly feasible and clearly infeasible
//! inputs prune to near-linear in practice.

use crate::models::{
    DesiredOutcome, Event, PlacementAssignment, ScoreVector, SolveBudget, SolveStatus,
    SolverResult, Strategy,
};

use super::{
    achievable_result, terminal_result, BudgetGuard, SearchContext, SolveRequest, SolveStrategy,
};

/// One level of the explicit DFS stack
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Next permutation index to try at this depth (0..6)
    next_perm: usize,

    /// Cumulative scores before this depth's event is assigned
    scores: ScoreVector,
}

/// Branch-and-bound strategy object for the orchestrator
pub struct ExactSolver;

impl SolveStrategy for ExactSolver {
    fn name(&self) -> Strategy {
        Strategy::Exact
    }

    fn solve(&mut self, request: &SolveRequest<'_>, budget: &SolveBudget) -> SolverResult {
        solve_exact(
            &request.scores,
            request.events,
            &request.outcome,
            request.min_margin,
            budget,
        )
    }
}

/// Exhaustively search for a scenario realizing the desired order
///
/// Returns an achievable result with a witness scenario, a proven-infeasible
/// result with the violated bound or exhaustion in `reason`, or an
/// inconclusive result if the budget ran out first.
pub fn solve_exact(
    scores: &ScoreVector,
    events: &[Event],
    outcome: &DesiredOutcome,
    min_margin: i64,
    budget: &SolveBudget,
) -> SolverResult {
    let ctx = SearchContext::new(events);
    let request = SolveRequest {
        scores: *scores,
        events,
        outcome: *outcome,
        min_margin,
    };
    let n = ctx.len();

    // Degenerate: nothing left to assign, current scores decide.
    if n == 0 {
        return if scores.satisfies(outcome, min_margin) {
            achievable_result(&ctx, &request, &[], Strategy::Exact, 0)
        } else {
            terminal_result(
                SolveStatus::Infeasible,
                format!(
                    "no events remain and current scores do not satisfy {} with margin {}",
                    outcome, min_margin
                ),
                Strategy::Exact,
                0,
            )
        };
    }

    // Root bound check: a whole-horizon rejection needs no search at all.
    let root = ctx.suffixes.check(scores, outcome, min_margin, 0);
    if !root.possible {
        return terminal_result(
            SolveStatus::Infeasible,
            root.reason.unwrap_or_else(|| "bounds violated".to_string()),
            Strategy::Exact,
            0,
        );
    }

    let guard = BudgetGuard::new(budget);
    let mut frames: Vec<Frame> = Vec::with_capacity(n);
    frames.push(Frame {
        next_perm: 0,
        scores: *scores,
    });
    let mut chosen: Vec<usize> = Vec::with_capacity(n);
    let mut iterations: u64 = 0;

    while !frames.is_empty() {
        let depth = frames.len() - 1;
        let frame = frames.last_mut().unwrap();

        if frame.next_perm == PlacementAssignment::ALL.len() {
            // All six permutations dead at this depth: backtrack.
            frames.pop();
            chosen.pop();
            continue;
        }

        if guard.exhausted(iterations) {
            return terminal_result(
                SolveStatus::Inconclusive,
                format!("search budget exhausted after {} iterations", iterations),
                Strategy::Exact,
                iterations,
            );
        }

        let perm = frame.next_perm;
        frame.next_perm += 1;
        iterations += 1;

        let next_scores = frame
            .scores
            .apply(&PlacementAssignment::ALL[perm], &ctx.events[depth].awards);

        if depth + 1 == n {
            if next_scores.satisfies(outcome, min_margin) {
                chosen.push(perm);
                let chosen = minimize_winner_firsts(&ctx, &request, &chosen);
                return achievable_result(&ctx, &request, &chosen, Strategy::Exact, iterations);
            }
        } else if ctx
            .suffixes
            .order_reachable(&next_scores, outcome, min_margin, depth + 1)
        {
            chosen.push(perm);
            frames.push(Frame {
                next_perm: 0,
                scores: next_scores,
            });
        }
        // Infeasible continuation: skip the permutation without recursing.
    }

    terminal_result(
        SolveStatus::Infeasible,
        format!(
            "exhaustive search over {} events found no placement sequence achieving {} with margin {}",
            n, outcome, min_margin
        ),
        Strategy::Exact,
        iterations,
    )
}

/// Effort-minimization pass over a feasible scenario
///
/// Sweeps the chosen assignments in canonical pass order; wherever the
/// desired winner holds first place, tries the alternative permutations that
/// demote the winner and keeps the first one that still satisfies the final
/// order with the margin. Repeats until a full sweep changes nothing. Local
/// search only - the branch-and-bound is never re-entered.
fn minimize_winner_firsts(
    ctx: &SearchContext,
    request: &SolveRequest<'_>,
    chosen: &[usize],
) -> Vec<usize> {
    let mut chosen = chosen.to_vec();
    loop {
        let mut changed = false;
        for depth in 0..chosen.len() {
            let current = PlacementAssignment::ALL[chosen[depth]];
            if current.first != request.outcome.first {
                continue;
            }
            for (perm, alternative) in PlacementAssignment::ALL.iter().enumerate() {
                if alternative.first == request.outcome.first {
                    continue;
                }
                let previous = chosen[depth];
                chosen[depth] = perm;
                let final_scores = ctx.final_scores(&request.scores, &chosen);
                if final_scores.satisfies(&request.outcome, request.min_margin) {
                    changed = true;
                    break;
                }
                chosen[depth] = previous;
            }
        }
        if !changed {
            return chosen;
        }
    }
}
