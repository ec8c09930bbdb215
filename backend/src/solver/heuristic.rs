//! Heuristic minimum-effort solver
//!
//! Fallback for when the exact search is skipped or returns inconclusive.
//! Constructs one deterministic scenario per candidate effort level `k` (the
//! number of events granted to the desired winner as first places) and
//! binary-searches the smallest `k` that works. Runs in O(N log N), never
//! backtracks, and makes no optimality promise beyond "the smallest k this
//! construction can realize".

use crate::models::{
    DesiredOutcome, Event, PlacementAssignment, ScoreVector, SolveBudget, SolveStatus,
    SolverResult, Strategy,
};

use super::{
    achievable_result, terminal_result, SearchContext, SolveRequest, SolveStrategy,
};

/// Greedy construction strategy object for the orchestrator
pub struct HeuristicSolver;

impl SolveStrategy for HeuristicSolver {
    fn name(&self) -> Strategy {
        Strategy::Heuristic
    }

    fn solve(&mut self, request: &SolveRequest<'_>, _budget: &SolveBudget) -> SolverResult {
        solve_heuristic(
            &request.scores,
            request.events,
            &request.outcome,
            request.min_margin,
        )
    }
}

/// Find the minimum-effort scenario this construction can realize
///
/// The top-`k` highest-value events (canonical order) give first place to
/// the desired winner; every other event picks its assignment from a
/// four-case decision table keyed on the signs of the two running adjacent
/// margins. A binary search over `k` in `[0, N]` finds the smallest `k`
/// whose constructed scenario satisfies the desired order with the margin.
pub fn solve_heuristic(
    scores: &ScoreVector,
    events: &[Event],
    outcome: &DesiredOutcome,
    min_margin: i64,
) -> SolverResult {
    let ctx = SearchContext::new(events);
    let request = SolveRequest {
        scores: *scores,
        events,
        outcome: *outcome,
        min_margin,
    };
    let n = ctx.len();

    if n == 0 {
        return if scores.satisfies(outcome, min_margin) {
            achievable_result(&ctx, &request, &[], Strategy::Heuristic, 0)
        } else {
            terminal_result(
                SolveStatus::Infeasible,
                format!(
                    "no events remain and current scores do not satisfy {} with margin {}",
                    outcome, min_margin
                ),
                Strategy::Heuristic,
                0,
            )
        };
    }

    let mut iterations = 0u64;
    let mut construct = |k: usize| -> (Vec<usize>, ScoreVector) {
        iterations += n as u64;
        build_scenario(&ctx, scores, outcome, min_margin, k)
    };

    // All-out effort first: if k = N fails there is nothing to search.
    let (_, max_final) = construct(n);
    if !max_final.satisfies(outcome, min_margin) {
        return terminal_result(
            SolveStatus::Infeasible,
            shortfall_reason(&max_final, outcome, min_margin, n),
            Strategy::Heuristic,
            iterations,
        );
    }

    // Binary search the smallest sufficient k.
    let mut lo = 0usize;
    let mut hi = n;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let (_, final_scores) = construct(mid);
        if final_scores.satisfies(outcome, min_margin) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    let (chosen, _) = construct(lo);
    achievable_result(&ctx, &request, &chosen, Strategy::Heuristic, iterations)
}

/// Deterministic scenario for a given effort level `k`
fn build_scenario(
    ctx: &SearchContext,
    scores: &ScoreVector,
    outcome: &DesiredOutcome,
    min_margin: i64,
    k: usize,
) -> (Vec<usize>, ScoreVector) {
    let mut running = *scores;
    let mut chosen = Vec::with_capacity(ctx.len());
    for (i, event) in ctx.events.iter().enumerate() {
        let assignment = if i < k {
            effort_assignment(&running, outcome, min_margin)
        } else {
            filler_assignment(&running, outcome)
        };
        chosen.push(assignment.canonical_index());
        running = running.apply(&assignment, &event.awards);
    }
    (chosen, running)
}

/// Assignment for an event granted to the desired winner
///
/// First place always goes to the winner. The lower placements go to
/// whichever adjacent gap needs protecting: while the runner-up already
/// clears the trailing team by more than the margin, the runner-up is held
/// to third so the winner's own gap closes fastest; otherwise the lower
/// placements follow the desired order to keep the second pair separated.
fn effort_assignment(
    running: &ScoreVector,
    outcome: &DesiredOutcome,
    min_margin: i64,
) -> PlacementAssignment {
    let lead23 = running.margin_between(outcome.second, outcome.third);
    if lead23 > min_margin {
        PlacementAssignment {
            first: outcome.first,
            second: outcome.third,
            third: outcome.second,
        }
    } else {
        PlacementAssignment {
            first: outcome.first,
            second: outcome.second,
            third: outcome.third,
        }
    }
}

/// Four-case decision table for events the winner is not forced to take
///
/// Keyed on the signs of the running adjacent margins `lead12` (desired
/// first minus second) and `lead23` (desired second minus third):
///
/// - both gaps open (`> 0`): the order already holds here, so the trailing
///   team takes the win it can be afforded and the leader takes third
/// - only `lead23` open: the leader still needs points while the runner-up
///   is slowed
/// - only `lead12` open: the runner-up closes on the trailing team while
///   the leader coasts in second
/// - neither open: the leader takes everything it can get
fn filler_assignment(running: &ScoreVector, outcome: &DesiredOutcome) -> PlacementAssignment {
    let lead12 = running.margin_between(outcome.first, outcome.second);
    let lead23 = running.margin_between(outcome.second, outcome.third);
    match (lead12 > 0, lead23 > 0) {
        (true, true) => PlacementAssignment {
            first: outcome.third,
            second: outcome.second,
            third: outcome.first,
        },
        (false, true) => PlacementAssignment {
            first: outcome.first,
            second: outcome.third,
            third: outcome.second,
        },
        (true, false) => PlacementAssignment {
            first: outcome.second,
            second: outcome.first,
            third: outcome.third,
        },
        (false, false) => PlacementAssignment {
            first: outcome.first,
            second: outcome.second,
            third: outcome.third,
        },
    }
}

/// Reason text for the all-out-effort failure case
fn shortfall_reason(
    final_scores: &ScoreVector,
    outcome: &DesiredOutcome,
    min_margin: i64,
    n: usize,
) -> String {
    let lead12 = final_scores.margin_between(outcome.first, outcome.second);
    let lead23 = final_scores.margin_between(outcome.second, outcome.third);
    let mut gaps = Vec::new();
    if lead12 < min_margin {
        gaps.push(format!(
            "{} finishes only {} ahead of {} (margin {} required)",
            outcome.first, lead12, outcome.second, min_margin
        ));
    }
    if lead23 < min_margin {
        gaps.push(format!(
            "{} finishes only {} ahead of {} (margin {} required)",
            outcome.second, lead23, outcome.third, min_margin
        ));
    }
    format!(
        "even granting {} first place in all {} events, {}",
        outcome.first,
        n,
        gaps.join(" and ")
    )
}
