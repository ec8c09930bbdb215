//! Randomized witness search
//!
//! Repeated greedy descents that walk the canonical event order but try
//! each event's six permutations in a freshly shuffled order, still pruning
//! with the feasibility bounds. Ordered DFS can be slow when the adversarial
//! branches sort first; shuffling sidesteps that and often finds a feasible
//! witness quickly. This strategy can only ever prove presence - running out
//! of budget is inconclusive, never infeasible.
//!
//! All randomness comes from the injected [`RngManager`], so a seeded solver
//! is fully reproducible.

use crate::models::{
    PlacementAssignment, SolveBudget, SolveStatus, SolverResult, Strategy,
};
use crate::rng::RngManager;

use super::{
    achievable_result, terminal_result, BudgetGuard, SearchContext, SolveRequest, SolveStrategy,
};

/// Randomized descent strategy object
pub struct RandomSolver {
    rng: RngManager,
}

impl RandomSolver {
    pub fn new(rng: RngManager) -> Self {
        Self { rng }
    }

    /// Convenience constructor from a bare seed
    pub fn seeded(seed: u64) -> Self {
        Self::new(RngManager::new(seed))
    }
}

impl SolveStrategy for RandomSolver {
    fn name(&self) -> Strategy {
        Strategy::Random
    }

    fn solve(&mut self, request: &SolveRequest<'_>, budget: &SolveBudget) -> SolverResult {
        let ctx = SearchContext::new(request.events);
        let n = ctx.len();

        if n == 0 {
            return if request
                .scores
                .satisfies(&request.outcome, request.min_margin)
            {
                achievable_result(&ctx, request, &[], Strategy::Random, 0)
            } else {
                terminal_result(
                    SolveStatus::Infeasible,
                    format!(
                        "no events remain and current scores do not satisfy {} with margin {}",
                        request.outcome, request.min_margin
                    ),
                    Strategy::Random,
                    0,
                )
            };
        }

        let guard = BudgetGuard::new(budget);
        let mut iterations = 0u64;
        let mut chosen = Vec::with_capacity(n);
        let mut order: [usize; 6] = [0, 1, 2, 3, 4, 5];

        while !guard.exhausted(iterations) {
            chosen.clear();
            let mut scores = request.scores;
            let mut dead_end = false;

            for depth in 0..n {
                self.rng.shuffle(&mut order);
                let mut advanced = false;
                for &perm in &order {
                    iterations += 1;
                    let next = scores
                        .apply(&PlacementAssignment::ALL[perm], &ctx.events[depth].awards);
                    let viable = if depth + 1 == n {
                        next.satisfies(&request.outcome, request.min_margin)
                    } else {
                        ctx.suffixes
                            .order_reachable(&next, &request.outcome, request.min_margin, depth + 1)
                    };
                    if viable {
                        chosen.push(perm);
                        scores = next;
                        advanced = true;
                        break;
                    }
                }
                if !advanced {
                    // Greedy descent hit a dead end; abandon the attempt.
                    dead_end = true;
                    break;
                }
            }

            if !dead_end && chosen.len() == n {
                return achievable_result(&ctx, request, &chosen, Strategy::Random, iterations);
            }
        }

        terminal_result(
            SolveStatus::Inconclusive,
            format!(
                "randomized search found no witness within {} iterations",
                iterations
            ),
            Strategy::Random,
            iterations,
        )
    }
}
