//! Feasibility bound checker
//!
//! Best-case / worst-case reachability bounds over a list (or suffix) of
//! remaining events. A team's maximum reachable score takes first place in
//! every remaining event; its minimum takes third in every one. The desired
//! order is only possible if, for both adjacent pairs, the upper team's
//! maximum clears the lower team's minimum by the required margin.
//!
//! The check is sound: an infeasible report means no assignment of the
//! remaining events can realize the order with the margin. It is not
//! complete - a feasible report only means the bounds do not rule the order
//! out. The exact solver uses the same bounds (precomputed as suffix sums)
//! to prune its search.

use serde::{Deserialize, Serialize};

use crate::models::{DesiredOutcome, Event, ScoreVector, Team};

/// Outcome of a feasibility check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityReport {
    pub possible: bool,

    /// Present iff `possible` is false; cites the violated bound with its
    /// numeric values
    pub reason: Option<String>,
}

impl FeasibilityReport {
    fn possible() -> Self {
        Self {
            possible: true,
            reason: None,
        }
    }

    fn impossible(reason: String) -> Self {
        Self {
            possible: false,
            reason: Some(reason),
        }
    }
}

/// Precomputed suffix sums of first- and third-place awards
///
/// `first[i]` is the total of first-place awards over `events[i..]`, and
/// likewise for `third`. Makes every in-search bound check O(1).
#[derive(Debug, Clone)]
pub struct AwardSuffixes {
    first: Vec<i64>,
    third: Vec<i64>,
}

impl AwardSuffixes {
    pub fn new(events: &[Event]) -> Self {
        let n = events.len();
        let mut first = vec![0i64; n + 1];
        let mut third = vec![0i64; n + 1];
        for i in (0..n).rev() {
            first[i] = first[i + 1] + events[i].awards.first;
            third[i] = third[i + 1] + events[i].awards.third;
        }
        Self { first, third }
    }

    /// Best final score a team can reach from `scores`, assigning events
    /// `from..` optimally in its favor
    pub fn max_reachable(&self, scores: &ScoreVector, team: Team, from: usize) -> i64 {
        scores.get(team) + self.first[from]
    }

    /// Worst final score a team can be held to from `scores`
    pub fn min_reachable(&self, scores: &ScoreVector, team: Team, from: usize) -> i64 {
        scores.get(team) + self.third[from]
    }

    /// Can the desired order still be realized from this suffix?
    ///
    /// Fast boolean form used by the solvers' inner loops.
    pub fn order_reachable(
        &self,
        scores: &ScoreVector,
        outcome: &DesiredOutcome,
        min_margin: i64,
        from: usize,
    ) -> bool {
        self.pair_reachable(scores, outcome.first, outcome.second, min_margin, from)
            && self.pair_reachable(scores, outcome.second, outcome.third, min_margin, from)
    }

    fn pair_reachable(
        &self,
        scores: &ScoreVector,
        upper: Team,
        lower: Team,
        min_margin: i64,
        from: usize,
    ) -> bool {
        self.max_reachable(scores, upper, from) >= self.min_reachable(scores, lower, from) + min_margin
    }

    /// Full report form, with a reason naming the violated pair
    pub fn check(
        &self,
        scores: &ScoreVector,
        outcome: &DesiredOutcome,
        min_margin: i64,
        from: usize,
    ) -> FeasibilityReport {
        for (upper, lower) in [
            (outcome.first, outcome.second),
            (outcome.second, outcome.third),
        ] {
            let best = self.max_reachable(scores, upper, from);
            let worst = self.min_reachable(scores, lower, from);
            if best < worst + min_margin {
                return FeasibilityReport::impossible(format!(
                    "{} cannot finish above {}: max reachable for {} is {}, \
                     min reachable for {} is {} (margin of at least {} required)",
                    upper, lower, upper, best, lower, worst, min_margin
                ));
            }
        }
        FeasibilityReport::possible()
    }
}

/// Check whether the desired final order is still reachable at all
///
/// Standalone entry point over the whole remaining schedule; the solvers
/// run the same bounds over suffixes internally.
pub fn check_feasibility(
    scores: &ScoreVector,
    events: &[Event],
    outcome: &DesiredOutcome,
    min_margin: i64,
) -> FeasibilityReport {
    AwardSuffixes::new(events).check(scores, outcome, min_margin, 0)
}
