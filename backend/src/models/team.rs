//! Team identities and cumulative score tracking
//!
//! A matchup is always contested by exactly three teams. That fixed arity is
//! load-bearing for every solver in this crate: each event has exactly six
//! possible placement assignments, and the score vector is a flat `[i64; 3]`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::event::{AwardTable, Placement, PlacementAssignment};
use super::outcome::DesiredOutcome;

/// One of the three fixed teams in a matchup
///
/// The variant order (Red < Blue < Green) is the canonical tie-break order
/// used when converting scores into a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Red,
    Blue,
    Green,
}

impl Team {
    /// All teams in canonical order
    pub const ALL: [Team; 3] = [Team::Red, Team::Blue, Team::Green];

    /// Index into score arrays (Red=0, Blue=1, Green=2)
    pub fn index(self) -> usize {
        match self {
            Team::Red => 0,
            Team::Blue => 1,
            Team::Green => 2,
        }
    }

    /// Inverse of [`Team::index`]
    ///
    /// # Panics
    /// Panics if `index >= 3`. Only called with indices produced by
    /// `Team::index` or loop counters over `0..3`.
    pub fn from_index(index: usize) -> Team {
        Team::ALL[index]
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Red => write!(f, "red"),
            Team::Blue => write!(f, "blue"),
            Team::Green => write!(f, "green"),
        }
    }
}

/// Cumulative score per team
///
/// Scores are plain i64 points. They only ever increase as events are
/// applied; nothing in the solvers subtracts points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ScoreVectorRepr", into = "ScoreVectorRepr")]
pub struct ScoreVector {
    scores: [i64; 3],
}

/// JSON shape of [`ScoreVector`]: named per-team fields instead of a bare
/// array
#[derive(Serialize, Deserialize)]
struct ScoreVectorRepr {
    red: i64,
    blue: i64,
    green: i64,
}

impl From<ScoreVectorRepr> for ScoreVector {
    fn from(repr: ScoreVectorRepr) -> Self {
        ScoreVector::new(repr.red, repr.blue, repr.green)
    }
}

impl From<ScoreVector> for ScoreVectorRepr {
    fn from(scores: ScoreVector) -> Self {
        ScoreVectorRepr {
            red: scores.get(Team::Red),
            blue: scores.get(Team::Blue),
            green: scores.get(Team::Green),
        }
    }
}

impl ScoreVector {
    /// Create a score vector from per-team totals
    pub fn new(red: i64, blue: i64, green: i64) -> Self {
        Self {
            scores: [red, blue, green],
        }
    }

    /// All teams at zero
    pub fn zero() -> Self {
        Self { scores: [0; 3] }
    }

    /// Current score for a team
    pub fn get(&self, team: Team) -> i64 {
        self.scores[team.index()]
    }

    /// Add points to a team's total
    pub fn add(&mut self, team: Team, points: i64) {
        self.scores[team.index()] += points;
    }

    /// Apply one event's awards under a placement assignment
    ///
    /// Returns the resulting vector; `self` is unchanged (the solvers keep
    /// per-frame copies rather than mutating shared state).
    pub fn apply(&self, assignment: &PlacementAssignment, awards: &AwardTable) -> ScoreVector {
        let mut next = *self;
        next.add(assignment.first, awards.first);
        next.add(assignment.second, awards.second);
        next.add(assignment.third, awards.third);
        next
    }

    /// Point gap `a - b`
    pub fn margin_between(&self, a: Team, b: Team) -> i64 {
        self.get(a) - self.get(b)
    }

    /// Does this vector realize the desired order with the required margin
    /// between both adjacent pairs?
    pub fn satisfies(&self, outcome: &DesiredOutcome, min_margin: i64) -> bool {
        self.margin_between(outcome.first, outcome.second) >= min_margin
            && self.margin_between(outcome.second, outcome.third) >= min_margin
    }

    /// Ranking implied by the current scores
    ///
    /// Ties break by canonical team order (Red before Blue before Green),
    /// which keeps simulation aggregation deterministic.
    pub fn ranking(&self) -> PlacementAssignment {
        let mut order = Team::ALL;
        // Stable sort: equal scores keep canonical team order.
        order.sort_by_key(|t| std::cmp::Reverse(self.get(*t)));
        PlacementAssignment {
            first: order[0],
            second: order[1],
            third: order[2],
        }
    }

    /// Placement of one team in the implied ranking
    pub fn placement_of(&self, team: Team) -> Placement {
        self.ranking()
            .placement_of(team)
            .unwrap_or(Placement::Third)
    }
}
