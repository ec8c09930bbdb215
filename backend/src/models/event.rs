//! Scored events, award tables, and placement assignments
//!
//! An event is one scored time period in the matchup schedule. Every event
//! carries an award table (points for 1st/2nd/3rd place) and a start hour
//! that maps it into a time-of-day window for historical statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::team::Team;

/// Validation errors for model construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid award table ({first}, {second}, {third}): must satisfy first > second > third > 0")]
    InvalidAwardTable { first: i64, second: i64, third: i64 },

    #[error("invalid start hour {0}: must be in 0..24")]
    InvalidStartHour(u8),

    #[error("duplicate team in desired outcome: {0}")]
    DuplicateTeam(Team),

    #[error("invalid placement probabilities for {team}: {detail}")]
    InvalidProbabilities { team: Team, detail: String },
}

/// Finishing position within a single event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    First,
    Second,
    Third,
}

impl Placement {
    /// All placements, best first
    pub const ALL: [Placement; 3] = [Placement::First, Placement::Second, Placement::Third];
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::First => write!(f, "1st"),
            Placement::Second => write!(f, "2nd"),
            Placement::Third => write!(f, "3rd"),
        }
    }
}

/// Points awarded for each placement in one event
///
/// Invariant: `first > second > third > 0`. Enforced at construction so the
/// solvers can rely on strict ordering (a first place is always worth
/// strictly more than a third).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardTable {
    pub first: i64,
    pub second: i64,
    pub third: i64,
}

impl AwardTable {
    /// Create a validated award table
    pub fn new(first: i64, second: i64, third: i64) -> Result<Self, ModelError> {
        if third <= 0 || second <= third || first <= second {
            return Err(ModelError::InvalidAwardTable {
                first,
                second,
                third,
            });
        }
        Ok(Self {
            first,
            second,
            third,
        })
    }

    /// Points for a given placement
    pub fn award(&self, placement: Placement) -> i64 {
        match placement {
            Placement::First => self.first,
            Placement::Second => self.second,
            Placement::Third => self.third,
        }
    }
}

/// Time-of-day window, used to key historical placement statistics
///
/// Events are bucketed into four 6-hour windows by start hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    /// 00:00 - 05:59
    Night,
    /// 06:00 - 11:59
    Morning,
    /// 12:00 - 17:59
    Afternoon,
    /// 18:00 - 23:59
    Evening,
}

impl TimeWindow {
    /// Window containing the given hour of day
    ///
    /// # Panics
    /// Panics if `hour >= 24`. Event construction validates the hour, so
    /// this is only reachable with a hand-built out-of-range value.
    pub fn from_hour(hour: u8) -> TimeWindow {
        match hour {
            0..=5 => TimeWindow::Night,
            6..=11 => TimeWindow::Morning,
            12..=17 => TimeWindow::Afternoon,
            18..=23 => TimeWindow::Evening,
            _ => panic!("hour {} out of range", hour),
        }
    }
}

/// One scored event in the remaining schedule
///
/// Events are immutable once built; the solvers copy and reorder event lists
/// but never modify individual events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Caller-supplied identifier (e.g. "skirmish_42")
    pub id: String,

    /// Hour of day the event starts (0..24)
    pub start_hour: u8,

    /// Points for 1st/2nd/3rd place
    pub awards: AwardTable,
}

impl Event {
    /// Create a validated event
    pub fn new(
        id: impl Into<String>,
        start_hour: u8,
        awards: AwardTable,
    ) -> Result<Self, ModelError> {
        if start_hour >= 24 {
            return Err(ModelError::InvalidStartHour(start_hour));
        }
        Ok(Self {
            id: id.into(),
            start_hour,
            awards,
        })
    }

    /// Re-check the construction invariants
    ///
    /// Deserialization bypasses [`Event::new`]; the JSON API revalidates
    /// parsed events with this before solving.
    pub fn validate(&self) -> Result<(), ModelError> {
        AwardTable::new(self.awards.first, self.awards.second, self.awards.third)?;
        if self.start_hour >= 24 {
            return Err(ModelError::InvalidStartHour(self.start_hour));
        }
        Ok(())
    }

    /// Time window this event falls into
    pub fn time_window(&self) -> TimeWindow {
        TimeWindow::from_hour(self.start_hour)
    }
}

/// Assignment of the three teams to the three placements of one event
///
/// Built from [`PlacementAssignment::ALL`] this is a bijection by
/// construction. The fields are public for pattern-style construction in
/// callers and tests; `is_valid` checks pairwise distinctness for
/// hand-built values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementAssignment {
    pub first: Team,
    pub second: Team,
    pub third: Team,
}

impl PlacementAssignment {
    /// The six possible assignments, in the canonical trial order
    ///
    /// This order is part of the exact solver's determinism contract: the
    /// same inputs always try permutations in the same sequence.
    pub const ALL: [PlacementAssignment; 6] = [
        PlacementAssignment {
            first: Team::Red,
            second: Team::Blue,
            third: Team::Green,
        },
        PlacementAssignment {
            first: Team::Red,
            second: Team::Green,
            third: Team::Blue,
        },
        PlacementAssignment {
            first: Team::Blue,
            second: Team::Red,
            third: Team::Green,
        },
        PlacementAssignment {
            first: Team::Blue,
            second: Team::Green,
            third: Team::Red,
        },
        PlacementAssignment {
            first: Team::Green,
            second: Team::Red,
            third: Team::Blue,
        },
        PlacementAssignment {
            first: Team::Green,
            second: Team::Blue,
            third: Team::Red,
        },
    ];

    /// Team finishing at the given placement
    pub fn team_at(&self, placement: Placement) -> Team {
        match placement {
            Placement::First => self.first,
            Placement::Second => self.second,
            Placement::Third => self.third,
        }
    }

    /// Placement of the given team, or `None` if the assignment is invalid
    /// and the team does not appear
    pub fn placement_of(&self, team: Team) -> Option<Placement> {
        if self.first == team {
            Some(Placement::First)
        } else if self.second == team {
            Some(Placement::Second)
        } else if self.third == team {
            Some(Placement::Third)
        } else {
            None
        }
    }

    /// Exactly one team per placement?
    pub fn is_valid(&self) -> bool {
        self.first != self.second && self.first != self.third && self.second != self.third
    }

    /// Position of this assignment in [`PlacementAssignment::ALL`]
    ///
    /// Used as a compact outcome index by the Monte Carlo tally.
    pub fn canonical_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|a| a == self)
            .expect("assignment is one of the six permutations")
    }
}

impl fmt::Display for PlacementAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {} > {}", self.first, self.second, self.third)
    }
}

/// One entry of a solved scenario: which assignment to realize for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioStep {
    /// Event this step applies to
    pub event_id: String,

    /// Required placement assignment for that event
    pub assignment: PlacementAssignment,
}

/// Complete prescription: one placement assignment per remaining event
///
/// Ordered to match the solver's canonical event order (descending
/// first-place award), not the caller's input order; each step carries its
/// event id so callers can re-associate.
pub type Scenario = Vec<ScenarioStep>;
