//! Domain types for the matchup solver

pub mod event;
pub mod outcome;
pub mod stats;
pub mod team;

pub use event::{
    AwardTable, Event, ModelError, Placement, PlacementAssignment, Scenario, ScenarioStep,
    TimeWindow,
};
pub use outcome::{
    DesiredOutcome, Difficulty, SolveBudget, SolveError, SolveStatus, SolverResult, Strategy,
    StrategyAttempt, MAX_EVENTS,
};
pub use stats::{HistoricalStats, PlacementProbs, TeamStats};
pub use team::{ScoreVector, Team};
