//! Matchup Solver Core - Rust Engine
//!
//! Scenario solving and outcome simulation for a three-team scoring race:
//! three teams accumulate points over a schedule of scored events, and this
//! crate answers two questions about the remaining schedule:
//!
//! - **Prescriptive**: is a specific final ranking achievable, and with
//!   which per-event placements? ([`solve`], [`solve_exact`],
//!   [`solve_heuristic`], [`check_feasibility`])
//! - **Descriptive**: given historical placement tendencies, how do the
//!   final rankings distribute? ([`simulate`], [`assess_risk`])
//!
//! # Architecture
//!
//! - **models**: domain types (Team, Event, Scenario, SolverResult)
//! - **feasibility**: reachability bounds (standalone check + search pruning)
//! - **solver**: exact branch-and-bound, heuristic, and random strategies
//! - **orchestrator**: validation and strategy sequencing
//! - **simulation**: Monte Carlo engine and risk classifier
//! - **rng**: deterministic random number generation
//! - **api**: JSON string surface (used by the optional PyO3 bindings)
//!
//! # Critical invariants
//!
//! 1. Every call is a pure function over an immutable input snapshot; no
//!    state survives between calls
//! 2. The exact solver and bound checker are fully deterministic
//! 3. All randomness flows through an injectable seeded RNG

// Module declarations
pub mod api;
pub mod feasibility;
pub mod models;
pub mod orchestrator;
pub mod rng;
pub mod simulation;
pub mod solver;

// Re-exports for convenience
pub use feasibility::{check_feasibility, FeasibilityReport};
pub use models::{
    AwardTable, DesiredOutcome, Difficulty, Event, HistoricalStats, ModelError, Placement,
    PlacementAssignment, PlacementProbs, Scenario, ScenarioStep, ScoreVector, SolveBudget,
    SolveError, SolveStatus, SolverResult, Strategy, StrategyAttempt, Team, TeamStats,
    TimeWindow, MAX_EVENTS,
};
pub use orchestrator::{solve, Orchestrator};
pub use rng::RngManager;
pub use simulation::{
    assess_risk, simulate, MonteCarloResult, OutcomeFrequency, RankProbabilities,
    RiskAssessment, RiskLevel, ScoreInterval, SimulationError,
};
pub use solver::{solve_exact, solve_heuristic, SolveRequest, SolveStrategy};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn matchup_solver_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::solve, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::simulate, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::assess_risk, m)?)?;
    Ok(())
}
