//! Orchestrator integration tests
//!
//! End-to-end coverage of the strategy ladder: input validation, the
//! obvious shortcuts, exact search, the fallbacks, and the diagnostics
//! (attempt trace, difficulty) attached to the final result.

use matchup_solver_core_rs::{
    solve, AwardTable, DesiredOutcome, Event, Orchestrator, ScoreVector, SolveBudget, SolveError,
    SolveStatus, Strategy, Team, MAX_EVENTS,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn skirmishes(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| Event::new(format!("s{}", i), 12, AwardTable::new(5, 4, 3).unwrap()).unwrap())
        .collect()
}

fn outcome() -> DesiredOutcome {
    DesiredOutcome::new(Team::Red, Team::Blue, Team::Green)
}

// ============================================================================
// Input Validation
// ============================================================================

#[test]
fn test_duplicate_competitor_rejected_without_search() {
    let bad = DesiredOutcome::new(Team::Green, Team::Green, Team::Red);
    let result = solve(&ScoreVector::zero(), &skirmishes(2), &bad, 1, SolveBudget::default());
    assert!(matches!(result, Err(SolveError::InvalidOutcome(_))));
}

#[test]
fn test_event_cap_boundary() {
    // 51 events rejected outright; 50 must complete under the default budget.
    let over = solve(
        &ScoreVector::zero(),
        &skirmishes(MAX_EVENTS + 1),
        &outcome(),
        1,
        SolveBudget::default(),
    );
    assert!(matches!(over, Err(SolveError::TooManyEvents { count: 51, max: 50 })));

    let at_cap = solve(
        &ScoreVector::new(1000, 1000, 1000),
        &skirmishes(MAX_EVENTS),
        &outcome(),
        1,
        SolveBudget::default(),
    )
    .unwrap();
    assert_eq!(at_cap.status, SolveStatus::Achievable);
    assert_eq!(at_cap.scenario.unwrap().len(), MAX_EVENTS);
}

// ============================================================================
// Obvious Shortcuts
// ============================================================================

#[test]
fn test_settled_scoreboard_answers_without_search() {
    let scores = ScoreVector::new(30, 20, 10);
    let result = solve(&scores, &[], &outcome(), 1, SolveBudget::default()).unwrap();
    assert_eq!(result.status, SolveStatus::Achievable);
    assert_eq!(result.strategy_used, Strategy::Obvious);
    assert_eq!(result.iterations, 0);
    assert_eq!(result.margin, Some(10));
    assert_eq!(result.final_scores, Some(scores));
    assert_eq!(result.scenario.unwrap().len(), 0);
}

#[test]
fn test_settled_scoreboard_can_also_refuse() {
    let scores = ScoreVector::new(10, 20, 30);
    let result = solve(&scores, &[], &outcome(), 1, SolveBudget::default()).unwrap();
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert_eq!(result.strategy_used, Strategy::Obvious);
    assert!(result.reason.unwrap().contains("no events remain"));
    assert!(result.difficulty.is_none());
}

#[test]
fn test_whole_horizon_bound_rejection() {
    let scores = ScoreVector::new(100, 1000, 500);
    let result = solve(&scores, &skirmishes(1), &outcome(), 1, SolveBudget::default()).unwrap();
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert_eq!(result.strategy_used, Strategy::Obvious);
    assert_eq!(result.iterations, 0);
    let reason = result.reason.unwrap();
    assert!(reason.contains("105") && reason.contains("1003"), "reason: {}", reason);
}

// ============================================================================
// Strategy Ladder
// ============================================================================

#[test]
fn test_exact_answers_within_budget() {
    let result = solve(
        &ScoreVector::new(1000, 1000, 1000),
        &skirmishes(4),
        &outcome(),
        1,
        SolveBudget::default(),
    )
    .unwrap();
    assert_eq!(result.status, SolveStatus::Achievable);
    assert_eq!(result.strategy_used, Strategy::Exact);
    assert_eq!(result.attempts.len(), 1, "no fallback was needed");
    assert_eq!(result.attempts[0].strategy, Strategy::Exact);
    assert_eq!(result.attempts[0].status, SolveStatus::Achievable);
}

#[test]
fn test_fallbacks_engage_after_inconclusive_exact() {
    // One iteration is not enough for the exact search, so the ladder must
    // continue and still come back achievable.
    let result = solve(
        &ScoreVector::new(1000, 1000, 1000),
        &skirmishes(4),
        &outcome(),
        1,
        SolveBudget::iterations(1),
    )
    .unwrap();
    assert_eq!(result.status, SolveStatus::Achievable);
    assert!(matches!(result.strategy_used, Strategy::Random | Strategy::Heuristic));
    assert_eq!(result.attempts[0].strategy, Strategy::Exact);
    assert_eq!(result.attempts[0].status, SolveStatus::Inconclusive);
    assert_eq!(
        result.attempts.last().unwrap().strategy,
        result.strategy_used,
        "the trace ends with the strategy that answered"
    );
    assert!(result.final_scores.unwrap().satisfies(&outcome(), 1));
}

#[test]
fn test_seeded_pipeline_is_reproducible() {
    let orchestrator = Orchestrator::new(SolveBudget::iterations(1)).with_random_seed(99);
    let scores = ScoreVector::new(1000, 1000, 1000);
    let events = skirmishes(5);
    let a = orchestrator.solve(&scores, &events, &outcome(), 1).unwrap();
    let b = orchestrator.solve(&scores, &events, &outcome(), 1).unwrap();
    assert_eq!(a, b, "a seeded ladder is deterministic end to end");
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_difficulty_reflects_required_effort() {
    // From a big lead the winner should rarely need first place.
    let easy = solve(
        &ScoreVector::new(2000, 1000, 500),
        &skirmishes(5),
        &outcome(),
        1,
        SolveBudget::default(),
    )
    .unwrap();
    assert_eq!(easy.status, SolveStatus::Achievable);
    let difficulty = easy.difficulty.expect("achievable results carry difficulty");
    let firsts = easy
        .scenario
        .unwrap()
        .iter()
        .filter(|s| s.assignment.first == Team::Red)
        .count();
    let expected = matchup_solver_core_rs::Difficulty::from_first_fraction(firsts as f64 / 5.0);
    assert_eq!(difficulty, expected, "difficulty matches the witness's first count");
}

#[test]
fn test_infeasible_results_carry_no_witness() {
    let result = solve(
        &ScoreVector::new(100, 1000, 500),
        &skirmishes(2),
        &outcome(),
        1,
        SolveBudget::default(),
    )
    .unwrap();
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert!(result.scenario.is_none());
    assert!(result.final_scores.is_none());
    assert!(result.margin.is_none());
    assert!(result.difficulty.is_none());
    assert!(result.reason.is_some());
}
