//! Exact branch-and-bound solver tests
//!
//! The exact strategy is the crate's ground truth: within budget it must
//! find a witness whenever one exists, prove infeasibility whenever none
//! does, and produce bit-identical results for identical inputs.

use matchup_solver_core_rs::{
    solve_exact, AwardTable, DesiredOutcome, Event, ScoreVector, SolveBudget, SolveStatus,
    Strategy, Team,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn skirmishes(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| Event::new(format!("s{}", i), 12, AwardTable::new(5, 4, 3).unwrap()).unwrap())
        .collect()
}

fn all_outcomes() -> Vec<DesiredOutcome> {
    let mut outcomes = Vec::new();
    for first in Team::ALL {
        for second in Team::ALL {
            for third in Team::ALL {
                let outcome = DesiredOutcome::new(first, second, third);
                if outcome.validate().is_ok() {
                    outcomes.push(outcome);
                }
            }
        }
    }
    outcomes
}

/// Replay a scenario over the events it names and return the final scores
fn replay(scores: &ScoreVector, events: &[Event], result: &matchup_solver_core_rs::SolverResult) -> ScoreVector {
    let scenario = result.scenario.as_ref().expect("achievable result has a scenario");
    let mut running = *scores;
    for step in scenario {
        let event = events
            .iter()
            .find(|e| e.id == step.event_id)
            .expect("scenario steps name real events");
        running = running.apply(&step.assignment, &event.awards);
    }
    running
}

// ============================================================================
// Achievability
// ============================================================================

#[test]
fn test_every_order_achievable_from_a_tie() {
    let scores = ScoreVector::new(1000, 1000, 1000);
    let events = skirmishes(3);
    for outcome in all_outcomes() {
        let result = solve_exact(&scores, &events, &outcome, 1, &SolveBudget::iterations(100_000));
        assert_eq!(
            result.status,
            SolveStatus::Achievable,
            "{} must be reachable from a three-way tie",
            outcome
        );
        assert_eq!(result.strategy_used, Strategy::Exact);

        let finals = replay(&scores, &events, &result);
        assert_eq!(Some(finals), result.final_scores, "reported scores must replay");
        assert!(finals.satisfies(&outcome, 1), "witness must realize {}", outcome);
    }
}

#[test]
fn test_witness_covers_every_event_exactly_once() {
    let scores = ScoreVector::new(50, 48, 46);
    let events = skirmishes(5);
    let outcome = DesiredOutcome::new(Team::Blue, Team::Red, Team::Green);
    let result = solve_exact(&scores, &events, &outcome, 1, &SolveBudget::iterations(1_000_000));
    assert_eq!(result.status, SolveStatus::Achievable);

    let scenario = result.scenario.unwrap();
    assert_eq!(scenario.len(), events.len());
    let mut ids: Vec<&str> = scenario.iter().map(|s| s.event_id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), events.len(), "no event assigned twice");
    for step in &scenario {
        assert!(step.assignment.is_valid(), "each step is a bijection");
    }
}

#[test]
fn test_margin_is_desired_pair_gap() {
    let scores = ScoreVector::new(1000, 1000, 1000);
    let events = skirmishes(1);
    let outcome = DesiredOutcome::new(Team::Green, Team::Red, Team::Blue);
    let result = solve_exact(&scores, &events, &outcome, 1, &SolveBudget::iterations(1000));
    assert_eq!(result.status, SolveStatus::Achievable);
    // 1005 vs 1004 is the only way green clears red in one skirmish.
    assert_eq!(result.margin, Some(1));
}

// ============================================================================
// Infeasibility Proofs
// ============================================================================

#[test]
fn test_bound_rejection_needs_no_iterations() {
    let scores = ScoreVector::new(100, 1000, 500);
    let events = skirmishes(1);
    let outcome = DesiredOutcome::new(Team::Red, Team::Blue, Team::Green);
    let result = solve_exact(&scores, &events, &outcome, 1, &SolveBudget::iterations(1000));
    assert_eq!(result.status, SolveStatus::Infeasible);
    assert_eq!(result.iterations, 0, "root bound check preempts the search");
    assert!(result.reason.unwrap().contains("105"));
}

#[test]
fn test_infeasible_by_exhaustion() {
    // Bounds pass for margin 2 but no assignment of one skirmish yields
    // both adjacent gaps >= 2.
    let scores = ScoreVector::zero();
    let events = skirmishes(1);
    let outcome = DesiredOutcome::new(Team::Red, Team::Blue, Team::Green);
    let result = solve_exact(&scores, &events, &outcome, 2, &SolveBudget::iterations(1000));
    assert_eq!(result.status, SolveStatus::Infeasible);
    let reason = result.reason.unwrap();
    assert!(reason.contains("exhaustive"), "proof by exhaustion: {}", reason);
    assert!(result.iterations > 0, "the search actually ran");
}

// ============================================================================
// Budget and Determinism
// ============================================================================

#[test]
fn test_budget_exhaustion_reports_inconclusive() {
    let scores = ScoreVector::zero();
    let events = skirmishes(6);
    // Margin 11 is just beyond what six 5/4/3 events can separate, forcing
    // deep backtracking before the exhaustion proof completes.
    let outcome = DesiredOutcome::new(Team::Red, Team::Blue, Team::Green);
    let result = solve_exact(&scores, &events, &outcome, 11, &SolveBudget::iterations(50));
    assert_eq!(result.status, SolveStatus::Inconclusive);
    assert_eq!(result.iterations, 50);
    assert!(result.reason.unwrap().contains("budget"));
}

#[test]
fn test_identical_inputs_identical_results() {
    let scores = ScoreVector::new(40, 35, 30);
    let events = vec![
        Event::new("a", 1, AwardTable::new(9, 6, 2).unwrap()).unwrap(),
        Event::new("b", 7, AwardTable::new(5, 4, 3).unwrap()).unwrap(),
        Event::new("c", 13, AwardTable::new(12, 7, 1).unwrap()).unwrap(),
        Event::new("d", 19, AwardTable::new(5, 3, 1).unwrap()).unwrap(),
    ];
    let outcome = DesiredOutcome::new(Team::Green, Team::Blue, Team::Red);
    let budget = SolveBudget::iterations(1_000_000);
    let first = solve_exact(&scores, &events, &outcome, 1, &budget);
    let second = solve_exact(&scores, &events, &outcome, 1, &budget);
    assert_eq!(first, second, "same inputs, bit-identical result");
}

#[test]
fn test_input_event_order_does_not_change_the_verdict() {
    let scores = ScoreVector::new(10, 14, 12);
    let events = vec![
        Event::new("a", 1, AwardTable::new(9, 6, 2).unwrap()).unwrap(),
        Event::new("b", 7, AwardTable::new(5, 4, 3).unwrap()).unwrap(),
        Event::new("c", 13, AwardTable::new(12, 7, 1).unwrap()).unwrap(),
    ];
    let mut reversed = events.clone();
    reversed.reverse();

    let outcome = DesiredOutcome::new(Team::Red, Team::Green, Team::Blue);
    let budget = SolveBudget::iterations(1_000_000);
    let forward = solve_exact(&scores, &events, &outcome, 1, &budget);
    let backward = solve_exact(&scores, &reversed, &outcome, 1, &budget);
    assert_eq!(forward.status, backward.status);
    // Canonical ordering makes even the witnesses line up.
    assert_eq!(forward.scenario, backward.scenario);
}
