//! JSON request/response surface
//!
//! String-in, string-out wrappers over the core operations, used by the
//! optional PyO3 bindings and handy for any host that prefers not to link
//! against the Rust types directly. Parsed inputs are revalidated (serde
//! derives bypass the validating constructors) before any work runs.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{
    DesiredOutcome, Event, HistoricalStats, ModelError, ScoreVector, SolveBudget, SolveError,
};
use crate::orchestrator::Orchestrator;
use crate::rng::RngManager;
use crate::simulation::{assess_risk, simulate, MonteCarloResult, SimulationError};

/// Errors crossing the JSON boundary
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model value: {0}")]
    Model(#[from] ModelError),

    #[error("solve rejected: {0}")]
    Solve(#[from] SolveError),

    #[error("simulation rejected: {0}")]
    Simulation(#[from] SimulationError),
}

fn default_min_margin() -> i64 {
    1
}

/// Request body for [`solve_json`]
#[derive(Debug, Deserialize)]
pub struct SolveRequestBody {
    pub scores: ScoreVector,
    pub events: Vec<Event>,
    pub outcome: DesiredOutcome,
    #[serde(default = "default_min_margin")]
    pub min_margin: i64,
    /// Overrides the default iteration budget when present
    pub max_iterations: Option<u64>,
    /// Overrides the default wall-clock budget when present
    pub time_limit_ms: Option<u64>,
    /// Seed for the random fallback strategy
    pub random_seed: Option<u64>,
}

/// Request body for [`simulate_json`]
#[derive(Debug, Deserialize)]
pub struct SimulateRequestBody {
    pub scores: ScoreVector,
    pub events: Vec<Event>,
    pub stats: HistoricalStats,
    pub iterations: u64,
    /// Simulation seed; a fixed seed reproduces the draw sequence exactly
    pub seed: Option<u64>,
}

/// Request body for [`assess_risk_json`]
#[derive(Debug, Deserialize)]
pub struct RiskRequestBody {
    pub outcome: DesiredOutcome,
    pub simulation: MonteCarloResult,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Orchestrated solve over a JSON request, returning the JSON result
pub fn solve_json(request: &str) -> Result<String, ApiError> {
    let body: SolveRequestBody = serde_json::from_str(request)?;
    for event in &body.events {
        event.validate()?;
    }

    let defaults = SolveBudget::default();
    let budget = SolveBudget {
        max_iterations: body.max_iterations.unwrap_or(defaults.max_iterations),
        time_limit: body
            .time_limit_ms
            .map(Duration::from_millis)
            .or(defaults.time_limit),
    };
    let mut orchestrator = Orchestrator::new(budget);
    if let Some(seed) = body.random_seed {
        orchestrator = orchestrator.with_random_seed(seed);
    }

    let result = orchestrator.solve(&body.scores, &body.events, &body.outcome, body.min_margin)?;
    Ok(serde_json::to_string(&result)?)
}

/// Monte Carlo simulation over a JSON request, returning the JSON result
pub fn simulate_json(request: &str) -> Result<String, ApiError> {
    let body: SimulateRequestBody = serde_json::from_str(request)?;
    for event in &body.events {
        event.validate()?;
    }
    body.stats.validate()?;

    let mut rng = RngManager::new(body.seed.unwrap_or(0x0DDB_A11));
    let result = simulate(
        &body.scores,
        &body.events,
        &body.stats,
        body.iterations,
        &mut rng,
    )?;
    Ok(serde_json::to_string(&result)?)
}

/// Risk assessment of a target outcome against a prior simulation result
pub fn assess_risk_json(request: &str) -> Result<String, ApiError> {
    let body: RiskRequestBody = serde_json::from_str(request)?;
    body.outcome.validate()?;
    let assessment = assess_risk(&body.outcome, &body.simulation);
    Ok(serde_json::to_string(&assessment)?)
}

/// Render an error the way the JSON surface reports it
pub fn error_json(error: &ApiError) -> String {
    serde_json::to_string(&ErrorBody {
        error: &error.to_string(),
    })
    .unwrap_or_else(|_| r#"{"error":"internal serialization failure"}"#.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_solve_json_round_trip() {
        let request = json!({
            "scores": {"red": 1000, "blue": 1000, "green": 1000},
            "events": [
                {"id": "s1", "start_hour": 20, "awards": {"first": 5, "second": 4, "third": 3}}
            ],
            "outcome": {"first": "green", "second": "red", "third": "blue"},
            "min_margin": 1
        });
        let response = solve_json(&request.to_string()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["status"], "achievable");
        assert_eq!(parsed["final_scores"]["green"], 1005);
        assert_eq!(parsed["scenario"][0]["assignment"]["first"], "green");
    }

    #[test]
    fn test_solve_json_rejects_invalid_award_table() {
        let request = json!({
            "scores": {"red": 0, "blue": 0, "green": 0},
            "events": [
                {"id": "s1", "start_hour": 0, "awards": {"first": 3, "second": 4, "third": 5}}
            ],
            "outcome": {"first": "red", "second": "blue", "third": "green"}
        });
        let error = solve_json(&request.to_string()).unwrap_err();
        assert!(matches!(error, ApiError::Model(_)));
    }

    #[test]
    fn test_solve_json_rejects_duplicate_outcome() {
        let request = json!({
            "scores": {"red": 0, "blue": 0, "green": 0},
            "events": [
                {"id": "s1", "start_hour": 0, "awards": {"first": 5, "second": 4, "third": 3}}
            ],
            "outcome": {"first": "red", "second": "red", "third": "green"}
        });
        let error = solve_json(&request.to_string()).unwrap_err();
        assert!(matches!(error, ApiError::Solve(SolveError::InvalidOutcome(_))));
    }

    #[test]
    fn test_simulate_json_with_seed_is_reproducible() {
        let request = json!({
            "scores": {"red": 10, "blue": 20, "green": 30},
            "events": [
                {"id": "s1", "start_hour": 3, "awards": {"first": 5, "second": 4, "third": 3}},
                {"id": "s2", "start_hour": 9, "awards": {"first": 5, "second": 4, "third": 3}}
            ],
            "stats": {
                "red": {"overall": {"p_first": 0.5, "p_second": 0.3, "p_third": 0.2}},
                "blue": {"overall": {"p_first": 0.3, "p_second": 0.4, "p_third": 0.3}},
                "green": {"overall": {"p_first": 0.2, "p_second": 0.3, "p_third": 0.5}}
            },
            "iterations": 500,
            "seed": 42
        })
        .to_string();
        assert_eq!(simulate_json(&request).unwrap(), simulate_json(&request).unwrap());
    }

    #[test]
    fn test_assess_risk_json_consumes_simulation_output() {
        let simulate_request = json!({
            "scores": {"red": 0, "blue": 0, "green": 0},
            "events": [
                {"id": "s1", "start_hour": 12, "awards": {"first": 5, "second": 4, "third": 3}}
            ],
            "stats": {
                "red": {"overall": {"p_first": 1.0, "p_second": 0.0, "p_third": 0.0}},
                "blue": {"overall": {"p_first": 0.0, "p_second": 1.0, "p_third": 0.0}},
                "green": {"overall": {"p_first": 0.0, "p_second": 0.0, "p_third": 1.0}}
            },
            "iterations": 200,
            "seed": 1
        });
        let simulation = simulate_json(&simulate_request.to_string()).unwrap();

        let risk_request = format!(
            r#"{{"outcome": {{"first": "red", "second": "blue", "third": "green"}}, "simulation": {}}}"#,
            simulation
        );
        let response = assess_risk_json(&risk_request).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&response).unwrap();
        assert_eq!(parsed["risk"], "very-low");
        assert_eq!(parsed["probability"], 1.0);
    }
}
