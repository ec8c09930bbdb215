//! PyO3 bindings
//!
//! Thin wrappers over the JSON api: requests and responses are JSON strings
//! on both sides of the boundary, so the Python host only needs `json`.
//! Input rejections surface as `ValueError` with the typed error's message.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::api::{self, ApiError};

fn to_py_err(error: ApiError) -> PyErr {
    PyValueError::new_err(error.to_string())
}

/// Orchestrated solve; see `api::solve_json` for the request schema
#[pyfunction]
pub fn solve(request_json: &str) -> PyResult<String> {
    api::solve_json(request_json).map_err(to_py_err)
}

/// Monte Carlo simulation; see `api::simulate_json`
#[pyfunction]
pub fn simulate(request_json: &str) -> PyResult<String> {
    api::simulate_json(request_json).map_err(to_py_err)
}

/// Risk assessment of a target outcome; see `api::assess_risk_json`
#[pyfunction]
pub fn assess_risk(request_json: &str) -> PyResult<String> {
    api::assess_risk_json(request_json).map_err(to_py_err)
}
