//! Orchestrator - strategy selection and input validation
//!
//! Validates the solve request, short-circuits the obvious cases, and walks
//! the strategy ladder (exact, then random, then heuristic) until one
//! produces a definitive answer.
//!
//! See `engine.rs` for the implementation.

pub mod engine;

pub use engine::{solve, Orchestrator};
