//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm. All randomness in the random strategy and
//! the Monte Carlo simulator flows through an injected [`RngManager`], so a
//! fixed seed reproduces a run exactly.

mod xorshift;

pub use xorshift::RngManager;
