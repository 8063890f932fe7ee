//! Shared test utilities used across linkpred crates.

pub mod ci;
pub mod tracing;
