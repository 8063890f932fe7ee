//! Benchmark support crate for linkpred.
//!
//! Provides a seeded synthetic citation-graph source and parameter types used
//! by the Criterion benchmarks for candidate generation, batch scoring and
//! the end-to-end ranking pipeline.

pub mod error;
pub mod params;
pub mod source;
