//! Benchmark setup error type.

use linkpred_core::{GraphError, LinkPredError};

use crate::source::SyntheticError;

/// Errors that may occur while preparing benchmark inputs.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph generation failed.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// The generated payload did not form a valid graph.
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
    /// The ranking pipeline rejected its configuration or input.
    #[error("pipeline failed: {0}")]
    Pipeline(#[from] LinkPredError),
}
