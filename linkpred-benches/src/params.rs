//! Benchmark parameter types.

use std::fmt;

/// Size of a synthetic graph benchmark input.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of nodes.
    pub node_count: usize,
    /// Links each arriving node forms.
    pub links_per_node: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},m={}", self.node_count, self.links_per_node)
    }
}

/// A metric and size pairing for scoring benchmarks.
#[derive(Clone, Copy, Debug)]
pub struct ScoringBenchParams {
    /// Graph size.
    pub graph: GraphBenchParams,
    /// Metric name.
    pub metric: &'static str,
}

impl fmt::Display for ScoringBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.metric, self.graph)
    }
}
