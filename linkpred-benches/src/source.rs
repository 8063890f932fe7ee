//! Seeded synthetic citation graphs.
//!
//! Nodes arrive one at a time and each cites up to `links_per_node` earlier
//! nodes, half the time uniformly and half the time proportionally to degree.
//! The arrival index doubles as the edge timestamp, so the graphs exercise
//! temporal scoring too.

use std::convert::Infallible;

use linkpred_core::{EdgeRecord, GraphData, GraphSource};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Parameters for [`SyntheticGraph::generate`].
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Citations each arriving node makes, capped by the nodes before it.
    pub links_per_node: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Invalid generator parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntheticError {
    /// `node_count` was zero.
    #[error("node_count must be positive")]
    ZeroNodes,
    /// `links_per_node` was zero.
    #[error("links_per_node must be positive")]
    ZeroLinks,
}

/// In-memory graph produced by the growth model.
#[derive(Debug, Clone)]
pub struct SyntheticGraph {
    name: String,
    data: GraphData,
}

impl SyntheticGraph {
    /// Grows a graph from `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when either count is zero.
    pub fn generate(config: &SyntheticGraphConfig) -> Result<Self, SyntheticError> {
        if config.node_count == 0 {
            return Err(SyntheticError::ZeroNodes);
        }
        if config.links_per_node == 0 {
            return Err(SyntheticError::ZeroLinks);
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut edges: Vec<EdgeRecord> = Vec::new();
        let mut chosen = Vec::with_capacity(config.links_per_node);

        for node in 1..config.node_count {
            let wanted = config.links_per_node.min(node);
            chosen.clear();
            while chosen.len() < wanted {
                let target = pick_target(&mut rng, node, &edges);
                if !chosen.contains(&target) {
                    chosen.push(target);
                }
            }
            let stamp = arrival_time(node);
            edges.extend(
                chosen
                    .iter()
                    .map(|&target| EdgeRecord::new(node, target).with_timestamp(stamp)),
            );
        }

        Ok(Self {
            name: format!("synthetic-n{}-m{}", config.node_count, config.links_per_node),
            data: GraphData::new(config.node_count, edges),
        })
    }

    /// Generated payload.
    #[must_use]
    pub const fn data(&self) -> &GraphData {
        &self.data
    }
}

fn pick_target(rng: &mut SmallRng, node: usize, edges: &[EdgeRecord]) -> usize {
    if !edges.is_empty() && rng.gen_bool(0.5) {
        if let Some(edge) = edges.get(rng.gen_range(0..edges.len())) {
            return if rng.gen_bool(0.5) { edge.source } else { edge.target };
        }
    }
    rng.gen_range(0..node)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "benchmark node counts stay far below 2^52"
)]
fn arrival_time(node: usize) -> f64 {
    node as f64
}

impl GraphSource for SyntheticGraph {
    type Error = Infallible;

    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<GraphData, Infallible> {
        Ok(self.data.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkpred_core::Graph;
    use rstest::rstest;

    fn config(node_count: usize, links_per_node: usize) -> SyntheticGraphConfig {
        SyntheticGraphConfig {
            node_count,
            links_per_node,
            seed: 7,
        }
    }

    #[rstest]
    #[case(1, 3, 0)]
    #[case(2, 3, 1)]
    #[case(4, 2, 5)]
    #[case(50, 3, 144)]
    fn edge_count_follows_growth(#[case] nodes: usize, #[case] links: usize, #[case] edges: usize) {
        let graph = SyntheticGraph::generate(&config(nodes, links)).expect("config is valid");
        assert_eq!(graph.data().edges.len(), edges);
    }

    #[test]
    fn graphs_are_valid_and_deduplicated() {
        let synthetic = SyntheticGraph::generate(&config(200, 4)).expect("config is valid");
        let graph = Graph::try_from_data(synthetic.data()).expect("generated graph is valid");
        assert_eq!(graph.num_edges(), synthetic.data().edges.len());
        assert!(graph.is_fully_timestamped());
    }

    #[test]
    fn generation_is_deterministic() {
        let first = SyntheticGraph::generate(&config(100, 3)).expect("config is valid");
        let second = SyntheticGraph::generate(&config(100, 3)).expect("config is valid");
        assert_eq!(first.data(), second.data());
        assert_eq!(first.name(), "synthetic-n100-m3");
    }

    #[rstest]
    #[case(0, 3, SyntheticError::ZeroNodes)]
    #[case(10, 0, SyntheticError::ZeroLinks)]
    fn rejects_zero_sizes(#[case] nodes: usize, #[case] links: usize, #[case] expected: SyntheticError) {
        let err = SyntheticGraph::generate(&config(nodes, links)).expect_err("config is invalid");
        assert_eq!(err, expected);
    }
}
