//! Shared test utilities for `linkpred-core`.

use linkpred_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use test_strategy::Arbitrary;

use crate::{
    datasource::GraphSource,
    graph::{EdgeRecord, Graph, GraphData},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `LINKPRED_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph from plain pairs, panicking on invalid input.
#[must_use]
pub(crate) fn graph_from_pairs(nodes: usize, pairs: &[(usize, usize)]) -> Graph {
    match Graph::try_from_data(&GraphData::from_pairs(nodes, pairs)) {
        Ok(graph) => graph,
        Err(err) => panic!("test graph must build: {err}"),
    }
}

/// The four-node scenario graph `{(0,1),(1,2),(0,2),(2,3)}`.
#[must_use]
pub(crate) fn triangle_with_tail() -> GraphData {
    GraphData::from_pairs(4, &[(0, 1), (1, 2), (0, 2), (2, 3)])
}

/// Edge density used when generating random fixtures.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(crate) enum GraphDensity {
    /// Roughly one edge per node.
    #[weight(2)]
    Sparse,
    /// Roughly half of all pairs linked.
    Dense,
    /// A hub connected to most other nodes.
    Star,
}

/// Random fully timestamped graph used by property suites.
#[derive(Clone, Debug)]
pub(crate) struct GraphFixture {
    pub(crate) data: GraphData,
}

impl GraphFixture {
    pub(crate) fn graph(&self) -> Graph {
        match Graph::try_from_data(&self.data) {
            Ok(graph) => graph,
            Err(err) => panic!("generated graph must build: {err}"),
        }
    }
}

/// Generates fully timestamped graphs with 2 to 14 nodes and integral
/// timestamps in `0..10`.
pub(crate) fn graph_fixture_strategy() -> impl Strategy<Value = GraphFixture> {
    (2_usize..14, any::<GraphDensity>()).prop_flat_map(|(nodes, density)| {
        let edge_budget = match density {
            GraphDensity::Sparse => nodes,
            GraphDensity::Dense => nodes * (nodes - 1) / 4 + 1,
            GraphDensity::Star => nodes - 1,
        };
        let endpoints = match density {
            GraphDensity::Star => (Just(0_usize).boxed(), (1..nodes).boxed()),
            GraphDensity::Sparse | GraphDensity::Dense => ((0..nodes).boxed(), (0..nodes).boxed()),
        };
        prop::collection::vec((endpoints.0, endpoints.1, 0_u8..10), 0..=edge_budget).prop_map(
            move |raw| {
                let edges = raw
                    .into_iter()
                    .filter(|(left, right, _)| left != right)
                    .map(|(left, right, stamp)| {
                        EdgeRecord::new(left, right).with_timestamp(f64::from(stamp))
                    })
                    .collect();
                GraphFixture {
                    data: GraphData::new(nodes, edges),
                }
            },
        )
    })
}

/// In-memory [`GraphSource`] that always fails, for pipeline error tests.
pub(crate) struct UnavailableSource;

#[derive(Debug, thiserror::Error)]
#[error("network unreachable")]
pub(crate) struct Unreachable;

impl GraphSource for UnavailableSource {
    type Error = Unreachable;

    fn name(&self) -> &str {
        "unavailable"
    }

    fn load(&self) -> Result<GraphData, Self::Error> {
        Err(Unreachable)
    }
}
