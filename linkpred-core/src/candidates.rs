//! Candidate generation: every unordered node pair that is not already linked.
//!
//! Pairs are produced in lexicographic `(left, right)` order. The ranking
//! pipeline's stable tie-break depends on this order, so it must not change.
//! Enumeration is quadratic in the node count.

use crate::{error::MetricError, graph::Graph};

/// Unordered node pair with `left <= right`.
///
/// # Examples
/// ```
/// use linkpred_core::CandidatePair;
///
/// let pair = CandidatePair::new(5, 2);
/// assert_eq!((pair.left, pair.right), (2, 5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidatePair {
    /// Smaller endpoint.
    pub left: usize,
    /// Larger endpoint.
    pub right: usize,
}

impl CandidatePair {
    /// Creates a pair, ordering the endpoints.
    #[must_use]
    pub const fn new(first: usize, second: usize) -> Self {
        if first <= second {
            Self {
                left: first,
                right: second,
            }
        } else {
            Self {
                left: second,
                right: first,
            }
        }
    }
}

impl From<(usize, usize)> for CandidatePair {
    fn from((first, second): (usize, usize)) -> Self {
        Self::new(first, second)
    }
}

/// Number of candidates [`candidate_pairs`] yields for `graph`:
/// `N·(N-1)/2 - |E|`.
///
/// # Examples
/// ```
/// use linkpred_core::{Graph, GraphData, expected_candidate_count};
///
/// let graph = Graph::try_from_data(&GraphData::from_pairs(4, &[(0, 1), (2, 3)]))?;
/// assert_eq!(expected_candidate_count(&graph), 4);
/// # Ok::<(), linkpred_core::GraphError>(())
/// ```
#[must_use]
pub fn expected_candidate_count(graph: &Graph) -> usize {
    let nodes = graph.num_nodes();
    let all_pairs = if nodes % 2 == 0 {
        (nodes / 2).saturating_mul(nodes.saturating_sub(1))
    } else {
        nodes.saturating_mul(nodes.saturating_sub(1) / 2)
    };
    all_pairs.saturating_sub(graph.num_edges())
}

/// Enumerates every non-adjacent pair `(i, j)` with `i < j`, in
/// lexicographic order.
///
/// # Examples
/// ```
/// use linkpred_core::{CandidatePair, Graph, GraphData, candidate_pairs};
///
/// let data = GraphData::from_pairs(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
/// let graph = Graph::try_from_data(&data)?;
/// assert_eq!(
///     candidate_pairs(&graph),
///     [CandidatePair::new(0, 3), CandidatePair::new(1, 3)],
/// );
/// # Ok::<(), linkpred_core::GraphError>(())
/// ```
#[must_use]
pub fn candidate_pairs(graph: &Graph) -> Vec<CandidatePair> {
    let nodes = graph.num_nodes();
    let mut pairs = Vec::with_capacity(expected_candidate_count(graph));
    for left in 0..nodes {
        let linked = graph
            .neighbours(left)
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|&neighbour| neighbour > left);
        push_unlinked(&mut pairs, left, nodes, linked);
    }
    pairs
}

/// Enumerates pairs that were not linked on or before `cutoff`.
///
/// Edges whose timestamp is later than `cutoff` do not exclude their pair,
/// so links that form after the cutoff remain candidates. Order matches
/// [`candidate_pairs`].
///
/// # Errors
/// Returns [`MetricError::MissingTimestamp`] when an edge has no timestamp.
///
/// # Examples
/// ```
/// use linkpred_core::{CandidatePair, EdgeRecord, Graph, GraphData, candidate_pairs_at};
///
/// let data = GraphData::new(
///     3,
///     vec![
///         EdgeRecord::new(0, 1).with_timestamp(1.0),
///         EdgeRecord::new(1, 2).with_timestamp(5.0),
///     ],
/// );
/// let graph = Graph::try_from_data(&data)?;
/// assert_eq!(
///     candidate_pairs_at(&graph, 2.0)?,
///     [CandidatePair::new(0, 2), CandidatePair::new(1, 2)],
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn candidate_pairs_at(graph: &Graph, cutoff: f64) -> Result<Vec<CandidatePair>, MetricError> {
    let nodes = graph.num_nodes();
    let mut pairs = Vec::with_capacity(expected_candidate_count(graph));
    for left in 0..nodes {
        let mut linked = Vec::new();
        for (neighbour, stamp) in graph.neighbours_with_stamps(left).into_iter().flatten() {
            if neighbour <= left {
                continue;
            }
            let stamp = stamp.ok_or(MetricError::MissingTimestamp {
                node: left,
                neighbour,
            })?;
            if stamp <= cutoff {
                linked.push(neighbour);
            }
        }
        push_unlinked(&mut pairs, left, nodes, linked.into_iter());
    }
    Ok(pairs)
}

/// Appends `(left, j)` for every `j` in `left + 1..nodes` not yielded by
/// `linked`, which must be ascending.
fn push_unlinked(
    pairs: &mut Vec<CandidatePair>,
    left: usize,
    nodes: usize,
    linked: impl Iterator<Item = usize>,
) {
    let mut linked = linked.peekable();
    for right in left.saturating_add(1)..nodes {
        if linked.next_if_eq(&right).is_some() {
            continue;
        }
        pairs.push(CandidatePair { left, right });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EdgeRecord, GraphData};
    use rstest::rstest;

    fn graph(nodes: usize, pairs: &[(usize, usize)]) -> Graph {
        Graph::try_from_data(&GraphData::from_pairs(nodes, pairs)).expect("graph must build")
    }

    #[test]
    fn empty_graph_yields_every_pair() {
        let pairs = candidate_pairs(&graph(3, &[]));
        assert_eq!(
            pairs,
            vec![
                CandidatePair::new(0, 1),
                CandidatePair::new(0, 2),
                CandidatePair::new(1, 2)
            ]
        );
    }

    #[rstest]
    #[case::empty(0, &[], 0)]
    #[case::single(1, &[], 0)]
    #[case::complete(3, &[(0, 1), (1, 2), (0, 2)], 0)]
    #[case::odd(5, &[(0, 4)], 9)]
    #[case::even(4, &[(0, 1), (1, 2), (0, 2), (2, 3)], 2)]
    fn count_matches_formula(
        #[case] nodes: usize,
        #[case] edges: &[(usize, usize)],
        #[case] expected: usize,
    ) {
        let graph = graph(nodes, edges);
        assert_eq!(expected_candidate_count(&graph), expected);
        assert_eq!(candidate_pairs(&graph).len(), expected);
    }

    #[test]
    fn excludes_edges_and_self_pairs() {
        let graph = graph(6, &[(0, 5), (1, 3), (3, 4), (2, 0)]);
        for pair in candidate_pairs(&graph) {
            assert!(pair.left < pair.right);
            assert!(!graph.has_edge(pair.left, pair.right));
        }
    }

    #[test]
    fn snapshot_requires_timestamps() {
        let data = GraphData::new(
            3,
            vec![
                EdgeRecord::new(0, 1).with_timestamp(1.0),
                EdgeRecord::new(1, 2),
            ],
        );
        let graph = Graph::try_from_data(&data).expect("graph must build");
        let err = candidate_pairs_at(&graph, 10.0).expect_err("untimestamped edge must fail");
        assert_eq!(
            err,
            MetricError::MissingTimestamp {
                node: 1,
                neighbour: 2
            }
        );
    }

    #[test]
    fn snapshot_after_every_edge_matches_static_enumeration() {
        let data = GraphData::new(
            4,
            vec![
                EdgeRecord::new(0, 1).with_timestamp(1.0),
                EdgeRecord::new(2, 3).with_timestamp(2.0),
                EdgeRecord::new(1, 3).with_timestamp(3.0),
            ],
        );
        let graph = Graph::try_from_data(&data).expect("graph must build");
        let snapshot = candidate_pairs_at(&graph, 3.0).expect("timestamps present");
        assert_eq!(snapshot, candidate_pairs(&graph));
    }
}
