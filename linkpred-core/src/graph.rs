//! Undirected graph model built from provider data.
//!
//! [`GraphData`] is the raw shape a [`crate::GraphSource`] hands over: a node
//! count, an edge list that may repeat pairs in either orientation, optional
//! timestamps, and optional labels. [`Graph`] validates that data once and
//! exposes read-only adjacency with sorted neighbour lists and constant-time
//! edge lookup.

use std::collections::{HashMap, hash_map::Entry};

use crate::error::GraphError;

/// A single edge as supplied by a data source.
///
/// # Examples
/// ```
/// use linkpred_core::EdgeRecord;
///
/// let edge = EdgeRecord::new(0, 1).with_timestamp(2.5);
/// assert_eq!(edge.timestamp, Some(2.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord {
    /// First endpoint.
    pub source: usize,
    /// Second endpoint.
    pub target: usize,
    /// Time at which the link formed, when known.
    pub timestamp: Option<f64>,
}

impl EdgeRecord {
    /// Creates an untimestamped edge record.
    #[must_use]
    pub const fn new(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            timestamp: None,
        }
    }

    /// Attaches a timestamp to the record.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Raw graph payload produced by a [`crate::GraphSource`].
///
/// # Examples
/// ```
/// use linkpred_core::{EdgeRecord, GraphData};
///
/// let data = GraphData::new(3, vec![EdgeRecord::new(0, 1), EdgeRecord::new(1, 2)]);
/// assert_eq!(data.num_nodes, 3);
/// assert!(data.labels.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphData {
    /// Number of nodes; valid node indices are `0..num_nodes`.
    pub num_nodes: usize,
    /// Edge list, possibly containing duplicates in either orientation.
    pub edges: Vec<EdgeRecord>,
    /// Optional class label per node.
    pub labels: Option<Vec<usize>>,
}

impl GraphData {
    /// Creates a payload without labels.
    #[must_use]
    pub const fn new(num_nodes: usize, edges: Vec<EdgeRecord>) -> Self {
        Self {
            num_nodes,
            edges,
            labels: None,
        }
    }

    /// Builds a payload from plain `(u, v)` pairs.
    #[must_use]
    pub fn from_pairs(num_nodes: usize, pairs: &[(usize, usize)]) -> Self {
        let edges = pairs
            .iter()
            .map(|&(source, target)| EdgeRecord::new(source, target))
            .collect();
        Self::new(num_nodes, edges)
    }

    /// Attaches a label array.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<usize>) -> Self {
        self.labels = Some(labels);
        self
    }
}

/// Canonical key for an undirected edge: the smaller endpoint comes first.
pub(crate) type EdgeKey = (usize, usize);

pub(crate) const fn edge_key(left: usize, right: usize) -> EdgeKey {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}

/// Read-only undirected graph.
///
/// # Examples
/// ```
/// use linkpred_core::{Graph, GraphData};
///
/// let data = GraphData::from_pairs(4, &[(0, 1), (1, 2), (2, 1), (2, 3)]);
/// let graph = Graph::try_from_data(&data)?;
/// assert_eq!(graph.num_edges(), 3);
/// assert_eq!(graph.neighbours(2), Some(&[1, 3][..]));
/// assert!(graph.has_edge(3, 2));
/// # Ok::<(), linkpred_core::GraphError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Graph {
    neighbours: Vec<Vec<usize>>,
    stamps: Vec<Vec<Option<f64>>>,
    edges: HashMap<EdgeKey, Option<f64>>,
    timestamped_edges: usize,
    labels: Option<Vec<usize>>,
}

impl Graph {
    /// Validates `data` and builds the adjacency structure.
    ///
    /// Duplicate entries collapse into one edge. When duplicates carry
    /// different timestamps the earliest is kept; an untimestamped duplicate
    /// never clears a timestamp.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] for edges outside
    /// `[0, num_nodes)`, [`GraphError::SelfLoop`] for self-loops,
    /// [`GraphError::NonFiniteTimestamp`] for NaN or infinite timestamps, and
    /// [`GraphError::LabelCountMismatch`] when labels do not cover every node.
    pub fn try_from_data(data: &GraphData) -> Result<Self, GraphError> {
        let num_nodes = data.num_nodes;
        if let Some(labels) = &data.labels {
            if labels.len() != num_nodes {
                return Err(GraphError::LabelCountMismatch {
                    labels: labels.len(),
                    num_nodes,
                });
            }
        }

        let mut edges: HashMap<EdgeKey, Option<f64>> = HashMap::with_capacity(data.edges.len());
        for record in &data.edges {
            let EdgeRecord {
                source,
                target,
                timestamp,
            } = *record;
            if source >= num_nodes || target >= num_nodes {
                return Err(GraphError::NodeOutOfRange {
                    left: source,
                    right: target,
                    num_nodes,
                });
            }
            if source == target {
                return Err(GraphError::SelfLoop { node: source });
            }
            if timestamp.is_some_and(|value| !value.is_finite()) {
                return Err(GraphError::NonFiniteTimestamp {
                    left: source,
                    right: target,
                });
            }
            match edges.entry(edge_key(source, target)) {
                Entry::Vacant(slot) => {
                    slot.insert(timestamp);
                }
                Entry::Occupied(mut slot) => {
                    let merged = earliest(*slot.get(), timestamp);
                    slot.insert(merged);
                }
            }
        }

        let mut keys: Vec<EdgeKey> = edges.keys().copied().collect();
        keys.sort_unstable();

        let mut neighbours = vec![Vec::new(); num_nodes];
        let mut stamps = vec![Vec::new(); num_nodes];
        let mut timestamped_edges = 0_usize;
        for key @ (left, right) in keys {
            let stamp = edges.get(&key).copied().flatten();
            if stamp.is_some() {
                timestamped_edges += 1;
            }
            // Sorted keys hand every node its lower neighbours first, then its
            // higher ones, so each list ends up ascending.
            push_neighbour(&mut neighbours, &mut stamps, left, right, stamp);
            push_neighbour(&mut neighbours, &mut stamps, right, left, stamp);
        }

        Ok(Self {
            neighbours,
            stamps,
            edges,
            timestamped_edges,
            labels: data.labels.clone(),
        })
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns the number of distinct undirected edges.
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns whether `node` is a valid index.
    #[must_use]
    pub fn contains(&self, node: usize) -> bool {
        node < self.num_nodes()
    }

    /// Returns the neighbours of `node` in ascending order, or `None` when the
    /// node is absent.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> Option<&[usize]> {
        self.neighbours.get(node).map(Vec::as_slice)
    }

    /// Returns the neighbours of `node` paired with the timestamp of the
    /// connecting edge.
    pub(crate) fn neighbours_with_stamps(
        &self,
        node: usize,
    ) -> Option<impl Iterator<Item = (usize, Option<f64>)> + '_> {
        let list = self.neighbours.get(node)?;
        let stamps = self.stamps.get(node)?;
        Some(list.iter().copied().zip(stamps.iter().copied()))
    }

    /// Returns the degree of `node`, or `None` when the node is absent.
    #[must_use]
    pub fn degree(&self, node: usize) -> Option<usize> {
        self.neighbours.get(node).map(Vec::len)
    }

    /// Returns whether `{left, right}` is an edge.
    #[must_use]
    pub fn has_edge(&self, left: usize, right: usize) -> bool {
        self.edges.contains_key(&edge_key(left, right))
    }

    /// Returns the timestamp of edge `{left, right}`.
    ///
    /// The outer `Option` reports whether the edge exists, the inner one
    /// whether it carries a timestamp.
    #[must_use]
    pub fn edge_timestamp(&self, left: usize, right: usize) -> Option<Option<f64>> {
        self.edges.get(&edge_key(left, right)).copied()
    }

    /// Returns whether at least one edge carries a timestamp.
    #[must_use]
    pub fn has_timestamps(&self) -> bool {
        self.timestamped_edges > 0
    }

    /// Returns whether every edge carries a timestamp.
    #[must_use]
    pub fn is_fully_timestamped(&self) -> bool {
        self.timestamped_edges == self.edges.len()
    }

    /// Returns the per-node labels, when the source provided them.
    #[must_use]
    pub fn labels(&self) -> Option<&[usize]> {
        self.labels.as_deref()
    }

    /// Iterates over edges as `(left, right, timestamp)` with `left < right`,
    /// in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, Option<f64>)> + '_ {
        self.neighbours
            .iter()
            .zip(&self.stamps)
            .enumerate()
            .flat_map(|(left, (list, stamps))| {
                list.iter()
                    .zip(stamps)
                    .filter(move |(right, _)| **right > left)
                    .map(move |(right, stamp)| (left, *right, *stamp))
            })
    }
}

fn earliest(current: Option<f64>, incoming: Option<f64>) -> Option<f64> {
    match (current, incoming) {
        (Some(left), Some(right)) => Some(left.min(right)),
        (Some(value), None) | (None, Some(value)) => Some(value),
        (None, None) => None,
    }
}

fn push_neighbour(
    neighbours: &mut [Vec<usize>],
    stamps: &mut [Vec<Option<f64>>],
    node: usize,
    neighbour: usize,
    stamp: Option<f64>,
) {
    if let (Some(list), Some(stamp_list)) = (neighbours.get_mut(node), stamps.get_mut(node)) {
        list.push(neighbour);
        stamp_list.push(stamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn collapses_duplicates_in_both_orientations() {
        let data = GraphData::from_pairs(3, &[(0, 1), (1, 0), (0, 1), (1, 2)]);
        let graph = Graph::try_from_data(&data).expect("graph must build");
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.neighbours(1), Some(&[0, 2][..]));
        assert_eq!(graph.degree(0), Some(1));
    }

    #[test]
    fn neighbour_lists_are_sorted() {
        let data = GraphData::from_pairs(5, &[(4, 0), (2, 0), (0, 3), (1, 0)]);
        let graph = Graph::try_from_data(&data).expect("graph must build");
        assert_eq!(graph.neighbours(0), Some(&[1, 2, 3, 4][..]));
        assert_eq!(graph.neighbours(4), Some(&[0][..]));
    }

    #[test]
    fn duplicate_edges_keep_earliest_timestamp() {
        let data = GraphData::new(
            2,
            vec![
                EdgeRecord::new(0, 1).with_timestamp(5.0),
                EdgeRecord::new(1, 0).with_timestamp(3.0),
                EdgeRecord::new(0, 1),
            ],
        );
        let graph = Graph::try_from_data(&data).expect("graph must build");
        assert_eq!(graph.edge_timestamp(1, 0), Some(Some(3.0)));
        assert!(graph.is_fully_timestamped());
    }

    #[rstest]
    #[case::left_out_of_range(EdgeRecord::new(3, 0), GraphError::NodeOutOfRange { left: 3, right: 0, num_nodes: 3 })]
    #[case::right_out_of_range(EdgeRecord::new(0, 7), GraphError::NodeOutOfRange { left: 0, right: 7, num_nodes: 3 })]
    #[case::self_loop(EdgeRecord::new(1, 1), GraphError::SelfLoop { node: 1 })]
    #[case::nan_timestamp(
        EdgeRecord::new(0, 1).with_timestamp(f64::NAN),
        GraphError::NonFiniteTimestamp { left: 0, right: 1 },
    )]
    fn rejects_malformed_edges(#[case] edge: EdgeRecord, #[case] expected: GraphError) {
        let data = GraphData::new(3, vec![edge]);
        let err = Graph::try_from_data(&data).expect_err("malformed edge must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn rejects_label_count_mismatch() {
        let data = GraphData::from_pairs(3, &[(0, 1)]).with_labels(vec![0, 1]);
        let err = Graph::try_from_data(&data).expect_err("label mismatch must fail");
        assert_eq!(
            err,
            GraphError::LabelCountMismatch {
                labels: 2,
                num_nodes: 3
            }
        );
    }

    #[test]
    fn edges_iterate_in_canonical_order() {
        let data = GraphData::from_pairs(4, &[(3, 2), (1, 0), (2, 0)]);
        let graph = Graph::try_from_data(&data).expect("graph must build");
        let edges: Vec<_> = graph.edges().map(|(l, r, _)| (l, r)).collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (2, 3)]);
    }

    #[test]
    fn isolated_nodes_are_retained() {
        let data = GraphData::from_pairs(4, &[(0, 1)]);
        let graph = Graph::try_from_data(&data).expect("graph must build");
        assert_eq!(graph.num_nodes(), 4);
        assert_eq!(graph.neighbours(3), Some(&[][..]));
        assert_eq!(graph.neighbours(4), None);
        assert!(!graph.has_timestamps());
    }
}
