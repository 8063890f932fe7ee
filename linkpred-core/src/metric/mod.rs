//! Neighbour-based similarity metrics.
//!
//! Every metric is built on a [`NeighbourView`], which binds a [`Graph`] to a
//! [`NeighbourMode`] and answers neighbourhood queries, optionally restricted
//! to edges formed on or before a temporal cutoff. Metrics implement
//! [`LinkMetric`] and are selected at configuration time through
//! [`MetricKind`].

mod adamic_adar;
mod batch;
mod common_neighbours;
mod jaccard;
mod preferential_attachment;

use std::{borrow::Cow, fmt, iter::FusedIterator};

use crate::{candidates::CandidatePair, error::MetricError, graph::Graph};

pub use adamic_adar::AdamicAdar;
#[cfg(feature = "parallel")]
pub use batch::score_pairs_parallel;
pub use batch::{Cutoffs, score_pairs};
pub use common_neighbours::CommonNeighbours;
pub use jaccard::Jaccard;
pub use preferential_attachment::PreferentialAttachment;

/// Whether neighbourhood queries honour edge timestamps.
///
/// # Examples
/// ```
/// use linkpred_core::NeighbourMode;
///
/// assert_eq!(NeighbourMode::from_temporal(true), NeighbourMode::Temporal);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighbourMode {
    /// Ignore timestamps; every edge counts.
    #[default]
    Static,
    /// Restrict neighbourhoods to edges formed on or before the cutoff.
    Temporal,
}

impl NeighbourMode {
    /// Maps a `use_temporal` flag to a mode.
    #[must_use]
    pub const fn from_temporal(enabled: bool) -> Self {
        if enabled { Self::Temporal } else { Self::Static }
    }
}

/// Neighbourhood queries over a read-only [`Graph`].
///
/// # Examples
/// ```
/// use linkpred_core::{EdgeRecord, Graph, GraphData, NeighbourMode, NeighbourView};
///
/// let data = GraphData::new(
///     3,
///     vec![
///         EdgeRecord::new(0, 1).with_timestamp(1.0),
///         EdgeRecord::new(0, 2).with_timestamp(4.0),
///     ],
/// );
/// let graph = Graph::try_from_data(&data)?;
/// let view = NeighbourView::new(&graph, NeighbourMode::Temporal);
/// assert_eq!(view.neighbours(0)?, &[1, 2]);
/// assert_eq!(&*view.temporal_neighbours(0, Some(2.0))?, &[1]);
/// assert_eq!(&*view.temporal_neighbours(0, None)?, &[1, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NeighbourView<'g> {
    graph: &'g Graph,
    mode: NeighbourMode,
}

impl<'g> NeighbourView<'g> {
    /// Binds `graph` to `mode`.
    #[must_use]
    pub const fn new(graph: &'g Graph, mode: NeighbourMode) -> Self {
        Self { graph, mode }
    }

    /// Returns the underlying graph.
    #[must_use]
    pub const fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Returns the configured mode.
    #[must_use]
    pub const fn mode(&self) -> NeighbourMode {
        self.mode
    }

    /// Returns every node adjacent to `node`, in ascending order.
    ///
    /// # Errors
    /// Returns [`MetricError::UnknownNode`] when `node` is not in the graph.
    pub fn neighbours(&self, node: usize) -> Result<&'g [usize], MetricError> {
        self.graph
            .neighbours(node)
            .ok_or(MetricError::UnknownNode {
                node,
                num_nodes: self.graph.num_nodes(),
            })
    }

    /// Returns the neighbours of `node` whose connecting edge formed on or
    /// before `cutoff`, in ascending order.
    ///
    /// In [`NeighbourMode::Static`], or when `cutoff` is `None`, this is
    /// identical to [`Self::neighbours`] and borrows from the graph.
    ///
    /// # Errors
    /// Returns [`MetricError::UnknownNode`] when `node` is not in the graph
    /// and [`MetricError::MissingTimestamp`] when filtering reaches an edge
    /// without a timestamp.
    pub fn temporal_neighbours(
        &self,
        node: usize,
        cutoff: Option<f64>,
    ) -> Result<Cow<'g, [usize]>, MetricError> {
        let (NeighbourMode::Temporal, Some(cutoff)) = (self.mode, cutoff) else {
            return self.neighbours(node).map(Cow::Borrowed);
        };
        let entries = self
            .graph
            .neighbours_with_stamps(node)
            .ok_or(MetricError::UnknownNode {
                node,
                num_nodes: self.graph.num_nodes(),
            })?;
        let mut filtered = Vec::new();
        for (neighbour, stamp) in entries {
            let stamp = stamp.ok_or(MetricError::MissingTimestamp { node, neighbour })?;
            if stamp <= cutoff {
                filtered.push(neighbour);
            }
        }
        Ok(Cow::Owned(filtered))
    }

    /// Returns the size of [`Self::temporal_neighbours`].
    ///
    /// # Errors
    /// Propagates the errors of [`Self::temporal_neighbours`].
    pub fn temporal_degree(&self, node: usize, cutoff: Option<f64>) -> Result<usize, MetricError> {
        self.temporal_neighbours(node, cutoff).map(|list| list.len())
    }
}

/// Capability shared by every link-prediction similarity metric.
///
/// Implementations must be symmetric: `score(i, j, t) == score(j, i, t)`.
///
/// # Examples
/// ```
/// use linkpred_core::{
///     CandidatePair, CommonNeighbours, Graph, GraphData, LinkMetric, NeighbourMode,
///     NeighbourView,
/// };
///
/// let graph = Graph::try_from_data(&GraphData::from_pairs(3, &[(0, 1), (1, 2)]))?;
/// let metric = CommonNeighbours::new(NeighbourView::new(&graph, NeighbourMode::Static));
/// assert_eq!(metric.score(0, 2, None)?, 1.0);
///
/// let scores = metric.score_batch(&[CandidatePair::new(0, 2)], None)?;
/// assert_eq!(scores, [1.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait LinkMetric {
    /// Returns the metric's stable name.
    fn name(&self) -> &'static str;

    /// Scores the pair `(left, right)`, restricting neighbourhoods to
    /// `cutoff` when the underlying view is temporal.
    ///
    /// # Errors
    /// Returns [`MetricError`] when a node is unknown or temporal filtering
    /// meets an untimestamped edge.
    fn score(&self, left: usize, right: usize, cutoff: Option<f64>) -> Result<f64, MetricError>;

    /// Scores every pair independently, in input order.
    ///
    /// `timestamps`, when supplied, holds one cutoff per pair.
    ///
    /// # Errors
    /// Returns [`MetricError::MismatchedLength`] when `timestamps` and `pairs`
    /// differ in length, and the first failure of [`Self::score`] otherwise.
    /// No partial results are returned.
    fn score_batch(
        &self,
        pairs: &[CandidatePair],
        timestamps: Option<&[f64]>,
    ) -> Result<Vec<f64>, MetricError> {
        score_pairs(self, pairs, Cutoffs::per_pair(timestamps))
    }
}

/// Selects which [`LinkMetric`] a pipeline uses.
///
/// # Examples
/// ```
/// use linkpred_core::MetricKind;
///
/// assert_eq!(MetricKind::default(), MetricKind::CommonNeighbours);
/// assert_eq!(MetricKind::AdamicAdar.as_str(), "adamic_adar");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum MetricKind {
    /// Count of shared neighbours.
    #[default]
    CommonNeighbours,
    /// Shared neighbours over the union of both neighbourhoods.
    Jaccard,
    /// Shared neighbours weighted by inverse log degree.
    AdamicAdar,
    /// Product of both degrees.
    PreferentialAttachment,
}

impl MetricKind {
    /// Every supported metric, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::CommonNeighbours,
        Self::Jaccard,
        Self::AdamicAdar,
        Self::PreferentialAttachment,
    ];

    /// Returns the stable name used in logs and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CommonNeighbours => CommonNeighbours::NAME,
            Self::Jaccard => Jaccard::NAME,
            Self::AdamicAdar => AdamicAdar::NAME,
            Self::PreferentialAttachment => PreferentialAttachment::NAME,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl MetricKind {
    /// Binds the selected metric to `view`.
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::{Graph, GraphData, LinkMetric, MetricKind, NeighbourMode, NeighbourView};
    ///
    /// let graph = Graph::try_from_data(&GraphData::from_pairs(3, &[(0, 1), (1, 2)]))?;
    /// let metric = MetricKind::Jaccard.bind(NeighbourView::new(&graph, NeighbourMode::Static));
    /// assert_eq!(metric.name(), "jaccard");
    /// assert_eq!(metric.score(0, 2, None)?, 1.0);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub const fn bind(self, view: NeighbourView<'_>) -> AnyMetric<'_> {
        match self {
            Self::CommonNeighbours => AnyMetric::CommonNeighbours(CommonNeighbours::new(view)),
            Self::Jaccard => AnyMetric::Jaccard(Jaccard::new(view)),
            Self::AdamicAdar => AnyMetric::AdamicAdar(AdamicAdar::new(view)),
            Self::PreferentialAttachment => {
                AnyMetric::PreferentialAttachment(PreferentialAttachment::new(view))
            }
        }
    }
}

/// Any built-in metric, chosen at runtime from a [`MetricKind`].
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub enum AnyMetric<'g> {
    /// See [`CommonNeighbours`].
    CommonNeighbours(CommonNeighbours<'g>),
    /// See [`Jaccard`].
    Jaccard(Jaccard<'g>),
    /// See [`AdamicAdar`].
    AdamicAdar(AdamicAdar<'g>),
    /// See [`PreferentialAttachment`].
    PreferentialAttachment(PreferentialAttachment<'g>),
}

impl LinkMetric for AnyMetric<'_> {
    fn name(&self) -> &'static str {
        match self {
            Self::CommonNeighbours(metric) => metric.name(),
            Self::Jaccard(metric) => metric.name(),
            Self::AdamicAdar(metric) => metric.name(),
            Self::PreferentialAttachment(metric) => metric.name(),
        }
    }

    fn score(&self, left: usize, right: usize, cutoff: Option<f64>) -> Result<f64, MetricError> {
        match self {
            Self::CommonNeighbours(metric) => metric.score(left, right, cutoff),
            Self::Jaccard(metric) => metric.score(left, right, cutoff),
            Self::AdamicAdar(metric) => metric.score(left, right, cutoff),
            Self::PreferentialAttachment(metric) => metric.score(left, right, cutoff),
        }
    }
}

/// Iterates over the values present in both ascending slices, in ascending
/// order.
pub(crate) fn common_sorted<'a>(left: &'a [usize], right: &'a [usize]) -> CommonSorted<'a> {
    CommonSorted {
        left: left.iter().peekable(),
        right: right.iter().peekable(),
    }
}

pub(crate) struct CommonSorted<'a> {
    left: std::iter::Peekable<std::slice::Iter<'a, usize>>,
    right: std::iter::Peekable<std::slice::Iter<'a, usize>>,
}

impl Iterator for CommonSorted<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            let (&&l, &&r) = (self.left.peek()?, self.right.peek()?);
            match l.cmp(&r) {
                std::cmp::Ordering::Less => {
                    self.left.next();
                }
                std::cmp::Ordering::Greater => {
                    self.right.next();
                }
                std::cmp::Ordering::Equal => {
                    self.left.next();
                    self.right.next();
                    return Some(l);
                }
            }
        }
    }
}

impl FusedIterator for CommonSorted<'_> {}
