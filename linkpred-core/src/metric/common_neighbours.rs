//! Common Neighbours: the number of nodes adjacent to both members of a pair.

use crate::error::MetricError;

use super::{LinkMetric, NeighbourView, common_sorted};

/// Common Neighbours metric with optional temporal filtering.
///
/// Both endpoints are filtered against the same cutoff before intersecting,
/// so the score is symmetric and bounded by the smaller degree.
///
/// # Examples
/// ```
/// use linkpred_core::{CommonNeighbours, Graph, GraphData, LinkMetric, NeighbourMode, NeighbourView};
///
/// let data = GraphData::from_pairs(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
/// let graph = Graph::try_from_data(&data)?;
/// let metric = CommonNeighbours::new(NeighbourView::new(&graph, NeighbourMode::Static));
/// assert_eq!(metric.score(0, 3, None)?, 1.0);
/// assert_eq!(metric.score(1, 3, None)?, 1.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CommonNeighbours<'g> {
    view: NeighbourView<'g>,
}

impl<'g> CommonNeighbours<'g> {
    /// Stable metric name.
    pub const NAME: &'static str = "common_neighbours";

    /// Creates the metric over `view`.
    #[must_use]
    pub const fn new(view: NeighbourView<'g>) -> Self {
        Self { view }
    }

    /// Returns the neighbour view backing the metric.
    #[must_use]
    pub const fn view(&self) -> NeighbourView<'g> {
        self.view
    }
}

impl LinkMetric for CommonNeighbours<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn score(&self, left: usize, right: usize, cutoff: Option<f64>) -> Result<f64, MetricError> {
        let left_neighbours = self.view.temporal_neighbours(left, cutoff)?;
        let right_neighbours = self.view.temporal_neighbours(right, cutoff)?;
        let shared = common_sorted(&left_neighbours, &right_neighbours).count();
        Ok(shared as f64)
    }
}
