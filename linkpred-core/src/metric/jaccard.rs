//! Jaccard coefficient over neighbourhoods.

use crate::error::MetricError;

use super::{LinkMetric, NeighbourView, common_sorted};

/// Shared neighbours divided by the size of the neighbourhood union.
///
/// Pairs whose neighbourhoods are both empty score `0`.
///
/// # Examples
/// ```
/// use linkpred_core::{Graph, GraphData, Jaccard, LinkMetric, NeighbourMode, NeighbourView};
///
/// let data = GraphData::from_pairs(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
/// let graph = Graph::try_from_data(&data)?;
/// let metric = Jaccard::new(NeighbourView::new(&graph, NeighbourMode::Static));
/// assert_eq!(metric.score(0, 3, None)?, 0.5);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Jaccard<'g> {
    view: NeighbourView<'g>,
}

impl<'g> Jaccard<'g> {
    /// Stable metric name.
    pub const NAME: &'static str = "jaccard";

    /// Creates the metric over `view`.
    #[must_use]
    pub const fn new(view: NeighbourView<'g>) -> Self {
        Self { view }
    }
}

impl LinkMetric for Jaccard<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[expect(clippy::float_arithmetic, reason = "ratio of set sizes")]
    fn score(&self, left: usize, right: usize, cutoff: Option<f64>) -> Result<f64, MetricError> {
        let left_neighbours = self.view.temporal_neighbours(left, cutoff)?;
        let right_neighbours = self.view.temporal_neighbours(right, cutoff)?;
        let shared = common_sorted(&left_neighbours, &right_neighbours).count();
        let union = left_neighbours.len() + right_neighbours.len() - shared;
        if union == 0 {
            return Ok(0.0);
        }
        Ok(shared as f64 / union as f64)
    }
}
