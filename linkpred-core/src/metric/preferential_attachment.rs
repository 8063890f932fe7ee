//! Preferential attachment: the product of both endpoint degrees.

use crate::error::MetricError;

use super::{LinkMetric, NeighbourView};

/// Preferential attachment score, `|N(i)| · |N(j)|`.
///
/// # Examples
/// ```
/// use linkpred_core::{
///     Graph, GraphData, LinkMetric, NeighbourMode, NeighbourView, PreferentialAttachment,
/// };
///
/// let data = GraphData::from_pairs(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]);
/// let graph = Graph::try_from_data(&data)?;
/// let metric = PreferentialAttachment::new(NeighbourView::new(&graph, NeighbourMode::Static));
/// assert_eq!(metric.score(0, 3, None)?, 2.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PreferentialAttachment<'g> {
    view: NeighbourView<'g>,
}

impl<'g> PreferentialAttachment<'g> {
    /// Stable metric name.
    pub const NAME: &'static str = "preferential_attachment";

    /// Creates the metric over `view`.
    #[must_use]
    pub const fn new(view: NeighbourView<'g>) -> Self {
        Self { view }
    }
}

impl LinkMetric for PreferentialAttachment<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[expect(clippy::float_arithmetic, reason = "degree product")]
    fn score(&self, left: usize, right: usize, cutoff: Option<f64>) -> Result<f64, MetricError> {
        let left_degree = self.view.temporal_degree(left, cutoff)?;
        let right_degree = self.view.temporal_degree(right, cutoff)?;
        Ok(left_degree as f64 * right_degree as f64)
    }
}
