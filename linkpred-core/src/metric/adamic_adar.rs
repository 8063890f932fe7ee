//! Adamic-Adar index: shared neighbours weighted by inverse log degree.

use crate::error::MetricError;

use super::{LinkMetric, NeighbourView, common_sorted};

/// Adamic-Adar index, `Σ 1 / ln deg(z)` over shared neighbours `z`.
///
/// Degrees are taken at the same cutoff as the neighbourhoods. Shared
/// neighbours are visited in ascending node order whichever endpoint comes
/// first, so the floating-point sum is identical for `(i, j)` and `(j, i)`.
///
/// # Examples
/// ```
/// use linkpred_core::{AdamicAdar, Graph, GraphData, LinkMetric, NeighbourMode, NeighbourView};
///
/// let data = GraphData::from_pairs(3, &[(0, 1), (1, 2)]);
/// let graph = Graph::try_from_data(&data)?;
/// let metric = AdamicAdar::new(NeighbourView::new(&graph, NeighbourMode::Static));
/// let score = metric.score(0, 2, None)?;
/// assert!((score - 1.0 / 2.0_f64.ln()).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdamicAdar<'g> {
    view: NeighbourView<'g>,
}

impl<'g> AdamicAdar<'g> {
    /// Stable metric name.
    pub const NAME: &'static str = "adamic_adar";

    /// Creates the metric over `view`.
    #[must_use]
    pub const fn new(view: NeighbourView<'g>) -> Self {
        Self { view }
    }
}

impl LinkMetric for AdamicAdar<'_> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    #[expect(clippy::float_arithmetic, reason = "inverse log-degree weights")]
    fn score(&self, left: usize, right: usize, cutoff: Option<f64>) -> Result<f64, MetricError> {
        let left_neighbours = self.view.temporal_neighbours(left, cutoff)?;
        let right_neighbours = self.view.temporal_neighbours(right, cutoff)?;
        let mut total = 0.0_f64;
        for shared in common_sorted(&left_neighbours, &right_neighbours) {
            let degree = self.view.temporal_degree(shared, cutoff)?;
            // ln(1) is zero; only reachable when both endpoints are the same node.
            if degree > 1 {
                total += 1.0 / (degree as f64).ln();
            }
        }
        Ok(total)
    }
}
