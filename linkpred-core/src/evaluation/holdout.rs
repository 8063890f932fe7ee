//! Hold-out protocols that turn one graph into labelled candidates.

use std::{collections::HashSet, sync::Arc};

use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};

use crate::{
    Result,
    candidates::{CandidatePair, candidate_pairs, candidate_pairs_at},
    error::LinkPredError,
    graph::{EdgeRecord, Graph, GraphData},
    metric::MetricKind,
    split::{check_ratio, floor_share},
};

use super::PrecisionRecallCurve;

/// How positives are withheld before scoring.
///
/// # Examples
/// ```
/// use linkpred_core::Holdout;
///
/// let holdout = Holdout::Random { test_ratio: 0.1, seed: 7 };
/// assert_eq!(holdout.name(), "random");
/// assert_eq!(Holdout::Temporal { cutoff: 2000.0 }.name(), "temporal");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Holdout {
    /// Remove `floor(|E| · test_ratio)` shuffled edges from the training graph.
    Random {
        /// Fraction of edges to withhold.
        test_ratio: f64,
        /// Seed for the edge shuffle.
        seed: u64,
    },
    /// Predict the links that form after `cutoff` from those formed before.
    Temporal {
        /// Last timestamp visible to the metric.
        cutoff: f64,
    },
}

impl Holdout {
    /// Returns the protocol name used in logs and reports.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Random { .. } => "random",
            Self::Temporal { .. } => "temporal",
        }
    }

    /// Builds the training graph and labelled candidates for `graph`.
    ///
    /// # Errors
    /// Returns [`LinkPredError::InvalidSplitRatio`] for a bad `test_ratio`,
    /// [`LinkPredError::InvalidCutoff`] for a non-finite cutoff, and
    /// [`LinkPredError::Metric`] when the temporal protocol meets an edge
    /// without a timestamp.
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::{EdgeRecord, Graph, GraphData, Holdout};
    ///
    /// let data = GraphData::new(
    ///     3,
    ///     vec![
    ///         EdgeRecord::new(0, 1).with_timestamp(1.0),
    ///         EdgeRecord::new(1, 2).with_timestamp(2.0),
    ///         EdgeRecord::new(0, 2).with_timestamp(3.0),
    ///     ],
    /// );
    /// let graph = Graph::try_from_data(&data)?;
    /// let split = Holdout::Temporal { cutoff: 2.0 }.prepare("demo", &graph)?;
    /// assert_eq!(split.positive_count(), 1);
    /// assert_eq!(split.labels(), [true]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn prepare(&self, data_source: &str, graph: &Graph) -> Result<HoldoutSplit> {
        match *self {
            Self::Random { test_ratio, seed } => random_split(data_source, graph, test_ratio, seed),
            Self::Temporal { cutoff } => temporal_split(graph, cutoff),
        }
    }
}

fn random_split(
    data_source: &str,
    graph: &Graph,
    test_ratio: f64,
    seed: u64,
) -> Result<HoldoutSplit> {
    check_ratio("test_ratio", test_ratio)?;
    let mut edges: Vec<(usize, usize, Option<f64>)> = graph.edges().collect();
    edges.shuffle(&mut SmallRng::seed_from_u64(seed));
    let (held, kept) = edges.split_at(floor_share(edges.len(), test_ratio));

    let positives: HashSet<CandidatePair> = held
        .iter()
        .map(|&(left, right, _)| CandidatePair::new(left, right))
        .collect();
    let kept = kept
        .iter()
        .map(|&(source, target, timestamp)| EdgeRecord {
            source,
            target,
            timestamp,
        })
        .collect();
    let mut data = GraphData::new(graph.num_nodes(), kept);
    data.labels = graph.labels().map(<[usize]>::to_vec);
    let train = Graph::try_from_data(&data).map_err(|error| LinkPredError::InvalidGraph {
        data_source: Arc::from(data_source),
        error,
    })?;

    let candidates = candidate_pairs(&train);
    let labels = candidates
        .iter()
        .map(|pair| positives.contains(pair))
        .collect();
    Ok(HoldoutSplit {
        train,
        candidates,
        labels,
        positives: positives.len(),
        cutoff: None,
    })
}

fn temporal_split(graph: &Graph, cutoff: f64) -> Result<HoldoutSplit> {
    if !cutoff.is_finite() {
        return Err(LinkPredError::InvalidCutoff { cutoff });
    }
    let candidates =
        candidate_pairs_at(graph, cutoff).map_err(|error| LinkPredError::Metric {
            metric: "candidate_snapshot",
            error,
        })?;
    let labels: Vec<bool> = candidates
        .iter()
        .map(|pair| graph.has_edge(pair.left, pair.right))
        .collect();
    let positives = labels.iter().filter(|&&label| label).count();
    Ok(HoldoutSplit {
        train: graph.clone(),
        candidates,
        labels,
        positives,
        cutoff: Some(cutoff),
    })
}

/// Training graph plus labelled candidates produced by a [`Holdout`].
#[derive(Debug, Clone)]
pub struct HoldoutSplit {
    train: Graph,
    candidates: Vec<CandidatePair>,
    labels: Vec<bool>,
    positives: usize,
    cutoff: Option<f64>,
}

impl HoldoutSplit {
    /// Graph the metric scores against.
    #[must_use]
    pub const fn train(&self) -> &Graph {
        &self.train
    }

    /// Candidate pairs in enumeration order.
    #[must_use]
    pub fn candidates(&self) -> &[CandidatePair] {
        &self.candidates
    }

    /// Whether each candidate is a withheld link, aligned with
    /// [`Self::candidates`].
    #[must_use]
    pub fn labels(&self) -> &[bool] {
        &self.labels
    }

    /// Number of withheld links.
    #[must_use]
    pub const fn positive_count(&self) -> usize {
        self.positives
    }

    /// Cutoff the protocol imposes on scoring, if any.
    #[must_use]
    pub const fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }
}

/// Outcome of [`crate::LinkPredictor::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    /// Metric that produced the scores.
    pub metric: MetricKind,
    /// Protocol name, see [`Holdout::name`].
    pub holdout: &'static str,
    /// Area under the ROC curve.
    pub auc: f64,
    /// Precision-recall curve over every candidate.
    pub curve: PrecisionRecallCurve,
    /// Configured `top_k`.
    pub top_k: usize,
    /// Precision among the `top_k` best-ranked candidates.
    pub precision_at_k: f64,
    /// Number of scored candidates.
    pub candidate_count: usize,
    /// Number of withheld links among the candidates.
    pub positive_count: usize,
    /// Edges visible in the training graph.
    pub train_edges: usize,
}

impl EvaluationReport {
    /// Step-wise area under [`Self::curve`].
    #[must_use]
    pub fn average_precision(&self) -> f64 {
        self.curve.average_precision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{graph_from_pairs, triangle_with_tail};

    #[test]
    fn random_holdout_removes_floor_share_of_edges() {
        let graph = graph_from_pairs(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (0, 5), (1, 4)]);
        let split = Holdout::Random {
            test_ratio: 0.3,
            seed: 11,
        }
        .prepare("ring", &graph)
        .expect("valid ratio");
        assert_eq!(split.positive_count(), 2);
        assert_eq!(split.train().num_edges(), 5);
        assert_eq!(split.labels().iter().filter(|&&label| label).count(), 2);
        for (pair, &label) in split.candidates().iter().zip(split.labels()) {
            assert_eq!(label, graph.has_edge(pair.left, pair.right));
        }
    }

    #[test]
    fn random_holdout_is_reproducible() {
        let graph = graph_from_pairs(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (0, 4)]);
        let holdout = Holdout::Random {
            test_ratio: 0.4,
            seed: 3,
        };
        let first = holdout.prepare("cycle", &graph).expect("valid ratio");
        let second = holdout.prepare("cycle", &graph).expect("valid ratio");
        assert_eq!(first.labels(), second.labels());
        assert_eq!(first.candidates(), second.candidates());
    }

    #[test]
    fn random_holdout_keeps_labels() {
        let data = triangle_with_tail().with_labels(vec![0, 1, 1, 2]);
        let graph = Graph::try_from_data(&data).expect("fixture must build");
        let split = Holdout::Random {
            test_ratio: 0.5,
            seed: 1,
        }
        .prepare("tail", &graph)
        .expect("valid ratio");
        assert_eq!(split.train().labels(), Some(&[0, 1, 1, 2][..]));
    }

    #[test]
    fn temporal_holdout_labels_later_links() {
        let data = GraphData::new(
            4,
            vec![
                EdgeRecord::new(0, 1).with_timestamp(1.0),
                EdgeRecord::new(1, 2).with_timestamp(1.0),
                EdgeRecord::new(0, 2).with_timestamp(4.0),
                EdgeRecord::new(2, 3).with_timestamp(5.0),
            ],
        );
        let graph = Graph::try_from_data(&data).expect("fixture must build");
        let split = Holdout::Temporal { cutoff: 2.0 }
            .prepare("timeline", &graph)
            .expect("fully timestamped");
        assert_eq!(split.cutoff(), Some(2.0));
        assert_eq!(split.positive_count(), 2);
        let positives: Vec<CandidatePair> = split
            .candidates()
            .iter()
            .zip(split.labels())
            .filter_map(|(pair, &label)| label.then_some(*pair))
            .collect();
        assert_eq!(positives, [CandidatePair::new(0, 2), CandidatePair::new(2, 3)]);
    }

    #[test]
    fn temporal_holdout_rejects_non_finite_cutoff() {
        let graph = graph_from_pairs(2, &[(0, 1)]);
        let err = Holdout::Temporal { cutoff: f64::NAN }
            .prepare("pair", &graph)
            .expect_err("NaN cutoff");
        assert_eq!(err.code(), crate::error::LinkPredErrorCode::InvalidCutoff);
    }

    #[test]
    fn random_holdout_rejects_bad_ratio() {
        let graph = graph_from_pairs(2, &[(0, 1)]);
        let err = Holdout::Random {
            test_ratio: 1.5,
            seed: 0,
        }
        .prepare("pair", &graph)
        .expect_err("ratio above one");
        assert!(matches!(
            err,
            LinkPredError::InvalidSplitRatio {
                parameter: "test_ratio",
                ..
            }
        ));
    }
}
