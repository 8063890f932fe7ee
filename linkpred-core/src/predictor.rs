//! Link-prediction orchestration.
//!
//! Provides the [`LinkPredictor`] runtime entry point: load a graph, enumerate
//! candidates, score them in a batch and rank the results.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    Result,
    builder::{ExecutionStrategy, TemporalConfig},
    candidates::{CandidatePair, candidate_pairs},
    datasource::GraphSource,
    error::LinkPredError,
    evaluation::{EvaluationReport, Holdout, precision_at_k, precision_recall_curve, roc_auc},
    graph::Graph,
    metric::{Cutoffs, LinkMetric, MetricKind, NeighbourMode, NeighbourView, score_pairs},
    ranking::{Prediction, rank_records},
};

/// Entry point for running the link-prediction pipeline.
///
/// # Examples
/// ```
/// use linkpred_core::{GraphData, InMemorySource, LinkPredictorBuilder};
///
/// let source = InMemorySource::new(
///     "triangle-tail",
///     GraphData::from_pairs(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]),
/// );
/// let predictor = LinkPredictorBuilder::new()
///     .with_top_k(1)
///     .build()
///     .expect("builder must succeed");
/// let prediction = predictor.run(&source).expect("run must succeed");
/// assert_eq!(prediction.records()[0].as_tuple(), (0, 3, 1.0));
/// assert_eq!(prediction.candidate_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct LinkPredictor {
    top_k: usize,
    metric: MetricKind,
    temporal: TemporalConfig,
    execution_strategy: ExecutionStrategy,
}

impl LinkPredictor {
    pub(crate) const fn new(
        top_k: usize,
        metric: MetricKind,
        temporal: TemporalConfig,
        execution_strategy: ExecutionStrategy,
    ) -> Self {
        Self {
            top_k,
            metric,
            temporal,
            execution_strategy,
        }
    }

    /// Returns how many ranked candidates a run keeps.
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Returns the scoring metric.
    #[must_use]
    pub const fn metric(&self) -> MetricKind {
        self.metric
    }

    /// Returns the temporal settings.
    #[must_use]
    pub const fn temporal(&self) -> TemporalConfig {
        self.temporal
    }

    /// Returns the execution strategy that will be used when scoring.
    #[must_use]
    pub const fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Loads the graph from `source` and ranks its candidates.
    ///
    /// # Errors
    /// Returns [`LinkPredError::DatasetUnavailable`] when loading fails,
    /// [`LinkPredError::InvalidGraph`] when the data is malformed, and the
    /// errors of [`Self::rank`].
    #[instrument(
        name = "core.run",
        err,
        skip(self, source),
        fields(
            data_source = %source.name(),
            top_k = self.top_k,
            metric = %self.metric,
            strategy = ?self.execution_strategy
        ),
    )]
    pub fn run<S: GraphSource>(&self, source: &S) -> Result<Prediction> {
        let graph = self.load_graph(source)?;
        self.rank(&graph)
    }

    /// Ranks the candidates of an already-built graph.
    ///
    /// Temporal mode applies [`TemporalConfig::effective_cutoff`] uniformly;
    /// without a cutoff every neighbour counts.
    ///
    /// # Errors
    /// Returns [`LinkPredError::BackendUnavailable`] when the configured
    /// strategy is not compiled in and [`LinkPredError::Metric`] when any
    /// candidate fails to score. No partial ranking is returned.
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::{Graph, GraphData, LinkPredictorBuilder};
    ///
    /// let graph = Graph::try_from_data(&GraphData::from_pairs(3, &[]))?;
    /// let prediction = LinkPredictorBuilder::new().build()?.rank(&graph)?;
    /// let scores: Vec<f64> = prediction.records().iter().map(|r| r.score).collect();
    /// assert_eq!(scores, [0.0, 0.0, 0.0]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "core.rank",
        err,
        skip(self, graph),
        fields(nodes = graph.num_nodes(), edges = graph.num_edges()),
    )]
    pub fn rank(&self, graph: &Graph) -> Result<Prediction> {
        let strategy = self.execution_strategy.resolve()?;
        let candidates = candidate_pairs(graph);
        record_candidates(candidates.len());
        info!(candidates = candidates.len(), "candidates generated");

        let mode = NeighbourMode::from_temporal(self.temporal.enabled);
        let cutoffs = Cutoffs::uniform(self.temporal.effective_cutoff());
        let scores = self.score(graph, &candidates, mode, cutoffs, strategy)?;

        let mut records = rank_records(&candidates, &scores);
        records.truncate(self.top_k);
        info!(returned = records.len(), "ranking completed");
        Ok(Prediction::new(
            records,
            candidates.len(),
            graph.num_nodes(),
            graph.num_edges(),
        ))
    }

    /// Withholds links from the graph in `source`, ranks the remaining
    /// candidates and measures how well the withheld links are recovered.
    ///
    /// # Errors
    /// Returns the loading errors of [`Self::run`], the errors of
    /// [`Holdout::prepare`] and [`Self::rank`], and
    /// [`LinkPredError::Evaluation`] when the labels hold a single class.
    ///
    /// # Examples
    /// ```
    /// use linkpred_core::{EdgeRecord, GraphData, Holdout, InMemorySource, LinkPredictorBuilder};
    ///
    /// let data = GraphData::new(
    ///     4,
    ///     vec![
    ///         EdgeRecord::new(0, 1).with_timestamp(1.0),
    ///         EdgeRecord::new(1, 2).with_timestamp(1.0),
    ///         EdgeRecord::new(2, 3).with_timestamp(1.0),
    ///         EdgeRecord::new(0, 2).with_timestamp(5.0),
    ///     ],
    /// );
    /// let source = InMemorySource::new("timeline", data);
    /// let report = LinkPredictorBuilder::new()
    ///     .build()?
    ///     .evaluate(&source, Holdout::Temporal { cutoff: 2.0 })?;
    /// assert_eq!(report.positive_count, 1);
    /// // (0, 2) ties with the negative (1, 3) and beats (0, 3).
    /// assert_eq!(report.auc, 0.75);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "core.evaluate",
        err,
        skip_all,
        fields(
            data_source = %source.name(),
            holdout = holdout.name(),
            metric = %self.metric
        ),
    )]
    pub fn evaluate<S: GraphSource>(
        &self,
        source: &S,
        holdout: Holdout,
    ) -> Result<EvaluationReport> {
        let strategy = self.execution_strategy.resolve()?;
        let graph = self.load_graph(source)?;
        let split = holdout.prepare(source.name(), &graph)?;
        record_candidates(split.candidates().len());
        info!(
            candidates = split.candidates().len(),
            positives = split.positive_count(),
            "hold-out prepared"
        );

        let (mode, cutoffs) = match split.cutoff() {
            Some(cutoff) => (NeighbourMode::Temporal, Cutoffs::Uniform(cutoff)),
            None => (
                NeighbourMode::from_temporal(self.temporal.enabled),
                Cutoffs::uniform(self.temporal.effective_cutoff()),
            ),
        };
        let scores = self.score(split.train(), split.candidates(), mode, cutoffs, strategy)?;

        let labels = split.labels();
        let evaluation = |error| LinkPredError::Evaluation { error };
        let auc = roc_auc(labels, &scores).map_err(evaluation)?;
        let curve = precision_recall_curve(labels, &scores).map_err(evaluation)?;
        let ranked_labels: Vec<bool> = rank_records(split.candidates(), &scores)
            .iter()
            .map(|record| label_of(split.candidates(), labels, record.pair()))
            .collect();
        let precision = precision_at_k(&ranked_labels, self.top_k);
        info!(auc, precision_at_k = precision, "evaluation completed");

        Ok(EvaluationReport {
            metric: self.metric,
            holdout: holdout.name(),
            auc,
            curve,
            top_k: self.top_k,
            precision_at_k: precision,
            candidate_count: split.candidates().len(),
            positive_count: split.positive_count(),
            train_edges: split.train().num_edges(),
        })
    }

    fn load_graph<S: GraphSource>(&self, source: &S) -> Result<Graph> {
        let data = source
            .load()
            .map_err(|error| LinkPredError::DatasetUnavailable {
                data_source: Arc::from(source.name()),
                message: Arc::from(error.to_string()),
            })?;
        let graph = Graph::try_from_data(&data).map_err(|error| LinkPredError::InvalidGraph {
            data_source: Arc::from(source.name()),
            error,
        })?;
        info!(
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            timestamped = graph.has_timestamps(),
            "graph loaded"
        );
        Ok(graph)
    }

    #[instrument(
        name = "core.score_batch",
        err,
        skip_all,
        fields(pairs = candidates.len(), metric = %self.metric, mode = ?mode, strategy = ?strategy),
    )]
    fn score(
        &self,
        graph: &Graph,
        candidates: &[CandidatePair],
        mode: NeighbourMode,
        cutoffs: Cutoffs<'_>,
        strategy: ExecutionStrategy,
    ) -> Result<Vec<f64>> {
        let metric = self.metric.bind(NeighbourView::new(graph, mode));
        let scores = match strategy {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => {
                crate::metric::score_pairs_parallel(&metric, candidates, cutoffs)
            }
            _ => score_pairs(&metric, candidates, cutoffs),
        }
        .map_err(|error| LinkPredError::Metric {
            metric: metric.name(),
            error,
        })?;
        record_scored(scores.len());
        Ok(scores)
    }
}

/// Looks up the label of `pair` in the enumeration-ordered `candidates`.
fn label_of(candidates: &[CandidatePair], labels: &[bool], pair: CandidatePair) -> bool {
    candidates
        .binary_search(&pair)
        .ok()
        .and_then(|index| labels.get(index).copied())
        .unwrap_or(false)
}

#[cfg(feature = "metrics")]
fn record_candidates(count: usize) {
    metrics::counter!("linkpred_candidates_total").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_candidates(_count: usize) {}

#[cfg(feature = "metrics")]
fn record_scored(count: usize) {
    metrics::counter!("linkpred_scored_pairs_total").increment(count as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_scored(_count: usize) {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::{
        builder::LinkPredictorBuilder,
        error::LinkPredErrorCode,
        test_utils::{UnavailableSource, graph_from_pairs},
    };

    fn predictor() -> LinkPredictor {
        match LinkPredictorBuilder::new().with_top_k(3).build() {
            Ok(predictor) => predictor,
            Err(err) => panic!("default configuration must build: {err}"),
        }
    }

    #[test]
    fn run_reports_the_failing_source() {
        let err = predictor()
            .run(&UnavailableSource)
            .expect_err("loading must fail");
        assert_eq!(err.code(), LinkPredErrorCode::DatasetUnavailable);
        match err {
            LinkPredError::DatasetUnavailable {
                data_source,
                message,
            } => {
                assert_eq!(&*data_source, "unavailable");
                assert_eq!(&*message, "network unreachable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case::random(Holdout::Random { test_ratio: 0.5, seed: 1 })]
    #[case::temporal(Holdout::Temporal { cutoff: 1.0 })]
    fn evaluate_fails_before_splitting(#[case] holdout: Holdout) {
        let err = predictor()
            .evaluate(&UnavailableSource, holdout)
            .expect_err("loading must fail");
        assert_eq!(err.code(), LinkPredErrorCode::DatasetUnavailable);
    }

    #[test]
    fn rank_truncates_to_top_k() {
        let graph = graph_from_pairs(5, &[(0, 1), (1, 2)]);
        let prediction = predictor().rank(&graph).expect("static ranking succeeds");
        assert_eq!(prediction.candidate_count(), 8);
        assert_eq!(prediction.records().len(), 3);
        assert_eq!(prediction.records()[0].as_tuple(), (0, 2, 1.0));
    }
}
