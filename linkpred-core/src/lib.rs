//! Linkpred core library.
//!
//! Builds an undirected, optionally timestamped graph, enumerates the node
//! pairs that are not yet linked, scores them with a neighbourhood metric and
//! ranks the most likely missing links.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod candidates;
mod datasource;
mod error;
mod evaluation;
mod graph;
mod metric;
mod predictor;
mod ranking;
mod split;

#[cfg(test)]
mod test_utils;

#[cfg(feature = "parallel")]
pub use crate::metric::score_pairs_parallel;
pub use crate::{
    builder::{CutoffFallback, ExecutionStrategy, LinkPredictorBuilder, TemporalConfig},
    candidates::{CandidatePair, candidate_pairs, candidate_pairs_at, expected_candidate_count},
    datasource::{GraphSource, InMemorySource},
    error::{
        EvaluationError, EvaluationErrorCode, GraphError, GraphErrorCode, LinkPredError,
        LinkPredErrorCode, MetricError, MetricErrorCode, Result,
    },
    evaluation::{
        EvaluationReport, Holdout, HoldoutSplit, PrecisionRecallCurve, precision_at_k,
        precision_recall_curve, roc_auc,
    },
    graph::{EdgeRecord, Graph, GraphData},
    metric::{
        AdamicAdar, AnyMetric, CommonNeighbours, Cutoffs, Jaccard, LinkMetric, MetricKind,
        NeighbourMode, NeighbourView, PreferentialAttachment, score_pairs,
    },
    predictor::LinkPredictor,
    ranking::{Prediction, ScoreRecord, rank_records},
    split::NodeSplit,
};
