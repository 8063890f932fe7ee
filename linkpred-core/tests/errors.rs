use std::sync::Arc;

use linkpred_core::{
    EvaluationError, EvaluationErrorCode, ExecutionStrategy, GraphError, GraphErrorCode,
    LinkPredError, LinkPredErrorCode, MetricError, MetricErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(
    GraphError::NodeOutOfRange { left: 0, right: 9, num_nodes: 3 },
    GraphErrorCode::NodeOutOfRange,
)]
#[case(GraphError::SelfLoop { node: 2 }, GraphErrorCode::SelfLoop)]
#[case(
    GraphError::NonFiniteTimestamp { left: 0, right: 1 },
    GraphErrorCode::NonFiniteTimestamp,
)]
#[case(
    GraphError::LabelCountMismatch { labels: 2, num_nodes: 3 },
    GraphErrorCode::LabelCountMismatch,
)]
fn returns_expected_graph_code(#[case] error: GraphError, #[case] expected: GraphErrorCode) {
    assert_eq!(error.code(), expected);
    assert!(error.code().as_str().starts_with("GRAPH_"));
}

#[rstest]
#[case(MetricError::UnknownNode { node: 4, num_nodes: 2 }, "METRIC_UNKNOWN_NODE")]
#[case(
    MetricError::MissingTimestamp { node: 0, neighbour: 1 },
    "METRIC_MISSING_TIMESTAMP",
)]
#[case(
    MetricError::MismatchedLength { pairs: 2, timestamps: 1 },
    "METRIC_MISMATCHED_LENGTH",
)]
fn returns_expected_metric_code(#[case] error: MetricError, #[case] expected: &str) {
    assert_eq!(error.code().as_str(), expected);
    assert_eq!(error.code().to_string(), expected);
}

#[rstest]
#[case(EvaluationError::Empty, EvaluationErrorCode::Empty)]
#[case(EvaluationError::SingleClass, EvaluationErrorCode::SingleClass)]
#[case(EvaluationError::NoPositives, EvaluationErrorCode::NoPositives)]
#[case(
    EvaluationError::LengthMismatch { labels: 1, scores: 2 },
    EvaluationErrorCode::LengthMismatch,
)]
fn returns_expected_evaluation_code(
    #[case] error: EvaluationError,
    #[case] expected: EvaluationErrorCode,
) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(
    LinkPredError::InvalidGraph {
        data_source: Arc::from("cora"),
        error: GraphError::SelfLoop { node: 1 },
    },
    LinkPredErrorCode::InvalidGraph,
    Some(GraphErrorCode::SelfLoop),
    None,
)]
#[case(
    LinkPredError::Metric {
        metric: "common_neighbours",
        error: MetricError::UnknownNode { node: 9, num_nodes: 3 },
    },
    LinkPredErrorCode::MetricFailure,
    None,
    Some(MetricErrorCode::UnknownNode),
)]
#[case(
    LinkPredError::DatasetUnavailable {
        data_source: Arc::from("citeseer"),
        message: Arc::from("timed out"),
    },
    LinkPredErrorCode::DatasetUnavailable,
    None,
    None,
)]
#[case(
    LinkPredError::BackendUnavailable { requested: ExecutionStrategy::Parallel },
    LinkPredErrorCode::BackendUnavailable,
    None,
    None,
)]
#[case(
    LinkPredError::InvalidCutoff { cutoff: f64::NAN },
    LinkPredErrorCode::InvalidCutoff,
    None,
    None,
)]
#[case(LinkPredError::MissingCutoff, LinkPredErrorCode::MissingCutoff, None, None)]
#[case(
    LinkPredError::InvalidSplitRatio { parameter: "test_ratio", value: 2.0 },
    LinkPredErrorCode::InvalidSplitRatio,
    None,
    None,
)]
#[case(
    LinkPredError::Evaluation { error: EvaluationError::SingleClass },
    LinkPredErrorCode::EvaluationFailure,
    None,
    None,
)]
fn returns_expected_linkpred_code(
    #[case] error: LinkPredError,
    #[case] expected: LinkPredErrorCode,
    #[case] graph_code: Option<GraphErrorCode>,
    #[case] metric_code: Option<MetricErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
    assert_eq!(error.graph_code(), graph_code);
    assert_eq!(error.metric_code(), metric_code);
}

#[test]
fn dataset_errors_render_source_and_message() {
    let error = LinkPredError::DatasetUnavailable {
        data_source: Arc::from("cora"),
        message: Arc::from("missing cora.cites"),
    };
    assert_eq!(
        error.to_string(),
        "data source `cora` is unavailable: missing cora.cites"
    );
}
