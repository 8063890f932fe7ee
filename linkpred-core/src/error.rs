//! Error types for the linkpred core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while building a [`crate::Graph`] from loaded data.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a node index outside `[0, num_nodes)`.
    #[error("edge ({left}, {right}) references a node outside [0, {num_nodes})")]
    NodeOutOfRange {
        /// First endpoint of the offending edge.
        left: usize,
        /// Second endpoint of the offending edge.
        right: usize,
        /// Number of nodes declared by the graph.
        num_nodes: usize,
    },
    /// An edge connected a node to itself.
    #[error("self-loop on node {node} is not permitted")]
    SelfLoop {
        /// Node carrying the self-loop.
        node: usize,
    },
    /// An edge timestamp was NaN or infinite.
    #[error("edge ({left}, {right}) has a non-finite timestamp")]
    NonFiniteTimestamp {
        /// First endpoint of the offending edge.
        left: usize,
        /// Second endpoint of the offending edge.
        right: usize,
    },
    /// The label array did not provide exactly one label per node.
    #[error("label array has {labels} entries but the graph has {num_nodes} nodes")]
    LabelCountMismatch {
        /// Number of labels supplied.
        labels: usize,
        /// Number of nodes declared by the graph.
        num_nodes: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge referenced a node index outside the graph.
        NodeOutOfRange => NodeOutOfRange { .. } => "GRAPH_NODE_OUT_OF_RANGE",
        /// An edge connected a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// An edge timestamp was NaN or infinite.
        NonFiniteTimestamp => NonFiniteTimestamp { .. } => "GRAPH_NON_FINITE_TIMESTAMP",
        /// The label array did not match the node count.
        LabelCountMismatch => LabelCountMismatch { .. } => "GRAPH_LABEL_COUNT_MISMATCH",
    }
}

/// An error produced by [`crate::LinkMetric`] implementations and the
/// neighbour view they are built on.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MetricError {
    /// A query referenced a node absent from the graph.
    #[error("node {node} is not part of a graph with {num_nodes} nodes")]
    UnknownNode {
        /// The requested node.
        node: usize,
        /// Number of nodes in the graph.
        num_nodes: usize,
    },
    /// Temporal filtering reached an edge without a timestamp.
    #[error("edge ({node}, {neighbour}) has no timestamp but temporal filtering was requested")]
    MissingTimestamp {
        /// Node whose neighbourhood was being filtered.
        node: usize,
        /// Neighbour reached through the untimestamped edge.
        neighbour: usize,
    },
    /// Per-pair timestamps did not match the number of pairs.
    #[error("{timestamps} timestamps were supplied for {pairs} pairs")]
    MismatchedLength {
        /// Number of pairs in the batch.
        pairs: usize,
        /// Number of timestamps in the batch.
        timestamps: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MetricError`] variants.
    enum MetricErrorCode for MetricError {
        /// A query referenced a node absent from the graph.
        UnknownNode => UnknownNode { .. } => "METRIC_UNKNOWN_NODE",
        /// Temporal filtering reached an edge without a timestamp.
        MissingTimestamp => MissingTimestamp { .. } => "METRIC_MISSING_TIMESTAMP",
        /// Per-pair timestamps did not match the number of pairs.
        MismatchedLength => MismatchedLength { .. } => "METRIC_MISMATCHED_LENGTH",
    }
}

/// An error produced while evaluating scores against known labels.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EvaluationError {
    /// Labels and scores had different lengths.
    #[error("{labels} labels were supplied for {scores} scores")]
    LengthMismatch {
        /// Number of labels.
        labels: usize,
        /// Number of scores.
        scores: usize,
    },
    /// No labelled scores were supplied.
    #[error("no labelled scores were supplied")]
    Empty,
    /// ROC-AUC is undefined when only one class is present.
    #[error("only one class is present in the labels")]
    SingleClass,
    /// A precision-recall curve needs at least one positive label.
    #[error("no positive labels were supplied")]
    NoPositives,
}

define_error_codes! {
    /// Stable codes describing [`EvaluationError`] variants.
    enum EvaluationErrorCode for EvaluationError {
        /// Labels and scores had different lengths.
        LengthMismatch => LengthMismatch { .. } => "EVALUATION_LENGTH_MISMATCH",
        /// No labelled scores were supplied.
        Empty => Empty => "EVALUATION_EMPTY",
        /// Only one class is present in the labels.
        SingleClass => SingleClass => "EVALUATION_SINGLE_CLASS",
        /// No positive labels were supplied.
        NoPositives => NoPositives => "EVALUATION_NO_POSITIVES",
    }
}

/// Error type produced when constructing or running [`crate::LinkPredictor`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinkPredError {
    /// The data loaded from a [`crate::GraphSource`] did not form a valid graph.
    #[error("data source `{data_source}` produced an invalid graph: {error}")]
    InvalidGraph {
        /// Identifier for the data source that produced the graph.
        data_source: Arc<str>,
        #[source]
        /// Underlying graph construction error.
        error: GraphError,
    },
    /// A metric failed while scoring candidates.
    #[error("metric `{metric}` failed: {error}")]
    Metric {
        /// Name of the metric that failed.
        metric: &'static str,
        #[source]
        /// Underlying metric error.
        error: MetricError,
    },
    /// The [`crate::GraphSource`] could not supply its dataset.
    #[error("data source `{data_source}` is unavailable: {message}")]
    DatasetUnavailable {
        /// Identifier for the unavailable data source.
        data_source: Arc<str>,
        /// Rendered provider error.
        message: Arc<str>,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The temporal cutoff was NaN or infinite.
    #[error("temporal cutoff must be finite (got {cutoff})")]
    InvalidCutoff {
        /// The rejected cutoff.
        cutoff: f64,
    },
    /// Temporal mode was enabled without a cutoff while the fallback policy
    /// rejects that configuration.
    #[error("temporal mode requires a cutoff when the fallback policy is `reject`")]
    MissingCutoff,
    /// A split or hold-out ratio was outside `[0, 1]` or the ratios summed past 1.
    #[error("ratio `{parameter}` is invalid (got {value})")]
    InvalidSplitRatio {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Evaluating the scored candidates failed.
    #[error("evaluation failed: {error}")]
    Evaluation {
        #[source]
        /// Underlying evaluation error.
        error: EvaluationError,
    },
}

define_error_codes! {
    /// Stable codes describing [`LinkPredError`] variants.
    enum LinkPredErrorCode for LinkPredError {
        /// The loaded data did not form a valid graph.
        InvalidGraph => InvalidGraph { .. } => "LINKPRED_INVALID_GRAPH",
        /// A metric failed while scoring candidates.
        MetricFailure => Metric { .. } => "LINKPRED_METRIC_FAILURE",
        /// The data source could not supply its dataset.
        DatasetUnavailable => DatasetUnavailable { .. } => "LINKPRED_DATASET_UNAVAILABLE",
        /// The requested execution strategy is unavailable in this build.
        BackendUnavailable => BackendUnavailable { .. } => "LINKPRED_BACKEND_UNAVAILABLE",
        /// The temporal cutoff was not finite.
        InvalidCutoff => InvalidCutoff { .. } => "LINKPRED_INVALID_CUTOFF",
        /// Temporal mode was enabled without a cutoff under the reject policy.
        MissingCutoff => MissingCutoff => "LINKPRED_MISSING_CUTOFF",
        /// A split or hold-out ratio was invalid.
        InvalidSplitRatio => InvalidSplitRatio { .. } => "LINKPRED_INVALID_SPLIT_RATIO",
        /// Evaluation of the scored candidates failed.
        EvaluationFailure => Evaluation { .. } => "LINKPRED_EVALUATION_FAILURE",
    }
}

impl LinkPredError {
    /// Retrieve the inner [`GraphErrorCode`] when graph construction failed.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::InvalidGraph { error, .. } => Some(error.code()),
            _ => None,
        }
    }

    /// Retrieve the inner [`MetricErrorCode`] when a metric failed.
    #[must_use]
    pub const fn metric_code(&self) -> Option<MetricErrorCode> {
        match self {
            Self::Metric { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, LinkPredError>;
