//! Command implementations and argument parsing for the `linkpred` CLI.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use linkpred_core::{
    CutoffFallback, EvaluationReport, ExecutionStrategy, GraphData, GraphSource, Holdout,
    LinkPredError, LinkPredictorBuilder, MetricKind, NodeSplit, Prediction, TemporalConfig,
};
use linkpred_providers_citation::{
    CitationConfig, CitationDataset, CitationError, CitationProvider, default_cache_dir,
};
use linkpred_providers_edgelist::{DEFAULT_MAX_NODES, EdgeListError, EdgeListProvider, NodeIds};
use rand::{SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_TOP_K: usize = 10;
const DEFAULT_RATIO: f64 = 0.1;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "linkpred",
    about = "Rank likely missing links in citation graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Score every unlinked pair and print the top candidates.
    Rank(RankCommand),
    /// Hold out links and measure how well the metric recovers them.
    Evaluate(EvaluateCommand),
    /// Assign nodes to train, validation and test sets.
    Split(SplitCommand),
}

/// Options accepted by the `rank` command.
#[derive(Debug, Args, Clone)]
pub struct RankCommand {
    /// Number of candidates to print.
    #[arg(long = "top-k", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Similarity metric.
    #[arg(long, value_enum, default_value_t = MetricArg::CommonNeighbours)]
    pub metric: MetricArg,

    /// Only count neighbours linked on or before the cutoff.
    #[arg(long)]
    pub temporal: bool,

    /// Last timestamp visible in temporal mode.
    #[arg(long, requires = "temporal", allow_negative_numbers = true)]
    pub cutoff: Option<f64>,

    /// Fail instead of using every neighbour when `--temporal` has no cutoff.
    #[arg(long = "strict-cutoff", requires = "temporal")]
    pub strict_cutoff: bool,

    /// Batch scoring backend.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Graph to rank.
    #[command(subcommand)]
    pub source: SourceArgs,
}

/// Options accepted by the `evaluate` command.
#[derive(Debug, Args, Clone)]
pub struct EvaluateCommand {
    /// Rank depth used for precision@k.
    #[arg(long = "top-k", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Similarity metric.
    #[arg(long, value_enum, default_value_t = MetricArg::CommonNeighbours)]
    pub metric: MetricArg,

    /// Batch scoring backend.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,

    /// Fraction of edges withheld at random.
    #[arg(long = "test-ratio", default_value_t = DEFAULT_RATIO, conflicts_with = "cutoff")]
    pub test_ratio: f64,

    /// Seed for the random hold-out.
    #[arg(long, default_value_t = 0, conflicts_with = "cutoff")]
    pub seed: u64,

    /// Withhold links formed after this timestamp instead of a random sample.
    #[arg(long, allow_negative_numbers = true)]
    pub cutoff: Option<f64>,

    /// Graph to evaluate on.
    #[command(subcommand)]
    pub source: SourceArgs,
}

/// Options accepted by the `split` command.
#[derive(Debug, Args, Clone)]
pub struct SplitCommand {
    /// Fraction of nodes assigned to validation.
    #[arg(long = "val-ratio", default_value_t = DEFAULT_RATIO)]
    pub val_ratio: f64,

    /// Fraction of nodes assigned to test.
    #[arg(long = "test-ratio", default_value_t = DEFAULT_RATIO)]
    pub test_ratio: f64,

    /// Seed for the node permutation.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Graph whose nodes are split.
    #[command(subcommand)]
    pub source: SourceArgs,
}

/// Graph sources understood by every command.
#[derive(Debug, Subcommand, Clone)]
pub enum SourceArgs {
    /// Plain-text edge list with an optional timestamp column.
    EdgeList(EdgeListArgs),
    /// LINQS citation dataset read from a local cache.
    Citation(CitationArgs),
}

/// Edge-list arguments.
#[derive(Debug, Args, Clone)]
pub struct EdgeListArgs {
    /// File holding `source target [timestamp]` lines.
    pub path: PathBuf,

    /// Total node count, to keep isolated trailing nodes.
    #[arg(long = "num-nodes")]
    pub num_nodes: Option<usize>,

    /// Treat node fields as opaque ids rather than indices.
    #[arg(long = "remap-ids")]
    pub remap_ids: bool,

    /// Largest node count accepted when fields are indices.
    #[arg(long = "max-nodes", default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Override name for the data source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Citation dataset arguments.
#[derive(Debug, Args, Clone)]
pub struct CitationArgs {
    /// Dataset to load.
    #[arg(long, value_enum, default_value_t = DatasetArg::Cora)]
    pub dataset: DatasetArg,

    /// Cache root (defaults to `LINKPRED_CACHE_DIR` or the user cache).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Mirror hosting `<name>.content` and `<name>.cites` for missing files.
    #[arg(long = "base-url", conflicts_with = "archive_url")]
    pub base_url: Option<String>,

    /// Host serving `<name>.tgz` archives (defaults to the LINQS site).
    #[arg(long = "archive-url")]
    pub archive_url: Option<String>,

    /// Read the cache only; never download.
    #[arg(long, conflicts_with_all = ["base_url", "archive_url"])]
    pub offline: bool,
}

/// Metric names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricArg {
    /// Shared neighbour count.
    CommonNeighbours,
    /// Shared neighbours over the neighbourhood union.
    Jaccard,
    /// Shared neighbours weighted by inverse log degree.
    AdamicAdar,
    /// Product of degrees.
    PreferentialAttachment,
}

impl From<MetricArg> for MetricKind {
    fn from(value: MetricArg) -> Self {
        match value {
            MetricArg::CommonNeighbours => Self::CommonNeighbours,
            MetricArg::Jaccard => Self::Jaccard,
            MetricArg::AdamicAdar => Self::AdamicAdar,
            MetricArg::PreferentialAttachment => Self::PreferentialAttachment,
        }
    }
}

/// Execution strategies accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Parallel when compiled in, otherwise sequential.
    Auto,
    /// Single-threaded scoring.
    Sequential,
    /// Rayon-backed scoring.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Citation datasets accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetArg {
    /// Cora.
    Cora,
    /// CiteSeer.
    Citeseer,
}

impl From<DatasetArg> for CitationDataset {
    fn from(value: DatasetArg) -> Self {
        match value {
            DatasetArg::Cora => Self::Cora,
            DatasetArg::Citeseer => Self::CiteSeer,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Edge-list ingestion failed.
    #[error(transparent)]
    EdgeList(#[from] EdgeListError),
    /// Citation dataset ingestion failed.
    #[error(transparent)]
    Citation(#[from] CitationError),
    /// Core pipeline failed.
    #[error(transparent)]
    Core(#[from] LinkPredError),
}

/// Result of one command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the data source.
    pub data_source: String,
    /// Command-specific payload.
    pub outcome: Outcome,
}

/// Command-specific results.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Top-k candidates from `rank`.
    Ranking(Prediction),
    /// Metrics from `evaluate`.
    Evaluation(Box<EvaluationReport>),
    /// Node assignment from `split`.
    Split(NodeSplit),
}

/// Provider picked on the command line.
enum SelectedSource {
    EdgeList(EdgeListProvider),
    Citation(CitationProvider),
}

impl GraphSource for SelectedSource {
    type Error = CliError;

    fn name(&self) -> &str {
        match self {
            Self::EdgeList(provider) => provider.name(),
            Self::Citation(provider) => provider.name(),
        }
    }

    fn load(&self) -> Result<GraphData, CliError> {
        match self {
            Self::EdgeList(provider) => Ok(provider.load()?),
            Self::Citation(provider) => Ok(provider.load()?),
        }
    }
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the source cannot be read or the pipeline
/// rejects its configuration or input.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use linkpred_cli::cli::{Cli, Command, EdgeListArgs, MetricArg, Outcome, RankCommand, SourceArgs, StrategyArg, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 1\n1 2\n0 2\n2 3\n")?;
/// let cli = Cli {
///     command: Command::Rank(RankCommand {
///         top_k: 1,
///         metric: MetricArg::CommonNeighbours,
///         temporal: false,
///         cutoff: None,
///         strict_cutoff: false,
///         strategy: StrategyArg::Sequential,
///         source: SourceArgs::EdgeList(EdgeListArgs {
///             path: file.path().to_path_buf(),
///             num_nodes: None,
///             remap_ids: false,
///             max_nodes: 1_000,
///             name: Some("scenario".into()),
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// let Outcome::Ranking(prediction) = summary.outcome else { unreachable!() };
/// assert_eq!(prediction.records()[0].as_tuple(), (0, 3, 1.0));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Rank(command) => {
            span.record("command", "rank");
            rank_command(command)
        }
        Command::Evaluate(command) => {
            span.record("command", "evaluate");
            evaluate_command(command)
        }
        Command::Split(command) => {
            span.record("command", "split");
            split_command(command)
        }
    }
}

#[instrument(
    name = "cli.rank",
    err,
    skip(command),
    fields(top_k = command.top_k, metric = field::Empty, temporal = command.temporal, cutoff = field::Empty),
)]
pub(super) fn rank_command(command: RankCommand) -> Result<ExecutionSummary, CliError> {
    let metric = MetricKind::from(command.metric);
    let span = Span::current();
    span.record("metric", metric.as_str());
    if let Some(cutoff) = command.cutoff {
        span.record("cutoff", cutoff);
    }

    let temporal = TemporalConfig {
        enabled: command.temporal,
        cutoff: command.cutoff,
        fallback: if command.strict_cutoff {
            CutoffFallback::Reject
        } else {
            CutoffFallback::AllNeighbours
        },
    };
    let predictor = LinkPredictorBuilder::new()
        .with_top_k(command.top_k)
        .with_metric(metric)
        .with_temporal(temporal)
        .with_execution_strategy(command.strategy.into())
        .build()?;

    let source = open_source(command.source);
    let prediction = predictor.run(&source)?;
    info!(
        data_source = source.name(),
        candidates = prediction.candidate_count(),
        reported = prediction.records().len(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source: source.name().to_owned(),
        outcome: Outcome::Ranking(prediction),
    })
}

#[instrument(
    name = "cli.evaluate",
    err,
    skip(command),
    fields(top_k = command.top_k, metric = field::Empty, holdout = field::Empty),
)]
pub(super) fn evaluate_command(command: EvaluateCommand) -> Result<ExecutionSummary, CliError> {
    let metric = MetricKind::from(command.metric);
    let holdout = match command.cutoff {
        Some(cutoff) => Holdout::Temporal { cutoff },
        None => Holdout::Random {
            test_ratio: command.test_ratio,
            seed: command.seed,
        },
    };
    let span = Span::current();
    span.record("metric", metric.as_str());
    span.record("holdout", holdout.name());

    let predictor = LinkPredictorBuilder::new()
        .with_top_k(command.top_k)
        .with_metric(metric)
        .with_execution_strategy(command.strategy.into())
        .build()?;

    let source = open_source(command.source);
    let report = predictor.evaluate(&source, holdout)?;
    info!(
        data_source = source.name(),
        auc = report.auc,
        precision_at_k = report.precision_at_k,
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source: source.name().to_owned(),
        outcome: Outcome::Evaluation(Box::new(report)),
    })
}

#[instrument(
    name = "cli.split",
    err,
    skip(command),
    fields(val_ratio = command.val_ratio, test_ratio = command.test_ratio, seed = command.seed),
)]
pub(super) fn split_command(command: SplitCommand) -> Result<ExecutionSummary, CliError> {
    let source = open_source(command.source);
    let data = source.load()?;
    let mut rng = SmallRng::seed_from_u64(command.seed);
    let split = NodeSplit::random(data.num_nodes, command.val_ratio, command.test_ratio, &mut rng)?;
    let (train, val, test) = split.counts();
    info!(
        data_source = source.name(),
        train,
        val,
        test,
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source: source.name().to_owned(),
        outcome: Outcome::Split(split),
    })
}

#[instrument(name = "cli.open_source", skip(args), fields(kind = field::Empty, location = field::Empty))]
fn open_source(args: SourceArgs) -> SelectedSource {
    let span = Span::current();
    match args {
        SourceArgs::EdgeList(EdgeListArgs {
            path,
            num_nodes,
            remap_ids,
            max_nodes,
            name,
        }) => {
            span.record("kind", "edge-list");
            span.record("location", field::display(path.display()));
            let mut provider = EdgeListProvider::new(path)
                .with_max_nodes(max_nodes)
                .with_node_ids(if remap_ids {
                    NodeIds::Remap
                } else {
                    NodeIds::Index
                });
            if let Some(num_nodes) = num_nodes {
                provider = provider.with_num_nodes(num_nodes);
            }
            if let Some(name) = name {
                provider = provider.with_name(name);
            }
            SelectedSource::EdgeList(provider)
        }
        SourceArgs::Citation(CitationArgs {
            dataset,
            root,
            base_url,
            archive_url,
            offline,
        }) => {
            let root = root.unwrap_or_else(default_cache_dir);
            span.record("kind", "citation");
            span.record("location", field::display(root.display()));
            let mut config = CitationConfig::new(root);
            if let Some(archive_url) = archive_url {
                config = config.with_archive_url(archive_url);
            }
            if let Some(base_url) = base_url {
                config = config.with_base_url(base_url);
            }
            if offline {
                config = config.offline();
            }
            SelectedSource::Citation(CitationProvider::new(dataset.into(), config))
        }
    }
}

/// Renders `summary` to `writer` as plain text.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use linkpred_cli::cli::{ExecutionSummary, Outcome, render_summary};
/// # use linkpred_core::{Prediction, ScoreRecord};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     outcome: Outcome::Ranking(Prediction::new(vec![ScoreRecord::new(0, 3, 1.0)], 2, 4, 4)),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert!(String::from_utf8(buffer)?.ends_with("0\t3\t1\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    match &summary.outcome {
        Outcome::Ranking(prediction) => {
            writeln!(writer, "nodes: {}", prediction.num_nodes())?;
            writeln!(writer, "edges: {}", prediction.num_edges())?;
            writeln!(writer, "candidates: {}", prediction.candidate_count())?;
            for record in prediction.records() {
                writeln!(writer, "{}\t{}\t{}", record.left, record.right, record.score)?;
            }
        }
        Outcome::Evaluation(report) => {
            writeln!(writer, "metric: {}", report.metric)?;
            writeln!(writer, "holdout: {}", report.holdout)?;
            writeln!(writer, "train edges: {}", report.train_edges)?;
            writeln!(writer, "candidates: {}", report.candidate_count)?;
            writeln!(writer, "positives: {}", report.positive_count)?;
            writeln!(writer, "auc: {:.4}", report.auc)?;
            writeln!(writer, "average precision: {:.4}", report.average_precision())?;
            writeln!(
                writer,
                "precision@{}: {:.4}",
                report.top_k, report.precision_at_k
            )?;
        }
        Outcome::Split(split) => {
            let (train, val, test) = split.counts();
            writeln!(writer, "train: {train}")?;
            writeln!(writer, "val: {val}")?;
            writeln!(writer, "test: {test}")?;
            // Masks are disjoint and covering, so test is whatever remains.
            for (node, (&in_train, &in_val)) in
                split.train_mask().iter().zip(split.val_mask()).enumerate()
            {
                let set = if in_train {
                    "train"
                } else if in_val {
                    "val"
                } else {
                    "test"
                };
                writeln!(writer, "{node}\t{set}")?;
            }
        }
    }
    Ok(())
}
