//! Command-line interface for ranking, evaluating and splitting citation
//! graphs.

mod commands;

pub use commands::{
    CitationArgs, Cli, CliError, Command, DatasetArg, EdgeListArgs, EvaluateCommand,
    ExecutionSummary, MetricArg, Outcome, RankCommand, SourceArgs, SplitCommand, StrategyArg,
    render_summary, run_cli,
};
