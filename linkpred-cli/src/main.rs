//! `linkpred` binary entry point.
//!
//! Parses arguments, runs the selected command, renders its summary to
//! stdout and maps failures to a non-zero exit status. Logging is installed
//! first so every later step reports through `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use linkpred_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, detail) = match err.downcast_ref::<CliError>() {
            Some(CliError::Core(core)) => (
                Some(core.code().as_str()),
                core.graph_code()
                    .map(|code| code.as_str())
                    .or_else(|| core.metric_code().map(|code| code.as_str())),
            ),
            _ => (None, None),
        };

        error!(
            error = field::display(format!("{err:#}")),
            code = code.map(field::display),
            detail_code = detail.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
