mod cli;
mod error;
mod output;

use std::ffi::OsStr;
use std::path::Path;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use epgport_core::{BatchOptions, MsoOrchestrator, run_batch};

use crate::cli::Cli;
use crate::error::{CliError, exit_code};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed.
    let guard = init_tracing(cli.verbose, cli.log_file.as_deref());

    let code = match run(cli).await {
        Ok(()) => exit_code::SUCCESS,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };

    if code != exit_code::SUCCESS {
        drop(guard);
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, log_file: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path.file_name().unwrap_or(OsStr::new("epgport.log"));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    guard
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let rows = epgport_core::load_rows(&cli.csv_file)?;
    info!(rows = rows.len(), path = %cli.csv_file.display(), "CSV loaded");
    if rows.is_empty() {
        warn!(path = %cli.csv_file.display(), "CSV has no data rows, nothing to do");
        return Ok(());
    }

    let config = epgport_config::load_server_config(cli.config.as_deref())?;
    let orchestrator = MsoOrchestrator::connect(&config).await?;

    let options = BatchOptions {
        dry_run: cli.dry_run,
    };
    let report = run_batch(&orchestrator, &rows, options).await?;

    if cli.dry_run {
        output::print_output(&output::render_documents(&report)?)?;
    }
    if !cli.quiet {
        // Keep stdout parseable as JSON in dry-run mode.
        if cli.dry_run {
            eprintln!("{}", output::render_summary(&report, false));
        } else {
            output::print_output(&output::render_summary(&report, output::should_color()))?;
        }
    }

    match report.into_first_failure() {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
