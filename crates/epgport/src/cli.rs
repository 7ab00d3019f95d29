//! Clap derive structures for the `epgport` CLI.

use std::path::PathBuf;

use clap::Parser;

/// epgport -- bulk static-port binding for Multi-Site Orchestrator EPGs
#[derive(Debug, Parser)]
#[command(
    name = "epgport",
    version,
    about = "Add static ports to MSO endpoint groups from a CSV file",
    long_about = "Reads one static-port binding per CSV row, resolves site, node, and\n\
        interface names against the orchestrator, appends the bindings to the\n\
        target schema documents, and submits each touched schema once.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// CSV file with one static-port binding per row
    pub csv_file: PathBuf,

    /// Server configuration file (JSON)
    #[arg(long, short = 'c', env = "EPGPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Patch schemas without submitting; print the patched documents as JSON
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Suppress the summary table
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "epgport", "-vv", "--dry-run", "-c", "mso.json", "ports.csv",
        ])
        .unwrap();

        assert_eq!(cli.csv_file, PathBuf::from("ports.csv"));
        assert_eq!(cli.config, Some(PathBuf::from("mso.json")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.dry_run);
        assert!(!cli.quiet);
    }

    #[test]
    fn csv_file_is_required() {
        let err = Cli::try_parse_from(["epgport", "--dry-run"]).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);
    }
}
