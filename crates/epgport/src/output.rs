//! Output rendering: batch summary table and dry-run documents.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use epgport_core::{BatchReport, SchemaOutcome, SubmitStatus};

use crate::error::CliError;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Schema")]
    name: String,
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Rows")]
    rows: usize,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&SchemaOutcome> for SummaryRow {
    fn from(outcome: &SchemaOutcome) -> Self {
        let status = match &outcome.status {
            SubmitStatus::Updated => "updated".to_owned(),
            SubmitStatus::Skipped => "dry run".to_owned(),
            SubmitStatus::Failed(err) => format!("failed: {err}"),
        };
        Self {
            name: outcome.name.clone(),
            id: outcome.document.id.clone(),
            rows: outcome.rows_applied,
            status,
        }
    }
}

/// Whether stdout should carry ANSI colors.
pub fn should_color() -> bool {
    io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// Per-schema table followed by a one-line verdict.
pub fn render_summary(report: &BatchReport, color: bool) -> String {
    let rows: Vec<SummaryRow> = report.schemas.iter().map(SummaryRow::from).collect();
    let table = Table::new(rows).with(Style::rounded()).to_string();

    let failed = report.failures().count();
    let total = report.schemas.len();
    let verdict = if failed == 0 {
        let line = format!(
            "{} rows applied to {total} schema(s)",
            report.rows_applied
        );
        if color { line.green().to_string() } else { line }
    } else {
        let line = format!("{failed} of {total} schema update(s) failed");
        if color { line.red().to_string() } else { line }
    };

    format!("{table}\n{verdict}")
}

/// Patched documents as a pretty JSON array, in first-seen order.
pub fn render_documents(report: &BatchReport) -> Result<String, CliError> {
    let documents: Vec<_> = report.schemas.iter().map(|s| &s.document).collect();
    Ok(serde_json::to_string_pretty(&documents)?)
}

/// Print rendered output to stdout.
pub fn print_output(output: &str) -> Result<(), CliError> {
    if output.is_empty() {
        return Ok(());
    }
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
