// ── Batch runner ──
//
// Load rows' unique schemas and fabrics once each, apply rows in CSV order,
// then submit every touched schema exactly once. Loading and patching fail
// fast; submissions are independent and each gets its own outcome.

use indexmap::IndexMap;
use tracing::{error, info};

use crate::error::CoreError;
use crate::model::{FabricInterfaceSet, FabricKey, SchemaDocument, StaticPortRow};
use crate::orchestrator::Orchestrator;
use crate::patch::apply_row;

/// Knobs for a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Patch documents but do not submit them.
    pub dry_run: bool,
}

/// Result of submitting one schema.
#[derive(Debug)]
pub enum SubmitStatus {
    Updated,
    /// Not submitted (dry run).
    Skipped,
    Failed(CoreError),
}

/// Per-schema summary of a batch run.
#[derive(Debug)]
pub struct SchemaOutcome {
    pub name: String,
    pub rows_applied: usize,
    pub status: SubmitStatus,
    /// The document as patched (and, unless skipped, as submitted).
    pub document: SchemaDocument,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub rows_applied: usize,
    pub schemas: Vec<SchemaOutcome>,
}

impl BatchReport {
    /// Schemas whose submission failed, with the error.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &CoreError)> {
        self.schemas.iter().filter_map(|s| match &s.status {
            SubmitStatus::Failed(err) => Some((s.name.as_str(), err)),
            _ => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Consume the report, yielding the first submission failure if any.
    pub fn into_first_failure(self) -> Option<CoreError> {
        self.schemas.into_iter().find_map(|s| match s.status {
            SubmitStatus::Failed(err) => Some(err),
            _ => None,
        })
    }
}

/// Apply `rows` against `orchestrator`.
///
/// Returns `Err` if any schema or fabric cannot be loaded or any row cannot
/// be placed; nothing is submitted in that case. Otherwise every schema is
/// submitted (unless `dry_run`) and its outcome recorded in the report.
pub async fn run_batch<O: Orchestrator>(
    orchestrator: &O,
    rows: &[StaticPortRow],
    options: BatchOptions,
) -> Result<BatchReport, CoreError> {
    // Each row is planned as (schema index, fabric index) into the maps below.
    let mut schemas: IndexMap<String, SchemaDocument> = IndexMap::new();
    let mut plan: Vec<(usize, usize)> = Vec::with_capacity(rows.len());

    for row in rows {
        let schema_index = match schemas.get_index_of(&row.schema) {
            Some(index) => index,
            None => {
                let document = orchestrator.load_schema(&row.schema).await?;
                schemas.insert_full(row.schema.clone(), document).0
            }
        };
        plan.push((schema_index, 0));
    }
    info!(schemas = schemas.len(), "schemas loaded");

    let mut fabrics: IndexMap<FabricKey, FabricInterfaceSet> = IndexMap::new();
    for (row, step) in rows.iter().zip(plan.iter_mut()) {
        let key = row.fabric_key();
        step.1 = match fabrics.get_index_of(&key) {
            Some(index) => index,
            None => {
                let fabric = orchestrator.load_fabric(&key).await?;
                fabrics.insert_full(key, fabric).0
            }
        };
    }
    info!(fabrics = fabrics.len(), "fabrics loaded");

    let mut applied = vec![0_usize; schemas.len()];
    for (row, &(schema_index, fabric_index)) in rows.iter().zip(&plan) {
        apply_row(&mut schemas[schema_index], row, &fabrics[fabric_index]).inspect_err(|err| {
            error!(line = row.line, schema = %row.schema, epg = %row.epg_name, "row rejected: {err}");
        })?;
        applied[schema_index] += 1;
    }
    info!(rows = rows.len(), "schemas patched");

    let mut report = BatchReport {
        rows_applied: rows.len(),
        schemas: Vec::with_capacity(schemas.len()),
    };

    for ((name, document), rows_applied) in schemas.into_iter().zip(applied) {
        let status = if options.dry_run {
            SubmitStatus::Skipped
        } else {
            match orchestrator.submit_schema(&document).await {
                Ok(()) => {
                    info!(schema = %name, "schema updated on orchestrator");
                    SubmitStatus::Updated
                }
                Err(err) => {
                    error!(schema = %name, "schema update failed: {err}");
                    SubmitStatus::Failed(err)
                }
            }
        };
        report.schemas.push(SchemaOutcome {
            name,
            rows_applied,
            status,
            document,
        });
    }

    Ok(report)
}
