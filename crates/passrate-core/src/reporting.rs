//! Reporting sinks for evaluation runs.
//!
//! Downstream consumers of [`EvaluationRun`] — a pretty-JSON artifact for
//! pipelines and a markdown summary for consoles and PR comments. No
//! on-disk format here is part of the core evaluation contract.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{EvaluationRecord, EvaluationRun};

/// Canonical results artifact written for pipelines and comparison tooling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalResultsArtifact {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub run_id: Uuid,
    pub prompt: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub records: Vec<EvaluationRecord>,
}

impl EvalResultsArtifact {
    /// Current artifact schema version.
    pub const SCHEMA_VERSION: &'static str = "1.0";

    /// Build the artifact from a finished run.
    pub fn from_run(run: &EvaluationRun, prompt: &str) -> Self {
        Self {
            schema_version: Self::SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            run_id: run.run_id,
            prompt: prompt.to_string(),
            started_at: run.started_at,
            finished_at: run.finished_at,
            records: run.records.values().cloned().collect(),
        }
    }
}

/// Write the results artifact in pretty JSON format.
pub fn write_results_json(path: &Path, artifact: &EvalResultsArtifact) -> Result<()> {
    let content = serde_json::to_string_pretty(artifact).context("serialize results artifact")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}

/// Render a markdown summary table, one row per model.
///
/// The column set is the union of requested k values across records, so
/// rendering is stable for a given run.
pub fn render_summary_md(run: &EvaluationRun) -> String {
    let k_columns: BTreeSet<usize> = run
        .records
        .values()
        .flat_map(|r| r.pass_at_k.keys().copied())
        .collect();

    let mut out = String::new();
    out.push_str("# pass@k Results\n\n");

    out.push_str("| model | samples | correct |");
    for k in &k_columns {
        out.push_str(&format!(" pass@{} |", k));
    }
    out.push('\n');

    out.push_str("|---|---|---|");
    for _ in &k_columns {
        out.push_str("---|");
    }
    out.push('\n');

    for record in run.records.values() {
        out.push_str(&format!(
            "| {} | {}/{} | {} |",
            record.model, record.effective_n, record.requested_n, record.correct_count
        ));
        for k in &k_columns {
            match record.pass_at_k.get(k) {
                Some(p) => out.push_str(&format!(" {:.4} |", p)),
                None => out.push_str(" — |"),
            }
        }
        out.push('\n');
    }

    out
}
