//! Structured observability hooks for evaluation run lifecycle events.
//!
//! Events are emitted at `info!`/`warn!` level through the global tracing
//! subscriber. The orchestrator additionally instruments each run with a
//! `passrate.run` span carrying the run id.

use tracing::{info, warn};

/// Emit event: evaluation run started.
pub fn emit_run_started(run_id: &str, model_count: usize, n: usize) {
    info!(event = "run.started", run_id = %run_id, model_count = model_count, n = n);
}

/// Emit event: evaluation run finished.
pub fn emit_run_finished(run_id: &str, duration_ms: u64, model_count: usize) {
    info!(
        event = "run.finished",
        run_id = %run_id,
        duration_ms = duration_ms,
        model_count = model_count,
    );
}

/// Emit event: per-model evaluation started.
pub fn emit_model_started(model: &str, requested_n: usize) {
    info!(event = "model.started", model = %model, requested_n = requested_n);
}

/// Emit event: per-model evaluation finished with realized counts.
pub fn emit_model_finished(model: &str, effective_n: usize, correct_count: usize) {
    info!(
        event = "model.finished",
        model = %model,
        effective_n = effective_n,
        correct_count = correct_count,
    );
}

/// Emit event: one generation draw failed and was skipped (warning level).
pub fn emit_draw_failed(model: &str, index: usize, error: &dyn std::fmt::Display) {
    warn!(event = "draw.failed", model = %model, index = index, error = %error);
}

/// Emit event: one candidate was checked.
pub fn emit_candidate_checked(model: &str, index: usize, passed: bool, duration_ms: u64) {
    info!(
        event = "candidate.checked",
        model = %model,
        index = index,
        passed = passed,
        duration_ms = duration_ms,
    );
}
