//! Evaluation specs and the per-model records a run produces.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::EvalError;

/// Specification of one evaluation run: a fixed prompt/test pair, the
/// models to evaluate, the number of candidates per model, and the k
/// values to report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalSpec {
    /// Prompt sent to the generation backend.
    pub prompt: String,

    /// Executable assertion text appended to each candidate.
    pub test_case: String,

    /// Models to evaluate, each independently.
    pub models: Vec<String>,

    /// Candidates to request per model.
    pub n: usize,

    /// k values to report. Every requested k is evaluated, including
    /// k greater than the realized sample count.
    pub k_values: Vec<usize>,
}

impl EvalSpec {
    /// Create a spec with the given prompt/test pair.
    pub fn new(prompt: &str, test_case: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            test_case: test_case.to_string(),
            models: Vec::new(),
            n: 10,
            k_values: vec![1, 10, 100],
        }
    }

    /// Add a model to evaluate.
    pub fn with_model(mut self, model: &str) -> Self {
        self.models.push(model.to_string());
        self
    }

    /// Set the number of candidates per model.
    pub fn with_samples(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Set the k values to report.
    pub fn with_k_values(mut self, k_values: Vec<usize>) -> Self {
        self.k_values = k_values;
        self
    }

    /// Validate the spec at the evaluation call boundary.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.models.is_empty() {
            return Err(EvalError::InvalidSpec("model list is empty".into()));
        }
        if self.n == 0 {
            return Err(EvalError::InvalidSpec("n must be at least 1".into()));
        }
        if self.k_values.is_empty() {
            return Err(EvalError::InvalidSpec("k_values is empty".into()));
        }
        if self.k_values.iter().any(|&k| k == 0) {
            return Err(EvalError::InvalidSpec(
                "k values must be positive integers".into(),
            ));
        }
        Ok(())
    }
}

/// Per-model outcome of one evaluation run.
///
/// Invariant: `correct_count <= effective_n <= requested_n`. A model whose
/// generation failed entirely is still represented, with `effective_n = 0`
/// and every pass@k at 0.0 — callers distinguish "not evaluated" from
/// "evaluated at 0%" via `effective_n`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationRecord {
    /// Model this record belongs to.
    pub model: String,

    /// Candidates requested from the backend.
    pub requested_n: usize,

    /// Candidates actually obtained (failed draws shrink the batch).
    pub effective_n: usize,

    /// Candidates that passed the test case.
    pub correct_count: usize,

    /// pass@k estimate for every requested k, each in [0, 1].
    pub pass_at_k: BTreeMap<usize, f64>,

    /// Failure breakdown by error kind, over checked candidates.
    pub error_counts: BTreeMap<String, usize>,

    /// Wall-clock time spent on this model (generation + checking).
    pub duration_ms: u64,
}

/// Envelope for a whole run: one record per requested model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluationRun {
    /// Identifier for this run (logging and artifact naming only).
    pub run_id: Uuid,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run finished.
    pub finished_at: DateTime<Utc>,

    /// Records keyed by model, in model-name order.
    pub records: BTreeMap<String, EvaluationRecord>,
}
