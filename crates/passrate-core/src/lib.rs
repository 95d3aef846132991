//! Passrate Core Library
//!
//! pass@k evaluation for code-generating models: candidate generation
//! against an Ollama-compatible backend, sandboxed correctness checking,
//! and the unbiased combinatorial estimator.

pub mod config;
pub mod domain;
pub mod estimator;
pub mod generation;
pub mod obs;
pub mod orchestrator;
pub mod reporting;
pub mod sandbox;
pub mod telemetry;

pub use config::EvalConfig;

pub use domain::{
    Candidate, EvalError, EvalSpec, EvaluationRecord, EvaluationRun, GenerationError, Result,
    SamplingConfig,
};

pub use estimator::{pass_at_k, pass_at_k_all};

pub use generation::{CandidateSource, OllamaClient};

pub use orchestrator::Evaluator;

pub use reporting::{render_summary_md, write_results_json, EvalResultsArtifact};

pub use sandbox::{
    check_candidate, ExecErrorKind, ExecutionOutcome, ExecutionResult, OutcomeStatus,
    ProcessSandbox, Sandbox,
};

pub use obs::{
    emit_candidate_checked, emit_draw_failed, emit_model_finished, emit_model_started,
    emit_run_finished, emit_run_started,
};
pub use telemetry::init_tracing;

/// Passrate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
