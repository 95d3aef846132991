//! Evaluation orchestration: generate, check, estimate, per model.
//!
//! The [`Evaluator`] is constructed from explicit configuration plus
//! injected [`CandidateSource`] and [`Sandbox`] implementations. Models are
//! evaluated independently — a model whose generation fails entirely still
//! yields an explicit zero record and never aborts the models after it.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::{warn, Instrument};
use uuid::Uuid;

use crate::config::EvalConfig;
use crate::domain::{EvalSpec, EvaluationRecord, EvaluationRun, Result};
use crate::estimator::pass_at_k_all;
use crate::generation::{CandidateSource, OllamaClient};
use crate::obs::{
    emit_candidate_checked, emit_model_finished, emit_model_started, emit_run_finished,
    emit_run_started,
};
use crate::sandbox::{check_candidate, ProcessSandbox, Sandbox};

/// Drives candidate generation, sandboxed checking, and estimation for one
/// or more models.
pub struct Evaluator {
    config: EvalConfig,
    source: Arc<dyn CandidateSource>,
    sandbox: Arc<dyn Sandbox>,
}

impl Evaluator {
    /// Create an evaluator with explicit source and sandbox backends.
    pub fn new(
        config: EvalConfig,
        source: Arc<dyn CandidateSource>,
        sandbox: Arc<dyn Sandbox>,
    ) -> Self {
        Self {
            config,
            source,
            sandbox,
        }
    }

    /// Create an evaluator with the default backends: an Ollama client and
    /// an interpreter-subprocess sandbox, both wired from `config`.
    pub fn from_config(config: EvalConfig) -> Self {
        let source = Arc::new(OllamaClient::new(&config));
        let sandbox = Arc::new(ProcessSandbox::new(&config.interpreter));
        Self::new(config, source, sandbox)
    }

    /// Run one evaluation: every model in the spec, every requested k.
    ///
    /// Returns a record per requested model. The only error path is an
    /// invalid spec — generation and execution failures are absorbed into
    /// the per-model records.
    pub async fn evaluate(&self, spec: &EvalSpec) -> Result<EvaluationRun> {
        spec.validate()?;

        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("passrate.run", run_id = %run_id);

        async {
            let started_at = Utc::now();
            let start = Instant::now();
            emit_run_started(&run_id.to_string(), spec.models.len(), spec.n);

            let mut records = BTreeMap::new();
            for model in &spec.models {
                let record = self.evaluate_model(model, spec).await;
                records.insert(model.clone(), record);
            }

            emit_run_finished(
                &run_id.to_string(),
                start.elapsed().as_millis() as u64,
                records.len(),
            );

            Ok(EvaluationRun {
                run_id,
                started_at,
                finished_at: Utc::now(),
                records,
            })
        }
        .instrument(span)
        .await
    }

    /// Evaluate a single model. Infallible: total generation failure yields
    /// a zero record with `effective_n = 0`.
    async fn evaluate_model(&self, model: &str, spec: &EvalSpec) -> EvaluationRecord {
        let start = Instant::now();
        emit_model_started(model, spec.n);

        let candidates = self
            .source
            .generate(model, &spec.prompt, &self.config.sampling, spec.n)
            .await;
        let effective_n = candidates.len();

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_checks.max(1)));
        let timeout = self.config.exec_timeout();
        let test_case = Arc::new(spec.test_case.clone());

        let mut tasks = Vec::with_capacity(effective_n);
        for candidate in candidates {
            let sandbox = Arc::clone(&self.sandbox);
            let semaphore = Arc::clone(&semaphore);
            let test_case = Arc::clone(&test_case);
            let model = model.to_string();

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("check semaphore never closed");
                let result = check_candidate(sandbox.as_ref(), &candidate, &test_case, timeout).await;
                emit_candidate_checked(&model, result.candidate_index, result.passed, result.duration_ms);
                result
            }));
        }

        let mut correct_count = 0;
        let mut error_counts: BTreeMap<String, usize> = BTreeMap::new();
        for joined in join_all(tasks).await {
            match joined {
                Ok(result) => {
                    if result.passed {
                        correct_count += 1;
                    } else if let Some(kind) = result.error_kind {
                        *error_counts.entry(kind.as_str().to_string()).or_insert(0) += 1;
                    }
                }
                Err(e) => warn!(model = %model, error = %e, "check task panicked"),
            }
        }

        let pass_at_k = pass_at_k_all(effective_n, correct_count, &spec.k_values);
        emit_model_finished(model, effective_n, correct_count);

        EvaluationRecord {
            model: model.to_string(),
            requested_n: spec.n,
            effective_n,
            correct_count,
            pass_at_k,
            error_counts,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, EvalError, SamplingConfig};
    use crate::sandbox::{ExecutionOutcome, OutcomeStatus};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Yields `n` canned candidates, alternating correct and broken.
    struct AlternatingSource;

    #[async_trait]
    impl CandidateSource for AlternatingSource {
        async fn generate(
            &self,
            model: &str,
            _prompt: &str,
            _sampling: &SamplingConfig,
            n: usize,
        ) -> Vec<Candidate> {
            (0..n)
                .map(|i| {
                    let text = if i % 2 == 0 { "GOOD" } else { "BAD" };
                    Candidate::new(model, i, text.to_string())
                })
                .collect()
        }
    }

    /// Passes programs whose candidate half says GOOD.
    struct MarkerSandbox;

    #[async_trait]
    impl Sandbox for MarkerSandbox {
        async fn run(&self, program: &str, _timeout: Duration) -> ExecutionOutcome {
            let exit_success = program.starts_with("GOOD");
            ExecutionOutcome {
                status: OutcomeStatus::Completed {
                    exit_success,
                    stderr: if exit_success {
                        String::new()
                    } else {
                        "AssertionError".to_string()
                    },
                },
                duration: Duration::from_millis(1),
            }
        }
    }

    fn evaluator() -> Evaluator {
        Evaluator::new(
            EvalConfig::default(),
            Arc::new(AlternatingSource),
            Arc::new(MarkerSandbox),
        )
    }

    #[tokio::test]
    async fn test_counts_fold_into_estimates() {
        let spec = EvalSpec::new("def add(a, b):", "assert add(2, 3) == 5")
            .with_model("m")
            .with_samples(10)
            .with_k_values(vec![1, 10]);

        let run = evaluator().evaluate(&spec).await.unwrap();
        let record = &run.records["m"];

        assert_eq!(record.requested_n, 10);
        assert_eq!(record.effective_n, 10);
        assert_eq!(record.correct_count, 5);
        assert!((record.pass_at_k[&1] - 0.5).abs() < 1e-12);
        assert_eq!(record.pass_at_k[&10], 1.0);
        assert_eq!(record.error_counts["runtime_error"], 5);
    }

    #[tokio::test]
    async fn test_every_requested_k_is_present() {
        let spec = EvalSpec::new("p", "t")
            .with_model("m")
            .with_samples(4)
            .with_k_values(vec![1, 10, 100]);

        let run = evaluator().evaluate(&spec).await.unwrap();
        let record = &run.records["m"];

        // k=10 and k=100 exceed n=4: degenerate policy, not omission.
        assert_eq!(record.pass_at_k.len(), 3);
        assert_eq!(record.pass_at_k[&10], 1.0);
        assert_eq!(record.pass_at_k[&100], 1.0);
    }

    #[tokio::test]
    async fn test_invalid_spec_is_a_typed_error() {
        let spec = EvalSpec::new("p", "t"); // no models
        match evaluator().evaluate(&spec).await {
            Err(EvalError::InvalidSpec(_)) => {}
            other => panic!("expected InvalidSpec, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_record_per_model_in_name_order() {
        let spec = EvalSpec::new("p", "t")
            .with_model("zeta")
            .with_model("alpha")
            .with_samples(2)
            .with_k_values(vec![1]);

        let run = evaluator().evaluate(&spec).await.unwrap();
        let names: Vec<_> = run.records.keys().cloned().collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
