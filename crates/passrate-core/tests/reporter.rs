//! Reporting tests: artifact persistence and markdown rendering from a
//! full orchestrated run.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use passrate_core::domain::{Candidate, SamplingConfig};
use passrate_core::sandbox::{ExecutionOutcome, OutcomeStatus, Sandbox};
use passrate_core::{
    render_summary_md, write_results_json, CandidateSource, EvalConfig, EvalResultsArtifact,
    EvalSpec, Evaluator,
};

struct ScriptedSource {
    batches: HashMap<String, Vec<&'static str>>,
}

#[async_trait]
impl CandidateSource for ScriptedSource {
    async fn generate(
        &self,
        model: &str,
        _prompt: &str,
        _sampling: &SamplingConfig,
        n: usize,
    ) -> Vec<Candidate> {
        self.batches
            .get(model)
            .map(|texts| {
                texts
                    .iter()
                    .take(n)
                    .enumerate()
                    .map(|(i, text)| Candidate::new(model, i, text.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

struct MarkerSandbox;

#[async_trait]
impl Sandbox for MarkerSandbox {
    async fn run(&self, program: &str, _timeout: Duration) -> ExecutionOutcome {
        ExecutionOutcome {
            status: OutcomeStatus::Completed {
                exit_success: program.starts_with("ok\n"),
                stderr: String::new(),
            },
            duration: Duration::from_millis(1),
        }
    }
}

async fn run_two_models() -> passrate_core::EvaluationRun {
    let mut batches = HashMap::new();
    batches.insert("strong".to_string(), vec!["ok", "ok", "ok", "bad"]);
    batches.insert("weak".to_string(), vec!["bad", "bad", "ok", "bad"]);

    let evaluator = Evaluator::new(
        EvalConfig::default(),
        Arc::new(ScriptedSource { batches }),
        Arc::new(MarkerSandbox),
    );

    let spec = EvalSpec::new("def add(a, b):", "assert add(2, 3) == 5")
        .with_model("strong")
        .with_model("weak")
        .with_samples(4)
        .with_k_values(vec![1, 4]);

    evaluator.evaluate(&spec).await.unwrap()
}

#[tokio::test]
async fn test_artifact_written_from_orchestrated_run() {
    let run = run_two_models().await;
    let artifact = EvalResultsArtifact::from_run(&run, "def add(a, b):");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("results.json");
    write_results_json(&path, &artifact).expect("write artifact");

    let raw = std::fs::read_to_string(&path).expect("read back");
    let back: EvalResultsArtifact = serde_json::from_str(&raw).expect("deserialize");

    assert_eq!(back.schema_version, EvalResultsArtifact::SCHEMA_VERSION);
    assert_eq!(back.run_id, run.run_id);
    assert_eq!(back.records.len(), 2);

    let strong = back
        .records
        .iter()
        .find(|r| r.model == "strong")
        .expect("strong record");
    assert_eq!(strong.correct_count, 3);
    assert_eq!(strong.pass_at_k[&4], 1.0);
}

#[tokio::test]
async fn test_markdown_summary_covers_every_model_and_k() {
    let run = run_two_models().await;
    let md = render_summary_md(&run);

    assert!(md.contains("| model | samples | correct | pass@1 | pass@4 |"));
    assert!(md.contains("| strong | 4/4 | 3 |"));
    assert!(md.contains("| weak | 4/4 | 1 |"));
    assert!(md.contains(" 0.7500 |")); // strong pass@1
    assert!(md.contains(" 0.2500 |")); // weak pass@1
}
