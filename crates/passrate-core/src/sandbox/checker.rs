//! Fail-safe correctness checking of candidates against a test case.

use std::time::Duration;

use crate::domain::Candidate;

use super::outcome::{ExecErrorKind, ExecutionResult, OutcomeStatus};
use super::Sandbox;

/// Check one candidate against a test case.
///
/// The candidate text and test text are concatenated into a single program
/// and run in the sandbox; passing means the process exited with status
/// zero. This function cannot fail: any fault — unparsable candidate,
/// spawn failure, timeout, runtime error — folds into a result with
/// `passed = false` and a classified error kind. A single malformed or
/// hostile candidate never aborts the run.
pub async fn check_candidate(
    sandbox: &dyn Sandbox,
    candidate: &Candidate,
    test_case: &str,
    timeout: Duration,
) -> ExecutionResult {
    let program = format!("{}\n{}", candidate.text, test_case);
    let outcome = sandbox.run(&program, timeout).await;
    let duration_ms = outcome.duration.as_millis() as u64;

    let (passed, error_kind) = match outcome.status {
        OutcomeStatus::Completed {
            exit_success: true, ..
        } => (true, None),
        OutcomeStatus::Completed {
            exit_success: false,
            stderr,
        } => (false, Some(ExecErrorKind::classify_stderr(&stderr))),
        OutcomeStatus::TimedOut => (false, Some(ExecErrorKind::Timeout)),
        OutcomeStatus::SpawnFailed { .. } => (false, Some(ExecErrorKind::SpawnFailure)),
    };

    ExecutionResult {
        candidate_index: candidate.index,
        passed,
        error_kind,
        duration_ms,
    }
}
