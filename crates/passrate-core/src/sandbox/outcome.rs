//! Typed outcomes for sandboxed execution.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Failure classification for a checked candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecErrorKind {
    /// The interpreter rejected the program before running it.
    SyntaxError,
    /// The program ran and failed (assertion, exception, non-zero exit).
    RuntimeError,
    /// The program exceeded the wall-clock limit and was killed.
    Timeout,
    /// The interpreter process could not be started.
    SpawnFailure,
}

impl ExecErrorKind {
    /// Classify an interpreter failure from its stderr text.
    ///
    /// CPython prints the exception class name on the last traceback line,
    /// so a substring check is sufficient here.
    pub fn classify_stderr(stderr: &str) -> Self {
        if stderr.contains("SyntaxError") || stderr.contains("IndentationError") {
            ExecErrorKind::SyntaxError
        } else {
            ExecErrorKind::RuntimeError
        }
    }

    /// Stable label used in error-count breakdowns.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecErrorKind::SyntaxError => "syntax_error",
            ExecErrorKind::RuntimeError => "runtime_error",
            ExecErrorKind::Timeout => "timeout",
            ExecErrorKind::SpawnFailure => "spawn_failure",
        }
    }
}

/// How a sandboxed execution ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The process exited on its own.
    Completed {
        /// Whether the exit status was zero.
        exit_success: bool,
        /// Captured stderr, for failure classification.
        stderr: String,
    },
    /// The process was killed at the deadline.
    TimedOut,
    /// The process never started.
    SpawnFailed { message: String },
}

/// Raw result of one [`Sandbox::run`](super::Sandbox::run) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub status: OutcomeStatus,
    pub duration: Duration,
}

/// Final per-candidate verdict. Produced once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionResult {
    /// Draw index of the checked candidate.
    pub candidate_index: usize,

    /// Strictly "process exited with status zero".
    pub passed: bool,

    /// Failure classification; `None` iff `passed`.
    pub error_kind: Option<ExecErrorKind>,

    /// Wall-clock execution time in milliseconds.
    pub duration_ms: u64,
}
