//! Interpreter-subprocess sandbox backend.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::outcome::{ExecutionOutcome, OutcomeStatus};
use super::Sandbox;

/// Runs programs with `<interpreter> -c <program>` in a fresh process per
/// call.
///
/// Environment variables are cleared except PATH (needed to locate the
/// interpreter), stdin is closed, and the child is spawned with
/// `kill_on_drop` so a timed-out process is reliably SIGKILLed rather than
/// abandoned.
#[derive(Debug, Clone)]
pub struct ProcessSandbox {
    interpreter: String,
}

impl Default for ProcessSandbox {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl ProcessSandbox {
    /// Create a sandbox using the given interpreter command.
    pub fn new(interpreter: &str) -> Self {
        Self {
            interpreter: interpreter.to_string(),
        }
    }

    /// Interpreter command this sandbox spawns.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

#[async_trait]
impl Sandbox for ProcessSandbox {
    async fn run(&self, program: &str, timeout: Duration) -> ExecutionOutcome {
        let start = Instant::now();

        let path_env =
            std::env::var("PATH").unwrap_or_else(|_| "/usr/bin:/usr/local/bin:/bin".to_string());

        let spawned = Command::new(&self.interpreter)
            .arg("-c")
            .arg(program)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env_clear()
            .env("PATH", &path_env)
            .kill_on_drop(true)
            .spawn();

        let child = match spawned {
            Ok(child) => child,
            Err(e) => {
                return ExecutionOutcome {
                    status: OutcomeStatus::SpawnFailed {
                        message: e.to_string(),
                    },
                    duration: start.elapsed(),
                }
            }
        };

        // On timeout the in-flight future is dropped, which drops the child
        // and delivers SIGKILL via kill_on_drop.
        let waited = tokio::time::timeout(timeout, child.wait_with_output()).await;
        let duration = start.elapsed();

        match waited {
            Ok(Ok(output)) => {
                let exit_success = output.status.success();
                let stderr = String::from_utf8_lossy(&output.stderr).to_string();
                debug!(
                    exit_success,
                    duration_ms = duration.as_millis() as u64,
                    "sandboxed program finished"
                );
                ExecutionOutcome {
                    status: OutcomeStatus::Completed {
                        exit_success,
                        stderr,
                    },
                    duration,
                }
            }
            Ok(Err(e)) => ExecutionOutcome {
                status: OutcomeStatus::SpawnFailed {
                    message: e.to_string(),
                },
                duration,
            },
            Err(_elapsed) => {
                debug!(
                    timeout_ms = timeout.as_millis() as u64,
                    "sandboxed program killed at deadline"
                );
                ExecutionOutcome {
                    status: OutcomeStatus::TimedOut,
                    duration,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interpreter_is_python3() {
        assert_eq!(ProcessSandbox::default().interpreter(), "python3");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_an_outcome_not_an_error() {
        let sandbox = ProcessSandbox::new("definitely-not-an-interpreter-xyz");
        let outcome = sandbox.run("print(1)", Duration::from_secs(2)).await;
        match outcome.status {
            OutcomeStatus::SpawnFailed { message } => assert!(!message.is_empty()),
            other => panic!("expected SpawnFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exit_zero_is_success() {
        let sandbox = ProcessSandbox::default();
        let outcome = sandbox.run("x = 1 + 1", Duration::from_secs(5)).await;
        match outcome.status {
            OutcomeStatus::Completed { exit_success, .. } => assert!(exit_success),
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        let sandbox = ProcessSandbox::default();
        let outcome = sandbox
            .run("raise ValueError('boom')", Duration::from_secs(5))
            .await;
        match outcome.status {
            OutcomeStatus::Completed {
                exit_success,
                stderr,
            } => {
                assert!(!exit_success);
                assert!(stderr.contains("ValueError"));
            }
            other => panic!("expected Completed, got {:?}", other),
        }
    }
}
