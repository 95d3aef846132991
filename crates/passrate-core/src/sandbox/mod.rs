//! Sandbox: isolated execution of untrusted generated programs.
//!
//! A [`Sandbox`] accepts program text plus a wall-clock timeout and returns
//! a typed [`ExecutionOutcome`] — never an error. The process-backed
//! implementation spawns a fresh interpreter per run and forcibly kills it
//! on timeout, so runaway candidates cannot stall a run or leak processes.
//!
//! **WARNING:** the default [`ProcessSandbox`] clears the environment and
//! closes stdin but applies no OS-level isolation (no seccomp, namespaces,
//! or cgroups). Do not run untrusted code in security-sensitive
//! environments without additional sandboxing.
//!
//! # Modules
//!
//! - [`outcome`] — `ExecutionOutcome`, `ExecutionResult`, `ExecErrorKind`
//! - [`process`] — `ProcessSandbox` (interpreter subprocess backend)
//! - [`checker`] — `check_candidate()` (fail-safe candidate/test check)

pub mod checker;
pub mod outcome;
pub mod process;

pub use checker::check_candidate;
pub use outcome::{ExecErrorKind, ExecutionOutcome, ExecutionResult, OutcomeStatus};
pub use process::ProcessSandbox;

use std::time::Duration;

use async_trait::async_trait;

/// Capability for running one untrusted program under a hard timeout.
///
/// Implementations must be infallible: every internal fault — spawn
/// failure, decode error, timeout — is reported through the outcome, never
/// raised. Each `run` owns an isolated execution with no state shared
/// across calls.
#[async_trait]
pub trait Sandbox: Send + Sync {
    /// Run `program` to completion or until `timeout` elapses.
    async fn run(&self, program: &str, timeout: Duration) -> ExecutionOutcome;
}
