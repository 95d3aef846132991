//! Evaluation engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::SamplingConfig;

/// Configuration passed into the orchestrator at construction.
///
/// There is no process-wide mutable state: endpoint, timeouts, pool bounds
/// and interpreter all travel through this value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvalConfig {
    /// Base URL of the Ollama-compatible generation backend.
    pub endpoint: String,

    /// Per-request timeout for generation calls (milliseconds).
    pub request_timeout_ms: u64,

    /// Wall-clock limit for one sandboxed check (milliseconds).
    pub exec_timeout_ms: u64,

    /// Bound on concurrent generation draws per model.
    pub max_concurrent_draws: usize,

    /// Bound on concurrent sandboxed checks per model.
    pub max_concurrent_checks: usize,

    /// Interpreter command used by the process sandbox.
    pub interpreter: String,

    /// Sampling parameters sent with every generation request.
    pub sampling: SamplingConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            endpoint: std::env::var("PASSRATE_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            request_timeout_ms: 120_000,
            exec_timeout_ms: 3_000,
            max_concurrent_draws: 4,
            max_concurrent_checks: 4,
            interpreter: std::env::var("PASSRATE_INTERPRETER")
                .unwrap_or_else(|_| "python3".to_string()),
            sampling: SamplingConfig::default(),
        }
    }
}

impl EvalConfig {
    /// Create a config from environment variables.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Set the backend endpoint.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set the sandbox wall-clock limit.
    pub fn with_exec_timeout_ms(mut self, exec_timeout_ms: u64) -> Self {
        self.exec_timeout_ms = exec_timeout_ms;
        self
    }

    /// Set the sandbox interpreter command.
    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.interpreter = interpreter.to_string();
        self
    }

    /// Sandbox wall-clock limit as a [`Duration`].
    pub fn exec_timeout(&self) -> Duration {
        Duration::from_millis(self.exec_timeout_ms)
    }

    /// Generation request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let cfg = EvalConfig::default();
        assert!(!cfg.endpoint.is_empty());
        assert_eq!(cfg.exec_timeout_ms, 3_000);
        assert!(cfg.max_concurrent_draws >= 1);
        assert!(cfg.max_concurrent_checks >= 1);
        assert!(!cfg.interpreter.is_empty());
    }

    #[test]
    fn test_config_builders() {
        let cfg = EvalConfig::default()
            .with_endpoint("http://10.0.0.7:11434")
            .with_exec_timeout_ms(500)
            .with_interpreter("python3.12");
        assert_eq!(cfg.endpoint, "http://10.0.0.7:11434");
        assert_eq!(cfg.exec_timeout(), Duration::from_millis(500));
        assert_eq!(cfg.interpreter, "python3.12");
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let cfg = EvalConfig::default().with_endpoint("http://backend:11434");
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: EvalConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(cfg, back);
    }
}
