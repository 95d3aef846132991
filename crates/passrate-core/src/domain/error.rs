//! Error taxonomy for the evaluation engine.
//!
//! `GenerationError` is per-draw and always recovered locally by the
//! candidate source — a failed draw shrinks the batch, it never aborts a
//! run. Sandbox faults do not appear here at all: the checker folds every
//! failure into an `ExecutionResult` instead of returning an error.

/// Errors produced while obtaining a single candidate from the generation
/// backend.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}")]
    BadStatus { status: u16 },

    #[error("malformed backend payload: {reason}")]
    MalformedPayload { reason: String },
}

/// Errors produced at the evaluation call boundary.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("invalid eval spec: {0}")]
    InvalidSpec(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for evaluation operations.
pub type Result<T> = std::result::Result<T, EvalError>;
