//! Candidate generation against a text-generation backend.
//!
//! A [`CandidateSource`] yields up to n independent completions for a
//! (model, prompt, sampling) triple. Per-draw failures are recovered
//! locally — a failed draw shrinks the batch instead of aborting it or
//! fabricating a placeholder — so callers see only the candidates that
//! were actually produced.

pub mod ollama;

pub use ollama::OllamaClient;

use async_trait::async_trait;

use crate::domain::{Candidate, SamplingConfig};

/// Source of independent candidate completions.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Request `n` completions for `prompt` from `model`.
    ///
    /// Returns at most `n` candidates; the realized count is the batch's
    /// `effective_n`. Draws are independent — no caching of identical
    /// prompts, no deduplication, no retry of failed draws.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        sampling: &SamplingConfig,
        n: usize,
    ) -> Vec<Candidate>;
}
