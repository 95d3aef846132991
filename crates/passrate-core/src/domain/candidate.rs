//! Candidate completions and the sampling configuration that produced them.

use serde::{Deserialize, Serialize};

/// One generated completion, tagged with its source model and draw index.
///
/// Candidates are created by a [`CandidateSource`](crate::generation::CandidateSource),
/// checked once against a test case, and discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// Model that produced this completion.
    pub model: String,

    /// Index of the draw within the batch (0-based).
    ///
    /// Indices are not necessarily contiguous: failed draws leave gaps.
    pub index: usize,

    /// The completion text.
    pub text: String,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(model: &str, index: usize, text: String) -> Self {
        Self {
            model: model.to_string(),
            index,
            text,
        }
    }
}

/// Sampling parameters sent with every generation request.
///
/// The defaults induce stochastic, non-deduplicated outputs — each of the
/// n draws for a model is an independent sample.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SamplingConfig {
    /// Softmax temperature.
    pub temperature: f64,

    /// Top-k truncation.
    pub top_k: u32,

    /// Nucleus sampling threshold.
    pub top_p: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 50,
            top_p: 0.95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_new() {
        let c = Candidate::new("codellama:code", 3, "def add(a, b):\n    return a + b".into());
        assert_eq!(c.model, "codellama:code");
        assert_eq!(c.index, 3);
        assert!(c.text.contains("return a + b"));
    }

    #[test]
    fn test_sampling_config_default() {
        let cfg = SamplingConfig::default();
        assert_eq!(cfg.temperature, 0.7);
        assert_eq!(cfg.top_k, 50);
        assert_eq!(cfg.top_p, 0.95);
    }

    #[test]
    fn test_sampling_config_serde_roundtrip() {
        let cfg = SamplingConfig {
            temperature: 0.2,
            top_k: 10,
            top_p: 0.9,
        };
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: SamplingConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(cfg, back);
    }
}
