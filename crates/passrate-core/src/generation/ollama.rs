//! Ollama generation backend client.
//!
//! Speaks the `/api/generate` endpoint of an Ollama-compatible server.
//! Each draw is one non-streaming POST; the n draws for a batch run
//! concurrently under a bounded pool.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tracing::warn;

use crate::config::EvalConfig;
use crate::domain::{Candidate, GenerationError, SamplingConfig};
use crate::obs::emit_draw_failed;

use super::CandidateSource;

/// Request body for `/api/generate`.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    options: GenerateOptions,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    top_k: u32,
    top_p: f64,
}

impl From<&SamplingConfig> for GenerateOptions {
    fn from(sampling: &SamplingConfig) -> Self {
        Self {
            temperature: sampling.temperature,
            top_k: sampling.top_k,
            top_p: sampling.top_p,
        }
    }
}

/// Response body for a non-streaming `/api/generate` call. Only the
/// completion field matters here.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// HTTP client for an Ollama-compatible generation backend.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    endpoint: String,
    http: reqwest::Client,
    max_concurrent_draws: usize,
}

impl OllamaClient {
    /// Create a client from evaluation configuration.
    pub fn new(config: &EvalConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("passrate/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()
            .expect("failed to build HTTP client");

        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            http,
            max_concurrent_draws: config.max_concurrent_draws.max(1),
        }
    }

    /// Backend URL this client posts to.
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }

    /// Perform one independent draw.
    async fn draw(
        &self,
        model: &str,
        prompt: &str,
        sampling: &SamplingConfig,
    ) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            model,
            prompt,
            options: sampling.into(),
            stream: false,
        };

        let response = self.http.post(self.generate_url()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::BadStatus {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let payload: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| GenerationError::MalformedPayload {
                reason: e.to_string(),
            })?;

        payload
            .response
            .ok_or_else(|| GenerationError::MalformedPayload {
                reason: "missing `response` field".to_string(),
            })
    }
}

#[async_trait]
impl CandidateSource for OllamaClient {
    /// A draw that fails — unreachable backend, non-success status,
    /// malformed payload — is logged and skipped: it produced no
    /// candidate, and the batch continues without it.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        sampling: &SamplingConfig,
        n: usize,
    ) -> Vec<Candidate> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent_draws));
        let mut tasks = Vec::with_capacity(n);

        for index in 0..n {
            let client = self.clone();
            let semaphore = Arc::clone(&semaphore);
            let model = model.to_string();
            let prompt = prompt.to_string();
            let sampling = *sampling;

            tasks.push(tokio::spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("draw semaphore never closed");

                match client.draw(&model, &prompt, &sampling).await {
                    Ok(text) => Some(Candidate::new(&model, index, text)),
                    Err(err) => {
                        emit_draw_failed(&model, index, &err);
                        None
                    }
                }
            }));
        }

        let mut candidates = Vec::new();
        for task in tasks {
            match task.await {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "draw task panicked"),
            }
        }
        candidates
    }
}
