//! Text generation backend
//!
//! Stages only see the [`TextGenerator`] trait. The default implementation
//! talks to an Ollama server (`POST /api/generate`, non-streaming).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use crate::config::LlmConfig;
use crate::http::build_client;
use crate::{PlannerError, Result};

/// Stateless prompt-in, text-out generation
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama `/api/generate` client
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    #[instrument(name = "generate", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let start_time = Instant::now();
        debug!("Sending prompt to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| {
                error!("Text generator unreachable: {}", e);
                PlannerError::generation(format!("request to {url} failed: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Text generator returned HTTP {}", status);
            return Err(PlannerError::generation(format!(
                "model '{}' returned {status}: {body}",
                self.model
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            PlannerError::generation(format!("unreadable generator response: {e}"))
        })?;

        info!(
            "Generated {} characters in {:.3}s",
            body.response.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(body.response)
    }
}
