//! SerpAPI attraction search

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::AttractionSearch;
use crate::config::SearchConfig;
use crate::http::{build_client, ensure_success, redact};
use crate::{PlannerError, Result};

const SERVICE: &str = "SerpAPI";

pub struct SerpApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl AttractionSearch for SerpApiClient {
    #[instrument(name = "attraction_search", skip(self))]
    async fn search(&self, query: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PlannerError::provider("SerpAPI key is not configured"))?;

        let url = format!(
            "{}/search.json?engine=google&q={}&api_key={}",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(api_key)
        );
        debug!("SerpAPI request URL: {}", redact(&url, Some(api_key)));

        let response = self.client.get(&url).send().await?;
        let payload: Value = ensure_success(response, SERVICE).await?.json().await?;

        if let Some(message) = payload.get("error").and_then(Value::as_str) {
            return Err(PlannerError::provider(format!("{SERVICE}: {message}")));
        }

        let text = results_to_text(&payload);
        info!("SerpAPI returned {} characters of results", text.len());
        Ok(text)
    }
}

/// Flatten the interesting parts of a SerpAPI response into plain text.
///
/// Answer box and knowledge graph come first, then one line per organic result.
fn results_to_text(payload: &Value) -> String {
    let mut lines = Vec::new();

    if let Some(answer_box) = payload.get("answer_box") {
        for key in ["answer", "snippet"] {
            if let Some(text) = answer_box.get(key).and_then(Value::as_str) {
                lines.push(text.to_string());
            }
        }
    }

    if let Some(description) = payload
        .pointer("/knowledge_graph/description")
        .and_then(Value::as_str)
    {
        lines.push(description.to_string());
    }

    if let Some(results) = payload.get("organic_results").and_then(Value::as_array) {
        for result in results {
            let title = result.get("title").and_then(Value::as_str);
            let snippet = result.get("snippet").and_then(Value::as_str);
            match (title, snippet) {
                (Some(title), Some(snippet)) => lines.push(format!("{title}: {snippet}")),
                (None, Some(snippet)) => lines.push(snippet.to_string()),
                _ => {}
            }
        }
    }

    lines.join("\n")
}
