//! Tavily lodging search

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::LodgingSearch;
use crate::config::LodgingConfig;
use crate::http::{build_client, ensure_success};
use crate::models::LodgingResult;
use crate::{PlannerError, Result};

const SERVICE: &str = "Tavily";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<LodgingResult>,
}

pub struct TavilyClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl TavilyClient {
    pub fn new(config: &LodgingConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LodgingSearch for TavilyClient {
    #[instrument(name = "lodging_search", skip(self))]
    async fn search(&self, query: &str) -> Result<Vec<LodgingResult>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PlannerError::provider("Tavily API key is not configured"))?;

        let response = self
            .client
            .post(format!("{}/search", self.base_url))
            .json(&SearchRequest { api_key, query })
            .send()
            .await?;

        let body: SearchResponse = ensure_success(response, SERVICE).await?.json().await?;
        info!("Tavily returned {} results", body.results.len());
        Ok(body.results)
    }
}
