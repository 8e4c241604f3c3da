//! ExchangeRate-API latest rates

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use super::CurrencyProvider;
use crate::config::CurrencyConfig;
use crate::http::{build_client, redact};
use crate::models::RateTable;
use crate::{PlannerError, Result};

pub struct ExchangeRateClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl ExchangeRateClient {
    pub fn new(config: &CurrencyConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CurrencyProvider for ExchangeRateClient {
    /// The API reports failures in the `result` field, so the table is
    /// returned even for error statuses and the caller checks `is_success()`.
    #[instrument(name = "currency_rates", skip(self))]
    async fn rates(&self, base_currency: &str) -> Result<RateTable> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PlannerError::provider("ExchangeRate-API key is not configured"))?;

        let url = format!(
            "{}/{}/latest/{}",
            self.base_url,
            urlencoding::encode(api_key),
            urlencoding::encode(base_currency)
        );
        debug!("ExchangeRate-API request URL: {}", redact(&url, Some(api_key)));

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let table: RateTable = response.json().await?;

        if table.is_success() {
            info!(
                "Fetched {} rates for {}",
                table.rates.as_ref().map_or(0, |r| r.len()),
                base_currency
            );
        } else {
            warn!(
                "ExchangeRate-API reported '{}' (HTTP {})",
                table.status, status
            );
        }
        Ok(table)
    }
}
