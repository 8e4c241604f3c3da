//! OpenWeatherMap 5 day / 3 hour forecast

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::WeatherProvider;
use crate::config::WeatherConfig;
use crate::http::{build_client, redact};
use crate::{PlannerError, Result};

pub struct OpenWeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    units: String,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_seconds)?,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units.clone(),
        })
    }

    fn forecast_url(&self, city: &str, api_key: &str) -> String {
        format!(
            "{}/forecast?q={}&appid={}&units={}",
            self.base_url,
            urlencoding::encode(city),
            urlencoding::encode(api_key),
            urlencoding::encode(&self.units)
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    /// Error statuses still carry a JSON body (`{"cod":"404",...}`), which is
    /// returned as-is for the digest to reject.
    #[instrument(name = "weather_forecast", skip(self))]
    async fn forecast(&self, city: &str) -> Result<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| PlannerError::provider("OpenWeatherMap API key is not configured"))?;

        let url = self.forecast_url(city, api_key);
        debug!("OpenWeatherMap request URL: {}", redact(&url, Some(api_key)));
        let start_time = Instant::now();

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let payload: Value = response.json().await?;

        if status.is_success() {
            info!(
                "Retrieved forecast for '{}' in {:.3}s",
                city,
                start_time.elapsed().as_secs_f64()
            );
        } else {
            warn!("OpenWeatherMap answered HTTP {} for '{}'", status, city);
        }
        Ok(payload)
    }
}
