//! External data providers
//!
//! Each concern sits behind a small async trait so stages can be driven by
//! in-memory fakes in tests:
//! - Attraction search (SerpAPI): free-text results for a query
//! - Lodging search (Tavily): structured hits for a query
//! - Weather (OpenWeatherMap): raw multi-point forecast payload for a city
//! - Currency (ExchangeRate-API): rate table rooted at a base currency

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::config::PlannerConfig;
use crate::models::{LodgingResult, RateTable};

pub mod exchangerate;
pub mod openweather;
pub mod serpapi;
pub mod tavily;

pub use exchangerate::ExchangeRateClient;
pub use openweather::OpenWeatherClient;
pub use serpapi::SerpApiClient;
pub use tavily::TavilyClient;

#[async_trait]
pub trait AttractionSearch: Send + Sync {
    /// Provider-formatted result text; empty when nothing was found
    async fn search(&self, query: &str) -> Result<String>;
}

#[async_trait]
pub trait LodgingSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<LodgingResult>>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Raw forecast payload; structure is checked by the consumer
    async fn forecast(&self, city: &str) -> Result<Value>;
}

#[async_trait]
pub trait CurrencyProvider: Send + Sync {
    async fn rates(&self, base_currency: &str) -> Result<RateTable>;
}

/// The four providers a pipeline run needs
pub struct Providers {
    pub attractions: Box<dyn AttractionSearch>,
    pub lodging: Box<dyn LodgingSearch>,
    pub weather: Box<dyn WeatherProvider>,
    pub currency: Box<dyn CurrencyProvider>,
}

impl Providers {
    /// Build the HTTP-backed providers from configuration
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        Ok(Self {
            attractions: Box::new(SerpApiClient::new(&config.search)?),
            lodging: Box::new(TavilyClient::new(&config.lodging)?),
            weather: Box::new(OpenWeatherClient::new(&config.weather)?),
            currency: Box::new(ExchangeRateClient::new(&config.currency)?),
        })
    }
}
