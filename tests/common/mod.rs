//! In-memory generator and provider fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use travel_planner::models::{LodgingResult, RateTable};
use travel_planner::providers::{
    AttractionSearch, CurrencyProvider, LodgingSearch, Providers, WeatherProvider,
};
use travel_planner::{PlannerError, Result, TextGenerator};

/// Replays canned responses in order and records every prompt it receives
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn new(responses: &[&str]) -> Self {
        Self {
            responses: Mutex::new(responses.iter().map(|r| r.to_string()).collect()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompts(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.prompts)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PlannerError::generation("model server unreachable"))
    }
}

/// `None` makes the provider fail
pub struct StaticSearch(pub Option<String>);

#[async_trait]
impl AttractionSearch for StaticSearch {
    async fn search(&self, _query: &str) -> Result<String> {
        self.0
            .clone()
            .ok_or_else(|| PlannerError::provider("SerpAPI: quota exhausted"))
    }
}

pub struct StaticLodging(pub Option<Vec<LodgingResult>>);

#[async_trait]
impl LodgingSearch for StaticLodging {
    async fn search(&self, _query: &str) -> Result<Vec<LodgingResult>> {
        self.0
            .clone()
            .ok_or_else(|| PlannerError::provider("Tavily: connection reset"))
    }
}

pub struct StaticWeather(pub Option<Value>);

#[async_trait]
impl WeatherProvider for StaticWeather {
    async fn forecast(&self, _city: &str) -> Result<Value> {
        self.0
            .clone()
            .ok_or_else(|| PlannerError::provider("OpenWeatherMap: timed out"))
    }
}

pub struct StaticCurrency(pub Option<RateTable>);

#[async_trait]
impl CurrencyProvider for StaticCurrency {
    async fn rates(&self, _base_currency: &str) -> Result<RateTable> {
        self.0
            .clone()
            .ok_or_else(|| PlannerError::provider("ExchangeRate-API: bad gateway"))
    }
}

pub const PARIS_SEARCH: &str =
    "Top 10 attractions: Eiffel Tower, Louvre Museum, Notre-Dame, Montmartre";

pub const PARIS_SUMMARY: &str = "Paris blends medieval streets with grand boulevards. \
The Louvre and Musee d'Orsay hold world-famous collections. \
Notre-Dame and Sainte-Chapelle anchor the historic core. \
Montmartre offers views over the whole city.";

pub fn forecast_payload() -> Value {
    json!({
        "cod": "200",
        "list": [
            { "dt_txt": "2025-04-05 15:00:00", "main": { "temp": 17.2 }, "weather": [{ "description": "few clouds" }] },
            { "dt_txt": "2025-04-05 18:00:00", "main": { "temp": 14.0 }, "weather": [{ "description": "light rain" }] },
            { "dt_txt": "2025-04-06 18:00:00", "main": { "temp": 12.5 }, "weather": [{ "description": "overcast clouds" }] }
        ]
    })
}

pub fn hotels() -> Vec<LodgingResult> {
    vec![LodgingResult {
        title: Some("Hotel Lutetia".to_string()),
        url: Some("https://example.com/lutetia".to_string()),
        content: Some("Art deco palace on the left bank, from 450 EUR".to_string()),
        score: Some(0.93),
    }]
}

pub fn rates() -> RateTable {
    serde_json::from_value(json!({
        "result": "success",
        "base_code": "TRY",
        "conversion_rates": { "TRY": 1.0, "GBP": 0.0204, "EUR": 0.0244 }
    }))
    .unwrap()
}

/// Providers that all answer successfully
pub fn healthy_providers() -> Providers {
    Providers {
        attractions: Box::new(StaticSearch(Some(PARIS_SEARCH.to_string()))),
        lodging: Box::new(StaticLodging(Some(hotels()))),
        weather: Box::new(StaticWeather(Some(forecast_payload()))),
        currency: Box::new(StaticCurrency(Some(rates()))),
    }
}
