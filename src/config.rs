//! Configuration management for the travel planner
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use anyhow::{Context, Result};
use chrono::NaiveTime;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Format of the canonical time-of-day marker
pub const CANONICAL_TIME_FORMAT: &str = "%H:%M:%S";

/// Root configuration structure for the travel planner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Text generation backend
    pub llm: LlmConfig,
    /// Weather forecast provider
    pub weather: WeatherConfig,
    /// Lodging search provider
    pub lodging: LodgingConfig,
    /// Attraction search provider
    pub search: SearchConfig,
    /// Currency rate provider
    pub currency: CurrencyConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Ollama-compatible text generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u32,
}

/// OpenWeatherMap forecast settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Unit system passed to the API (metric gives Celsius)
    #[serde(default = "default_weather_units")]
    pub units: String,
    /// Time of day (HH:MM:SS) used to pick one forecast point per day
    #[serde(default = "default_canonical_time")]
    pub canonical_time: String,
    /// Maximum number of days in the forecast digest
    #[serde(default = "default_max_days")]
    pub max_days: u32,
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
}

/// Tavily lodging search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LodgingConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_lodging_base_url")]
    pub base_url: String,
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
}

/// SerpAPI attraction search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
}

/// ExchangeRate-API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_currency_base_url")]
    pub base_url: String,
    /// Currency the rate table is rooted at
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Currency the budgeting advice is anchored to
    #[serde(default = "default_target_currency")]
    pub target_currency: String,
    #[serde(default = "default_provider_timeout")]
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_llm_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "llama3.2".to_string()
}

fn default_llm_timeout() -> u32 {
    300
}

fn default_weather_base_url() -> String {
    "http://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_units() -> String {
    "metric".to_string()
}

fn default_canonical_time() -> String {
    "18:00:00".to_string()
}

fn default_max_days() -> u32 {
    5
}

fn default_provider_timeout() -> u32 {
    30
}

fn default_lodging_base_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_search_base_url() -> String {
    "https://serpapi.com".to_string()
}

fn default_currency_base_url() -> String {
    "https://v6.exchangerate-api.com/v6".to_string()
}

fn default_base_currency() -> String {
    "TRY".to_string()
}

fn default_target_currency() -> String {
    "GBP".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            units: default_weather_units(),
            canonical_time: default_canonical_time(),
            max_days: default_max_days(),
            timeout_seconds: default_provider_timeout(),
        }
    }
}

impl Default for LodgingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_lodging_base_url(),
            timeout_seconds: default_provider_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_search_base_url(),
            timeout_seconds: default_provider_timeout(),
        }
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_currency_base_url(),
            base_currency: default_base_currency(),
            target_currency: default_target_currency(),
            timeout_seconds: default_provider_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherConfig {
    /// Parsed canonical time-of-day marker, `None` if the configured value is malformed
    #[must_use]
    pub fn canonical_time(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.canonical_time, CANONICAL_TIME_FORMAT).ok()
    }
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        // A missing .env file is fine; credentials may come from the real environment
        let _ = dotenvy::dotenv();

        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. TRAVEL_PLANNER_LLM__MODEL=mistral
        builder = builder.add_source(
            Environment::with_prefix("TRAVEL_PLANNER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_env_credentials(|name| std::env::var(name).ok());
        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("travel-planner").join("config.toml"))
    }

    /// Fill missing API keys from the conventional provider variables
    /// (`OPENWEATHER_API_KEY`, `TAVILY_API_KEY`, `SERPAPI_API_KEY`, `EXCHANGERATE_API_KEY`).
    pub fn apply_env_credentials<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let slots = [
            (&mut self.weather.api_key, "OPENWEATHER_API_KEY"),
            (&mut self.lodging.api_key, "TAVILY_API_KEY"),
            (&mut self.search.api_key, "SERPAPI_API_KEY"),
            (&mut self.currency.api_key, "EXCHANGERATE_API_KEY"),
        ];
        for (slot, name) in slots {
            if slot.is_none() {
                *slot = lookup(name).filter(|key| !key.trim().is_empty());
            }
        }
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.llm.base_url.is_empty() {
            self.llm.base_url = default_llm_base_url();
        }
        if self.llm.model.is_empty() {
            self.llm.model = default_llm_model();
        }
        if self.llm.timeout_seconds == 0 {
            self.llm.timeout_seconds = default_llm_timeout();
        }
        if self.weather.canonical_time.is_empty() {
            self.weather.canonical_time = default_canonical_time();
        }
        if self.weather.max_days == 0 {
            self.weather.max_days = default_max_days();
        }
        if self.currency.base_currency.is_empty() {
            self.currency.base_currency = default_base_currency();
        }
        if self.currency.target_currency.is_empty() {
            self.currency.target_currency = default_target_currency();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_urls()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        let timeouts = [
            ("LLM", self.llm.timeout_seconds),
            ("Weather API", self.weather.timeout_seconds),
            ("Lodging API", self.lodging.timeout_seconds),
            ("Search API", self.search.timeout_seconds),
            ("Currency API", self.currency.timeout_seconds),
        ];
        for (name, seconds) in timeouts {
            if seconds > 600 {
                return Err(PlannerError::config(format!(
                    "{name} timeout cannot exceed 600 seconds"
                ))
                .into());
            }
        }

        if !(1..=16).contains(&self.weather.max_days) {
            return Err(PlannerError::config(
                "Forecast days must be between 1 and 16",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.weather.canonical_time().is_none() {
            return Err(PlannerError::config(format!(
                "Invalid canonical forecast time '{}'. Expected HH:MM:SS",
                self.weather.canonical_time
            ))
            .into());
        }

        for code in [&self.currency.base_currency, &self.currency.target_currency] {
            if !is_currency_code(code) {
                return Err(PlannerError::config(format!(
                    "Invalid currency code '{code}'. Expected three uppercase letters"
                ))
                .into());
            }
        }

        Ok(())
    }

    fn validate_urls(&self) -> Result<()> {
        let urls = [
            ("LLM", &self.llm.base_url),
            ("Weather API", &self.weather.base_url),
            ("Lodging API", &self.lodging.base_url),
            ("Search API", &self.search.base_url),
            ("Currency API", &self.currency.base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PlannerError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }
        Ok(())
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}
