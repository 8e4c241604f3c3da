//! Digests: compact text built from raw provider data
//!
//! Every builder absorbs the failures it anticipates and returns fallback text
//! instead of an error, so the itinerary prompt can always be rendered.

use std::collections::HashSet;

use chrono::NaiveTime;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{ForecastPoint, LodgingResult, RateTable, points_from_openweather};
use crate::providers::{CurrencyProvider, LodgingSearch, WeatherProvider};
use crate::Result;

/// Forecast digest text when the provider payload is unusable
pub const WEATHER_UNAVAILABLE: &str = "Couldn't fetch weather data.";
/// Currency digest text for a non-success provider status
pub const RATES_UNAVAILABLE: &str = "Error: Unable to fetch exchange rates.";

/// Query sent to the lodging provider
#[must_use]
pub fn lodging_query(city: &str) -> String {
    format!("{city} best hotels and prices")
}

/// Select at most `max_days` points at `canonical_time`, one per calendar day.
///
/// The first point seen for a date wins; later points with the same date are
/// dropped even if the provider repeats a day.
#[must_use]
pub fn select_daily_points(
    points: &[ForecastPoint],
    canonical_time: NaiveTime,
    max_days: usize,
) -> Vec<&ForecastPoint> {
    let mut seen_days = HashSet::new();
    points
        .iter()
        .filter(|point| point.time() == canonical_time)
        .filter(|point| seen_days.insert(point.date()))
        .take(max_days)
        .collect()
}

/// Build the forecast digest from a raw provider payload
#[must_use]
pub fn forecast_digest_from_payload(
    payload: &Value,
    canonical_time: NaiveTime,
    max_days: usize,
) -> String {
    let Some(points) = points_from_openweather(payload) else {
        warn!("Weather payload has no forecast list");
        return WEATHER_UNAVAILABLE.to_string();
    };

    let selected = select_daily_points(&points, canonical_time, max_days);
    if selected.is_empty() {
        warn!(
            "No forecast points at {} among {} entries",
            canonical_time,
            points.len()
        );
        return WEATHER_UNAVAILABLE.to_string();
    }

    debug!("Forecast digest covers {} days", selected.len());
    selected
        .iter()
        .map(|point| point.format_line())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Query the weather provider and build the forecast digest
pub async fn forecast_digest(
    provider: &dyn WeatherProvider,
    city: &str,
    canonical_time: NaiveTime,
    max_days: usize,
) -> String {
    match provider.forecast(city).await {
        Ok(payload) => forecast_digest_from_payload(&payload, canonical_time, max_days),
        Err(e) => {
            warn!("Weather provider failed: {}", e);
            WEATHER_UNAVAILABLE.to_string()
        }
    }
}

/// Concatenate lodging results, or describe the provider failure
#[must_use]
pub fn lodging_digest_from_results(results: Result<Vec<LodgingResult>>) -> String {
    match results {
        Ok(results) => results.iter().map(LodgingResult::format_block).collect(),
        Err(e) => {
            warn!("Lodging provider failed: {}", e);
            format!("Error: {e}")
        }
    }
}

/// Query the lodging provider and build the lodging digest
pub async fn lodging_digest(provider: &dyn LodgingSearch, city: &str) -> String {
    lodging_digest_from_results(provider.search(&lodging_query(city)).await)
}

/// Serialize the rate table, or describe why it is unavailable
#[must_use]
pub fn currency_digest_from_table(table: Result<RateTable>) -> String {
    match table {
        Ok(table) if table.is_success() => match &table.rates {
            Some(rates) => serde_json::to_string_pretty(rates)
                .unwrap_or_else(|e| format!("Error: {e}")),
            None => {
                warn!("Currency provider reported success without rates");
                RATES_UNAVAILABLE.to_string()
            }
        },
        Ok(table) => {
            warn!("Currency provider status '{}'", table.status);
            RATES_UNAVAILABLE.to_string()
        }
        Err(e) => {
            warn!("Currency provider failed: {}", e);
            format!("Error: {e}")
        }
    }
}

/// Query the currency provider and build the currency digest
pub async fn currency_digest(provider: &dyn CurrencyProvider, base_currency: &str) -> String {
    currency_digest_from_table(provider.rates(base_currency).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlannerError;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn six_pm() -> NaiveTime {
        NaiveTime::from_hms_opt(18, 0, 0).unwrap()
    }

    fn entry(dt_txt: &str, temp: f64) -> Value {
        json!({ "dt_txt": dt_txt, "main": { "temp": temp }, "weather": [{ "description": "clear sky" }] })
    }

    #[test]
    fn test_forecast_digest_keeps_canonical_time_only() {
        let payload = json!({ "list": [
            entry("2025-04-05 15:00:00", 17.0),
            entry("2025-04-05 18:00:00", 15.0),
            entry("2025-04-05 21:00:00", 11.0),
            entry("2025-04-06 18:00:00", 13.5),
        ]});
        let digest = forecast_digest_from_payload(&payload, six_pm(), 5);
        assert_eq!(
            digest,
            "2025-04-05 18:00:00: 15.0°C, clear sky\n2025-04-06 18:00:00: 13.5°C, clear sky"
        );
    }

    #[test]
    fn test_forecast_digest_at_most_five_lines() {
        let list: Vec<Value> = (1..=7)
            .map(|day| entry(&format!("2025-04-{day:02} 18:00:00"), 10.0))
            .collect();
        let digest = forecast_digest_from_payload(&json!({ "list": list }), six_pm(), 5);
        let lines: Vec<&str> = digest.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|line| line.contains(" 18:00:00: ")));
        assert!(lines[4].starts_with("2025-04-05"));
    }

    #[test]
    fn test_forecast_digest_one_line_per_day() {
        let payload = json!({ "list": [
            entry("2025-04-05 18:00:00", 15.0),
            entry("2025-04-05 18:00:00", 99.0),
            entry("2025-04-06 18:00:00", 13.0),
        ]});
        let digest = forecast_digest_from_payload(&payload, six_pm(), 5);
        assert_eq!(digest.lines().count(), 2);
        assert!(!digest.contains("99.0"));
    }

    #[test]
    fn test_forecast_digest_fallbacks() {
        let missing_list = json!({ "cod": "404", "message": "city not found" });
        assert_eq!(
            forecast_digest_from_payload(&missing_list, six_pm(), 5),
            WEATHER_UNAVAILABLE
        );

        let no_canonical = json!({ "list": [entry("2025-04-05 15:00:00", 17.0)] });
        assert_eq!(
            forecast_digest_from_payload(&no_canonical, six_pm(), 5),
            WEATHER_UNAVAILABLE
        );
    }

    #[test]
    fn test_lodging_digest_formats_each_result() {
        let results = vec![
            LodgingResult {
                title: Some("Le Meurice".into()),
                url: Some("https://example.com/meurice".into()),
                content: Some("Palace on Rue de Rivoli".into()),
                score: Some(0.9),
            },
            LodgingResult::default(),
        ];
        let digest = lodging_digest_from_results(Ok(results));
        assert!(digest.starts_with("Title: Le Meurice\nURL: https://example.com/meurice\n"));
        assert!(digest.contains("Title: No title available"));
        assert_eq!(digest.matches("\n\n").count(), 2);
    }

    #[test]
    fn test_lodging_digest_absorbs_errors() {
        let digest = lodging_digest_from_results(Err(PlannerError::provider("Tavily: boom")));
        assert_eq!(digest, "Error: Provider error: Tavily: boom");
    }

    #[test]
    fn test_lodging_digest_empty_results() {
        assert_eq!(lodging_digest_from_results(Ok(Vec::new())), "");
    }

    #[test]
    fn test_currency_digest_success() {
        let table = RateTable {
            status: "success".into(),
            base_code: Some("TRY".into()),
            rates: Some(BTreeMap::from([("GBP".to_string(), 0.02), ("EUR".to_string(), 0.025)])),
        };
        let digest = currency_digest_from_table(Ok(table));
        let parsed: BTreeMap<String, f64> = serde_json::from_str(&digest).unwrap();
        assert_eq!(parsed.get("GBP"), Some(&0.02));
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_currency_digest_non_success_status() {
        let table = RateTable {
            status: "error".into(),
            base_code: None,
            rates: Some(BTreeMap::from([("GBP".to_string(), 0.02)])),
        };
        assert_eq!(currency_digest_from_table(Ok(table)), RATES_UNAVAILABLE);
    }

    #[test]
    fn test_currency_digest_provider_error() {
        let digest = currency_digest_from_table(Err(PlannerError::provider("timeout")));
        assert!(digest.starts_with("Error: "));
        assert!(digest.contains("timeout"));
    }

    #[test]
    fn test_lodging_query() {
        assert_eq!(lodging_query("Paris"), "Paris best hotels and prices");
    }
}
