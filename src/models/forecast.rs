//! Forecast points and OpenWeatherMap payload conversion

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Timestamp format of the `dt_txt` field
const OWM_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One point of a sub-daily forecast series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Local timestamp of the forecast point
    pub timestamp: NaiveDateTime,
    /// Temperature in the unit system requested from the provider
    pub temperature: f64,
    /// Human-readable description of weather conditions
    pub description: String,
}

impl ForecastPoint {
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    #[must_use]
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Single digest line, e.g. `2025-04-05 18:00:00: 14.2°C, light rain`
    #[must_use]
    pub fn format_line(&self) -> String {
        format!(
            "{}: {}, {}",
            self.timestamp.format(OWM_TIMESTAMP_FORMAT),
            self.format_temperature(),
            self.description
        )
    }
}

/// `OpenWeatherMap` 5 day / 3 hour forecast structures
mod openweather {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct Entry {
        pub dt_txt: String,
        pub main: Main,
        #[serde(default)]
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Main {
        pub temp: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Condition {
        pub description: String,
    }
}

/// Convert a raw `OpenWeatherMap` forecast payload into forecast points.
///
/// Returns `None` when the payload has no `list` array (error payloads such as
/// `{"cod":"404","message":"city not found"}`). Individual entries that cannot
/// be read are skipped.
#[must_use]
pub fn points_from_openweather(payload: &Value) -> Option<Vec<ForecastPoint>> {
    let list = payload.get("list")?.as_array()?;

    let points = list
        .iter()
        .filter_map(|raw| {
            let entry: openweather::Entry = match serde_json::from_value(raw.clone()) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable forecast entry: {}", e);
                    return None;
                }
            };
            let timestamp =
                NaiveDateTime::parse_from_str(&entry.dt_txt, OWM_TIMESTAMP_FORMAT).ok()?;
            let description = entry
                .weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_else(|| "no description".to_string());
            Some(ForecastPoint {
                timestamp,
                temperature: entry.main.temp,
                description,
            })
        })
        .collect();

    Some(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_points_from_openweather() {
        let payload = json!({
            "cod": "200",
            "list": [
                {
                    "dt_txt": "2025-04-05 15:00:00",
                    "main": { "temp": 16.31 },
                    "weather": [{ "description": "few clouds" }]
                },
                {
                    "dt_txt": "2025-04-05 18:00:00",
                    "main": { "temp": 14.0 },
                    "weather": [{ "description": "light rain" }, { "description": "mist" }]
                },
                { "dt_txt": "garbage", "main": { "temp": 1.0 } },
                { "main": { "temp": 1.0 } }
            ]
        });

        let points = points_from_openweather(&payload).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].description, "light rain");
        assert_eq!(points[1].time(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert_eq!(
            points[1].format_line(),
            "2025-04-05 18:00:00: 14.0°C, light rain"
        );
    }

    #[test]
    fn test_error_payload_has_no_points() {
        let payload = json!({ "cod": "404", "message": "city not found" });
        assert!(points_from_openweather(&payload).is_none());
    }

    #[test]
    fn test_missing_condition_gets_placeholder() {
        let payload = json!({
            "list": [{ "dt_txt": "2025-04-06 18:00:00", "main": { "temp": 9.5 } }]
        });
        let points = points_from_openweather(&payload).unwrap();
        assert_eq!(points[0].description, "no description");
    }
}
