//! Exchange rate table as returned by the currency provider

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status value the provider uses for a successful lookup
pub const SUCCESS_STATUS: &str = "success";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Provider status field (`"success"` or `"error"`)
    #[serde(rename = "result")]
    pub status: String,
    #[serde(default)]
    pub base_code: Option<String>,
    /// Currency code -> rate relative to the base currency
    #[serde(rename = "conversion_rates", default)]
    pub rates: Option<BTreeMap<String, f64>>,
}

impl RateTable {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Rate of `code` relative to the base currency
    #[must_use]
    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.as_ref()?.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_payload() {
        let payload = r#"{
            "result": "success",
            "base_code": "TRY",
            "conversion_rates": { "TRY": 1, "GBP": 0.0204, "EUR": 0.0244 }
        }"#;
        let table: RateTable = serde_json::from_str(payload).unwrap();
        assert!(table.is_success());
        assert_eq!(table.base_code.as_deref(), Some("TRY"));
        assert_eq!(table.rate("GBP"), Some(0.0204));
        assert_eq!(table.rate("USD"), None);
    }

    #[test]
    fn test_deserialize_error_payload() {
        let payload = r#"{ "result": "error", "error-type": "invalid-key" }"#;
        let table: RateTable = serde_json::from_str(payload).unwrap();
        assert!(!table.is_success());
        assert!(table.rates.is_none());
    }
}
