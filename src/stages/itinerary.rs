//! Itinerary synthesis stage
//!
//! Builds the weather, lodging and currency digests, renders the final prompt
//! and returns the generated plan. Only a generator failure aborts the stage.

use chrono::NaiveTime;
use tracing::{debug, info, instrument};

use crate::config::PlannerConfig;
use crate::context::SharedContext;
use crate::digest::{currency_digest, forecast_digest, lodging_digest};
use crate::generator::TextGenerator;
use crate::models::DestinationDescriptor;
use crate::prompts::{ItineraryInputs, itinerary_prompt};
use crate::providers::Providers;
use crate::{PlannerError, Result};

/// Knobs of the itinerary stage taken from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItinerarySettings {
    pub canonical_time: NaiveTime,
    pub max_days: usize,
    pub base_currency: String,
    pub target_currency: String,
}

impl Default for ItinerarySettings {
    fn default() -> Self {
        Self {
            canonical_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            max_days: 5,
            base_currency: "TRY".to_string(),
            target_currency: "GBP".to_string(),
        }
    }
}

impl ItinerarySettings {
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let canonical_time = config.weather.canonical_time().ok_or_else(|| {
            PlannerError::config(format!(
                "Invalid canonical forecast time '{}'",
                config.weather.canonical_time
            ))
        })?;
        Ok(Self {
            canonical_time,
            max_days: config.weather.max_days as usize,
            base_currency: config.currency.base_currency.clone(),
            target_currency: config.currency.target_currency.clone(),
        })
    }
}

/// Compose the final plan and append it to the context
#[instrument(
    name = "itinerary_stage",
    skip(generator, providers, destination, settings, context),
    fields(city = %destination.city)
)]
pub async fn synthesize_itinerary(
    generator: &dyn TextGenerator,
    providers: &Providers,
    destination: &DestinationDescriptor,
    settings: &ItinerarySettings,
    mut context: SharedContext,
) -> Result<(SharedContext, String)> {
    let travel_date = context
        .travel_date()
        .ok_or_else(|| PlannerError::validation("travel date missing from context"))?
        .to_string();
    let city_summary = context
        .destination_summary()
        .ok_or_else(|| PlannerError::validation("destination summary missing from context"))?
        .to_string();
    let city = destination.city.as_str();

    let forecast = forecast_digest(
        providers.weather.as_ref(),
        city,
        settings.canonical_time,
        settings.max_days,
    )
    .await;
    let lodging = lodging_digest(providers.lodging.as_ref(), city).await;
    let rates = currency_digest(providers.currency.as_ref(), &settings.base_currency).await;
    debug!(
        "Digests ready: forecast {} chars, lodging {} chars, rates {} chars",
        forecast.len(),
        lodging.len(),
        rates.len()
    );

    let forecast_time = settings.canonical_time.format("%H:%M").to_string();
    let prompt = itinerary_prompt(&ItineraryInputs {
        travel_date: &travel_date,
        city,
        city_summary: &city_summary,
        forecast_time: &forecast_time,
        forecast: &forecast,
        lodging: &lodging,
        base_currency: &settings.base_currency,
        target_currency: &settings.target_currency,
        rates: &rates,
    });

    let plan = generator.generate(&prompt).await?;
    info!("Generated travel plan ({} characters)", plan.len());

    context.push(plan.clone());
    Ok((context, plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_default_config() {
        let settings = ItinerarySettings::from_config(&PlannerConfig::default()).unwrap();
        assert_eq!(settings, ItinerarySettings::default());
    }

    #[test]
    fn test_settings_reject_bad_canonical_time() {
        let mut config = PlannerConfig::default();
        config.weather.canonical_time = "evening".to_string();
        assert!(ItinerarySettings::from_config(&config).is_err());
    }
}
