//! Pipeline orchestrator
//!
//! Fixed sequence DATE -> DESTINATION -> ITINERARY -> done. The shared context
//! starts empty and is moved through the stages; each stage hands it back with
//! its entry appended.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{Instrument, info, info_span};

use crate::Result;
use crate::config::PlannerConfig;
use crate::context::SharedContext;
use crate::generator::{OllamaGenerator, TextGenerator};
use crate::models::{DestinationDescriptor, NormalizedDate};
use crate::providers::Providers;
use crate::stages::{
    DateResolution, ItinerarySettings, describe_destination, resolve_date, synthesize_itinerary,
};

/// States of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Date,
    Destination,
    Itinerary,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Date => "date",
            PipelineStage::Destination => "destination",
            PipelineStage::Itinerary => "itinerary",
        };
        f.write_str(name)
    }
}

/// Inputs collected before the pipeline starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    /// Free-text date expression, e.g. "next Saturday"
    pub date_expression: String,
    /// City name as entered
    pub city: String,
    /// Reference date for relative expressions
    pub today: NaiveDate,
}

/// Result of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct TripPlan {
    pub context: SharedContext,
    /// `None` when the date stage fell back to the unresolved expression
    pub travel_date: Option<NormalizedDate>,
    pub destination: DestinationDescriptor,
    pub itinerary: String,
}

pub struct Pipeline {
    generator: Box<dyn TextGenerator>,
    providers: Providers,
    settings: ItinerarySettings,
}

impl Pipeline {
    #[must_use]
    pub fn new(
        generator: Box<dyn TextGenerator>,
        providers: Providers,
        settings: ItinerarySettings,
    ) -> Self {
        Self {
            generator,
            providers,
            settings,
        }
    }

    /// Ollama generator and HTTP providers as configured
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        Ok(Self::new(
            Box::new(OllamaGenerator::new(&config.llm)?),
            Providers::from_config(config)?,
            ItinerarySettings::from_config(config)?,
        ))
    }

    /// Run the three stages once, strictly in order.
    pub async fn run(&self, request: &TripRequest) -> Result<TripPlan> {
        let generator = self.generator.as_ref();
        let context = SharedContext::new();

        let (context, resolution) = resolve_date(
            generator,
            &request.date_expression,
            request.today,
            context,
        )
        .instrument(info_span!("pipeline_stage", stage = %PipelineStage::Date))
        .await?;
        let travel_date = match resolution {
            DateResolution::Resolved(date) => Some(date),
            DateResolution::Unresolved(_) => None,
        };

        let (context, destination) = describe_destination(
            generator,
            self.providers.attractions.as_ref(),
            &request.city,
            context,
        )
        .instrument(info_span!("pipeline_stage", stage = %PipelineStage::Destination))
        .await?;

        let (context, itinerary) = synthesize_itinerary(
            generator,
            &self.providers,
            &destination,
            &self.settings,
            context,
        )
        .instrument(info_span!("pipeline_stage", stage = %PipelineStage::Itinerary))
        .await?;

        info!("Pipeline finished with {} context entries", context.len());
        Ok(TripPlan {
            context,
            travel_date,
            destination,
            itinerary,
        })
    }
}
