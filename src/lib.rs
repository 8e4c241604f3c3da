//! `travel-planner` - three-stage LLM trip planning
//!
//! A fixed pipeline resolves a free-text travel date, summarizes the
//! destination city from search results, and synthesizes an itinerary from
//! weather, lodging and currency digests. Every stage talks to an external
//! text generator; the data providers sit behind traits so the pipeline can be
//! driven without network access.

pub mod config;
pub mod context;
pub mod digest;
pub mod error;
pub mod generator;
pub mod http;
pub mod input;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod stages;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use context::SharedContext;
pub use error::PlannerError;
pub use generator::{OllamaGenerator, TextGenerator};
pub use models::{DestinationDescriptor, NormalizedDate};
pub use pipeline::{Pipeline, PipelineStage, TripPlan, TripRequest};
pub use providers::Providers;
pub use stages::{DateResolution, ItinerarySettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
