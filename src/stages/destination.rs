//! Destination summary stage

use tracing::{debug, info, instrument, warn};

use crate::context::{SUMMARY_SLOT, SharedContext};
use crate::generator::TextGenerator;
use crate::models::DestinationDescriptor;
use crate::prompts::destination_prompt;
use crate::providers::AttractionSearch;
use crate::{PlannerError, Result};

/// Query sent to the attraction search provider
#[must_use]
pub fn attraction_query(city: &str) -> String {
    format!("{city} travel guide tourist attractions")
}

/// Search results as shown to the generator. Failures and empty results are
/// described in text; the generator is expected to cope.
async fn grounding_text(search: &dyn AttractionSearch, city: &str) -> String {
    match search.search(&attraction_query(city)).await {
        Ok(results) if results.trim().is_empty() => {
            warn!("Attraction search returned nothing for '{}'", city);
            "No search results found.".to_string()
        }
        Ok(results) => results,
        Err(e) => {
            warn!("Attraction search failed for '{}': {}", city, e);
            format!("Search unavailable: {e}")
        }
    }
}

/// Summarize `city` and append the summary to the context (slot 1).
#[instrument(name = "destination_stage", skip(generator, search, context))]
pub async fn describe_destination(
    generator: &dyn TextGenerator,
    search: &dyn AttractionSearch,
    city: &str,
    mut context: SharedContext,
) -> Result<(SharedContext, DestinationDescriptor)> {
    if context.len() != SUMMARY_SLOT {
        return Err(PlannerError::validation(format!(
            "destination summary expects {} context entries, found {}",
            SUMMARY_SLOT,
            context.len()
        )));
    }

    let search_results = grounding_text(search, city).await;
    debug!("Grounding text: {} characters", search_results.len());

    let summary = generator
        .generate(&destination_prompt(city, &search_results))
        .await?;
    info!("Summarized destination '{}'", city);

    context.push(summary.clone());
    Ok((context, DestinationDescriptor::new(city, summary)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attraction_query() {
        assert_eq!(
            attraction_query("Paris"),
            "Paris travel guide tourist attractions"
        );
        assert_eq!(
            attraction_query(" new york "),
            " new york  travel guide tourist attractions"
        );
    }
}
