//! Date resolution stage
//!
//! Turns a free-text date expression ("next Saturday") into a normalized
//! `dd/mm/yyyy` date stored in slot 0 of the shared context.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, instrument, warn};

use crate::context::{DATE_SLOT, SharedContext};
use crate::generator::TextGenerator;
use crate::models::{NormalizedDate, extract_last_date};
use crate::prompts::date_prompt;
use crate::{PlannerError, Result};

/// Outcome of parsing the generator response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateResolution {
    Resolved(NormalizedDate),
    /// No date found; carries the unresolved content kept in slot 0
    Unresolved(String),
}

/// Record the generator response in the context.
///
/// The last valid date in `response` wins. Without one the stage degrades: an
/// existing slot 0 is kept as-is, otherwise the raw `expression` fills it.
pub fn apply_date_response(
    response: &str,
    expression: &str,
    context: &mut SharedContext,
) -> Result<DateResolution> {
    match extract_last_date(response) {
        Some(date) => {
            if !context.is_empty() {
                return Err(PlannerError::validation(
                    "travel date must be the first context entry",
                ));
            }
            info!("Updated travel date to: {}", date);
            context.push(date.to_string());
            Ok(DateResolution::Resolved(date))
        }
        None => {
            warn!("No dd/mm/yyyy date in generator response, keeping unresolved input");
            if let Some(existing) = context.get(DATE_SLOT) {
                return Ok(DateResolution::Unresolved(existing.to_string()));
            }
            context.push(expression);
            Ok(DateResolution::Unresolved(expression.to_string()))
        }
    }
}

/// Run the date stage and hand the context on
#[instrument(name = "date_stage", skip(generator, context))]
pub async fn resolve_date(
    generator: &dyn TextGenerator,
    expression: &str,
    today: NaiveDate,
    mut context: SharedContext,
) -> Result<(SharedContext, DateResolution)> {
    let prompt = date_prompt(today, today.weekday(), expression);
    let response = generator.generate(&prompt).await?;
    debug!("Date generator response: {}", response);

    let resolution = apply_date_response(&response, expression, &mut context)?;
    Ok((context, resolution))
}
