//! Destination descriptor produced by the destination stage

use serde::{Deserialize, Serialize};

/// City as entered by the user plus its generated summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationDescriptor {
    /// City name exactly as entered (case and whitespace preserved)
    pub city: String,
    /// Short narrative summary (4-5 sentences)
    pub summary: String,
}

impl DestinationDescriptor {
    #[must_use]
    pub fn new(city: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            summary: summary.into(),
        }
    }
}
