//! Lodging search results

use serde::{Deserialize, Serialize};

/// One lodging search hit; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LodgingResult {
    pub title: Option<String>,
    pub url: Option<String>,
    /// Snippet describing the page
    pub content: Option<String>,
    /// Provider relevance score
    pub score: Option<f64>,
}

impl LodgingResult {
    /// Digest block for this result, with placeholder text for missing fields
    #[must_use]
    pub fn format_block(&self) -> String {
        let title = self.title.as_deref().unwrap_or("No title available");
        let url = self.url.as_deref().unwrap_or("No URL available");
        let content = self
            .content
            .as_deref()
            .unwrap_or("No description available");
        let score = self
            .score
            .map_or_else(|| "No score available".to_string(), |s| s.to_string());

        format!("Title: {title}\nURL: {url}\nDescription: {content}\nScore: {score}\n\n")
    }
}
