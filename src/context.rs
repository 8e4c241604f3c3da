//! Shared context threaded through the pipeline stages
//!
//! An ordered, append-only list of text entries. Slot 0 holds the travel date
//! once the date stage has run; slot 1 holds the destination summary.

use serde::Serialize;

/// Slot of the normalized (or unresolved) travel date
pub const DATE_SLOT: usize = 0;
/// Slot of the destination summary
pub const SUMMARY_SLOT: usize = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SharedContext {
    entries: Vec<String>,
}

impl SharedContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Existing entries are never touched.
    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn travel_date(&self) -> Option<&str> {
        self.get(DATE_SLOT)
    }

    #[must_use]
    pub fn destination_summary(&self) -> Option<&str> {
        self.get(SUMMARY_SLOT)
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
