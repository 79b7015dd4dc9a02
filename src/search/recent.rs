//! Most-recent-first list of distinct search terms.

use serde::{Deserialize, Serialize};

/// Maximum number of remembered searches.
pub const MAX_RECENT_SEARCHES: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentSearches {
    entries: Vec<String>,
}

impl RecentSearches {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds from stored entries, dropping blanks and duplicates and enforcing the cap.
    pub fn from_entries(entries: Vec<String>) -> Self {
        let mut recent = Self::new();
        for entry in entries.into_iter().rev() {
            recent.record(&entry);
        }
        recent
    }

    /// Moves `query` to the front. Returns false for blank queries.
    pub fn record(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        self.entries.retain(|e| e != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(MAX_RECENT_SEARCHES);
        true
    }

    /// Removes a single entry. Returns true if it was present.
    pub fn remove(&mut self, query: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e != query.trim());
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
