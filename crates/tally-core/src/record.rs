use serde::{Deserialize, Serialize};

/// One decoded line of the live data file. No field is guaranteed.
pub type RawMessage = serde_json::Map<String, serde_json::Value>;

/// A validated message, ready to be appended to the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedRecord {
    pub message: Option<String>,
    pub author: Option<String>,
    /// Kept as the producer wrote it; never parsed into a date.
    pub timestamp: Option<String>,
    /// Grouping key for the aggregate. `None` groups with other uncategorized rows.
    pub category: Option<String>,
    pub sentiment: f64,
    pub keyword_mentioned: Option<String>,
    pub message_length: i64,
}

/// Mean sentiment of one category at query time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateRow {
    pub category: Option<String>,
    pub avg_sentiment: f64,
}

impl AggregateRow {
    /// Label used for the uncategorized group.
    pub const UNCATEGORIZED: &'static str = "(none)";

    /// Category name for display; the uncategorized group gets a placeholder.
    #[must_use]
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or(Self::UNCATEGORIZED)
    }
}
