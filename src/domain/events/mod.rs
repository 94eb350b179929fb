//! Domain events
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where the current category tree came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeSource {
    /// Nothing listed yet.
    Pending,
    Remote,
    Fallback,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CatalogEvent {
    TreeReplaced { source: TreeSource, categories: usize, at: DateTime<Utc> },
    CategoryCreated { category_id: String, slug: String },
    CategoryUpdated { category_id: String },
    CategoryDeleted { category_id: String },
}
