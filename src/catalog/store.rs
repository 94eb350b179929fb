//! Category Store: single in-memory source of truth for the category tree.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use validator::Validate;

use crate::catalog::fallback::fallback_tree;
use crate::domain::aggregates::{CategoryDraft, CategoryNode, CategoryPatch};
use crate::domain::events::{CatalogEvent, TreeSource};
use crate::remote::CategoryService;
use crate::{CatalogError, Result};

const EVENT_CAPACITY: usize = 64;

/// Immutable view of the tree, replaced wholesale on every listing.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySnapshot {
    pub categories: Vec<CategoryNode>,
    pub source: TreeSource,
    pub fetched_at: DateTime<Utc>,
}

impl CategorySnapshot {
    fn new(categories: Vec<CategoryNode>, source: TreeSource) -> Self {
        Self { categories, source, fetched_at: Utc::now() }
    }
}

pub struct CategoryStore {
    service: Arc<dyn CategoryService>,
    tree: watch::Sender<Arc<CategorySnapshot>>,
    events: broadcast::Sender<CatalogEvent>,
}

impl CategoryStore {
    pub fn new(service: Arc<dyn CategoryService>) -> Self {
        let (tree, _) = watch::channel(Arc::new(CategorySnapshot::new(vec![], TreeSource::Pending)));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { service, tree, events }
    }

    pub fn snapshot(&self) -> Arc<CategorySnapshot> { self.tree.borrow().clone() }

    pub fn subscribe(&self) -> watch::Receiver<Arc<CategorySnapshot>> { self.tree.subscribe() }

    pub fn events(&self) -> broadcast::Receiver<CatalogEvent> { self.events.subscribe() }

    /// Fetches the tree from the backend. Never fails: a backend error
    /// publishes and returns the fallback tree instead.
    pub async fn list(&self) -> Vec<CategoryNode> {
        match self.service.list_categories().await {
            Ok(categories) => {
                tracing::debug!(count = categories.len(), "category tree refreshed");
                self.publish(categories.clone(), TreeSource::Remote);
                categories
            }
            Err(e) => {
                tracing::warn!(error = %e, "category listing failed, serving fallback tree");
                let categories = fallback_tree();
                self.publish(categories.clone(), TreeSource::Fallback);
                categories
            }
        }
    }

    pub async fn create(&self, mut draft: CategoryDraft) -> Result<CategoryNode> {
        draft.validate()?;
        draft.slug = Some(draft.effective_slug());
        let created = self.service.create_category(&draft).await.inspect_err(|e| {
            tracing::error!(error = %e, name = %draft.name, "category create failed");
        })?;
        tracing::info!(id = %created.id, slug = %created.slug, "category created");
        self.emit(CatalogEvent::CategoryCreated { category_id: created.id.clone(), slug: created.slug.clone() });
        self.list().await;
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: CategoryPatch) -> Result<CategoryNode> {
        require_id(id)?;
        patch.validate()?;
        let updated = self.service.update_category(id, &patch).await.inspect_err(|e| {
            tracing::error!(error = %e, id, "category update failed");
        })?;
        tracing::info!(id, "category updated");
        self.emit(CatalogEvent::CategoryUpdated { category_id: id.to_string() });
        self.list().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        require_id(id)?;
        self.service.delete_category(id).await.inspect_err(|e| {
            tracing::error!(error = %e, id, "category delete failed");
        })?;
        tracing::info!(id, "category deleted");
        self.emit(CatalogEvent::CategoryDeleted { category_id: id.to_string() });
        self.list().await;
        Ok(())
    }

    fn publish(&self, categories: Vec<CategoryNode>, source: TreeSource) {
        let snapshot = CategorySnapshot::new(categories, source);
        let event = CatalogEvent::TreeReplaced { source, categories: snapshot.categories.len(), at: snapshot.fetched_at };
        // Last writer wins; there is no version check between overlapping refreshes.
        self.tree.send_replace(Arc::new(snapshot));
        self.emit(event);
    }

    fn emit(&self, event: CatalogEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn require_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(CatalogError::Validation("category id must not be empty".into()));
    }
    Ok(())
}
