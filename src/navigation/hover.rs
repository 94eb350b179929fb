//! Desktop dropdown state: one open hover path with a delayed close.

use std::time::{Duration, Instant};

use crate::domain::value_objects::NodeKey;

pub const MIN_CLOSE_DELAY: Duration = Duration::from_millis(150);
pub const MAX_CLOSE_DELAY: Duration = Duration::from_millis(200);

#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingClose {
    key: NodeKey,
    due: Instant,
}

/// Hover state for the desktop menu.
///
/// Open panels always form a single root-to-leaf path. At most one close is
/// pending at a time; scheduling another replaces it.
#[derive(Clone, Debug)]
pub struct HoverMenu {
    close_delay: Duration,
    open: Vec<NodeKey>,
    pending: Option<PendingClose>,
}

impl Default for HoverMenu {
    fn default() -> Self { Self::new(MIN_CLOSE_DELAY) }
}

impl HoverMenu {
    pub fn new(close_delay: Duration) -> Self {
        Self { close_delay: close_delay.clamp(MIN_CLOSE_DELAY, MAX_CLOSE_DELAY), open: vec![], pending: None }
    }

    pub fn close_delay(&self) -> Duration { self.close_delay }

    pub fn open_path(&self) -> &[NodeKey] { &self.open }

    pub fn is_open(&self, key: &NodeKey) -> bool { self.open.contains(key) }

    pub fn pending_close(&self) -> Option<(&NodeKey, Instant)> {
        self.pending.as_ref().map(|p| (&p.key, p.due))
    }

    /// Pointer entered `key`: cancel any pending close and open its panel,
    /// closing panels that are not its ancestors.
    pub fn enter(&mut self, key: NodeKey) {
        self.pending = None;
        self.open.retain(|k| k.category_id == key.category_id && k.depth < key.depth);
        self.open.push(key);
    }

    /// Pointer left `key`: close it after the delay unless something is entered first.
    pub fn leave(&mut self, key: &NodeKey, now: Instant) {
        if !self.is_open(key) { return; }
        self.pending = Some(PendingClose { key: key.clone(), due: now + self.close_delay });
    }

    /// Fires the pending close if due. Returns the key that was closed.
    pub fn tick(&mut self, now: Instant) -> Option<NodeKey> {
        let due = self.pending.as_ref().is_some_and(|p| p.due <= now);
        if !due { return None; }
        let PendingClose { key, .. } = self.pending.take()?;
        if let Some(position) = self.open.iter().position(|k| k == &key) {
            self.open.truncate(position);
        }
        tracing::trace!(%key, "menu panel closed");
        Some(key)
    }

    /// Click outside the navigation root closes everything immediately.
    pub fn click_outside(&mut self) {
        self.pending = None;
        self.open.clear();
    }
}
