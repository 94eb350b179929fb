//! Mobile accordion state: an independent expanded flag per node.

use std::collections::HashMap;

use crate::domain::value_objects::NodeKey;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandState {
    expanded: HashMap<NodeKey, bool>,
}

impl ExpandState {
    pub fn is_expanded(&self, key: &NodeKey) -> bool {
        self.expanded.get(key).copied().unwrap_or(false)
    }

    /// Flips only `key`; siblings and other branches keep their state.
    pub fn toggle(&mut self, key: &NodeKey) -> bool {
        let flag = self.expanded.entry(key.clone()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn set(&mut self, key: &NodeKey, expanded: bool) {
        self.expanded.insert(key.clone(), expanded);
    }

    pub fn collapse_all(&mut self) { self.expanded.clear(); }

    pub fn expanded_keys(&self) -> impl Iterator<Item = &NodeKey> {
        self.expanded.iter().filter(|(_, open)| **open).map(|(key, _)| key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_independent() {
        let target = NodeKey::new("cat1", 2, "sub2");
        let sibling = NodeKey::new("cat1", 2, "sub1");
        let child = NodeKey::new("cat1", 3, "sub2-type1");
        let other = NodeKey::new("cat2", 2, "sub2");

        let mut state = ExpandState::default();
        state.set(&sibling, true);
        state.set(&child, false);
        let before: Vec<bool> = [&sibling, &child, &other].iter().map(|k| state.is_expanded(k)).collect();

        assert!(state.toggle(&target));
        assert!(state.is_expanded(&target));
        let after: Vec<bool> = [&sibling, &child, &other].iter().map(|k| state.is_expanded(k)).collect();
        assert_eq!(before, after);

        assert!(!state.toggle(&target));
        assert!(state.is_expanded(&sibling));
    }

    #[test]
    fn test_many_branches_open() {
        let mut state = ExpandState::default();
        state.toggle(&NodeKey::new("cat1", 2, "a"));
        state.toggle(&NodeKey::new("cat1", 2, "b"));
        state.toggle(&NodeKey::new("cat1", 3, "c"));
        assert_eq!(state.expanded_keys().count(), 3);
        state.collapse_all();
        assert_eq!(state.expanded_keys().count(), 0);
    }
}
