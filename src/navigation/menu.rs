//! Menu model for one main category, built recursively to any depth.

use std::fmt::Write as _;

use serde::Serialize;

use crate::domain::aggregates::{CategoryNode, HierarchyNode, Subcategory};
use crate::domain::value_objects::{route_segment_for_depth, HierarchyLevel, NodeKey, MAX_NAMED_DEPTH};
use crate::navigation::{ExpandState, HoverMenu};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuEntry {
    pub key: NodeKey,
    pub name: String,
    pub slug: String,
    pub depth: usize,
    pub level: HierarchyLevel,
    pub href: String,
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn has_children(&self) -> bool { !self.children.is_empty() }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavMenu {
    /// Key of the top-level trigger; hovering it opens the level-2 panel.
    pub key: NodeKey,
    pub name: String,
    pub slug: String,
    pub href: String,
    pub entries: Vec<MenuEntry>,
}

impl NavMenu {
    pub fn build(main: &CategoryNode) -> Self {
        let entries = build_entries(main, main.children(), 2);
        Self {
            key: NodeKey::new(&main.id, 1, &main.id),
            name: main.name.clone(),
            slug: main.slug.clone(),
            href: format!("/category/{}", main.slug),
            entries,
        }
    }

    /// Menus for every active main category, in display order.
    pub fn build_all(categories: &[CategoryNode]) -> Vec<Self> {
        let mut mains: Vec<&CategoryNode> = categories.iter().filter(|c| c.is_active).collect();
        mains.sort_by_key(|c| c.sort_order);
        mains.into_iter().map(Self::build).collect()
    }

    pub fn find(&self, key: &NodeKey) -> Option<&MenuEntry> {
        fn walk<'a>(entries: &'a [MenuEntry], key: &NodeKey) -> Option<&'a MenuEntry> {
            entries.iter().find_map(|e| if &e.key == key { Some(e) } else { walk(&e.children, key) })
        }
        walk(&self.entries, key)
    }

    /// Entries the desktop dropdown shows for the current hover path.
    pub fn visible_keys(&self, hover: &HoverMenu) -> Vec<&NodeKey> {
        let mut visible = Vec::new();
        if hover.is_open(&self.key) {
            collect_open(&self.entries, hover, &mut visible);
        }
        visible
    }

    /// Text outline of the mobile accordion; collapsed branches hide their children.
    pub fn render_accordion(&self, state: &ExpandState) -> String {
        let mut out = format!("{} ({})\n", self.name, self.href);
        render_entries(&self.entries, state, &mut out);
        out
    }
}

fn build_entries(main: &CategoryNode, children: &[Subcategory], depth: usize) -> Vec<MenuEntry> {
    if depth > MAX_NAMED_DEPTH && !children.is_empty() {
        tracing::trace!(main = %main.slug, depth, "menu deeper than the named levels");
    }
    let mut ordered: Vec<&Subcategory> = children.iter().filter(|c| c.is_active()).collect();
    ordered.sort_by_key(|c| c.sort_order());
    ordered
        .into_iter()
        .map(|child| MenuEntry {
            key: NodeKey::new(&main.id, depth, child.id()),
            name: child.name().to_string(),
            slug: child.slug().to_string(),
            depth,
            level: HierarchyLevel::for_depth(depth),
            href: format!("/category/{}/{}/{}", main.slug, route_segment_for_depth(depth), child.slug()),
            children: build_entries(main, child.children(), depth + 1),
        })
        .collect()
}

fn collect_open<'a>(entries: &'a [MenuEntry], hover: &HoverMenu, visible: &mut Vec<&'a NodeKey>) {
    for entry in entries {
        visible.push(&entry.key);
        if hover.is_open(&entry.key) {
            collect_open(&entry.children, hover, visible);
        }
    }
}

fn render_entries(entries: &[MenuEntry], state: &ExpandState, out: &mut String) {
    for entry in entries {
        let indent = "  ".repeat(entry.depth - 1);
        let expanded = state.is_expanded(&entry.key);
        let marker = match (entry.has_children(), expanded) {
            (false, _) => "   ",
            (true, false) => "[+]",
            (true, true) => "[-]",
        };
        let _ = writeln!(out, "{indent}{marker} {} ({})", entry.name, entry.href);
        if expanded {
            render_entries(&entry.children, state, out);
        }
    }
}
