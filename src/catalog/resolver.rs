//! Hierarchy Resolver: route segments to main category, target node and breadcrumbs.

use serde::{Deserialize, Serialize};

use crate::domain::aggregates::{CategoryNode, HierarchyNode, Subcategory};
use crate::domain::value_objects::HierarchyLevel;

/// Segments of `/category/:main[/:level/:slug]`. Each deep segment may hold a slug or an id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPath {
    pub main: String,
    pub subcategory_id: Option<String>,
    pub type_id: Option<String>,
    pub variant_id: Option<String>,
    pub style_id: Option<String>,
}

impl CategoryPath {
    pub fn main(main: impl Into<String>) -> Self {
        Self { main: main.into(), ..Default::default() }
    }

    pub fn with_segment(mut self, level: HierarchyLevel, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match level {
            HierarchyLevel::Main => self.main = value.unwrap_or_default(),
            HierarchyLevel::Subcategory => self.subcategory_id = value,
            HierarchyLevel::Type => self.type_id = value,
            HierarchyLevel::Variant => self.variant_id = value,
            HierarchyLevel::Style => self.style_id = value,
        }
        self
    }

    /// Parses a storefront route such as `/category/men/type/shirts`.
    pub fn from_route(route: &str) -> Option<Self> {
        let mut parts = route.trim_matches('/').split('/').filter(|p| !p.is_empty());
        if parts.next()? != "category" { return None; }
        let mut path = Self::main(parts.next()?);
        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => Some(path),
            (Some(segment), Some(value), None) => {
                let level = HierarchyLevel::from_route_segment(segment)?;
                path = path.with_segment(level, value);
                Some(path)
            }
            _ => None,
        }
    }

    /// Deepest populated segment: style, else variant, else type, else subcategory.
    pub fn deepest(&self) -> Option<(HierarchyLevel, &str)> {
        [
            (HierarchyLevel::Style, &self.style_id),
            (HierarchyLevel::Variant, &self.variant_id),
            (HierarchyLevel::Type, &self.type_id),
            (HierarchyLevel::Subcategory, &self.subcategory_id),
        ]
        .into_iter()
        .find_map(|(level, value)| value.as_deref().filter(|v| !v.is_empty()).map(|v| (level, v)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub slug: String,
    pub level: HierarchyLevel,
}

impl Breadcrumb {
    fn of(node: &impl HierarchyNode, depth: usize) -> Self {
        Self { name: node.name().to_string(), slug: node.slug().to_string(), level: HierarchyLevel::for_depth(depth) }
    }
}

/// Borrowed node inside the tree: a main category or any descendant.
#[derive(Clone, Copy, Debug)]
pub enum NodeRef<'a> {
    Main(&'a CategoryNode),
    Sub(&'a Subcategory),
}

impl NodeRef<'_> {
    /// Owned copy; label subcategories become childless nodes keyed by their slug.
    pub fn to_node(&self) -> CategoryNode {
        match self {
            Self::Main(node) => (*node).clone(),
            Self::Sub(Subcategory::Node(node)) => node.as_ref().clone(),
            Self::Sub(Subcategory::Label(label)) => CategoryNode::new(label.slug(), label.slug(), label.name()),
        }
    }
}

impl HierarchyNode for NodeRef<'_> {
    fn id(&self) -> &str {
        match self { Self::Main(n) => n.id(), Self::Sub(s) => s.id() }
    }
    fn slug(&self) -> &str {
        match self { Self::Main(n) => n.slug(), Self::Sub(s) => s.slug() }
    }
    fn name(&self) -> &str {
        match self { Self::Main(n) => n.name(), Self::Sub(s) => s.name() }
    }
    fn children(&self) -> &[Subcategory] {
        match self { Self::Main(n) => n.children(), Self::Sub(s) => s.children() }
    }
}

#[derive(Clone, Debug)]
pub struct Resolution<'a> {
    pub main: &'a CategoryNode,
    pub target: NodeRef<'a>,
    /// Root to target, always starting with the main category.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// False when a deep segment was given but nothing matched it.
    pub deep_match_found: bool,
}

pub fn find_main<'a>(categories: &'a [CategoryNode], segment: &str) -> Option<&'a CategoryNode> {
    categories.iter().find(|c| c.matches_segment(segment))
}

/// Resolves `path` against the tree. `None` only when the main category is unknown.
///
/// Only the deepest populated segment is searched for; shallower segments are
/// not checked against the found node's ancestry.
pub fn resolve<'a>(categories: &'a [CategoryNode], path: &CategoryPath) -> Option<Resolution<'a>> {
    let main = find_main(categories, &path.main)?;
    let main_crumb = Breadcrumb::of(main, 1);

    let Some((level, segment)) = path.deepest() else {
        return Some(Resolution { main, target: NodeRef::Main(main), breadcrumbs: vec![main_crumb], deep_match_found: true });
    };

    let mut trail = Vec::new();
    match search(main.children(), segment, 2, &mut trail) {
        Some(found) => {
            trail.push(main_crumb);
            trail.reverse();
            Some(Resolution { main, target: NodeRef::Sub(found), breadcrumbs: trail, deep_match_found: true })
        }
        None => {
            tracing::debug!(main = %main.slug, %level, segment, "deep segment not found, using main category");
            Some(Resolution { main, target: NodeRef::Main(main), breadcrumbs: vec![main_crumb], deep_match_found: false })
        }
    }
}

/// Depth-first search; the trail is appended on the way out (target first).
fn search<'a>(children: &'a [Subcategory], segment: &str, depth: usize, trail: &mut Vec<Breadcrumb>) -> Option<&'a Subcategory> {
    for child in children {
        if child.matches_segment(segment) {
            trail.push(Breadcrumb::of(child, depth));
            return Some(child);
        }
        if let Some(found) = search(child.children(), segment, depth + 1, trail) {
            trail.push(Breadcrumb::of(child, depth));
            return Some(found);
        }
    }
    None
}
