//! Category Aggregate

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::domain::value_objects::{slugify, Slug};

/// Common view over full nodes and label-only subcategories.
pub trait HierarchyNode {
    fn id(&self) -> &str;
    fn slug(&self) -> &str;
    fn name(&self) -> &str;
    fn children(&self) -> &[Subcategory];

    /// Route segments may carry either the slug or the id.
    fn matches_segment(&self, segment: &str) -> bool { self.slug() == segment || self.id() == segment }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(alias = "_id")]
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Cached by the backend, not kept in sync with live product data.
    #[serde(default)]
    pub product_count: u32,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

fn default_true() -> bool { true }

impl CategoryNode {
    pub fn new(id: impl Into<String>, slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(), slug: slug.into(), name: name.into(), description: None, image: None,
            is_active: true, product_count: 0, sort_order: 0, subcategories: vec![],
        }
    }

    pub fn with_child(mut self, child: CategoryNode) -> Self {
        self.subcategories.push(Subcategory::Node(Box::new(child)));
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.subcategories.push(Subcategory::Label(CategoryLabel::new(label)));
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self { self.sort_order = sort_order; self }

    pub fn is_leaf(&self) -> bool { self.subcategories.is_empty() }
}

impl HierarchyNode for CategoryNode {
    fn id(&self) -> &str { &self.id }
    fn slug(&self) -> &str { &self.slug }
    fn name(&self) -> &str { &self.name }
    fn children(&self) -> &[Subcategory] { &self.subcategories }
}

/// Child entry: a full node from the backend, or a bare label from the fallback tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subcategory {
    Label(CategoryLabel),
    Node(Box<CategoryNode>),
}

impl Subcategory {
    pub fn as_node(&self) -> Option<&CategoryNode> {
        match self { Self::Node(node) => Some(node), Self::Label(_) => None }
    }

    pub fn is_active(&self) -> bool {
        match self { Self::Node(node) => node.is_active, Self::Label(_) => true }
    }

    pub fn sort_order(&self) -> i32 {
        match self { Self::Node(node) => node.sort_order, Self::Label(_) => 0 }
    }
}

impl HierarchyNode for Subcategory {
    fn id(&self) -> &str {
        match self { Self::Node(node) => &node.id, Self::Label(label) => &label.slug }
    }
    fn slug(&self) -> &str {
        match self { Self::Node(node) => &node.slug, Self::Label(label) => &label.slug }
    }
    fn name(&self) -> &str {
        match self { Self::Node(node) => &node.name, Self::Label(label) => &label.name }
    }
    fn children(&self) -> &[Subcategory] {
        match self { Self::Node(node) => &node.subcategories, Self::Label(_) => &[] }
    }
}

/// Plain-string subcategory. Serialized back as the bare label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CategoryLabel {
    name: String,
    slug: String,
}

impl CategoryLabel {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }
    pub fn name(&self) -> &str { &self.name }
    pub fn slug(&self) -> &str { &self.slug }
}

impl From<String> for CategoryLabel {
    fn from(name: String) -> Self { Self::new(name) }
}

impl From<CategoryLabel> for String {
    fn from(label: CategoryLabel) -> Self { label.name }
}

/// Payload for creating a category.
#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "validate_slug")]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub parent_id: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl CategoryDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), slug: None, description: None, image: None, parent_id: None, is_active: None, sort_order: None }
    }

    /// Explicit slug if given, otherwise derived from the name.
    pub fn effective_slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }
}

/// Partial update; absent fields are left untouched by the backend.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_slug")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    Slug::new(slug).map(|_| ()).map_err(|_| ValidationError::new("slug"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_backend_node() {
        let json = r#"{
            "_id": "c1", "slug": "electronics", "name": "Electronics",
            "productCount": 12, "sortOrder": 2,
            "subcategories": [
                {"_id": "c2", "slug": "phones", "name": "Phones", "isActive": false},
                "Cameras & Photo"
            ]
        }"#;
        let node: CategoryNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.id, "c1");
        assert!(node.is_active);
        assert_eq!(node.product_count, 12);
        assert_eq!(node.subcategories.len(), 2);
        assert!(!node.subcategories[0].is_active());
        assert_eq!(node.subcategories[1].slug(), "cameras-photo");
        assert_eq!(node.subcategories[1].name(), "Cameras & Photo");
        assert!(node.subcategories[1].children().is_empty());
    }

    #[test]
    fn test_label_serializes_as_string() {
        let node = CategoryNode::new("men", "men", "Men's Collection").with_label("Shirts");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["subcategories"][0], serde_json::json!("Shirts"));
    }

    #[test]
    fn test_draft_validation() {
        assert!(CategoryDraft::named("Garden").validate().is_ok());
        assert!(CategoryDraft::named("").validate().is_err());
        let mut draft = CategoryDraft::named("Garden Tools");
        draft.slug = Some("Garden Tools".into());
        assert!(draft.validate().is_err());
        draft.slug = None;
        assert_eq!(draft.effective_slug(), "garden-tools");
    }
}
