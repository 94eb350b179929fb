//! Product Aggregate
//!
//! Products are owned by the catalog backend; this side only reads them and
//! decides which category they belong to.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub category: Option<ProductCategory>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCategory {
    #[serde(default)]
    pub main: Option<CategoryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

/// Category reference on a product: legacy slug string or embedded object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    Slug(String),
    Object(EmbeddedCategory),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedCategory {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl CategoryRef {
    pub fn resolve_slug(&self) -> Option<&str> {
        match self {
            Self::Slug(slug) => Some(slug.as_str()),
            Self::Object(obj) => obj.slug.as_deref(),
        }
    }

    /// Only embedded objects carry an identifier.
    pub fn resolve_id(&self) -> Option<&str> {
        match self {
            Self::Slug(_) => None,
            Self::Object(obj) => obj.id.as_deref(),
        }
    }
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), description: None, price: 0.0, images: vec![], vendor: None, category: None }
    }

    pub fn in_category(mut self, main: CategoryRef) -> Self {
        self.category = Some(ProductCategory { main: Some(main), sub: None });
        self
    }

    pub fn main_category(&self) -> Option<&CategoryRef> {
        self.category.as_ref().and_then(|c| c.main.as_ref())
    }

    /// Case-insensitive substring match on name and description.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() { return true; }
        self.name.to_lowercase().contains(&needle)
            || self.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}
