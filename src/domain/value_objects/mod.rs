//! Value Objects for the category hierarchy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest level the navigation scheme can name.
pub const MAX_NAMED_DEPTH: usize = 5;

/// URL-safe category slug value object
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn new(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if value.is_empty() { return Err(SlugError::Empty); }
        if value.len() > 100 { return Err(SlugError::TooLong); }
        if !is_slug_shaped(&value) { return Err(SlugError::Malformed(value)); }
        Ok(Self(value))
    }

    /// Derive a slug from a display label ("Home & Kitchen" -> "home-kitchen").
    pub fn from_label(label: &str) -> Result<Self, SlugError> { Self::new(slugify(label)) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::new(value) }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self { slug.0 }
}

#[derive(Debug, Clone, PartialEq, Eq)] pub enum SlugError { Empty, TooLong, Malformed(String) }
impl std::error::Error for SlugError {}
impl fmt::Display for SlugError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug empty"),
            Self::TooLong => write!(f, "slug too long"),
            Self::Malformed(s) => write!(f, "slug '{}' must be lowercase letters, digits and single dashes", s),
        }
    }
}

/// Lowercase, collapse every run of non-alphanumerics into one dash, trim dashes.
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_dash = false;
    for ch in label.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !out.is_empty() { out.push('-'); }
            pending_dash = false;
            out.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

fn is_slug_shaped(value: &str) -> bool {
    !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value.chars().all(|c| c == '-' || c.is_ascii_digit() || (c.is_alphanumeric() && !c.is_uppercase()))
}

/// Named position of a node in the hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HierarchyLevel { Main, Subcategory, Type, Variant, Style }

impl HierarchyLevel {
    /// Level for a 1-based depth. Depths past the named range map to
    /// `Subcategory`, mirroring the route scheme's limitation.
    pub fn for_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => Self::Main,
            3 => Self::Type,
            4 => Self::Variant,
            5 => Self::Style,
            _ => Self::Subcategory,
        }
    }

    pub fn depth(self) -> usize {
        match self { Self::Main => 1, Self::Subcategory => 2, Self::Type => 3, Self::Variant => 4, Self::Style => 5 }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Subcategory => "subcategory",
            Self::Type => "type",
            Self::Variant => "variant",
            Self::Style => "style",
        }
    }

    /// Parses the `:level` route segment; `main` is not a valid deep segment.
    pub fn from_route_segment(segment: &str) -> Option<Self> {
        match segment {
            "subcategory" => Some(Self::Subcategory),
            "type" => Some(Self::Type),
            "variant" => Some(Self::Variant),
            "style" => Some(Self::Style),
            _ => None,
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Route segment used in `/category/:main/:segment/:slug` for a node at `depth`.
pub fn route_segment_for_depth(depth: usize) -> &'static str {
    match depth {
        3 => "type",
        4 => "variant",
        5 => "style",
        _ => "subcategory",
    }
}

/// Stable identity of a rendered node: owning main category, depth and node id.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeKey {
    pub category_id: String,
    pub depth: usize,
    pub node_id: String,
}

impl NodeKey {
    pub fn new(category_id: impl Into<String>, depth: usize, node_id: impl Into<String>) -> Self {
        Self { category_id: category_id.into(), depth, node_id: node_id.into() }
    }

    pub fn level(&self) -> HierarchyLevel { HierarchyLevel::for_depth(self.depth) }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.category_id, self.depth, self.node_id)
    }
}
