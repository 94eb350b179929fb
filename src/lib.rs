//! Storefront Catalog
//!
//! Category hierarchy service for a multi-vendor storefront.
//!
//! ## Features
//! - Category tree store backed by the remote catalog API, with a fallback tree
//! - Route resolution into main/target categories and breadcrumbs
//! - Product matching against a category and all of its descendants
//! - Navigation menus with desktop hover and mobile accordion state

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod navigation;
pub mod remote;

use thiserror::Error;

pub use catalog::{CategoryPath, CategoryStore, InclusionSet, Resolution};
pub use config::Config;
pub use domain::aggregates::{CategoryNode, CategoryRef, HierarchyNode, Product, Subcategory};
pub use navigation::{ExpandState, HoverMenu, NavMenu};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Catalog API error ({status}): {message}")]
    Remote { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<validator::ValidationErrors> for CatalogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
