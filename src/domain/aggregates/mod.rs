//! Aggregates module
pub mod category;
pub mod product;

pub use category::{CategoryDraft, CategoryLabel, CategoryNode, CategoryPatch, HierarchyNode, Subcategory};
pub use product::{CategoryRef, EmbeddedCategory, Product, ProductCategory};
