//! Category store, hierarchy resolution and product matching.
pub mod fallback;
pub mod matcher;
pub mod resolver;
pub mod store;

pub use fallback::fallback_tree;
pub use matcher::{filter_products, InclusionSet, ProductFilter};
pub use resolver::{find_main, resolve, Breadcrumb, CategoryPath, NodeRef, Resolution};
pub use store::{CategorySnapshot, CategoryStore};
