//! Built-in tree served when the catalog backend cannot list categories.
//!
//! Entries carry bare label subcategories instead of full nodes, which is the
//! shape the backend used before nested categories existed.

use crate::domain::aggregates::CategoryNode;

const FALLBACK: &[(&str, &str, &[&str])] = &[
    ("electronics", "Electronics", &["Smartphones", "Laptops", "Audio", "Cameras", "Wearables"]),
    ("men", "Men's Collection", &["Shirts", "Trousers", "Footwear", "Watches", "Accessories"]),
    ("women", "Women's Collection", &["Dresses", "Tops", "Handbags", "Footwear", "Jewelry"]),
    ("home-kitchen", "Home & Kitchen", &["Furniture", "Cookware", "Bedding", "Decor"]),
    ("beauty", "Beauty & Personal Care", &["Skincare", "Makeup", "Fragrances", "Hair Care"]),
    ("sports", "Sports & Outdoors", &["Fitness", "Camping", "Cycling", "Team Sports"]),
];

pub fn fallback_tree() -> Vec<CategoryNode> {
    FALLBACK
        .iter()
        .enumerate()
        .map(|(position, (slug, name, labels))| {
            labels.iter().fold(
                CategoryNode::new(*slug, *slug, *name).with_sort_order(position as i32),
                |node, label| node.with_label(label),
            )
        })
        .collect()
}
