//! Product Matcher: filter a flat product list by a category and its descendants.

use std::collections::HashSet;

use crate::domain::aggregates::{HierarchyNode, Product, Subcategory};

/// Identifiers (and lowercased slugs) of a node and every node below it.
#[derive(Clone, Debug, Default)]
pub struct InclusionSet {
    ids: Vec<String>,
    id_index: HashSet<String>,
    slugs: HashSet<String>,
    target_slug: String,
}

impl InclusionSet {
    pub fn for_node(target: &impl HierarchyNode) -> Self {
        let mut set = Self { target_slug: target.slug().to_lowercase(), ..Self::default() };
        set.insert(target.id(), target.slug());
        set.collect(target.children());
        set
    }

    fn collect(&mut self, children: &[Subcategory]) {
        for child in children {
            self.insert(child.id(), child.slug());
            self.collect(child.children());
        }
    }

    fn insert(&mut self, id: &str, slug: &str) {
        if self.id_index.insert(id.to_string()) {
            self.ids.push(id.to_string());
        }
        self.slugs.insert(slug.to_lowercase());
    }

    /// Pre-order, without duplicates; the target comes first.
    pub fn ids(&self) -> &[String] { &self.ids }

    pub fn len(&self) -> usize { self.ids.len() }

    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    pub fn contains_id(&self, id: &str) -> bool { self.id_index.contains(id) }

    pub fn contains_slug(&self, slug: &str) -> bool { self.slugs.contains(&slug.to_lowercase()) }

    /// References carrying an id match on id membership or the target's own
    /// slug. Slugs repeat across branches, so subtree slugs are only consulted
    /// for references without an id.
    pub fn matches(&self, product: &Product) -> bool {
        let Some(reference) = product.main_category() else { return false };
        let slug = reference.resolve_slug();
        match reference.resolve_id() {
            Some(id) => self.contains_id(id) || slug.is_some_and(|s| s.to_lowercase() == self.target_slug),
            None => slug.is_some_and(|s| self.contains_slug(s)),
        }
    }
}

/// Category plus optional free-text filter over a product list.
#[derive(Clone, Debug)]
pub struct ProductFilter {
    inclusion: InclusionSet,
    search: Option<String>,
}

impl ProductFilter {
    pub fn new(target: &impl HierarchyNode) -> Self {
        Self { inclusion: InclusionSet::for_node(target), search: None }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn inclusion(&self) -> &InclusionSet { &self.inclusion }

    pub fn accepts(&self, product: &Product) -> bool {
        self.inclusion.matches(product) && self.search.as_deref().map_or(true, |q| product.matches_text(q))
    }

    /// Linear scan; catalogs served here are small enough not to need an index.
    pub fn apply<'p>(&self, products: &'p [Product]) -> Vec<&'p Product> {
        products.iter().filter(|p| self.accepts(p)).collect()
    }
}

pub fn filter_products<'p>(target: &impl HierarchyNode, products: &'p [Product]) -> Vec<&'p Product> {
    ProductFilter::new(target).apply(products)
}
