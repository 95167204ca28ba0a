//! In-memory catalog state
//!
//! The whole catalog lives in one serializable value: three id-keyed
//! tables plus the monotonic id counters. `BTreeMap` keeps each table
//! in id order, so iteration order is insertion order and every
//! serialization of the same state is byte-identical.
//!
//! The state itself enforces nothing. Validation belongs to the schema
//! and catalog store operations; commit and rollback belong to the
//! facade, which mutates a clone and swaps it in only on success.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::types::{Product, ProductId, ValueId};
use crate::schema::types::{Attribute, AttributeId, Category, CategoryId};

/// Snapshot format this build reads and writes.
pub const STATE_FORMAT: u32 = 1;

/// All catalog tables and counters, cheap to clone and serialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogState {
    /// Snapshot format tag
    pub format: u32,
    /// Stable identity of this catalog, allocated at first open
    pub store_id: Uuid,
    categories: BTreeMap<CategoryId, Category>,
    attributes: BTreeMap<AttributeId, Attribute>,
    products: BTreeMap<ProductId, Product>,
    next_category_id: CategoryId,
    next_attribute_id: AttributeId,
    next_value_id: ValueId,
}

impl CatalogState {
    /// Creates an empty catalog with a fresh identity.
    pub fn new() -> Self {
        Self {
            format: STATE_FORMAT,
            store_id: Uuid::new_v4(),
            categories: BTreeMap::new(),
            attributes: BTreeMap::new(),
            products: BTreeMap::new(),
            next_category_id: 0,
            next_attribute_id: 0,
            next_value_id: 0,
        }
    }

    // === Lookups ===

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    pub fn attribute(&self, id: AttributeId) -> Option<&Attribute> {
        self.attributes.get(&id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// All categories in id (insertion) order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// A category's attributes in id (insertion) order.
    pub fn category_attributes(&self, id: CategoryId) -> impl Iterator<Item = &Attribute> {
        self.attributes.values().filter(move |a| a.category_id == id)
    }

    /// A category's products, in id order only; callers wanting
    /// creation order sort by timestamp themselves.
    pub fn category_products(&self, id: CategoryId) -> impl Iterator<Item = &Product> {
        self.products.values().filter(move |p| p.category_id == id)
    }

    /// All products in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn category_name_taken(&self, name: &str) -> bool {
        self.categories.values().any(|c| c.name == name)
    }

    /// SKU uniqueness is catalog-wide, not per category.
    pub fn sku_taken(&self, sku: &str) -> bool {
        self.products.values().any(|p| p.sku == sku)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    // === Mutation primitives (crate-internal) ===

    pub(crate) fn next_category_id(&mut self) -> CategoryId {
        self.next_category_id += 1;
        self.next_category_id
    }

    pub(crate) fn next_attribute_id(&mut self) -> AttributeId {
        self.next_attribute_id += 1;
        self.next_attribute_id
    }

    pub(crate) fn next_value_id(&mut self) -> ValueId {
        self.next_value_id += 1;
        self.next_value_id
    }

    pub(crate) fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.products.get_mut(&id)
    }

    pub(crate) fn insert_category(&mut self, category: Category) {
        self.categories.insert(category.id, category);
    }

    pub(crate) fn insert_attribute(&mut self, attribute: Attribute) {
        self.attributes.insert(attribute.id, attribute);
    }

    pub(crate) fn insert_product(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }

    pub(crate) fn remove_category(&mut self, id: CategoryId) -> Option<Category> {
        self.categories.remove(&id)
    }

    pub(crate) fn remove_attribute(&mut self, id: AttributeId) -> Option<Attribute> {
        self.attributes.remove(&id)
    }

    pub(crate) fn remove_product(&mut self, id: ProductId) -> Option<Product> {
        self.products.remove(&id)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_is_empty() {
        let state = CatalogState::new();
        assert_eq!(state.format, STATE_FORMAT);
        assert_eq!(state.category_count(), 0);
        assert_eq!(state.attribute_count(), 0);
        assert_eq!(state.product_count(), 0);
    }

    #[test]
    fn test_id_counters_are_monotonic() {
        let mut state = CatalogState::new();
        assert_eq!(state.next_category_id(), 1);
        assert_eq!(state.next_category_id(), 2);
        assert_eq!(state.next_attribute_id(), 1);
        assert_eq!(state.next_value_id(), 1);
    }

    #[test]
    fn test_counters_survive_serialization() {
        let mut state = CatalogState::new();
        state.next_category_id();
        state.next_category_id();

        let json = serde_json::to_string(&state).unwrap();
        let mut back: CatalogState = serde_json::from_str(&json).unwrap();

        assert_eq!(back.store_id, state.store_id);
        assert_eq!(back.next_category_id(), 3);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let mut state = CatalogState::new();
        let id = state.next_category_id();
        state.insert_category(Category {
            id,
            name: "Phones".into(),
            description: None,
        });

        let first = serde_json::to_string(&state).unwrap();
        let second = serde_json::to_string(&state).unwrap();
        assert_eq!(first, second);
    }
}
