//! Catalog store operations
//!
//! Product CRUD and per-attribute value writes, orchestrating the codec
//! once per attribute. Creation is all-or-nothing: every submitted
//! value is encoded before anything is inserted, so a failure leaves
//! the state exactly as it was.

use std::collections::BTreeMap;

use chrono::Utc;
use uuid::Uuid;

use crate::codec::{self, TypedValue};
use crate::schema::types::{Attribute, AttributeId, CategoryId};
use crate::store::state::CatalogState;

use super::errors::{CatalogError, CatalogResult};
use super::types::{Product, ProductId, ValueRecord};

/// Creates a product and its value records in one step.
///
/// `submitted` maps attribute ids to raw external values. The walk is
/// over the category's attributes, not the map, so submitted ids that
/// match no attribute of the category are ignored. An attribute absent
/// from the map counts as not submitted.
pub fn create_product(
    state: &mut CatalogState,
    category_id: CategoryId,
    name: impl Into<String>,
    sku: impl Into<String>,
    price: f64,
    submitted: &BTreeMap<AttributeId, String>,
) -> CatalogResult<Product> {
    if state.category(category_id).is_none() {
        return Err(CatalogError::UnknownCategory(category_id));
    }

    let sku = sku.into();
    if state.sku_taken(&sku) {
        return Err(CatalogError::DuplicateSku(sku));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(CatalogError::InvalidPrice(price));
    }

    // Encode everything before allocating anything
    let attributes: Vec<Attribute> = state.category_attributes(category_id).cloned().collect();
    let mut encoded: Vec<(AttributeId, TypedValue)> = Vec::new();
    for attribute in &attributes {
        let raw = submitted.get(&attribute.id).map(String::as_str);
        if let Some(value) = encode_for(attribute, raw)? {
            encoded.push((attribute.id, value));
        }
    }

    let mut values = BTreeMap::new();
    for (attribute_id, value) in encoded {
        values.insert(
            attribute_id,
            ValueRecord {
                id: state.next_value_id(),
                attribute_id,
                value,
            },
        );
    }

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4(),
        category_id,
        name: name.into(),
        sku,
        price,
        created_at: now,
        updated_at: now,
        values,
    };
    state.insert_product(product.clone());
    Ok(product)
}

/// Writes, replaces or clears one value on an existing product.
///
/// The attribute must belong to the product's category. `raw = None`
/// clears an optional value (absence means "no value") and rejects a
/// required one. A replaced value keeps its record id.
pub fn set_value(
    state: &mut CatalogState,
    product_id: ProductId,
    attribute_id: AttributeId,
    raw: Option<&str>,
) -> CatalogResult<Product> {
    let category_id = state
        .product(product_id)
        .map(|p| p.category_id)
        .ok_or(CatalogError::UnknownProduct(product_id))?;

    let attribute = state
        .attribute(attribute_id)
        .filter(|a| a.category_id == category_id)
        .cloned()
        .ok_or(CatalogError::UnknownAttribute(attribute_id))?;

    let record = match encode_for(&attribute, raw)? {
        Some(value) => {
            let existing = state
                .product(product_id)
                .and_then(|p| p.value(attribute_id))
                .map(|r| r.id);
            let id = match existing {
                Some(id) => id,
                None => state.next_value_id(),
            };
            Some(ValueRecord {
                id,
                attribute_id,
                value,
            })
        }
        None => None,
    };

    let product = state
        .product_mut(product_id)
        .ok_or(CatalogError::UnknownProduct(product_id))?;
    match record {
        Some(record) => {
            product.values.insert(attribute_id, record);
        }
        None => {
            product.values.remove(&attribute_id);
        }
    }
    product.touch();
    Ok(product.clone())
}

/// Deletes a product; its value records die with it.
pub fn delete_product(state: &mut CatalogState, id: ProductId) -> CatalogResult<()> {
    state
        .remove_product(id)
        .map(|_| ())
        .ok_or(CatalogError::UnknownProduct(id))
}

/// Looks up a single product.
pub fn get_product(state: &CatalogState, id: ProductId) -> CatalogResult<Product> {
    state
        .product(id)
        .cloned()
        .ok_or(CatalogError::UnknownProduct(id))
}

/// All products in creation order, id as the tie-break.
pub fn list_products(state: &CatalogState) -> Vec<Product> {
    let mut products: Vec<Product> = state.products().cloned().collect();
    products.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    products
}

fn encode_for(attribute: &Attribute, raw: Option<&str>) -> CatalogResult<Option<TypedValue>> {
    codec::encode(attribute, raw).map_err(|source| CatalogError::Value {
        attribute: attribute.name.clone(),
        source,
    })
}
