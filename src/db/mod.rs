//! Catalog facade
//!
//! [`CatalogDb`] owns the backing store and is the single entry point
//! an embedding application calls. There is no global handle; every
//! caller constructs or receives one explicitly.
//!
//! # Commit discipline (strict order)
//!
//! 1. Clone the live state
//! 2. Run the mutation against the clone
//! 3. On success, persist the clone (durable mode only)
//! 4. Swap the clone in
//! 5. On any error at any step, drop the clone
//!
//! No partial state survives a failed mutation, in memory or on disk.

mod errors;
mod views;

pub use errors::{DbError, DbResult};
pub use views::{AttributeInfo, AttributeValueView, ProductView};

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::catalog::store as catalog_store;
use crate::catalog::types::{Product, ProductId};
use crate::catalog::CatalogError;
use crate::codec;
use crate::config::CatalogConfig;
use crate::observability::Logger;
use crate::schema::store as schema_store;
use crate::schema::types::{Attribute, AttributeId, Category, CategoryId, DataType};
use crate::store::{CatalogState, Snapshot};

/// One open product catalog.
#[derive(Debug)]
pub struct CatalogDb {
    config: CatalogConfig,
    state: CatalogState,
    snapshot: Option<Snapshot>,
}

impl CatalogDb {
    /// Opens a catalog per the config.
    ///
    /// Durable mode loads and verifies the snapshot file; a missing
    /// file is an empty catalog. In-memory mode never touches disk.
    pub fn open(config: CatalogConfig) -> DbResult<Self> {
        let snapshot = config.snapshot_path().map(Snapshot::new);
        let state = match &snapshot {
            Some(snapshot) => snapshot.load()?.unwrap_or_default(),
            None => CatalogState::new(),
        };

        let store_id = state.store_id.to_string();
        let categories = state.category_count().to_string();
        let products = state.product_count().to_string();
        Logger::info(
            "CATALOG_OPEN",
            &[
                ("mode", if config.is_durable() { "durable" } else { "memory" }),
                ("store_id", store_id.as_str()),
                ("categories", categories.as_str()),
                ("products", products.as_str()),
            ],
        );

        Ok(Self {
            config,
            state,
            snapshot,
        })
    }

    /// Opens a throwaway in-memory catalog.
    pub fn in_memory() -> Self {
        Self {
            config: CatalogConfig::in_memory(),
            state: CatalogState::new(),
            snapshot: None,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Stable identity of this catalog, kept across reopens.
    pub fn store_id(&self) -> Uuid {
        self.state.store_id
    }

    /// Read-only handle on the live state.
    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    // === Schema operations ===

    /// Creates a category with a catalog-unique name.
    pub fn create_category(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> DbResult<Category> {
        let name = name.into();
        let result = self.commit(|state| schema_store::create_category(state, name, description));
        match &result {
            Ok(category) => {
                let id = category.id.to_string();
                Logger::info(
                    "CATEGORY_CREATED",
                    &[("id", id.as_str()), ("name", category.name.as_str())],
                );
            }
            Err(error) => log_rejection("create_category", error),
        }
        result
    }

    /// Deletes a category, cascading to its attributes and products.
    pub fn delete_category(&mut self, id: CategoryId) -> DbResult<()> {
        let result = self.commit(|state| schema_store::delete_category(state, id));
        match &result {
            Ok(()) => {
                let id = id.to_string();
                Logger::info("CATEGORY_DELETED", &[("id", id.as_str())]);
            }
            Err(error) => log_rejection("delete_category", error),
        }
        result
    }

    /// Adds an attribute definition to a category.
    ///
    /// `options` is the external comma-separated form, meaningful only
    /// for [`DataType::Enum`]. A data type arriving as a string parses
    /// through [`DataType::from_str`] before this call.
    pub fn add_attribute(
        &mut self,
        category_id: CategoryId,
        name: impl Into<String>,
        data_type: DataType,
        options: Option<&str>,
        is_required: bool,
    ) -> DbResult<Attribute> {
        let name = name.into();
        let result = self.commit(|state| {
            schema_store::add_attribute(state, category_id, name, data_type, options, is_required)
        });
        match &result {
            Ok(attribute) => {
                let id = attribute.id.to_string();
                let category = attribute.category_id.to_string();
                Logger::info(
                    "ATTRIBUTE_ADDED",
                    &[
                        ("id", id.as_str()),
                        ("category_id", category.as_str()),
                        ("name", attribute.name.as_str()),
                        ("data_type", attribute.data_type.type_name()),
                    ],
                );
            }
            Err(error) => log_rejection("add_attribute", error),
        }
        result
    }

    /// All categories in insertion order.
    pub fn list_categories(&self) -> Vec<Category> {
        schema_store::list_categories(&self.state)
    }

    /// Looks up a single category.
    pub fn get_category(&self, id: CategoryId) -> DbResult<Category> {
        Ok(schema_store::get_category(&self.state, id)?)
    }

    /// A category's attribute definitions in insertion order.
    pub fn list_attributes(&self, category_id: CategoryId) -> DbResult<Vec<Attribute>> {
        Ok(schema_store::list_attributes(&self.state, category_id)?)
    }

    /// The form-generation listing for a category.
    pub fn attribute_listing(&self, category_id: CategoryId) -> DbResult<Vec<AttributeInfo>> {
        let attributes = schema_store::list_attributes(&self.state, category_id)?;
        Ok(attributes.iter().map(AttributeInfo::from).collect())
    }

    // === Catalog operations ===

    /// Creates a product with a value for each submitted attribute.
    ///
    /// All-or-nothing: every submitted value must satisfy its
    /// attribute, or the product and all its values are discarded.
    pub fn create_product(
        &mut self,
        category_id: CategoryId,
        name: impl Into<String>,
        sku: impl Into<String>,
        price: f64,
        submitted: &BTreeMap<AttributeId, String>,
    ) -> DbResult<Product> {
        let name = name.into();
        let sku = sku.into();
        let result = self.commit(|state| {
            catalog_store::create_product(state, category_id, name, sku, price, submitted)
        });
        match &result {
            Ok(product) => {
                let id = product.id.to_string();
                let values = product.values.len().to_string();
                Logger::info(
                    "PRODUCT_CREATED",
                    &[
                        ("id", id.as_str()),
                        ("sku", product.sku.as_str()),
                        ("values", values.as_str()),
                    ],
                );
            }
            Err(error) => log_rejection("create_product", error),
        }
        result
    }

    /// Writes, replaces or clears one value on an existing product.
    pub fn set_product_value(
        &mut self,
        product_id: ProductId,
        attribute_id: AttributeId,
        raw: Option<&str>,
    ) -> DbResult<Product> {
        let result =
            self.commit(|state| catalog_store::set_value(state, product_id, attribute_id, raw));
        match &result {
            Ok(_) => {
                let product = product_id.to_string();
                let attribute = attribute_id.to_string();
                Logger::info(
                    "PRODUCT_VALUE_SET",
                    &[
                        ("product_id", product.as_str()),
                        ("attribute_id", attribute.as_str()),
                    ],
                );
            }
            Err(error) => log_rejection("set_product_value", error),
        }
        result
    }

    /// Deletes a product; its value records die with it.
    pub fn delete_product(&mut self, id: ProductId) -> DbResult<()> {
        let result = self.commit(|state| catalog_store::delete_product(state, id));
        match &result {
            Ok(()) => {
                let id = id.to_string();
                Logger::info("PRODUCT_DELETED", &[("id", id.as_str())]);
            }
            Err(error) => log_rejection("delete_product", error),
        }
        result
    }

    /// Looks up a single product with its raw typed values.
    pub fn get_product(&self, id: ProductId) -> DbResult<Product> {
        Ok(catalog_store::get_product(&self.state, id)?)
    }

    /// All products in creation order.
    pub fn list_products(&self) -> Vec<Product> {
        catalog_store::list_products(&self.state)
    }

    /// All products decoded and rendered for display, creation order.
    pub fn product_views(&self) -> DbResult<Vec<ProductView>> {
        catalog_store::list_products(&self.state)
            .iter()
            .map(|product| self.build_view(product))
            .collect()
    }

    /// One product decoded and rendered for display.
    pub fn product_view(&self, id: ProductId) -> DbResult<ProductView> {
        let product = catalog_store::get_product(&self.state, id)?;
        self.build_view(&product)
    }

    // === Internals ===

    /// Runs one mutation as a transaction.
    fn commit<T, E>(&mut self, op: impl FnOnce(&mut CatalogState) -> Result<T, E>) -> DbResult<T>
    where
        DbError: From<E>,
    {
        let mut working = self.state.clone();
        let outcome = op(&mut working)?;
        if let Some(snapshot) = &self.snapshot {
            snapshot.save(&working)?;
        }
        self.state = working;
        Ok(outcome)
    }

    fn build_view(&self, product: &Product) -> DbResult<ProductView> {
        let category = schema_store::get_category(&self.state, product.category_id)?;

        let mut values = Vec::new();
        for attribute in self.state.category_attributes(product.category_id) {
            if let Some(record) = product.value(attribute.id) {
                let value = codec::decode(attribute, &record.value).map_err(|source| {
                    CatalogError::Value {
                        attribute: attribute.name.clone(),
                        source,
                    }
                })?;
                values.push(AttributeValueView {
                    attribute_id: attribute.id,
                    attribute: attribute.name.clone(),
                    data_type: attribute.data_type,
                    value: value.render(),
                });
            }
        }

        Ok(ProductView {
            id: product.id,
            category_id: product.category_id,
            category: category.name,
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
            values,
        })
    }
}

fn log_rejection(operation: &str, error: &DbError) {
    let reason = error.to_string();
    let fields = [
        ("operation", operation),
        ("code", error.code()),
        ("reason", reason.as_str()),
    ];
    if error.is_rejection() {
        Logger::warn("OPERATION_REJECTED", &fields);
    } else {
        Logger::error("STORE_FAULT", &fields);
    }
}
