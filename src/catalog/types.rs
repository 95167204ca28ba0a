//! Catalog entity definitions

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::codec::TypedValue;
use crate::schema::types::{AttributeId, CategoryId};

/// Product identifier, a v4 UUID allocated at creation.
pub type ProductId = Uuid;

/// Value record identifier, allocated monotonically by the backing store.
pub type ValueId = u64;

/// One product and the typed values it carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier
    pub id: ProductId,
    /// Owning category
    pub category_id: CategoryId,
    /// Display name
    pub name: String,
    /// Catalog-unique stock keeping unit
    pub sku: String,
    /// Non-negative, finite
    pub price: f64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Refreshed by every mutation that touches the row
    pub updated_at: DateTime<Utc>,
    /// At most one value per attribute, keyed by attribute id.
    ///
    /// Sparse: an attribute without a record has no value. The map key
    /// makes the one-value-per-attribute invariant structural.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<AttributeId, ValueRecord>,
}

impl Product {
    /// The stored value record for an attribute, if any.
    pub fn value(&self, attribute_id: AttributeId) -> Option<&ValueRecord> {
        self.values.get(&attribute_id)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One stored attribute value of one product.
///
/// Records are owned by their product and die with it; the attribute
/// is referenced by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRecord {
    /// Unique value record identifier
    pub id: ValueId,
    /// The attribute this value satisfies
    pub attribute_id: AttributeId,
    /// The typed slot content
    pub value: TypedValue,
}
