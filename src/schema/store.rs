//! Schema store operations
//!
//! Category and attribute definition CRUD. Every function borrows the
//! catalog state and validates before it writes; callers decide whether
//! the mutated state is committed or dropped.
//!
//! Deleting a category cascades: its attributes, its products and their
//! value records all go with it. There is no independent attribute
//! deletion, so an attribute can only disappear together with its
//! category, and with it every product that could still reference it.

use crate::store::state::CatalogState;

use super::errors::{SchemaError, SchemaResult};
use super::types::{split_options, Attribute, Category, CategoryId, DataType};

/// Creates a category with a catalog-unique name.
pub fn create_category(
    state: &mut CatalogState,
    name: impl Into<String>,
    description: Option<String>,
) -> SchemaResult<Category> {
    let name = name.into();
    if state.category_name_taken(&name) {
        return Err(SchemaError::DuplicateName(name));
    }

    let category = Category {
        id: state.next_category_id(),
        name,
        description,
    };
    state.insert_category(category.clone());
    Ok(category)
}

/// Deletes a category together with everything it owns.
pub fn delete_category(state: &mut CatalogState, id: CategoryId) -> SchemaResult<()> {
    if state.category(id).is_none() {
        return Err(SchemaError::UnknownCategory(id));
    }

    let attribute_ids: Vec<_> = state.category_attributes(id).map(|a| a.id).collect();
    for attribute_id in attribute_ids {
        state.remove_attribute(attribute_id);
    }

    // Value records live inside their product and die with it
    let product_ids: Vec<_> = state.category_products(id).map(|p| p.id).collect();
    for product_id in product_ids {
        state.remove_product(product_id);
    }

    state.remove_category(id);
    Ok(())
}

/// Adds an attribute definition to an existing category.
///
/// `options` is the external comma-separated form; it only carries
/// meaning for enum attributes and is ignored for every other type.
/// Enum attributes must declare at least one option, and the list may
/// contain neither empty segments nor duplicates.
pub fn add_attribute(
    state: &mut CatalogState,
    category_id: CategoryId,
    name: impl Into<String>,
    data_type: DataType,
    options: Option<&str>,
    is_required: bool,
) -> SchemaResult<Attribute> {
    if state.category(category_id).is_none() {
        return Err(SchemaError::UnknownCategory(category_id));
    }

    let options = match data_type {
        DataType::Enum => validate_options(options)?,
        _ => Vec::new(),
    };

    let attribute = Attribute {
        id: state.next_attribute_id(),
        category_id,
        name: name.into(),
        data_type,
        options,
        is_required,
    };
    state.insert_attribute(attribute.clone());
    Ok(attribute)
}

/// Returns a category's attributes in insertion order.
pub fn list_attributes(
    state: &CatalogState,
    category_id: CategoryId,
) -> SchemaResult<Vec<Attribute>> {
    if state.category(category_id).is_none() {
        return Err(SchemaError::UnknownCategory(category_id));
    }
    Ok(state.category_attributes(category_id).cloned().collect())
}

/// Returns all categories in insertion order.
pub fn list_categories(state: &CatalogState) -> Vec<Category> {
    state.categories().cloned().collect()
}

/// Looks up a single category.
pub fn get_category(state: &CatalogState, id: CategoryId) -> SchemaResult<Category> {
    state
        .category(id)
        .cloned()
        .ok_or(SchemaError::UnknownCategory(id))
}

fn validate_options(raw: Option<&str>) -> SchemaResult<Vec<String>> {
    let raw = raw.unwrap_or("");
    if raw.is_empty() {
        return Err(SchemaError::InvalidOptions(
            "enum attribute requires at least one option".into(),
        ));
    }

    let options = split_options(raw);
    for (index, option) in options.iter().enumerate() {
        if option.is_empty() {
            return Err(SchemaError::InvalidOptions(format!(
                "empty option at position {}",
                index
            )));
        }
        if options[..index].contains(option) {
            return Err(SchemaError::InvalidOptions(format!(
                "duplicate option '{}'",
                option
            )));
        }
    }
    Ok(options)
}
