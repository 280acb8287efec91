//! Category id to label lookup.

use crate::model::category::{Category, CategoryId};
use std::collections::BTreeMap;

/// Ordered `id -> type` mapping, serialized as a JSON object keyed by id.
pub type CategoryIndex = BTreeMap<CategoryId, String>;

/// Builds the lookup from categories. Ids are unique by schema, so later
/// duplicates cannot occur.
pub fn index_categories(categories: &[Category]) -> CategoryIndex {
    categories
        .iter()
        .map(|category| (category.id, category.kind.clone()))
        .collect()
}
