//! Category domain model.
//!
//! Categories are read-only from core's perspective: they are seeded by
//! schema migration and never mutated by query operations.

use serde::{Deserialize, Serialize};

/// Integer identifier of a category row.
pub type CategoryId = i64;

/// Sentinel category id that selects every category in quiz requests.
pub const ALL_CATEGORIES: CategoryId = 0;

/// Question category, e.g. `Science` or `Art`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Serialized as `type` to match external schema naming.
    #[serde(rename = "type")]
    pub kind: String,
}

impl Category {
    pub fn new(id: CategoryId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
        }
    }
}
