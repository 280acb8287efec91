//! Question search entry points.
//!
//! # Responsibility
//! - Filter question text by case-insensitive substring containment.
//! - Keep search result shaping inside core.
//!
//! No ranking, tokenization or indexing happens here.

pub mod matcher;
