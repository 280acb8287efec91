//! Domain model for the trivia question bank.
//!
//! # Responsibility
//! - Define canonical question/category records used by core query logic.
//! - Keep one plain-field shape shared by storage reads and caller responses.
//!
//! # Invariants
//! - Every question is identified by a store-assigned integer id.
//! - Deletion is a hard delete; deleted ids are never reused.

pub mod category;
pub mod question;
