//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository reads/writes into the question bank operations.
//! - Keep boundary layers decoupled from storage details.

pub mod category_index;
pub mod pagination;
pub mod quiz_selector;
pub mod request;
pub mod trivia_service;
