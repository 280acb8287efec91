//! Core query and quiz-selection logic for the trivia question bank.
//! This crate is the single source of truth for question bank invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{ConfigError, FlagOverrides, TriviaConfig, ValidationPolicy};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryId, ALL_CATEGORIES};
pub use model::question::{NewQuestion, Question, QuestionId, QuestionValidationError};
pub use repo::trivia_repo::{RepoError, RepoResult, SqliteTriviaRepository, TriviaRepository};
pub use search::matcher::search_questions;
pub use service::category_index::{index_categories, CategoryIndex};
pub use service::pagination::{paginate, QUESTIONS_PER_PAGE};
pub use service::quiz_selector::{select_next, QuizDraw};
pub use service::request::{CreateQuestionRequest, IntField, QuizCategory, QuizRequest};
pub use service::trivia_service::{
    CategoryList, CategoryQuestions, CreatedQuestion, DeletedQuestion, ErrorKind, QuestionPage,
    QuizOutcome, SearchResults, ServiceOptions, ServiceResult, TriviaService, TriviaServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
