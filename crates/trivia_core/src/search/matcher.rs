//! Case-insensitive substring matcher over question text.
//!
//! # Invariants
//! - An empty term matches every question.
//! - Input ordering (ascending id) is preserved.
//! - Only the `question` field is inspected, never `answer`.

use crate::model::question::Question;

/// Returns questions whose text contains `term`, ignoring case.
pub fn search_questions(term: &str, questions: &[Question]) -> Vec<Question> {
    let needle = term.to_lowercase();
    questions
        .iter()
        .filter(|question| matches_term(&question.question, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lowercased.
fn matches_term(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}
