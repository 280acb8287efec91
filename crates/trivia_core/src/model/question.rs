//! Question domain model.
//!
//! # Responsibility
//! - Define the formatted question record exposed across the core boundary.
//! - Define the insert shape (`NewQuestion`) and its write-path validation.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `question` and `answer` are non-blank.
//! - `difficulty` range is only enforced when the caller asks for it.

use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::RangeInclusive;

/// Store-assigned question identifier.
pub type QuestionId = i64;

/// Difficulty scale used by the stock question bank.
pub const DIFFICULTY_RANGE: RangeInclusive<i64> = 1..=5;

/// Persisted question, in the plain-field "formatted" representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

/// Question payload before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: CategoryId,
    pub difficulty: i64,
}

/// Validation errors for question write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionValidationError {
    /// Question text is empty after trim.
    BlankQuestion,
    /// Answer text is empty after trim.
    BlankAnswer,
    /// Difficulty is outside [`DIFFICULTY_RANGE`].
    DifficultyOutOfRange(i64),
}

impl Display for QuestionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankQuestion => write!(f, "question text must not be blank"),
            Self::BlankAnswer => write!(f, "answer text must not be blank"),
            Self::DifficultyOutOfRange(value) => write!(
                f,
                "difficulty {value} is outside {}..={}",
                DIFFICULTY_RANGE.start(),
                DIFFICULTY_RANGE.end()
            ),
        }
    }
}

impl Error for QuestionValidationError {}

impl NewQuestion {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
        difficulty: i64,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category,
            difficulty,
        }
    }

    /// Checks invariants every stored question must satisfy.
    pub fn validate(&self) -> Result<(), QuestionValidationError> {
        if self.question.trim().is_empty() {
            return Err(QuestionValidationError::BlankQuestion);
        }
        if self.answer.trim().is_empty() {
            return Err(QuestionValidationError::BlankAnswer);
        }
        Ok(())
    }

    /// Checks the optional 1-5 difficulty policy.
    pub fn validate_difficulty(&self) -> Result<(), QuestionValidationError> {
        if DIFFICULTY_RANGE.contains(&self.difficulty) {
            Ok(())
        } else {
            Err(QuestionValidationError::DifficultyOutOfRange(self.difficulty))
        }
    }

    /// Attaches a store-assigned id.
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NewQuestion, QuestionValidationError};

    #[test]
    fn validate_rejects_blank_text() {
        let blank_question = NewQuestion::new("   ", "Paris", 3, 2);
        assert_eq!(
            blank_question.validate(),
            Err(QuestionValidationError::BlankQuestion)
        );

        let blank_answer = NewQuestion::new("Capital of France?", "\n", 3, 2);
        assert_eq!(
            blank_answer.validate(),
            Err(QuestionValidationError::BlankAnswer)
        );
    }

    #[test]
    fn validate_does_not_check_difficulty() {
        let question = NewQuestion::new("Capital of France?", "Paris", 3, 42);
        assert!(question.validate().is_ok());
        assert_eq!(
            question.validate_difficulty(),
            Err(QuestionValidationError::DifficultyOutOfRange(42))
        );
    }

    #[test]
    fn formatted_question_serializes_plain_fields() {
        let question = NewQuestion::new("Capital of France?", "Paris", 3, 2).into_question(7);
        let json = serde_json::to_value(&question).expect("question should serialize");
        assert_eq!(json["id"], 7);
        assert_eq!(json["question"], "Capital of France?");
        assert_eq!(json["answer"], "Paris");
        assert_eq!(json["category"], 3);
        assert_eq!(json["difficulty"], 2);
    }
}
