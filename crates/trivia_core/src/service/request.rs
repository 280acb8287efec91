//! Loosely typed request payloads accepted by mutating and quiz operations.
//!
//! # Responsibility
//! - Mirror caller-supplied bodies where fields may be absent or arrive as
//!   numeric strings.
//! - Provide explicit integer coercion instead of implicit conversion.

use crate::model::category::CategoryId;
use crate::model::question::QuestionId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Integer field that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IntField {
    Int(i64),
    Text(String),
}

impl IntField {
    /// Returns the integer value, or `None` when text is not a base-10 integer.
    pub fn coerce(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl Display for IntField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for IntField {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for IntField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for IntField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Create-question payload. Every field is required by the operation, but
/// absence is reported as a typed error rather than a decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateQuestionRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<IntField>,
    pub difficulty: Option<IntField>,
}

/// Category selector inside a quiz request. Id `0` selects all categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCategory {
    pub id: IntField,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl QuizCategory {
    pub fn new(id: impl Into<IntField>) -> Self {
        Self {
            id: id.into(),
            kind: None,
        }
    }
}

/// Next-quiz-question payload.
///
/// A missing `quiz_category` selects all categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizRequest {
    pub previous_questions: Vec<QuestionId>,
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    pub fn new(previous_questions: Vec<QuestionId>, category: CategoryId) -> Self {
        Self {
            previous_questions,
            quiz_category: Some(QuizCategory::new(IntField::Int(category))),
        }
    }
}

impl CreateQuestionRequest {
    /// Builds a fully populated request from typed values.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: CategoryId,
        difficulty: i64,
    ) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
            category: Some(IntField::Int(category)),
            difficulty: Some(IntField::Int(difficulty)),
        }
    }
}
