//! Question bank query engine.
//!
//! # Responsibility
//! - Answer list, delete, create, search, list-by-category and quiz requests.
//! - Classify every failure as `NotFound` or `Unprocessable`.
//!
//! # Invariants
//! - Every operation re-reads current store state; nothing is cached.
//! - Listings are ordered by ascending question id.
//! - Mutations answer with a freshly computed first page and total count.
//! - Quiz exhaustion is an `Ok` outcome, never an error.

use crate::config::{TriviaConfig, ValidationPolicy};
use crate::model::category::{Category, CategoryId, ALL_CATEGORIES};
use crate::model::question::{NewQuestion, Question, QuestionId, QuestionValidationError};
use crate::repo::trivia_repo::{RepoError, TriviaRepository};
use crate::search::matcher::search_questions;
use crate::service::category_index::{index_categories, CategoryIndex};
use crate::service::pagination::{paginate, QUESTIONS_PER_PAGE};
use crate::service::quiz_selector::{select_next, QuizDraw};
use crate::service::request::{CreateQuestionRequest, IntField, QuizRequest};
use log::{debug, info, warn};
use rand::Rng;
use serde::Serialize;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, TriviaServiceError>;

/// Transport-independent failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Requested resource or result set is empty.
    NotFound,
    /// Preconditions violated or the store mutation failed.
    Unprocessable,
}

/// Errors from query engine operations.
#[derive(Debug)]
pub enum TriviaServiceError {
    /// Requested page lies past the end of the question list.
    PageNotFound { page: u32 },
    /// Target question does not exist.
    QuestionNotFound(QuestionId),
    /// Category table is empty.
    NoCategories,
    /// Search produced no questions on the requested page.
    NoSearchMatches { term: String, page: u32 },
    /// Category exists but holds no questions.
    NoQuestionsInCategory(CategoryId),
    /// Quiz pool is empty for the selected category (`0` means all).
    EmptyQuizPool(CategoryId),
    /// Category id has no category row.
    UnknownCategory(CategoryId),
    /// Required request field is absent.
    MissingField(&'static str),
    /// Request field is present but not an integer.
    InvalidField { field: &'static str, value: String },
    /// Question payload breaks a write-path invariant.
    Validation(QuestionValidationError),
    /// Store-level failure.
    Repo(RepoError),
}

impl TriviaServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PageNotFound { .. }
            | Self::QuestionNotFound(_)
            | Self::NoCategories
            | Self::NoSearchMatches { .. }
            | Self::NoQuestionsInCategory(_)
            | Self::EmptyQuizPool(_) => ErrorKind::NotFound,
            Self::UnknownCategory(_)
            | Self::MissingField(_)
            | Self::InvalidField { .. }
            | Self::Validation(_)
            | Self::Repo(_) => ErrorKind::Unprocessable,
        }
    }
}

impl Display for TriviaServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PageNotFound { page } => write!(f, "page {page} has no questions"),
            Self::QuestionNotFound(id) => write!(f, "question not found: {id}"),
            Self::NoCategories => write!(f, "no categories available"),
            Self::NoSearchMatches { term, page } => {
                write!(f, "no questions match `{term}` on page {page}")
            }
            Self::NoQuestionsInCategory(id) => write!(f, "category {id} has no questions"),
            Self::EmptyQuizPool(id) if *id == ALL_CATEGORIES => {
                write!(f, "no questions available for a quiz")
            }
            Self::EmptyQuizPool(id) => write!(f, "no quiz questions in category {id}"),
            Self::UnknownCategory(id) => write!(f, "category not found: {id}"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::InvalidField { field, value } => {
                write!(f, "field `{field}` must be an integer, got `{value}`")
            }
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TriviaServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TriviaServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::QuestionNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<QuestionValidationError> for TriviaServiceError {
    fn from(value: QuestionValidationError) -> Self {
        Self::Validation(value)
    }
}

/// One page of the full question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: u64,
    pub categories: CategoryIndex,
}

/// All categories keyed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryList {
    pub categories: CategoryIndex,
}

/// Result of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedQuestion {
    pub deleted: QuestionId,
    /// First page after the delete.
    pub questions: Vec<Question>,
    pub total_questions: u64,
}

/// Result of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedQuestion {
    pub created: QuestionId,
    /// First page after the insert.
    pub questions: Vec<Question>,
    pub total_questions: u64,
}

/// One page of search hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub questions: Vec<Question>,
    /// Count of all stored questions, not of matches.
    pub total_questions: u64,
}

/// Unpaginated questions of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: u64,
    pub current_category: Category,
}

/// Next-quiz-question outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Question {
        question: Question,
        total_questions: u64,
    },
    /// Every question in the pool was already asked.
    Exhausted { total_questions: u64 },
}

/// Tunables applied by [`TriviaService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    pub questions_per_page: u32,
    pub validation: ValidationPolicy,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            questions_per_page: QUESTIONS_PER_PAGE,
            validation: ValidationPolicy::default(),
        }
    }
}

impl From<&TriviaConfig> for ServiceOptions {
    fn from(config: &TriviaConfig) -> Self {
        Self {
            questions_per_page: config.questions_per_page,
            validation: config.validation,
        }
    }
}

/// Query engine facade over a record store.
pub struct TriviaService<R: TriviaRepository> {
    repo: R,
    options: ServiceOptions,
}

impl<R: TriviaRepository> TriviaService<R> {
    /// Creates a service with default page size and permissive validation.
    pub fn new(repo: R) -> Self {
        Self::with_options(repo, ServiceOptions::default())
    }

    pub fn with_options(repo: R, options: ServiceOptions) -> Self {
        Self { repo, options }
    }

    pub fn options(&self) -> ServiceOptions {
        self.options
    }

    /// Lists one page of questions with total count and category index.
    pub fn list_questions(&self, page: u32) -> ServiceResult<QuestionPage> {
        let all = self.repo.list_questions()?;
        let questions = paginate(page, self.options.questions_per_page, &all);
        if questions.is_empty() {
            debug!("event=questions_list module=service status=not_found page={page}");
            return Err(TriviaServiceError::PageNotFound { page });
        }

        let categories = index_categories(&self.repo.list_categories()?);
        Ok(QuestionPage {
            questions,
            total_questions: self.repo.count_questions()?,
            categories,
        })
    }

    /// Lists every category.
    pub fn list_categories(&self) -> ServiceResult<CategoryList> {
        let categories = self.repo.list_categories()?;
        if categories.is_empty() {
            debug!("event=categories_list module=service status=not_found");
            return Err(TriviaServiceError::NoCategories);
        }

        Ok(CategoryList {
            categories: index_categories(&categories),
        })
    }

    /// Deletes one question and returns the refreshed first page.
    pub fn delete_question(&self, id: QuestionId) -> ServiceResult<DeletedQuestion> {
        if self.repo.get_question(id)?.is_none() {
            debug!("event=question_delete module=service status=not_found question_id={id}");
            return Err(TriviaServiceError::QuestionNotFound(id));
        }

        // A concurrent delete between lookup and removal surfaces as
        // `RepoError::NotFound`, which maps to `QuestionNotFound`.
        if let Err(err) = self.repo.delete_question(id) {
            warn!("event=question_delete module=service status=error question_id={id} error={err}");
            return Err(err.into());
        }
        info!("event=question_delete module=service status=ok question_id={id}");

        let (questions, total_questions) = self.first_page()?;
        Ok(DeletedQuestion {
            deleted: id,
            questions,
            total_questions,
        })
    }

    /// Validates and inserts one question, then returns the refreshed first
    /// page.
    pub fn create_question(
        &self,
        request: &CreateQuestionRequest,
    ) -> ServiceResult<CreatedQuestion> {
        let question = self.validate_create(request).inspect_err(|err| {
            debug!("event=question_create module=service status=rejected error={err}");
        })?;

        let created = match self.repo.insert_question(&question) {
            Ok(id) => id,
            Err(err) => {
                warn!("event=question_create module=service status=error error={err}");
                return Err(err.into());
            }
        };
        info!(
            "event=question_create module=service status=ok question_id={created} category={}",
            question.category
        );

        let (questions, total_questions) = self.first_page()?;
        Ok(CreatedQuestion {
            created,
            questions,
            total_questions,
        })
    }

    /// Searches question text case-insensitively and paginates the hits.
    ///
    /// A missing or empty term matches every question.
    pub fn search_questions(&self, term: Option<&str>, page: u32) -> ServiceResult<SearchResults> {
        let term = term.unwrap_or_default();
        let hits = search_questions(term, &self.repo.list_questions()?);
        let questions = paginate(page, self.options.questions_per_page, &hits);
        if questions.is_empty() {
            debug!(
                "event=questions_search module=service status=not_found hits={} page={page}",
                hits.len()
            );
            return Err(TriviaServiceError::NoSearchMatches {
                term: term.to_string(),
                page,
            });
        }

        Ok(SearchResults {
            questions,
            total_questions: self.repo.count_questions()?,
        })
    }

    /// Lists every question of one category, unpaginated.
    pub fn questions_by_category(
        &self,
        category_id: CategoryId,
    ) -> ServiceResult<CategoryQuestions> {
        let Some(current_category) = self.repo.get_category(category_id)? else {
            debug!(
                "event=category_questions module=service status=unknown_category category={category_id}"
            );
            return Err(TriviaServiceError::UnknownCategory(category_id));
        };

        let questions = self.category_pool(category_id)?;
        if questions.is_empty() {
            debug!(
                "event=category_questions module=service status=not_found category={category_id}"
            );
            return Err(TriviaServiceError::NoQuestionsInCategory(category_id));
        }

        Ok(CategoryQuestions {
            questions,
            total_questions: self.repo.count_questions()?,
            current_category,
        })
    }

    /// Draws the next unseen quiz question using the thread RNG.
    pub fn next_quiz_question(&self, request: &QuizRequest) -> ServiceResult<QuizOutcome> {
        self.next_quiz_question_with_rng(request, &mut rand::rng())
    }

    /// Draws the next unseen quiz question using the provided RNG.
    pub fn next_quiz_question_with_rng<G: Rng + ?Sized>(
        &self,
        request: &QuizRequest,
        rng: &mut G,
    ) -> ServiceResult<QuizOutcome> {
        let category_id = match request.quiz_category.as_ref() {
            Some(category) => coerce_field("quiz_category.id", &category.id)?,
            None => ALL_CATEGORIES,
        };

        let pool = if category_id == ALL_CATEGORIES {
            self.repo.list_questions()?
        } else {
            self.category_pool(category_id)?
        };
        if pool.is_empty() {
            debug!("event=quiz_next module=service status=not_found category={category_id}");
            return Err(TriviaServiceError::EmptyQuizPool(category_id));
        }

        let previous_ids = request
            .previous_questions
            .iter()
            .copied()
            .collect::<HashSet<_>>();
        let total_questions = self.repo.count_questions()?;

        match select_next(&pool, &previous_ids, rng) {
            QuizDraw::Question(question) => {
                debug!(
                    "event=quiz_next module=service status=ok category={category_id} question_id={} asked={}",
                    question.id,
                    previous_ids.len()
                );
                Ok(QuizOutcome::Question {
                    question,
                    total_questions,
                })
            }
            QuizDraw::Exhausted => {
                debug!(
                    "event=quiz_next module=service status=exhausted category={category_id} pool={}",
                    pool.len()
                );
                Ok(QuizOutcome::Exhausted { total_questions })
            }
        }
    }

    fn first_page(&self) -> ServiceResult<(Vec<Question>, u64)> {
        let all = self.repo.list_questions()?;
        let questions = paginate(1, self.options.questions_per_page, &all);
        Ok((questions, self.repo.count_questions()?))
    }

    fn category_pool(&self, category_id: CategoryId) -> ServiceResult<Vec<Question>> {
        let mut questions = self.repo.list_questions()?;
        questions.retain(|question| question.category == category_id);
        Ok(questions)
    }

    fn validate_create(&self, request: &CreateQuestionRequest) -> ServiceResult<NewQuestion> {
        let question = request
            .question
            .clone()
            .ok_or(TriviaServiceError::MissingField("question"))?;
        let answer = request
            .answer
            .clone()
            .ok_or(TriviaServiceError::MissingField("answer"))?;
        let category = request
            .category
            .as_ref()
            .ok_or(TriviaServiceError::MissingField("category"))
            .and_then(|value| coerce_field("category", value))?;
        let difficulty = request
            .difficulty
            .as_ref()
            .ok_or(TriviaServiceError::MissingField("difficulty"))
            .and_then(|value| coerce_field("difficulty", value))?;

        let candidate = NewQuestion::new(question, answer, category, difficulty);
        candidate.validate()?;

        let policy = self.options.validation;
        if policy.enforce_difficulty_range {
            candidate.validate_difficulty()?;
        }
        if policy.require_known_category && self.repo.get_category(category)?.is_none() {
            return Err(TriviaServiceError::UnknownCategory(category));
        }

        Ok(candidate)
    }
}

fn coerce_field(field: &'static str, value: &IntField) -> ServiceResult<i64> {
    value.coerce().ok_or_else(|| TriviaServiceError::InvalidField {
        field,
        value: value.to_string(),
    })
}
