//! Question/category repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the record store primitives the query engine consumes.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `NewQuestion::validate()` before SQL mutations.
//! - List reads always return rows ordered by ascending id.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::category::{Category, CategoryId};
use crate::model::question::{NewQuestion, Question, QuestionId, QuestionValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const QUESTION_SELECT_SQL: &str = "SELECT
    id,
    question,
    answer,
    category,
    difficulty
FROM questions";

const CATEGORY_SELECT_SQL: &str = "SELECT id, type FROM categories";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for question/category persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(QuestionValidationError),
    Db(DbError),
    NotFound(QuestionId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "question not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<QuestionValidationError> for RepoError {
    fn from(value: QuestionValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store interface consumed by the query engine.
pub trait TriviaRepository {
    /// Inserts one question and returns the store-assigned id.
    fn insert_question(&self, question: &NewQuestion) -> RepoResult<QuestionId>;
    /// Removes one question. Returns `RepoError::NotFound` when absent.
    fn delete_question(&self, id: QuestionId) -> RepoResult<()>;
    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>>;
    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>>;
    /// Returns every question ordered by ascending id.
    fn list_questions(&self) -> RepoResult<Vec<Question>>;
    /// Returns every category ordered by ascending id.
    fn list_categories(&self) -> RepoResult<Vec<Category>>;
    fn count_questions(&self) -> RepoResult<u64>;
}

impl<R: TriviaRepository + ?Sized> TriviaRepository for &R {
    fn insert_question(&self, question: &NewQuestion) -> RepoResult<QuestionId> {
        (**self).insert_question(question)
    }

    fn delete_question(&self, id: QuestionId) -> RepoResult<()> {
        (**self).delete_question(id)
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        (**self).get_question(id)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        (**self).get_category(id)
    }

    fn list_questions(&self) -> RepoResult<Vec<Question>> {
        (**self).list_questions()
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        (**self).list_categories()
    }

    fn count_questions(&self) -> RepoResult<u64> {
        (**self).count_questions()
    }
}

/// SQLite-backed question bank repository.
pub struct SqliteTriviaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTriviaRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TriviaRepository for SqliteTriviaRepository<'_> {
    fn insert_question(&self, question: &NewQuestion) -> RepoResult<QuestionId> {
        question.validate()?;

        self.conn.execute(
            "INSERT INTO questions (
                question,
                answer,
                category,
                difficulty
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                question.question.as_str(),
                question.answer.as_str(),
                question.category,
                question.difficulty,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn delete_question(&self, id: QuestionId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM questions WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_question(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUESTION_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_question_row(row)?));
        }

        Ok(None)
    }

    fn get_category(&self, id: CategoryId) -> RepoResult<Option<Category>> {
        let category = self
            .conn
            .query_row(
                &format!("{CATEGORY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| Ok(Category::new(row.get("id")?, row.get::<_, String>("type")?)),
            )
            .optional()?;

        Ok(category)
    }

    fn list_questions(&self) -> RepoResult<Vec<Question>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{QUESTION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut questions = Vec::new();

        while let Some(row) = rows.next()? {
            questions.push(parse_question_row(row)?);
        }

        Ok(questions)
    }

    fn list_categories(&self) -> RepoResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CATEGORY_SELECT_SQL} ORDER BY id ASC;"))?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category::new(row.get("id")?, row.get::<_, String>("type")?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    fn count_questions(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM questions;", [], |row| row.get(0))?;

        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative question count `{count}`")))
    }
}

fn parse_question_row(row: &Row<'_>) -> RepoResult<Question> {
    let id: QuestionId = row.get("id")?;
    let pending = NewQuestion {
        question: row.get("question")?,
        answer: row.get("answer")?,
        category: row.get("category")?,
        difficulty: row.get("difficulty")?,
    };

    pending.validate().map_err(|err| {
        RepoError::InvalidData(format!("question {id} violates invariants: {err}"))
    })?;

    Ok(pending.into_question(id))
}
