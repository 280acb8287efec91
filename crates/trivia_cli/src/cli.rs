//! Argument parsing and command dispatch.
//!
//! # Responsibility
//! - Resolve configuration (file, environment, then flags).
//! - Open the question bank and route each subcommand to one engine
//!   operation.
//!
//! # Invariants
//! - Every outcome, including bootstrap failures, is returned as a
//!   [`Response`]; nothing here exits the process.
//! - Numeric arguments are taken as text and coerced here, so malformed
//!   ids and pages become 422 envelopes instead of usage errors.

use crate::response::Response;
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::json;
use std::path::PathBuf;
use trivia_core::db::open_db;
use trivia_core::{
    init_logging, CreateQuestionRequest, FlagOverrides, IntField, QuizCategory, QuizOutcome,
    QuizRequest, ServiceOptions, SqliteTriviaRepository, TriviaConfig, TriviaRepository,
    TriviaService, TriviaServiceError,
};

#[derive(Parser, Debug)]
#[command(name = "trivia", bin_name = "trivia", version)]
#[command(about = "Browse, search and quiz from a trivia question bank", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// SQLite database file (created when missing)
    #[arg(long, global = true, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List one page of questions with the category index
    Questions {
        #[arg(long, default_value = "1")]
        page: String,
    },
    /// List all categories
    Categories,
    /// List every question of one category
    CategoryQuestions { id: String },
    /// Delete a question by id
    Delete { id: String },
    /// Add a question
    Create {
        #[arg(long)]
        question: Option<String>,
        #[arg(long)]
        answer: Option<String>,
        /// Category id
        #[arg(long)]
        category: Option<String>,
        /// Difficulty, usually 1-5
        #[arg(long)]
        difficulty: Option<String>,
    },
    /// Search question text (case-insensitive substring)
    Search {
        term: Option<String>,
        #[arg(long, default_value = "1")]
        page: String,
    },
    /// Draw the next unseen quiz question
    Quiz {
        /// Category id; 0 or omitted draws from every category
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated ids of questions already asked
        #[arg(long, value_delimiter = ',')]
        previous: Vec<String>,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Questions { .. } => "questions",
            Self::Categories => "categories",
            Self::CategoryQuestions { .. } => "category_questions",
            Self::Delete { .. } => "delete",
            Self::Create { .. } => "create",
            Self::Search { .. } => "search",
            Self::Quiz { .. } => "quiz",
        }
    }
}

/// Runs one parsed invocation to completion.
pub fn run(cli: Cli) -> Response {
    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(message) => return Response::internal(message),
    };

    if let Some(log_dir) = config.log_dir.as_ref() {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            return Response::internal(err.to_string());
        }
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => return Response::internal(err.to_string()),
    };

    let service = TriviaService::with_options(
        SqliteTriviaRepository::new(&conn),
        ServiceOptions::from(&config),
    );
    let name = cli.command.name();
    let response = dispatch(&service, cli.command);
    info!(
        "event=cli_command module=cli command={name} status={}",
        if response.is_success() { "ok" } else { "error" }
    );
    response
}

fn resolve_config(cli: &Cli) -> Result<TriviaConfig, String> {
    TriviaConfig::resolve(cli.config.as_deref())
        .and_then(|config| {
            config.with_flag_overrides(FlagOverrides {
                db_path: cli.db.clone(),
                log_level: cli.log_level.clone(),
                log_dir: cli.log_dir.clone(),
            })
        })
        .map_err(|err| err.to_string())
}

fn dispatch<R: TriviaRepository>(service: &TriviaService<R>, command: Command) -> Response {
    debug!("event=cli_dispatch module=cli command={}", command.name());
    execute(service, command).unwrap_or_else(|err| Response::from_error(&err))
}

fn execute<R: TriviaRepository>(
    service: &TriviaService<R>,
    command: Command,
) -> Result<Response, TriviaServiceError> {
    match command {
        Command::Questions { page } => {
            let page = page_arg(&page)?;
            service.list_questions(page).map(|r| Response::success(&r))
        }
        Command::Categories => service.list_categories().map(|r| Response::success(&r)),
        Command::CategoryQuestions { id } => service
            .questions_by_category(int_arg("id", id)?)
            .map(|r| Response::success(&r)),
        Command::Delete { id } => service
            .delete_question(int_arg("id", id)?)
            .map(|r| Response::success(&r)),
        Command::Create {
            question,
            answer,
            category,
            difficulty,
        } => {
            let request = CreateQuestionRequest {
                question,
                answer,
                category: category.map(IntField::from),
                difficulty: difficulty.map(IntField::from),
            };
            service
                .create_question(&request)
                .map(|r| Response::success(&r))
        }
        Command::Search { term, page } => {
            let page = page_arg(&page)?;
            service
                .search_questions(term.as_deref(), page)
                .map(|r| Response::success(&r))
        }
        Command::Quiz { category, previous } => {
            let previous_questions = previous
                .into_iter()
                .map(|id| int_arg("previous_questions", id))
                .collect::<Result<Vec<_>, _>>()?;
            let request = QuizRequest {
                previous_questions,
                quiz_category: category.map(QuizCategory::new),
            };
            service.next_quiz_question(&request).map(render_quiz)
        }
    }
}

/// Coerces a raw argument the same way request bodies are coerced.
fn int_arg(field: &'static str, raw: impl Into<IntField>) -> Result<i64, TriviaServiceError> {
    let value = raw.into();
    value
        .coerce()
        .ok_or_else(|| TriviaServiceError::InvalidField {
            field,
            value: value.to_string(),
        })
}

fn page_arg(raw: &str) -> Result<u32, TriviaServiceError> {
    let page = int_arg("page", raw)?;
    u32::try_from(page).map_err(|_| TriviaServiceError::InvalidField {
        field: "page",
        value: raw.to_string(),
    })
}

fn render_quiz(outcome: QuizOutcome) -> Response {
    match outcome {
        QuizOutcome::Question {
            question,
            total_questions,
        } => Response::success(&json!({
            "question": question,
            "total_questions": total_questions,
            "exhausted": false,
        })),
        QuizOutcome::Exhausted { total_questions } => Response::success(&json!({
            "question": null,
            "total_questions": total_questions,
            "exhausted": true,
        })),
    }
}
