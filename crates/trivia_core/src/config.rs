//! Runtime configuration for the question bank.
//!
//! # Responsibility
//! - Load settings from an optional TOML file.
//! - Apply `TRIVIA_*` environment overrides on top of file values.
//!
//! # Invariants
//! - `questions_per_page` is always at least 1 after loading.
//! - `log_level` is one of `trace|debug|info|warn|error`.
//!
//! Precedence, lowest to highest: built-in defaults, TOML file, environment,
//! command-line flags. Every layer is re-validated after it is applied.

use crate::logging::default_log_level;
use crate::service::pagination::QUESTIONS_PER_PAGE;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_DB_FILE_NAME: &str = "trivia.sqlite3";

pub const ENV_DB_PATH: &str = "TRIVIA_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "TRIVIA_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "TRIVIA_LOG_DIR";
pub const ENV_QUESTIONS_PER_PAGE: &str = "TRIVIA_QUESTIONS_PER_PAGE";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading failure.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(toml::de::Error),
    InvalidValue {
        key: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::InvalidValue { key, message } => write!(f, "invalid `{key}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Optional write-path checks for created questions.
///
/// Both default to `false`, which accepts any category id and difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationPolicy {
    /// Reject creates whose category id has no category row.
    pub require_known_category: bool,
    /// Reject creates whose difficulty falls outside 1..=5.
    pub enforce_difficulty_range: bool,
}

/// Values supplied as command-line flags. `None` keeps the loaded value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TriviaConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
    pub questions_per_page: u32,
    pub validation: ValidationPolicy,
}

impl Default for TriviaConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            questions_per_page: QUESTIONS_PER_PAGE,
            validation: ValidationPolicy::default(),
        }
    }
}

impl TriviaConfig {
    /// Parses TOML text. Missing keys fall back to defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` when given, otherwise defaults, then applies process
    /// environment overrides.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `TRIVIA_*` overrides from `lookup`.
    ///
    /// Blank values are ignored.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> ConfigResult<Self> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = read(ENV_DB_PATH) {
            self.db_path = PathBuf::from(value);
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = read(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }
        if let Some(value) = read(ENV_QUESTIONS_PER_PAGE) {
            self.questions_per_page =
                value
                    .trim()
                    .parse()
                    .map_err(|err| ConfigError::InvalidValue {
                        key: "questions_per_page",
                        message: format!("`{value}` is not a page size: {err}"),
                    })?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Applies command-line flags, the highest-precedence layer.
    pub fn with_flag_overrides(mut self, flags: FlagOverrides) -> ConfigResult<Self> {
        if let Some(db_path) = flags.db_path {
            self.db_path = db_path;
        }
        if let Some(log_level) = flags.log_level {
            self.log_level = log_level;
        }
        if let Some(log_dir) = flags.log_dir {
            self.log_dir = Some(log_dir);
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.questions_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                key: "questions_per_page",
                message: "must be at least 1".to_string(),
            });
        }

        match self.log_level.trim().to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "warning" | "error" => {}
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "log_level",
                    message: format!("unsupported level `{other}`"),
                })
            }
        }

        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "db_path",
                message: "must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
