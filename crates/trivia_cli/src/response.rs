//! JSON envelopes for command results.
//!
//! Success bodies carry `success: true` next to the operation payload.
//! Failures carry `success: false`, an HTTP-style status code and a short
//! message, matching the bodies of the original web API.

use serde::Serialize;
use serde_json::{json, Map, Value};
use trivia_core::{ErrorKind, TriviaServiceError};

const STATUS_NOT_FOUND: u16 = 404;
const STATUS_UNPROCESSABLE: u16 = 422;
const STATUS_INTERNAL: u16 = 500;

/// Rendered command outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub body: Value,
}

impl Response {
    /// Wraps a serializable payload object in a success envelope.
    pub fn success<T: Serialize>(payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => Self::success_fields(fields),
            Ok(other) => Self::success_fields(Map::from_iter([("result".to_string(), other)])),
            Err(err) => Self::internal(format!("failed to encode response: {err}")),
        }
    }

    fn success_fields(fields: Map<String, Value>) -> Self {
        let mut body = Map::with_capacity(fields.len() + 1);
        body.insert("success".to_string(), Value::Bool(true));
        body.extend(fields);
        Self {
            body: Value::Object(body),
        }
    }

    pub fn from_error(err: &TriviaServiceError) -> Self {
        let (status, message) = status_for(err.kind());
        Self::failure(status, message, Some(err.to_string()))
    }

    /// Failures outside the query engine, such as config or database open.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::failure(STATUS_INTERNAL, "internal error", Some(detail.into()))
    }

    fn failure(status: u16, message: &str, detail: Option<String>) -> Self {
        let mut body = json!({
            "success": false,
            "error": status,
            "message": message,
        });
        if let (Some(detail), Some(fields)) = (detail, body.as_object_mut()) {
            fields.insert("detail".to_string(), Value::String(detail));
        }
        Self { body }
    }

    pub fn is_success(&self) -> bool {
        self.body.get("success").and_then(Value::as_bool) == Some(true)
    }
}

pub fn status_for(kind: ErrorKind) -> (u16, &'static str) {
    match kind {
        ErrorKind::NotFound => (STATUS_NOT_FOUND, "resource not found"),
        ErrorKind::Unprocessable => (STATUS_UNPROCESSABLE, "unprocessable"),
    }
}
