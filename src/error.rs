//! Error types for directive compilation and request-time transformation.

use serde_json::Value;
use thiserror::Error;

use crate::arguments::ArgKind;

/// Fatal errors raised while compiling a document.
///
/// Any of these aborts the whole compile call; no partial registry is
/// usable after one.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to parse SDL document: {0}")]
    Parse(#[from] async_graphql_parser::Error),

    #[error(
        "directive `@{directive}` argument `{argument}` at {line}:{column}: \
         expected {expected} literal, got {actual}"
    )]
    MalformedArgument {
        directive: String,
        argument: String,
        expected: ArgKind,
        actual: &'static str,
        line: usize,
        column: usize,
    },

    /// Only raised when [`CompileOptions::strict_directives`] is set;
    /// otherwise an unknown directive is a non-fatal warning.
    ///
    /// [`CompileOptions::strict_directives`]: crate::config::CompileOptions::strict_directives
    #[error("unknown directive `@{directive}` on `{owner}` at {line}:{column}")]
    UnknownDirective {
        directive: String,
        owner: String,
        line: usize,
        column: usize,
    },
}

/// Errors raised while running a composed transformer at request time.
///
/// Errors from caller-supplied transformer functions propagate unchanged;
/// the remainder of the pipeline is abandoned (fail-fast, no retries).
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("expected an object value for input `{type_name}`, got {actual}")]
    ExpectedObject {
        type_name: String,
        actual: &'static str,
    },

    #[error("no field `{field}` declared on input `{type_name}`")]
    UnknownField { type_name: String, field: String },

    #[error("no compiled input registered for nested type `{type_name}`")]
    UnresolvedNested { type_name: String },

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl TransformError {
    /// Convenience constructor for transformer implementations.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Human-readable kind of a JSON value, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
