use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AskdbError {
    #[error("completion endpoint unreachable: {0}")]
    ModelUnavailable(String),
    #[error("completion endpoint returned no usable content")]
    ModelRefused,
    #[error("generated statement is not read-only: {statement}")]
    UnsafeStatement { statement: String },
    #[error("query execution failed: {message}")]
    Execution { message: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failure category exposed on the outbound wire contract.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ModelUnavailable,
    ModelRefused,
    UnsafeStatement,
    ExecutionError,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ModelUnavailable => "model_unavailable",
            ErrorKind::ModelRefused => "model_refused",
            ErrorKind::UnsafeStatement => "unsafe_statement",
            ErrorKind::ExecutionError => "execution_error",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AskdbError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AskdbError::ModelUnavailable(_) => ErrorKind::ModelUnavailable,
            AskdbError::ModelRefused => ErrorKind::ModelRefused,
            AskdbError::UnsafeStatement { .. } => ErrorKind::UnsafeStatement,
            AskdbError::Execution { .. } => ErrorKind::ExecutionError,
            AskdbError::InvalidConfig(_) | AskdbError::Serde(_) => ErrorKind::Internal,
        }
    }

    /// Message shown to the end user when a turn fails. Model-side failures
    /// collapse into a generic retry prompt; the rejected statement and the
    /// engine's error text are surfaced verbatim since this is a debugging
    /// tool rather than a public-facing service.
    pub fn user_message(&self) -> String {
        match self {
            AskdbError::ModelUnavailable(_) | AskdbError::ModelRefused => {
                "The language model could not produce a response. Please try again.".to_string()
            }
            AskdbError::UnsafeStatement { statement } => {
                format!("The generated statement was rejected because it is not read-only: {statement}")
            }
            AskdbError::Execution { message } => {
                format!("The database rejected the generated query: {message}")
            }
            AskdbError::InvalidConfig(message) => format!("Configuration problem: {message}"),
            AskdbError::Serde(err) => format!("Internal serialization problem: {err}"),
        }
    }
}
