use serde::{Deserialize, Serialize};

use crate::{AskdbError, ErrorKind, QueryResult};

/// Successful outcome of one pipeline turn, before wire serialization.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TurnReport {
    pub answer: String,
    pub sql: String,
    pub rows: QueryResult,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TurnDebug {
    pub sql: String,
    pub rows: QueryResult,
}

/// Outbound contract to the UI collaborator: either a grounded answer with
/// debugging context, or a user-visible failure. Nothing is ever swallowed;
/// every failed turn serializes into the error arm.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TurnOutcome {
    Ok { answer: String, debug: TurnDebug },
    Error { kind: ErrorKind, message: String },
}

impl TurnOutcome {
    pub fn from_result(result: Result<TurnReport, AskdbError>) -> Self {
        match result {
            Ok(report) => TurnOutcome::Ok {
                answer: report.answer,
                debug: TurnDebug {
                    sql: report.sql,
                    rows: report.rows,
                },
            },
            Err(err) => TurnOutcome::Error {
                kind: err.kind(),
                message: err.user_message(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, TurnOutcome::Ok { .. })
    }

    /// The text a chat front-end should display for this turn.
    pub fn display_text(&self) -> &str {
        match self {
            TurnOutcome::Ok { answer, .. } => answer,
            TurnOutcome::Error { message, .. } => message,
        }
    }
}
