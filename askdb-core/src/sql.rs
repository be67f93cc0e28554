use std::fmt;

use serde::{Deserialize, Serialize};

use crate::AskdbError;

/// Leading keywords permitted to reach the database. Everything else is
/// rejected before execution, including write keywords the model was told
/// never to produce.
pub const READ_KEYWORDS: [&str; 3] = ["SELECT", "PRAGMA", "WITH"];

/// A statement that has passed the read-only check. Constructible only
/// through [`sanitize`], so the executor never sees unchecked text.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SanitizedSql(String);

impl SanitizedSql {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedSql {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strips incidental formatting from raw model output and enforces the
/// read-only allow-list on the leading keyword. This is the only safety
/// boundary in the pipeline; it inspects the first token only and is a
/// documented, deliberately incomplete defense.
pub fn sanitize(raw: &str) -> Result<SanitizedSql, AskdbError> {
    let statement = strip_code_fences(raw);
    let keyword = statement
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_ascii_uppercase();

    if READ_KEYWORDS.contains(&keyword.as_str()) {
        Ok(SanitizedSql(statement.to_string()))
    } else {
        Err(AskdbError::UnsafeStatement {
            statement: statement.to_string(),
        })
    }
}

fn strip_code_fences(raw: &str) -> &str {
    let cleaned = raw.trim();
    if cleaned.starts_with("```sql") {
        cleaned
            .trim_start_matches("```sql")
            .trim_end_matches("```")
            .trim()
    } else if cleaned.starts_with("```") {
        cleaned
            .trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
    } else {
        cleaned
    }
}

/// One result row: column name to scalar JSON value, in select-list order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Fully materialized result set of one execution. `truncated` records that
/// the executor's row bound cut the set short.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    #[serde(default)]
    pub truncated: bool,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Seam to the relational store. Each call must acquire its own connection
/// and release it on every exit path; no state may leak across calls.
#[async_trait::async_trait]
pub trait QueryExecutor: Send + Sync + 'static {
    async fn execute(&self, statement: &SanitizedSql) -> Result<QueryResult, AskdbError>;
}
