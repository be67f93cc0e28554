use std::fmt;

use serde::{Deserialize, Serialize};

/// Textual description of the database schema (DDL, optionally with sample
/// rows) embedded into the SQL-generation prompt. Built once at startup,
/// never mutated afterwards.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SchemaDescription(String);

impl SchemaDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SchemaDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SchemaDescription {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for SchemaDescription {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}
