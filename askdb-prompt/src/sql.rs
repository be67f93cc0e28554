use std::collections::HashMap;

use askdb_core::{AskdbError, Message, SchemaDescription};
use chrono::NaiveDate;

use crate::PromptTemplate;

const SQL_SYSTEM_TEMPLATE: &str = "\
You are an experienced SQL analyst. Using the database schema below, translate
the user's question into a single SQLite query.

Rules:
1. Produce exactly one read-only statement: SELECT, or WITH / PRAGMA where
   appropriate. Never produce INSERT, UPDATE, DELETE, DROP, ALTER or CREATE.
2. Date columns hold 'YYYY-MM-DD' text. When the question uses relative
   phrases such as \"last month\" or \"last 30 days\", resolve them into
   absolute date ranges in the WHERE clause.
3. Guard ratio calculations with NULLIF to avoid division by zero.
4. Output the SQL text only: no explanation, no code fences.

--- Database schema ---
{{schema}}
---";

const DATE_ANCHOR_TEMPLATE: &str = "\
The current date is {{today}}. Resolve \"today\", \"this month\", \"last month\" \
and similar phrases against this date.";

/// Messages for the SQL-generation completion call: schema-bearing system
/// instruction, an optional current-date anchor, then the bare question.
/// Conversation history is deliberately not forwarded; each turn is
/// stateless with respect to prior turns.
pub fn sql_generation_messages(
    schema: &SchemaDescription,
    question: &str,
    reference_date: Option<NaiveDate>,
) -> Result<Vec<Message>, AskdbError> {
    let mut vars = HashMap::new();
    vars.insert("schema".to_string(), schema.as_str().to_string());
    let system = PromptTemplate::new(SQL_SYSTEM_TEMPLATE).render(&vars)?;

    let mut messages = vec![Message::system(system)];
    if let Some(today) = reference_date {
        let mut vars = HashMap::new();
        vars.insert("today".to_string(), today.format("%Y-%m-%d").to_string());
        messages.push(Message::system(
            PromptTemplate::new(DATE_ANCHOR_TEMPLATE).render(&vars)?,
        ));
    }
    messages.push(Message::user(question));
    Ok(messages)
}
