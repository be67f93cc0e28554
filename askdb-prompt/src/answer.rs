use std::collections::HashMap;

use askdb_core::{AskdbError, Message, QueryResult, SanitizedSql};
use chrono::NaiveDate;

use crate::PromptTemplate;

const ANSWER_SYSTEM: &str = "\
You are a data assistant. Answer the user's question using only the facts
present in the supplied query results. Do not bring in outside knowledge. If
the result set is empty, say that no matching data was found instead of
inventing a value. Reply in the language the question was asked in.";

const ANSWER_USER_TEMPLATE: &str = "\
Answer the question from the data below.

Guidelines:
1. Base every number and name on the query results.
2. If the results are empty, state that no matching data was found.
{{as_of_line}}
### Question
{{question}}

### Executed SQL
{{sql}}

### Query results
{{rows}}";

/// Messages for the grounded answer-composition call. One shot; the
/// generated SQL and its results travel inside the prompt, never a second
/// execution.
pub fn answer_messages(
    question: &str,
    statement: &SanitizedSql,
    result: &QueryResult,
    reference_date: Option<NaiveDate>,
) -> Result<Vec<Message>, AskdbError> {
    let as_of_line = match reference_date {
        Some(date) => format!(
            "3. Where the answer depends on a reference date, state that the \
             figures are as of {}.\n",
            date.format("%Y-%m-%d")
        ),
        None => String::new(),
    };

    let mut vars = HashMap::new();
    vars.insert("as_of_line".to_string(), as_of_line);
    vars.insert("question".to_string(), question.to_string());
    vars.insert("sql".to_string(), statement.as_str().to_string());
    vars.insert("rows".to_string(), render_rows(result));
    let user = PromptTemplate::new(ANSWER_USER_TEMPLATE).render(&vars)?;

    Ok(vec![Message::system(ANSWER_SYSTEM), Message::user(user)])
}

/// Compact textual form of a result set: one JSON object per row. An empty
/// set renders as an explicit marker so the model cannot mistake it for a
/// missing section.
pub fn render_rows(result: &QueryResult) -> String {
    if result.rows.is_empty() {
        return "(no rows)".to_string();
    }

    let mut out = String::new();
    for row in &result.rows {
        out.push_str(&serde_json::Value::Object(row.clone()).to_string());
        out.push('\n');
    }
    if result.truncated {
        out.push_str("(additional rows omitted)\n");
    }
    out
}
