use std::sync::Arc;

use askdb_core::{AskdbError, ChatModel, ChatRequest, QueryResult, SanitizedSql};
use askdb_prompt::answer_messages;
use chrono::NaiveDate;

/// Second completion call: question, executed SQL and its result rows in, a
/// grounded natural-language answer out. One shot; this step never touches
/// the generator or the database again.
pub struct AnswerComposer {
    model: Arc<dyn ChatModel>,
    model_id: String,
    reference_date: Option<NaiveDate>,
}

impl AnswerComposer {
    pub fn new(model: Arc<dyn ChatModel>, model_id: impl Into<String>) -> Self {
        Self {
            model,
            model_id: model_id.into(),
            reference_date: None,
        }
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub async fn compose(
        &self,
        question: &str,
        statement: &SanitizedSql,
        result: &QueryResult,
    ) -> Result<String, AskdbError> {
        let messages = answer_messages(question, statement, result, self.reference_date)?;
        let response = self
            .model
            .complete(ChatRequest {
                model: self.model_id.clone(),
                messages,
                temperature: None,
            })
            .await?;
        Ok(response.content)
    }
}
