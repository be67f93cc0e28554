use std::sync::Arc;

use askdb_core::{AskdbError, ChatModel, ChatRequest, SchemaDescription};
use askdb_prompt::sql_generation_messages;
use chrono::NaiveDate;

/// First completion call: question in, raw SQL text out. The output may
/// carry code fences or prose; cleaning it up is the sanitizer's job, not a
/// generation-time error.
pub struct SqlGenerator {
    model: Arc<dyn ChatModel>,
    model_id: String,
    schema: SchemaDescription,
    reference_date: Option<NaiveDate>,
}

impl SqlGenerator {
    pub fn new(
        model: Arc<dyn ChatModel>,
        model_id: impl Into<String>,
        schema: SchemaDescription,
    ) -> Self {
        Self {
            model,
            model_id: model_id.into(),
            schema,
            reference_date: None,
        }
    }

    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub async fn generate(&self, question: &str) -> Result<String, AskdbError> {
        let messages = sql_generation_messages(&self.schema, question, self.reference_date)?;
        let response = self
            .model
            .complete(ChatRequest {
                model: self.model_id.clone(),
                messages,
                // Correctness over creativity for SQL.
                temperature: Some(0.0),
            })
            .await?;
        Ok(response.content)
    }
}
