use std::fmt;
use std::sync::Arc;

use askdb_core::{
    sanitize, AskdbError, ChatModel, Conversation, ConversationTurn, QueryExecutor,
    SchemaDescription, TurnOutcome, TurnReport,
};
use chrono::NaiveDate;

use crate::{AnswerComposer, SqlGenerator};

/// Pipeline stage, for logging and failure attribution. A turn moves
/// `Generating → Sanitizing → Executing → Composing`; the first failure is
/// terminal for the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Generating,
    Sanitizing,
    Executing,
    Composing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Generating => "generating",
            Stage::Sanitizing => "sanitizing",
            Stage::Executing => "executing",
            Stage::Composing => "composing",
        };
        f.write_str(name)
    }
}

/// Sequences one user turn through the four stages. Holds no per-request
/// state; concurrent turns only share the executor's pool.
pub struct Orchestrator {
    generator: SqlGenerator,
    executor: Arc<dyn QueryExecutor>,
    composer: AnswerComposer,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator").finish_non_exhaustive()
    }
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    /// Runs one turn and returns the grounded answer with its debugging
    /// context, or the stage failure.
    pub async fn answer(&self, question: &str) -> Result<TurnReport, AskdbError> {
        let generated = self
            .generator
            .generate(question)
            .await
            .map_err(|err| fail(Stage::Generating, err))?;
        tracing::debug!(stage = %Stage::Generating, chars = generated.len(), "sql generated");

        let statement = sanitize(&generated).map_err(|err| fail(Stage::Sanitizing, err))?;
        tracing::debug!(stage = %Stage::Sanitizing, sql = %statement, "statement accepted");

        let result = self
            .executor
            .execute(&statement)
            .await
            .map_err(|err| fail(Stage::Executing, err))?;
        tracing::debug!(stage = %Stage::Executing, rows = result.len(), "statement executed");

        let answer = self
            .composer
            .compose(question, &statement, &result)
            .await
            .map_err(|err| fail(Stage::Composing, err))?;
        tracing::debug!(stage = %Stage::Composing, "answer composed");

        Ok(TurnReport {
            answer,
            sql: statement.as_str().to_string(),
            rows: result,
        })
    }

    /// Runs one turn against an explicit conversation-history value and
    /// returns the extended history alongside the outcome. The history is
    /// never consulted by the pipeline itself; each turn is stateless with
    /// respect to prior turns.
    pub async fn run_turn(
        &self,
        mut history: Conversation,
        question: impl Into<String>,
    ) -> (Conversation, TurnOutcome) {
        let question = question.into();
        let outcome = TurnOutcome::from_result(self.answer(&question).await);
        history.push(ConversationTurn::new(question, outcome.clone()));
        (history, outcome)
    }
}

fn fail(stage: Stage, err: AskdbError) -> AskdbError {
    tracing::warn!(stage = %stage, kind = %err.kind(), error = %err, "turn failed");
    err
}

pub struct OrchestratorBuilder {
    model: Option<Arc<dyn ChatModel>>,
    executor: Option<Arc<dyn QueryExecutor>>,
    schema: Option<SchemaDescription>,
    model_id: String,
    reference_date: Option<NaiveDate>,
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self {
            model: None,
            executor: None,
            schema: None,
            // Empty defers to the client's configured default model.
            model_id: String::new(),
            reference_date: None,
        }
    }
}

impl OrchestratorBuilder {
    pub fn model(mut self, model: Arc<dyn ChatModel>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn executor(mut self, executor: Arc<dyn QueryExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn schema(mut self, schema: SchemaDescription) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Anchors relative date phrases ("last month", "last 30 days") in both
    /// completion calls to an absolute date.
    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    pub fn build(self) -> Result<Orchestrator, AskdbError> {
        let model = self
            .model
            .ok_or_else(|| AskdbError::InvalidConfig("a chat model is required".to_string()))?;
        let executor = self.executor.ok_or_else(|| {
            AskdbError::InvalidConfig("a query executor is required".to_string())
        })?;
        let schema = self.schema.ok_or_else(|| {
            AskdbError::InvalidConfig("a schema description is required".to_string())
        })?;

        let mut generator = SqlGenerator::new(model.clone(), self.model_id.clone(), schema);
        let mut composer = AnswerComposer::new(model, self.model_id);
        if let Some(date) = self.reference_date {
            generator = generator.with_reference_date(date);
            composer = composer.with_reference_date(date);
        }

        Ok(Orchestrator {
            generator,
            executor,
            composer,
        })
    }
}
