//! askdb — grounded text-to-SQL question answering over SQLite.
//!
//! A user question is translated into a read-only SQL statement by a chat
//! model, executed against a local SQLite database, and answered in natural
//! language grounded in the returned rows.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use askdb::llm::OpenAiCompatibleClient;
//! use askdb::sqlite::SqliteExecutor;
//! use askdb::{Conversation, Orchestrator};
//!
//! # async fn run() -> Result<(), askdb::AskdbError> {
//! let executor = SqliteExecutor::builder("sqlite://marketing.db").build().await?;
//! let schema = executor.describe_schema().await?;
//! let client = OpenAiCompatibleClient::builder()
//!     .base_url("https://api.openai.com")
//!     .api_key(std::env::var("OPENAI_API_KEY").unwrap_or_default())
//!     .build()?;
//!
//! let orchestrator = Orchestrator::builder()
//!     .model(Arc::new(client))
//!     .executor(Arc::new(executor))
//!     .schema(schema)
//!     .build()?;
//!
//! let (history, outcome) = orchestrator
//!     .run_turn(Conversation::new(), "Which product sold best last month?")
//!     .await;
//! println!("{}", outcome.display_text());
//! # let _ = history;
//! # Ok(())
//! # }
//! ```

pub use askdb_core::{
    sanitize, AskdbError, ChatModel, ChatRequest, ChatResponse, Conversation, ConversationTurn,
    ErrorKind, Message, QueryExecutor, QueryResult, Role, Row, SanitizedSql, SchemaDescription,
    TurnDebug, TurnOutcome, TurnReport, READ_KEYWORDS,
};
pub use askdb_pipeline::{AnswerComposer, Orchestrator, OrchestratorBuilder, SqlGenerator, Stage};

pub mod prompt {
    pub use askdb_prompt::{answer_messages, render_rows, sql_generation_messages, PromptTemplate};
}

#[cfg(feature = "openai")]
pub mod llm {
    pub use askdb_llm::{OpenAiCompatibleBuilder, OpenAiCompatibleClient};
}

#[cfg(feature = "sqlite")]
pub mod sqlite {
    pub use askdb_sqlite::{SqliteExecutor, SqliteExecutorBuilder, DEFAULT_MAX_ROWS};
}
