mod error;
mod history;
mod llm;
mod schema;
mod sql;
mod turn;

pub use error::{AskdbError, ErrorKind};
pub use history::{Conversation, ConversationTurn};
pub use llm::{ChatModel, ChatRequest, ChatResponse, Message, Role};
pub use schema::SchemaDescription;
pub use sql::{sanitize, QueryExecutor, QueryResult, Row, SanitizedSql, READ_KEYWORDS};
pub use turn::{TurnDebug, TurnOutcome, TurnReport};
