//! The text-to-SQL-then-answer pipeline.
//!
//! One user turn flows through four strictly sequential stages: SQL
//! generation, read-only sanitization, execution, and grounded answer
//! composition. Any stage failure short-circuits the turn; nothing is
//! retried and nothing is swallowed.

mod composer;
mod generator;
mod orchestrator;

pub use composer::AnswerComposer;
pub use generator::SqlGenerator;
pub use orchestrator::{Orchestrator, OrchestratorBuilder, Stage};
