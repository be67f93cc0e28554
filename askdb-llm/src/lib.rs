//! OpenAI-compatible chat-completion client.
//!
//! Works against any provider speaking OpenAI's chat completions format
//! (OpenAI, DeepSeek, Together, local gateways, ...).

mod openai_compatible;
pub mod types;

pub use askdb_core::{ChatModel, ChatRequest, ChatResponse, Message, Role};
pub use openai_compatible::{OpenAiCompatibleBuilder, OpenAiCompatibleClient};
