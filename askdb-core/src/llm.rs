use serde::{Deserialize, Serialize};

use crate::AskdbError;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatRequest {
    /// Provider model identifier. An empty string defers to the client's
    /// configured default model.
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub content: String,
}

/// Seam to the hosted completion endpoint. Implementations must map a
/// reachable endpoint that returns null or blank content to
/// [`AskdbError::ModelRefused`] and transport/auth failures to
/// [`AskdbError::ModelUnavailable`].
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync + 'static {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AskdbError>;
}
