use std::fmt;
use std::time::Duration;

use askdb_core::{AskdbError, ChatModel, ChatRequest, ChatResponse};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::types::{ChatCompletionRequest, ChatCompletionResponse, OpenAiError};

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: Option<SecretString>,
    default_model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.base_url.as_str())
            .field("default_model", &self.default_model)
            .field("api_key", &api_key)
            .finish()
    }
}

impl OpenAiCompatibleClient {
    pub fn builder() -> OpenAiCompatibleBuilder {
        OpenAiCompatibleBuilder::default()
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn set_default_model(&mut self, model: impl Into<String>) {
        self.default_model = model.into();
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            CHAT_COMPLETIONS_PATH
        )
    }

    async fn post_chat(
        &self,
        body: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AskdbError> {
        let mut request = self.client.post(self.endpoint()).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|err| AskdbError::ModelUnavailable(err.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| AskdbError::ModelUnavailable(err.to_string()))?;

        if !status.is_success() {
            return Err(AskdbError::ModelUnavailable(provider_error_message(
                status.as_u16(),
                &text,
            )));
        }

        serde_json::from_str(&text).map_err(|err| {
            AskdbError::ModelUnavailable(format!("failed to decode completion response: {err}"))
        })
    }
}

fn provider_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<OpenAiError>(body) {
        Ok(parsed) => format!("HTTP {status}: {}", parsed.error.message),
        Err(_) => format!("HTTP {status}"),
    }
}

#[async_trait::async_trait]
impl ChatModel for OpenAiCompatibleClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AskdbError> {
        let model = if request.model.is_empty() {
            self.default_model.clone()
        } else {
            request.model
        };

        let body = ChatCompletionRequest {
            model: model.clone(),
            messages: request.messages,
            temperature: request.temperature.or(self.temperature),
            max_tokens: self.max_tokens,
        };

        let response = self.post_chat(body).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(AskdbError::ModelRefused)?;

        let content = choice.message.content.unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(AskdbError::ModelRefused);
        }

        tracing::debug!(model = %model, chars = content.len(), "completion received");
        Ok(ChatResponse {
            content: content.to_string(),
        })
    }
}

#[derive(Default, Clone)]
pub struct OpenAiCompatibleBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    default_model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout: Option<Duration>,
}

impl fmt::Debug for OpenAiCompatibleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("OpenAiCompatibleBuilder")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .field("api_key", &api_key)
            .finish()
    }
}

impl OpenAiCompatibleBuilder {
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.api_key = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    pub fn default_model(mut self, value: impl Into<String>) -> Self {
        self.default_model = Some(value.into());
        self
    }

    pub fn temperature(mut self, value: f32) -> Self {
        self.temperature = Some(value);
        self
    }

    pub fn max_tokens(mut self, value: u32) -> Self {
        self.max_tokens = Some(value);
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = Some(value);
        self
    }

    pub fn build(self) -> Result<OpenAiCompatibleClient, AskdbError> {
        let base_url = self
            .base_url
            .ok_or_else(|| AskdbError::InvalidConfig("base_url is required".to_string()))?;
        let base_url = Url::parse(&base_url)
            .map_err(|err| AskdbError::InvalidConfig(format!("invalid base_url: {err}")))?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|err| AskdbError::InvalidConfig(err.to_string()))?;

        Ok(OpenAiCompatibleClient {
            client,
            base_url,
            api_key: self.api_key.map(SecretString::from),
            default_model: self
                .default_model
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
    }
}
