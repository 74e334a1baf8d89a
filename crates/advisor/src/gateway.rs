//! Completion gateway: one user question in, one advisor reply out.

use std::sync::Arc;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::Config;
use crate::llm::{ChatRequest, LLMError, LLMProvider, Message, OpenAICompatibleProvider};

/// Prefix of the reply-shaped string returned in place of a failed completion.
pub const ERROR_SENTINEL_PREFIX: &str = "⚠️ OpenAI API Error: ";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;
pub const ADVISOR_PERSONA: &str =
    "You are a helpful and friendly Student Success Advisor at Conestoga College.";

// ============================================================================
// CompletionSettings
// ============================================================================

/// Fixed parameters applied to every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub persona: String,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            persona: ADVISOR_PERSONA.to_string(),
        }
    }
}

// ============================================================================
// CompletionGateway
// ============================================================================

/// Stateless adapter between a caller's question and an [`LLMProvider`].
#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn LLMProvider>,
    settings: CompletionSettings,
}

impl CompletionGateway {
    pub fn new(provider: Arc<dyn LLMProvider>, settings: CompletionSettings) -> Self {
        Self { provider, settings }
    }

    /// Gateway backed by the OpenAI-compatible provider with default settings.
    pub fn from_config(config: &Config) -> Self {
        let provider = OpenAICompatibleProvider::new(
            Client::new(),
            config.base_url.clone(),
            Some(config.api_key.clone()),
        );
        Self::new(Arc::new(provider), CompletionSettings::default())
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// Persona message followed by the user input, verbatim.
    pub fn build_request(&self, user_input: &str) -> ChatRequest {
        ChatRequest {
            model: self.settings.model.clone(),
            messages: vec![
                Message::system(self.settings.persona.clone()),
                Message::user(user_input),
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        }
    }

    /// Ask the provider and return the first choice's text, trimmed.
    pub async fn get_reply(&self, user_input: &str) -> Result<String, LLMError> {
        let request = self.build_request(user_input);
        debug!(
            model = %request.model,
            input_len = user_input.len(),
            "Requesting chat completion"
        );

        let response = match self.provider.chat(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "Chat completion failed");
                return Err(e);
            }
        };

        let content = response.first_content().ok_or_else(|| {
            LLMError::MalformedResponse("response contained no message content".to_string())
        })?;

        let reply = content.trim();
        if reply.is_empty() {
            return Err(LLMError::MalformedResponse(
                "completion text was empty".to_string(),
            ));
        }

        Ok(reply.to_string())
    }

    /// Like [`get_reply`](Self::get_reply), with failures rendered as the
    /// sentinel string. Never fails.
    pub async fn reply_or_sentinel(&self, user_input: &str) -> String {
        render_reply(self.get_reply(user_input).await)
    }
}

/// Render a completion result as the text shown to the user.
pub fn render_reply(result: Result<String, LLMError>) -> String {
    match result {
        Ok(reply) => reply,
        Err(e) => render_error(&e),
    }
}

/// `⚠️ OpenAI API Error: <description>`
pub fn render_error(error: &LLMError) -> String {
    format!("{ERROR_SENTINEL_PREFIX}{error}")
}

// ============================================================================
// Tests
// ============================================================================
