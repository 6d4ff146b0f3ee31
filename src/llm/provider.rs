//! LLM provider trait and the OpenAI-compatible implementation.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Credentials;

use super::error::{LLMError, classify_status};
use super::types::{ChatRequest, ChatResponse};

/// Trait for chat completion backends.
///
/// The production implementation talks to an OpenAI-compatible API; tests
/// substitute canned backends at this seam.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Make a chat completion request and wait for the full response.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError>;
}

/// OpenAI-compatible provider (works for OpenAI, OpenRouter, Ollama).
///
/// Owns its connection pool; dropping the provider releases it. The workflow
/// relies on that for release-on-every-exit-path.
#[derive(Debug)]
pub struct OpenAICompatibleProvider {
    client: Client,
    base_url: String,
    api_key: String,
    organization: Option<String>,
}

impl OpenAICompatibleProvider {
    /// Build a provider from resolved credentials.
    ///
    /// Fails with [`LLMError::Authentication`] before any network activity
    /// when the key is empty.
    pub fn new(credentials: Credentials) -> Result<Self, LLMError> {
        if credentials.api_key.trim().is_empty() {
            return Err(LLMError::Authentication(
                "api key is empty".to_string(),
            ));
        }

        Ok(Self {
            client: Client::new(),
            base_url: credentials.base_url,
            api_key: credentials.api_key,
            organization: credentials.organization,
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAICompatibleProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
        // Precondition check, ahead of any network call.
        if request.messages.is_empty() {
            return Err(LLMError::Validation(
                "messages must contain at least one entry".to_string(),
            ));
        }

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion request"
        );

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key));

        if let Some(ref org) = self.organization {
            req = req.header("OpenAI-Organization", org);
        }

        let response = req.json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(classify_status(status, message));
        }

        let response: ChatResponse = response.json().await?;
        debug!(
            id = response.id.as_deref().unwrap_or("-"),
            choices = response.choices.len(),
            "received chat completion response"
        );
        Ok(response)
    }
}
