//! The single-shot request/render workflow.
//!
//! Control flow is strictly linear: submit one request, render the result,
//! release the provider. No branching, no retries, no concurrency.

use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::llm::{ChatRequest, ChatResponse, LLMError, LLMProvider};
use crate::render;

/// Errors surfaced by [`run_once`]. Nothing is caught or retried here.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Chat(#[from] LLMError),

    #[error("failed to write rendered response: {0}")]
    Render(#[from] std::io::Error),
}

/// Submit one chat completion request and render the result into `out`.
///
/// Takes the provider by value: it is dropped, and its connections released,
/// exactly once on every exit path out of this function. The response is
/// returned for callers that want to inspect it further.
pub async fn run_once<P, W>(
    provider: P,
    request: ChatRequest,
    out: &mut W,
) -> Result<ChatResponse, WorkflowError>
where
    P: LLMProvider,
    W: Write,
{
    let response = provider.chat(request).await?;
    debug!(
        id = response.id.as_deref().unwrap_or("-"),
        choices = response.choices.len(),
        "rendering chat completion response"
    );
    render::render(&response, out)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{Choice, Message, Usage, classify_status};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const HAIKU: &str =
        "Silent circuits hum / Thoughts emerge from data streams / Mind without a soul";

    enum CannedReply {
        Content(&'static str),
        RateLimited,
        Unreachable,
    }

    /// Test backend that counts its own drops, so release-on-every-exit-path
    /// is observable.
    struct CannedProvider {
        reply: CannedReply,
        drops: Arc<AtomicUsize>,
    }

    impl CannedProvider {
        fn new(reply: CannedReply) -> (Self, Arc<AtomicUsize>) {
            let drops = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    reply,
                    drops: Arc::clone(&drops),
                },
                drops,
            )
        }
    }

    impl Drop for CannedProvider {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl LLMProvider for CannedProvider {
        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
            if request.messages.is_empty() {
                return Err(LLMError::Validation(
                    "messages must contain at least one entry".to_string(),
                ));
            }
            match self.reply {
                CannedReply::Content(text) => Ok(ChatResponse {
                    id: Some("chatcmpl-test".to_string()),
                    model: Some(request.model),
                    choices: vec![Choice {
                        index: 0,
                        message: Message::assistant(text),
                        finish_reason: Some("stop".to_string()),
                    }],
                    usage: Some(Usage {
                        prompt_tokens: 13,
                        completion_tokens: 19,
                        total_tokens: 32,
                    }),
                }),
                CannedReply::RateLimited => {
                    Err(classify_status(429, "rate limit exceeded".to_string()))
                }
                CannedReply::Unreachable => {
                    // Connecting to port 0 always fails locally; borrow its
                    // transport error.
                    let err = reqwest::Client::new()
                        .get("http://127.0.0.1:0/")
                        .send()
                        .await
                        .expect_err("connecting to port 0 cannot succeed");
                    Err(LLMError::Connection(err))
                }
            }
        }
    }

    fn haiku_request() -> ChatRequest {
        ChatRequest::new(
            "gpt-4o-mini",
            vec![Message::user("Write a haiku about artificial intelligence.")],
        )
    }

    #[tokio::test]
    async fn test_happy_path_renders_the_assistant_message() {
        let (provider, drops) = CannedProvider::new(CannedReply::Content(HAIKU));
        let mut out = Vec::new();

        let response = run_once(provider, haiku_request(), &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains(HAIKU));
        assert_eq!(response.primary().unwrap().content, HAIKU);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_service_error_propagates_and_releases_the_provider() {
        let (provider, drops) = CannedProvider::new(CannedReply::RateLimited);
        let mut out = Vec::new();

        let err = run_once(provider, haiku_request(), &mut out).await.unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::Chat(LLMError::Service { status: 429, .. })
        ));
        assert!(out.is_empty(), "failed runs must not write to the output");
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connection_error_propagates_and_releases_the_provider() {
        let (provider, drops) = CannedProvider::new(CannedReply::Unreachable);
        let mut out = Vec::new();

        let err = run_once(provider, haiku_request(), &mut out).await.unwrap_err();

        assert!(matches!(err, WorkflowError::Chat(LLMError::Connection(_))));
        assert!(out.is_empty());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_validation_error_propagates_and_releases_the_provider() {
        let (provider, drops) = CannedProvider::new(CannedReply::Content(HAIKU));
        let request = ChatRequest::new("gpt-4o-mini", Vec::new());
        let mut out = Vec::new();

        let err = run_once(provider, request, &mut out).await.unwrap_err();

        assert!(matches!(err, WorkflowError::Chat(LLMError::Validation(_))));
        assert!(out.is_empty());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_response_survives_rendering_for_further_inspection() {
        let (provider, _drops) = CannedProvider::new(CannedReply::Content(HAIKU));
        let mut out = Vec::new();

        let response = run_once(provider, haiku_request(), &mut out).await.unwrap();

        assert_eq!(response.id.as_deref(), Some("chatcmpl-test"));
        assert_eq!(response.usage.unwrap().total_tokens, 32);
    }
}
