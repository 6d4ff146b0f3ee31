//! LLM error types.

use thiserror::Error;

/// Errors raised across the chat completion workflow.
///
/// Nothing in this crate catches or retries these; every one of them aborts
/// the workflow and surfaces to the caller.
#[derive(Debug, Error)]
pub enum LLMError {
    /// Missing credential at construction, or the service rejecting it
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transport failure: DNS, TLS, socket, or a garbled response body
    #[error("transport error: {0}")]
    Connection(#[from] reqwest::Error),

    /// Request rejected as malformed, locally or by the service
    #[error("invalid request: {0}")]
    Validation(String),

    /// Remote-side failure: rate limiting or server fault
    #[error("service error (status {status}): {message}")]
    Service { status: u16, message: String },
}

/// Map a non-success HTTP status and response body onto the taxonomy.
///
/// 401/403 mean the credential was rejected; 400/404/422 are request shapes
/// the service refuses (unknown model included); everything else, 429 and
/// 5xx in practice, is the service's own failure.
pub fn classify_status(status: u16, message: String) -> LLMError {
    match status {
        401 | 403 => LLMError::Authentication(message),
        400 | 404 | 422 => LLMError::Validation(message),
        _ => LLMError::Service { status, message },
    }
}
