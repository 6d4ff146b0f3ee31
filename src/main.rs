//! Chatonce - send one chat completion request and print the result.
//!
//! Reads `OPENAI_API_KEY` (optionally from a local `.env` file), asks the
//! configured model for a haiku, and renders the response to stdout. Any
//! failure aborts with a nonzero exit; diagnostics go to stderr.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use chatonce::config::{self, Credentials, DEFAULT_MODEL};
use chatonce::llm::{ChatRequest, Message, OpenAICompatibleProvider};
use chatonce::workflow;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    config::load_env_file();
    let credentials = Credentials::from_env()?;
    let provider = OpenAICompatibleProvider::new(credentials)?;

    let request = ChatRequest::new(
        DEFAULT_MODEL,
        vec![Message::user("Write a haiku about artificial intelligence.")],
    );

    workflow::run_once(provider, request, &mut std::io::stdout()).await?;
    Ok(())
}
