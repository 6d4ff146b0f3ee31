//! Credential resolution from the process environment.
//!
//! The environment is mutated in exactly one place (`load_env_file`, once at
//! startup); everything downstream receives an explicit [`Credentials`]
//! value instead of reading ambient state.

use std::env;
use std::fmt;

use tracing::{debug, warn};

use crate::llm::LLMError;

/// Environment variable holding the API key. Required.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API base URL. Optional.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Environment variable holding the organization id. Optional.
pub const ORGANIZATION_VAR: &str = "OPENAI_ORG_ID";

/// Model the binary requests.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Merge a `.env` file (`KEY=VALUE` per line) from the working directory
/// into the process environment. A missing file is a no-op. Call once, at
/// startup, before anything reads the environment.
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "merged environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!("failed to load .env file: {err}"),
    }
}

/// Resolved service credentials. Built once at startup, immutable afterward.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub base_url: String,
    pub organization: Option<String>,
}

impl Credentials {
    /// Read credentials from the environment.
    ///
    /// A missing or empty `OPENAI_API_KEY` is an authentication failure; the
    /// workflow never proceeds to client construction without a credential.
    pub fn from_env() -> Result<Self, LLMError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LLMError::Authentication(format!("{API_KEY_VAR} is not set")))?;

        let base_url = env::var(BASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let organization = env::var(ORGANIZATION_VAR)
            .ok()
            .filter(|org| !org.is_empty());

        Ok(Self {
            api_key,
            base_url,
            organization,
        })
    }
}

// The key must never appear in logs or panic output.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("organization", &self.organization)
            .finish()
    }
}
