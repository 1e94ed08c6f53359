//! OpenAI client configuration with sensible defaults.

use crate::config::OpenAISettings;
use crate::error::{ReelError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client from settings.
///
/// The API key is read from OPENAI_API_KEY by `async-openai` unless `api_key`
/// is given.
pub fn create_client(
    settings: &OpenAISettings,
    api_key: Option<&str>,
) -> Result<Client<OpenAIConfig>> {
    let timeout = match settings.timeout_seconds {
        0 => DEFAULT_TIMEOUT_SECS,
        secs => secs,
    };

    let mut config = OpenAIConfig::default();
    if let Some(key) = api_key {
        config = config.with_api_key(key);
    }
    if let Some(base) = settings.api_base.as_deref() {
        config = config.with_api_base(base.trim_end_matches('/'));
    }

    create_client_with_timeout(config, Duration::from_secs(timeout))
}

/// Create an OpenAI client with a custom timeout.
pub fn create_client_with_timeout(
    config: OpenAIConfig,
    timeout: Duration,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ReelError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(config).with_http_client(http_client))
}
