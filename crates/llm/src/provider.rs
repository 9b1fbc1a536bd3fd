//! Text Provider Trait
//!
//! Defines the narrow interface the application needs from an AI provider:
//! one stateless, single-shot completion.

use std::sync::Arc;

use async_trait::async_trait;

use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::types::{LlmError, LlmResult, ProviderConfig, ProviderType};

/// Trait that all AI providers must implement.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Complete a prompt and return the generated text.
    ///
    /// Implementations return `LlmError::EmptyResponse` rather than an empty
    /// string, so callers never receive blank text as a success.
    async fn complete(&self, prompt: &str) -> LlmResult<String>;
}

/// Build the provider selected by `config`, sharing the given HTTP client.
pub fn create_provider(config: ProviderConfig, client: reqwest::Client) -> Arc<dyn TextProvider> {
    match config.provider {
        ProviderType::Gemini => Arc::new(GeminiProvider::with_client(config, client)),
        ProviderType::OpenAI => Arc::new(OpenAIProvider::with_client(config, client)),
    }
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound {
            model: body.to_string(),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
        },
        400 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
