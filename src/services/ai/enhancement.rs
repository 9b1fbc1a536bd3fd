//! Enhancement Gateway
//!
//! Rewrites content in a named style. Uses the AI provider only; unlike
//! generation there is no workflow tier and no fallback.

use std::sync::Arc;

use pitch_writer_llm::TextProvider;
use tracing::{debug, error};

use crate::services::prompt::{enhancement_prompt, EnhanceStyle};
use crate::utils::error::{AppError, AppResult};

pub struct EnhancementGateway {
    provider: Arc<dyn TextProvider>,
}

impl EnhancementGateway {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Rewrite `content` in `style`; unknown styles are treated as formal.
    pub async fn enhance(&self, content: &str, style: &str) -> AppResult<String> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Content is required"));
        }

        let style = EnhanceStyle::parse_lenient(style);
        debug!("Enhancing {} chars with style {}", content.len(), style.as_str());

        let text = self
            .provider
            .complete(&enhancement_prompt(content, style))
            .await
            .map_err(|e| {
                error!("Enhancement via {} failed: {}", self.provider.name(), e);
                AppError::from(e)
            })?;

        if text.trim().is_empty() {
            return Err(AppError::upstream("Provider returned empty text"));
        }
        Ok(text)
    }
}
