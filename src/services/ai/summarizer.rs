//! Pitch Summarizer
//!
//! Produces one-liner, elevator and one-minute summaries with three
//! concurrent provider calls. All three succeed or the whole request fails;
//! the first failure drops the calls still in flight.

use std::sync::Arc;

use pitch_writer_core::PitchFields;
use pitch_writer_llm::{LlmError, TextProvider};
use tracing::{error, info};

use crate::models::generation::PitchSummary;
use crate::services::prompt::SummaryPrompts;
use crate::utils::error::{AppError, AppResult};

pub struct Summarizer {
    provider: Arc<dyn TextProvider>,
}

impl Summarizer {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub async fn summarize(&self, pitch: &PitchFields) -> AppResult<PitchSummary> {
        let prompts = SummaryPrompts::build(pitch);
        let provider = &self.provider;

        let (one_liner, elevator, one_minute) = tokio::try_join!(
            non_empty(provider.complete(&prompts.one_liner)),
            non_empty(provider.complete(&prompts.elevator)),
            non_empty(provider.complete(&prompts.one_minute)),
        )
        .map_err(|e| {
            error!("Summary generation via {} failed: {}", provider.name(), e);
            AppError::upstream("Summary generation failed")
        })?;

        info!("Generated pitch summary with {}", provider.model());
        Ok(PitchSummary {
            one_liner,
            elevator,
            one_minute,
        })
    }
}

async fn non_empty<F>(call: F) -> Result<String, LlmError>
where
    F: std::future::Future<Output = Result<String, LlmError>>,
{
    let text = call.await?;
    if text.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    Ok(text)
}
