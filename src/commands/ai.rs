//! AI Commands
//!
//! Generation, per-section drafting, enhancement and summaries.

use pitch_writer_core::{PitchField, PitchFields};

use super::respond;
use crate::models::generation::{EnhancedContent, GeneratedContent, GenerationRequest, PitchSummary};
use crate::models::response::CommandResponse;
use crate::state::AppState;
use crate::utils::error::AppError;

/// Generate text for a free-form prompt (workflow first, then provider)
pub async fn generate_content(
    state: &AppState,
    token: &str,
    request: GenerationRequest,
) -> CommandResponse<GeneratedContent> {
    let result = async {
        state.authenticate(token).await?;
        let content = state.generation().generate(&request).await?;
        Ok::<_, AppError>(GeneratedContent { content })
    }
    .await;
    respond("generate_content", result, "Failed to generate content")
}

/// Draft one section of a pitch from the sections already written
pub async fn generate_field(
    state: &AppState,
    token: &str,
    field: PitchField,
    pitch: PitchFields,
) -> CommandResponse<GeneratedContent> {
    let result = async {
        state.authenticate(token).await?;
        let content = state.generation().generate_field(field, &pitch).await?;
        Ok::<_, AppError>(GeneratedContent { content })
    }
    .await;
    respond("generate_field", result, "Failed to generate content")
}

/// Rewrite content in a style; missing or unknown styles mean formal
pub async fn enhance_content(
    state: &AppState,
    token: &str,
    content: String,
    style: Option<String>,
) -> CommandResponse<EnhancedContent> {
    let result = async {
        state.authenticate(token).await?;
        let style = style.unwrap_or_default();
        let enhanced_content = state.enhancement().enhance(&content, &style).await?;
        Ok::<_, AppError>(EnhancedContent { enhanced_content })
    }
    .await;
    respond("enhance_content", result, "Failed to enhance content")
}

/// Produce the three-length summary of a pitch
pub async fn generate_summary(
    state: &AppState,
    token: &str,
    pitch: PitchFields,
) -> CommandResponse<PitchSummary> {
    let result = async {
        state.authenticate(token).await?;
        state.summarizer().summarize(&pitch).await
    }
    .await;
    respond("generate_summary", result, "Failed to generate summary")
}
