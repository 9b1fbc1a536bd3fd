//! Generation Models
//!
//! Request and response shapes for the AI operations.

use pitch_writer_core::PitchFields;
use serde::{Deserialize, Serialize};

/// A free-form generation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Pitch fields given to the model as background
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<PitchFields>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: PitchFields) -> Self {
        self.context = Some(context);
        self
    }
}

/// Generated text returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub content: String,
}

/// Enhanced text returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedContent {
    pub enhanced_content: String,
}

/// Three summaries of one pitch at increasing length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchSummary {
    pub one_liner: String,
    pub elevator: String,
    pub one_minute: String,
}
