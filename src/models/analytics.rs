//! Analytics Models
//!
//! Per-pitch analytics rows, the aggregated stats report, and the
//! notification event emitted when a pitch is created.

use std::collections::BTreeMap;

use pitch_writer_core::{PitchField, PitchFields};
use serde::{Deserialize, Serialize};

use super::pitch::PitchRecord;

/// Bucket name used when a pitch has no type or audience
pub const UNSPECIFIED: &str = "unspecified";

/// Event name for newly created pitches
pub const PITCH_CREATED_EVENT: &str = "pitch_created";

/// Whitespace-delimited word counts per pitch field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub fields: BTreeMap<String, usize>,
    pub total: usize,
}

impl WordCount {
    /// Count words in every field of a pitch
    pub fn of(fields: &PitchFields) -> Self {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for (field, text) in fields.iter() {
            let n = text.split_whitespace().count();
            total += n;
            counts.insert(field.as_str().to_string(), n);
        }
        Self {
            fields: counts,
            total,
        }
    }

    /// Word count for one field (0 if absent)
    pub fn field(&self, field: PitchField) -> usize {
        self.fields.get(field.as_str()).copied().unwrap_or(0)
    }
}

/// One row in the analytics store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsRecord {
    pub pitch_id: String,
    pub user_id: String,
    pub pitch_type: String,
    pub audience: String,
    pub word_count: WordCount,
    pub created_at: String,
}

impl AnalyticsRecord {
    /// Derive the analytics row for a freshly stored pitch
    pub fn from_pitch(pitch: &PitchRecord, created_at: impl Into<String>) -> Self {
        Self {
            pitch_id: pitch.id.clone(),
            user_id: pitch.user_id.clone(),
            pitch_type: or_unspecified(&pitch.fields.pitch_type),
            audience: or_unspecified(&pitch.fields.audience),
            word_count: WordCount::of(&pitch.fields),
            created_at: created_at.into(),
        }
    }
}

fn or_unspecified(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Aggregated analytics for one owner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub total_pitches: usize,
    pub pitch_types: BTreeMap<String, usize>,
    pub audience_types: BTreeMap<String, usize>,
    pub average_word_count: f64,
    pub created_this_month: usize,
}

/// Notification payload emitted to the workflow backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event: String,
    pub pitch_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub pitch_type: String,
    pub audience: String,
}

impl AnalyticsEvent {
    pub fn pitch_created(pitch: &PitchRecord) -> Self {
        Self {
            event: PITCH_CREATED_EVENT.to_string(),
            pitch_id: pitch.id.clone(),
            user_id: pitch.user_id.clone(),
            pitch_type: pitch.fields.pitch_type.clone(),
            audience: pitch.fields.audience.clone(),
        }
    }

    /// The event data without the event name
    pub fn data(&self) -> serde_json::Value {
        serde_json::json!({
            "pitch_id": self.pitch_id,
            "user_id": self.user_id,
            "type": self.pitch_type,
            "audience": self.audience,
        })
    }
}
