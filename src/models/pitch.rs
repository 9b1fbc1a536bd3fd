//! Pitch Models
//!
//! Stored pitch records and the payload used to create them.

use pitch_writer_core::{PitchFields, PitchStatus};
use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// A pitch as persisted in the authoritative store.
///
/// A record always carries both its id and its owner; unsaved pitches are
/// represented by [`NewPitch`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitchRecord {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub fields: PitchFields,
    pub status: PitchStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a pitch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPitch {
    #[serde(flatten)]
    pub fields: PitchFields,
    #[serde(default)]
    pub status: PitchStatus,
}

impl NewPitch {
    pub fn new(fields: PitchFields) -> Self {
        Self {
            fields,
            status: PitchStatus::Draft,
        }
    }

    /// A pitch must at least have a title
    pub fn validate(&self) -> AppResult<()> {
        if self.fields.title.trim().is_empty() {
            return Err(AppError::validation("Pitch title is required"));
        }
        Ok(())
    }
}
