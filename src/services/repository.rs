//! Pitch Repository
//!
//! Owner-scoped access to the authoritative pitch store. Records owned by
//! someone else are indistinguishable from records that do not exist.

use async_trait::async_trait;
use pitch_writer_core::PitchPatch;

use crate::models::pitch::{NewPitch, PitchRecord};
use crate::storage::database::Database;
use crate::utils::error::{AppError, AppResult};

#[async_trait]
pub trait PitchRepository: Send + Sync {
    /// All of an owner's pitches, most recently updated first
    async fn list(&self, owner: &str) -> AppResult<Vec<PitchRecord>>;

    /// One pitch, or `NotFound`
    async fn get(&self, owner: &str, id: &str) -> AppResult<PitchRecord>;

    /// Store a new pitch, assigning id and timestamps
    async fn insert(&self, owner: &str, draft: &NewPitch) -> AppResult<PitchRecord>;

    /// Merge a partial update, or `NotFound`
    async fn update(&self, owner: &str, id: &str, patch: &PitchPatch) -> AppResult<PitchRecord>;

    /// Remove a pitch, or `NotFound`
    async fn delete(&self, owner: &str, id: &str) -> AppResult<()>;

    /// Whether the backing store is reachable
    fn is_healthy(&self) -> bool {
        true
    }
}

fn not_found(id: &str) -> AppError {
    AppError::not_found(format!("Pitch {}", id))
}

#[async_trait]
impl PitchRepository for Database {
    async fn list(&self, owner: &str) -> AppResult<Vec<PitchRecord>> {
        self.list_pitches(owner)
    }

    async fn get(&self, owner: &str, id: &str) -> AppResult<PitchRecord> {
        self.get_pitch(owner, id)?.ok_or_else(|| not_found(id))
    }

    async fn insert(&self, owner: &str, draft: &NewPitch) -> AppResult<PitchRecord> {
        self.insert_pitch(owner, draft)
    }

    async fn update(&self, owner: &str, id: &str, patch: &PitchPatch) -> AppResult<PitchRecord> {
        self.update_pitch(owner, id, patch)?
            .ok_or_else(|| not_found(id))
    }

    async fn delete(&self, owner: &str, id: &str) -> AppResult<()> {
        if self.delete_pitch(owner, id)? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }

    fn is_healthy(&self) -> bool {
        Database::is_healthy(self)
    }
}
