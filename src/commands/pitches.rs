//! Pitch Commands
//!
//! Owner-scoped pitch CRUD and export.

use pitch_writer_core::PitchPatch;

use super::respond;
use crate::models::pitch::{NewPitch, PitchRecord};
use crate::models::response::CommandResponse;
use crate::services::export::{export_markdown, ExportedPitch};
use crate::state::AppState;
use crate::utils::error::AppError;

/// List the caller's pitches, most recently updated first
pub async fn list_pitches(state: &AppState, token: &str) -> CommandResponse<Vec<PitchRecord>> {
    let result = async {
        let owner = state.authenticate(token).await?;
        state.pitches().list(&owner).await
    }
    .await;
    respond("list_pitches", result, "Failed to fetch pitches")
}

/// Fetch one of the caller's pitches
pub async fn get_pitch(state: &AppState, token: &str, id: &str) -> CommandResponse<PitchRecord> {
    let result = async {
        let owner = state.authenticate(token).await?;
        state.pitches().get(&owner, id).await
    }
    .await;
    respond("get_pitch", result, "Failed to fetch pitch")
}

/// Create a pitch; analytics and notification are best-effort
pub async fn create_pitch(
    state: &AppState,
    token: &str,
    draft: NewPitch,
) -> CommandResponse<PitchRecord> {
    let result = async {
        let owner = state.authenticate(token).await?;
        state.persistence().create_pitch(&owner, &draft).await
    }
    .await;
    respond("create_pitch", result, "Failed to create pitch")
}

/// Merge a partial update into one of the caller's pitches
pub async fn update_pitch(
    state: &AppState,
    token: &str,
    id: &str,
    patch: PitchPatch,
) -> CommandResponse<PitchRecord> {
    let result = async {
        let owner = state.authenticate(token).await?;
        state.pitches().update(&owner, id, &patch).await
    }
    .await;
    respond("update_pitch", result, "Failed to update pitch")
}

/// Delete one of the caller's pitches
pub async fn delete_pitch(state: &AppState, token: &str, id: &str) -> CommandResponse<()> {
    let result = async {
        let owner = state.authenticate(token).await?;
        state.pitches().delete(&owner, id).await
    }
    .await;
    respond("delete_pitch", result, "Failed to delete pitch")
}

/// Render one of the caller's pitches as Markdown
pub async fn export_pitch(state: &AppState, token: &str, id: &str) -> CommandResponse<ExportedPitch> {
    let result = async {
        let owner = state.authenticate(token).await?;
        let pitch = state.pitches().get(&owner, id).await?;
        Ok::<_, AppError>(export_markdown(&pitch))
    }
    .await;
    respond("export_pitch", result, "Failed to export pitch")
}
