//! Analytics Commands

use chrono::Utc;

use super::respond;
use crate::models::analytics::AnalyticsStats;
use crate::models::response::CommandResponse;
use crate::services::analytics::compute_stats;
use crate::state::AppState;
use crate::utils::error::AppError;

/// Aggregate stats over the caller's pitches
pub async fn get_analytics(state: &AppState, token: &str) -> CommandResponse<AnalyticsStats> {
    let result = async {
        let owner = state.authenticate(token).await?;
        let records = state.analytics().list_for_owner(&owner).await?;
        Ok::<_, AppError>(compute_stats(&records, Utc::now()))
    }
    .await;
    respond("get_analytics", result, "Failed to fetch analytics")
}
