//! Analytics Store Trait

use async_trait::async_trait;

use crate::models::analytics::AnalyticsRecord;
use crate::utils::error::AppResult;

/// Secondary, non-authoritative store of per-pitch analytics rows
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Append one row
    async fn insert(&self, record: &AnalyticsRecord) -> AppResult<()>;

    /// All rows belonging to `user_id`, oldest first
    async fn list_for_owner(&self, user_id: &str) -> AppResult<Vec<AnalyticsRecord>>;

    /// Whether the backing store is reachable
    fn is_healthy(&self) -> bool {
        true
    }
}
