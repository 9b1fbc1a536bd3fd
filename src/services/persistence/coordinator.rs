//! Persistence Coordinator
//!
//! Pitch creation writes the authoritative store first. Only once that
//! succeeds are the analytics row and the `pitch_created` notification
//! attempted, concurrently and best-effort.

use std::sync::Arc;

use tracing::info;

use super::side_writes::{BestEffortTasks, SideWriteOutcome};
use crate::models::analytics::{AnalyticsEvent, AnalyticsRecord};
use crate::models::pitch::{NewPitch, PitchRecord};
use crate::services::analytics::AnalyticsStore;
use crate::services::notification::NotificationChannel;
use crate::services::repository::PitchRepository;
use crate::utils::clock::{format_timestamp, process_clock};
use crate::utils::error::AppResult;

/// Name of the analytics side write
pub const ANALYTICS_TASK: &str = "analytics_record";
/// Name of the notification side write
pub const NOTIFY_TASK: &str = "pitch_created_event";

pub struct PersistenceCoordinator {
    pitches: Arc<dyn PitchRepository>,
    analytics: Arc<dyn AnalyticsStore>,
    notifier: Arc<dyn NotificationChannel>,
}

impl PersistenceCoordinator {
    pub fn new(
        pitches: Arc<dyn PitchRepository>,
        analytics: Arc<dyn AnalyticsStore>,
        notifier: Arc<dyn NotificationChannel>,
    ) -> Self {
        Self {
            pitches,
            analytics,
            notifier,
        }
    }

    /// Create a pitch; side-write failures are logged, never returned.
    pub async fn create_pitch(&self, owner: &str, draft: &NewPitch) -> AppResult<PitchRecord> {
        let (pitch, _) = self.create_pitch_with_report(owner, draft).await?;
        Ok(pitch)
    }

    /// Create a pitch and report how each side write went
    pub async fn create_pitch_with_report(
        &self,
        owner: &str,
        draft: &NewPitch,
    ) -> AppResult<(PitchRecord, Vec<SideWriteOutcome>)> {
        draft.validate()?;
        let pitch = self.pitches.insert(owner, draft).await?;
        info!("Created pitch {} for user {}", pitch.id, owner);

        let outcomes = self.run_side_writes(&pitch).await;
        Ok((pitch, outcomes))
    }

    async fn run_side_writes(&self, pitch: &PitchRecord) -> Vec<SideWriteOutcome> {
        let record = AnalyticsRecord::from_pitch(pitch, format_timestamp(&process_clock().now()));
        let event = AnalyticsEvent::pitch_created(pitch);
        let analytics = Arc::clone(&self.analytics);
        let notifier = Arc::clone(&self.notifier);

        let mut tasks = BestEffortTasks::new();
        tasks.push(ANALYTICS_TASK, async move {
            analytics.insert(&record).await.map_err(|e| e.to_string())
        });
        tasks.push(NOTIFY_TASK, async move {
            notifier.emit(&event).await.map_err(|e| e.to_string())
        });
        tasks.run().await
    }
}
