//! Notification Channel
//!
//! Fire-and-report event delivery. The production channel posts events to
//! the analytics workflow on the workflow backend.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::models::analytics::AnalyticsEvent;
use crate::services::workflow::WorkflowBackend;

/// Errors from notification delivery
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Notification rejected: {0}")]
    Rejected(String),
}

/// Destination for pitch lifecycle events
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn emit(&self, event: &AnalyticsEvent) -> Result<(), NotificationError>;
}

/// Sends events to a named workflow
pub struct WorkflowNotifier {
    backend: Arc<dyn WorkflowBackend>,
    workflow: String,
}

impl WorkflowNotifier {
    pub fn new(backend: Arc<dyn WorkflowBackend>, workflow: impl Into<String>) -> Self {
        Self {
            backend,
            workflow: workflow.into(),
        }
    }
}

#[async_trait]
impl NotificationChannel for WorkflowNotifier {
    async fn emit(&self, event: &AnalyticsEvent) -> Result<(), NotificationError> {
        let payload = json!({
            "event": event.event,
            "data": event.data(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let response = self.backend.invoke(&self.workflow, payload).await;
        if response.success {
            debug!("Delivered {} event for pitch {}", event.event, event.pitch_id);
            Ok(())
        } else {
            Err(NotificationError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "workflow reported failure".to_string()),
            ))
        }
    }
}
