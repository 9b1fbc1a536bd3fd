//! Workflow Types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Outcome of invoking a named workflow.
///
/// Transport failures are folded into `success = false` so callers only
/// ever branch on this struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkflowResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// The non-blank `data.content` string, if any
    pub fn content(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.get("content"))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }
}

/// Errors talking to the workflow backend
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Workflow request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Workflow returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid workflow response: {0}")]
    InvalidResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
