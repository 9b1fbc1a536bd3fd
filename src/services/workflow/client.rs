//! Workflow Backend Client
//!
//! Invokes named n8n webhook workflows over HTTP. Requests carry an optional
//! bearer token and an optional HMAC-SHA256 body signature.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, warn};

use super::types::{WorkflowError, WorkflowResponse};
use crate::models::settings::WorkflowConfig;

/// Header carrying the body signature
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Something that can run a named workflow with a JSON payload
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    /// Run `workflow`; never errors, failures come back as `success = false`
    async fn invoke(&self, workflow: &str, payload: Value) -> WorkflowResponse;
}

/// HTTP client for an n8n instance
pub struct N8nClient {
    base_url: String,
    api_key: Option<String>,
    signing_secret: Option<String>,
    client: reqwest::Client,
}

impl N8nClient {
    pub fn new(config: &WorkflowConfig, client: reqwest::Client) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
            signing_secret: config.signing_secret.clone().filter(|s| !s.is_empty()),
            client,
        }
    }

    /// Webhook URL for a workflow
    pub fn workflow_url(&self, workflow: &str) -> String {
        format!("{}/webhook/{}", self.base_url, workflow)
    }

    /// Compute HMAC-SHA256 of the body using the secret, returning hex-encoded signature.
    pub fn compute_signature(secret: &str, body: &str) -> Option<String> {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).ok()?;
        mac.update(body.as_bytes());
        let result = mac.finalize();

        Some(
            result
                .into_bytes()
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<String>(),
        )
    }

    async fn trigger(&self, workflow: &str, payload: &Value) -> Result<Value, WorkflowError> {
        let url = self.workflow_url(workflow);
        let body = serde_json::to_string(payload)?;

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");

        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        if let Some(ref secret) = self.signing_secret {
            if let Some(signature) = Self::compute_signature(secret, &body) {
                request = request.header(SIGNATURE_HEADER, format!("sha256={}", signature));
            }
        }

        debug!("Invoking workflow {} at {}", workflow, url);
        let response = request.body(body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(WorkflowError::Http { status, body });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| WorkflowError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl WorkflowBackend for N8nClient {
    async fn invoke(&self, workflow: &str, payload: Value) -> WorkflowResponse {
        match self.trigger(workflow, &payload).await {
            Ok(data) => WorkflowResponse::ok(data),
            Err(e) => {
                warn!("Workflow {} failed: {}", workflow, e);
                WorkflowResponse::failed(e.to_string())
            }
        }
    }
}
