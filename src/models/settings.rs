//! Settings Models
//!
//! Application configuration and settings data structures.

use std::path::PathBuf;

use pitch_writer_core::ProxyConfig;
use pitch_writer_llm::{ProviderConfig, ProviderType};
use serde::{Deserialize, Serialize};

use crate::utils::error::AppResult;
use crate::utils::paths::{analytics_database_path, database_path};

/// Environment variable for the workflow backend API key
pub const WORKFLOW_API_KEY_ENV: &str = "N8N_API_KEY";
/// Environment variable overriding the workflow backend URL
pub const WORKFLOW_URL_ENV: &str = "N8N_WEBHOOK_URL";
/// Environment variable for the workflow request signing secret
pub const WORKFLOW_SECRET_ENV: &str = "N8N_SIGNING_SECRET";
/// Environment variable holding the proxy password
pub const PROXY_PASSWORD_ENV: &str = "PITCH_WRITER_PROXY_PASSWORD";

/// Application configuration stored in config.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// AI provider used for direct completions
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Workflow backend (tier-one generation and notifications)
    #[serde(default)]
    pub workflow: WorkflowConfig,
    /// Database locations
    #[serde(default)]
    pub storage: StorageConfig,
    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Workflow backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    pub base_url: String,
    /// Workflow invoked for AI content generation
    pub generation_workflow: String,
    /// Workflow receiving analytics notifications
    pub analytics_workflow: String,
    /// Bearer token; injected from the environment, never persisted
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    /// HMAC secret for request signing; never persisted
    #[serde(skip_serializing, default)]
    pub signing_secret: Option<String>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5678".to_string(),
            generation_workflow: "ai-content-generation".to_string(),
            analytics_workflow: "analytics-tracker".to_string(),
            api_key: None,
            signing_secret: None,
        }
    }
}

/// Database file locations; `None` uses the default under ~/.pitch-writer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analytics_database_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Configured pitch database path, or the default
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match self.database_path {
            Some(ref path) => Ok(path.clone()),
            None => database_path(),
        }
    }

    /// Configured analytics database path, or the default
    pub fn resolve_analytics_path(&self) -> AppResult<PathBuf> {
        match self.analytics_database_path {
            Some(ref path) => Ok(path.clone()),
            None => analytics_database_path(),
        }
    }
}

/// Outbound HTTP settings shared by the provider and workflow clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            proxy: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub provider: Option<ProviderType>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub workflow_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(provider) = update.provider {
            if provider != self.provider.provider && update.model.is_none() {
                self.provider.model = provider.default_model().to_string();
            }
            self.provider.provider = provider;
        }
        if let Some(model) = update.model {
            self.provider.model = model;
        }
        if let Some(temperature) = update.temperature {
            self.provider.temperature = temperature;
        }
        if let Some(url) = update.workflow_base_url {
            self.workflow.base_url = url;
        }
        if let Some(secs) = update.request_timeout_secs {
            self.http.request_timeout_secs = secs;
        }
    }

    /// Fill secrets and overrides from environment variables.
    ///
    /// `lookup` is normally `std::env::var`; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(self.provider.provider.api_key_env()) {
            self.provider.api_key = Some(key);
        }
        if let Some(key) = non_empty(WORKFLOW_API_KEY_ENV) {
            self.workflow.api_key = Some(key);
        }
        if let Some(url) = non_empty(WORKFLOW_URL_ENV) {
            self.workflow.base_url = url;
        }
        if let Some(secret) = non_empty(WORKFLOW_SECRET_ENV) {
            self.workflow.signing_secret = Some(secret);
        }
        if let Some(ref mut proxy) = self.http.proxy {
            if let Some(password) = non_empty(PROXY_PASSWORD_ENV) {
                proxy.password = Some(password);
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.provider.model.trim().is_empty() {
            return Err("provider.model must not be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(format!(
                "Invalid temperature: {}. Must be between 0.0 and 2.0",
                self.provider.temperature
            ));
        }

        if !self.workflow.base_url.starts_with("http://")
            && !self.workflow.base_url.starts_with("https://")
        {
            return Err(format!(
                "Invalid workflow base_url: {}. Must start with http:// or https://",
                self.workflow.base_url
            ));
        }

        if self.workflow.generation_workflow.trim().is_empty()
            || self.workflow.analytics_workflow.trim().is_empty()
        {
            return Err("workflow names must not be empty".to_string());
        }

        if let Some(ref proxy) = self.http.proxy {
            proxy.validate().map_err(|e| e.to_string())?;
        }

        if self.http.request_timeout_secs == 0 || self.http.request_timeout_secs > 600 {
            return Err("request_timeout_secs must be between 1 and 600".to_string());
        }

        Ok(())
    }
}
