//! Generation Gateway
//!
//! Free-form and per-section text generation. Tries the workflow backend
//! first and falls back to the AI provider directly.

use std::sync::Arc;

use async_trait::async_trait;
use pitch_writer_core::{PitchField, PitchFields};
use pitch_writer_llm::{LlmError, TextProvider};
use serde_json::{json, Map, Value};
use tracing::{debug, error};

use crate::models::generation::GenerationRequest;
use crate::services::fallback::{
    FailureReason, FallbackChain, FallbackError, GenerationStrategy, StrategyError,
};
use crate::services::prompt::{context_json, field_prompt, generation_prompt};
use crate::services::workflow::WorkflowBackend;
use crate::utils::error::{AppError, AppResult};

/// Tier one: a named workflow on the workflow backend
pub struct WorkflowStrategy {
    backend: Arc<dyn WorkflowBackend>,
    workflow: String,
}

impl WorkflowStrategy {
    pub fn new(backend: Arc<dyn WorkflowBackend>, workflow: impl Into<String>) -> Self {
        Self {
            backend,
            workflow: workflow.into(),
        }
    }

    fn payload(request: &GenerationRequest) -> Value {
        let mut payload = Map::new();
        payload.insert("prompt".to_string(), json!(request.prompt));
        if let Some(ref ctx) = request.context {
            payload.insert("context".to_string(), context_json(ctx));
        }
        payload.insert(
            "timestamp".to_string(),
            json!(chrono::Utc::now().to_rfc3339()),
        );
        Value::Object(payload)
    }
}

#[async_trait]
impl GenerationStrategy for WorkflowStrategy {
    fn name(&self) -> &str {
        "workflow"
    }

    async fn attempt(&self, request: &GenerationRequest) -> Result<String, StrategyError> {
        let response = self
            .backend
            .invoke(&self.workflow, Self::payload(request))
            .await;

        if !response.success {
            let message = response
                .error
                .unwrap_or_else(|| "workflow reported failure".to_string());
            return Err(StrategyError::classify(message));
        }

        response
            .content()
            .map(str::to_string)
            .ok_or_else(|| StrategyError::empty("workflow returned empty content"))
    }
}

/// Tier two: the AI provider, with the pitch context folded into the prompt
pub struct ProviderStrategy {
    provider: Arc<dyn TextProvider>,
}

impl ProviderStrategy {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl GenerationStrategy for ProviderStrategy {
    fn name(&self) -> &str {
        "provider"
    }

    async fn attempt(&self, request: &GenerationRequest) -> Result<String, StrategyError> {
        let prompt = generation_prompt(&request.prompt, request.context.as_ref());
        let text = self
            .provider
            .complete(&prompt)
            .await
            .map_err(provider_failure)?;

        if text.trim().is_empty() {
            return Err(StrategyError::empty("provider returned empty text"));
        }
        Ok(text)
    }
}

fn provider_failure(err: LlmError) -> StrategyError {
    let reason = match &err {
        LlmError::RateLimited { .. } => FailureReason::RateLimited,
        LlmError::AuthenticationFailed { .. } | LlmError::ModelNotFound { .. } => {
            FailureReason::Unavailable
        }
        LlmError::EmptyResponse => FailureReason::EmptyResult,
        LlmError::ParseError { .. } => FailureReason::InvalidResponse,
        LlmError::NetworkError { message } => FailureReason::from_error_message(message),
        _ => FailureReason::Error,
    };
    StrategyError::new(reason, err.to_string())
}

/// Generation entry point used by commands
pub struct GenerationGateway {
    chain: FallbackChain,
}

impl GenerationGateway {
    /// Workflow first, then the provider
    pub fn new(
        workflow: Arc<dyn WorkflowBackend>,
        workflow_name: impl Into<String>,
        provider: Arc<dyn TextProvider>,
    ) -> Self {
        let chain = FallbackChain::new()
            .with_strategy(Arc::new(WorkflowStrategy::new(workflow, workflow_name)))
            .with_strategy(Arc::new(ProviderStrategy::new(provider)));
        debug!("Generation order: {}", chain.strategy_names().join(" -> "));
        Self { chain }
    }

    /// Generate text for a free-form prompt
    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
        if request.prompt.trim().is_empty() {
            return Err(AppError::validation("Prompt is required"));
        }

        match self.chain.execute(request).await {
            Ok((text, log)) => {
                debug!(
                    "Generated {} chars via {:?} after {} failed attempts",
                    text.len(),
                    log.successful_strategy,
                    log.failed_attempts_count()
                );
                Ok(text)
            }
            Err(FallbackError::AllStrategiesFailed(log)) => {
                for attempt in &log.attempts {
                    error!(
                        "Generation via {} failed ({:?}): {}",
                        attempt.strategy,
                        attempt.failure_reason,
                        attempt.error_message.as_deref().unwrap_or("")
                    );
                }
                Err(AppError::upstream("All generation backends failed"))
            }
            Err(e) => Err(AppError::internal(e.to_string())),
        }
    }

    /// Draft one pitch section using the rest of the pitch as context
    pub async fn generate_field(&self, field: PitchField, pitch: &PitchFields) -> AppResult<String> {
        let request = GenerationRequest::new(field_prompt(field, pitch)).with_context(pitch.clone());
        self.generate(&request).await
    }
}
