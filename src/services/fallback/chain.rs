//! Generation Fallback Chain
//!
//! Tries an ordered list of generation strategies until one succeeds.
//! Every failure, whatever its cause, moves on to the next strategy; the
//! failure classification is recorded for logging only.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::generation::GenerationRequest;

/// Reasons a strategy attempt can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Backend is not available/configured
    Unavailable,
    /// Request timed out
    Timeout,
    /// Backend returned an error
    Error,
    /// Rate limited
    RateLimited,
    /// Network/connection error
    NetworkError,
    /// Invalid response
    InvalidResponse,
    /// Backend answered without usable text
    EmptyResult,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Unavailable => write!(f, "unavailable"),
            FailureReason::Timeout => write!(f, "timeout"),
            FailureReason::Error => write!(f, "error"),
            FailureReason::RateLimited => write!(f, "rate_limited"),
            FailureReason::NetworkError => write!(f, "network_error"),
            FailureReason::InvalidResponse => write!(f, "invalid_response"),
            FailureReason::EmptyResult => write!(f, "empty_result"),
        }
    }
}

impl FailureReason {
    /// Classify an error message into a failure reason
    pub fn from_error_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("timeout") || msg_lower.contains("timed out") {
            FailureReason::Timeout
        } else if msg_lower.contains("rate limit")
            || msg_lower.contains("too many requests")
            || msg_lower.contains("429")
        {
            FailureReason::RateLimited
        } else if msg_lower.contains("unavailable")
            || msg_lower.contains("not found")
            || msg_lower.contains("not configured")
        {
            FailureReason::Unavailable
        } else if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("socket")
        {
            FailureReason::NetworkError
        } else if msg_lower.contains("empty") {
            FailureReason::EmptyResult
        } else if msg_lower.contains("invalid")
            || msg_lower.contains("parse")
            || msg_lower.contains("deserialize")
        {
            FailureReason::InvalidResponse
        } else {
            FailureReason::Error
        }
    }
}

/// A failed strategy attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({reason})")]
pub struct StrategyError {
    pub reason: FailureReason,
    pub message: String,
}

impl StrategyError {
    pub fn new(reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }

    /// Build from any error, classifying by its message
    pub fn classify(err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        Self {
            reason: FailureReason::from_error_message(&message),
            message,
        }
    }

    /// The backend answered but produced no text
    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(FailureReason::EmptyResult, message)
    }
}

/// One way of producing generated text
#[async_trait]
pub trait GenerationStrategy: Send + Sync {
    /// Name used in logs and the execution log
    fn name(&self) -> &str;

    /// Make a single attempt; non-empty text on success
    async fn attempt(&self, request: &GenerationRequest) -> Result<String, StrategyError>;
}

/// Errors from fallback execution
#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("All {} strategies in fallback chain failed", .0.attempts.len())]
    AllStrategiesFailed(FallbackExecutionLog),

    #[error("No fallback strategies configured")]
    NoStrategies,
}

/// Result type for fallback operations
pub type FallbackResult<T> = Result<T, FallbackError>;

/// Record of a single fallback attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackAttempt {
    /// Strategy that was tried
    pub strategy: String,
    /// Whether this attempt succeeded
    pub success: bool,
    /// Failure reason if failed
    pub failure_reason: Option<FailureReason>,
    /// Error message if failed
    pub error_message: Option<String>,
    /// Duration of the attempt in milliseconds
    pub duration_ms: u64,
    /// Timestamp when attempt started
    pub started_at: String,
}

impl FallbackAttempt {
    /// Create a successful attempt record
    pub fn success(strategy: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            strategy: strategy.into(),
            success: true,
            failure_reason: None,
            error_message: None,
            duration_ms,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a failed attempt record
    pub fn failure(strategy: impl Into<String>, err: &StrategyError, duration_ms: u64) -> Self {
        Self {
            strategy: strategy.into(),
            success: false,
            failure_reason: Some(err.reason),
            error_message: Some(err.message.clone()),
            duration_ms,
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Log of all fallback execution attempts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FallbackExecutionLog {
    /// All attempts made
    pub attempts: Vec<FallbackAttempt>,
    /// Total duration in milliseconds
    pub total_duration_ms: u64,
    /// Strategy that succeeded (if any)
    pub successful_strategy: Option<String>,
    /// Whether execution ultimately succeeded
    pub overall_success: bool,
}

impl FallbackExecutionLog {
    /// Create a new log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attempt to the log
    pub fn add_attempt(&mut self, attempt: FallbackAttempt) {
        self.total_duration_ms += attempt.duration_ms;
        if attempt.success {
            self.successful_strategy = Some(attempt.strategy.clone());
            self.overall_success = true;
        }
        self.attempts.push(attempt);
    }

    /// Get the number of failed attempts before success
    pub fn failed_attempts_count(&self) -> usize {
        self.attempts.iter().filter(|a| !a.success).count()
    }
}

/// Ordered list of generation strategies, each tried at most once
#[derive(Clone, Default)]
pub struct FallbackChain {
    strategies: Vec<Arc<dyn GenerationStrategy>>,
}

impl FallbackChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy to the end of the chain
    pub fn with_strategy(mut self, strategy: Arc<dyn GenerationStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Strategy names in the order they are tried
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Execute with fallback support.
    ///
    /// Tries each strategy in order with no delay between attempts and
    /// returns the first success together with the attempt log.
    pub async fn execute(
        &self,
        request: &GenerationRequest,
    ) -> FallbackResult<(String, FallbackExecutionLog)> {
        if self.strategies.is_empty() {
            return Err(FallbackError::NoStrategies);
        }

        let mut log = FallbackExecutionLog::new();

        for strategy in &self.strategies {
            let name = strategy.name();
            info!("Attempting generation with strategy: {}", name);
            let attempt_start = Instant::now();

            match strategy.attempt(request).await {
                Ok(text) => {
                    let duration_ms = attempt_start.elapsed().as_millis() as u64;
                    info!("Strategy {} succeeded in {}ms", name, duration_ms);
                    log.add_attempt(FallbackAttempt::success(name, duration_ms));
                    return Ok((text, log));
                }
                Err(e) => {
                    let duration_ms = attempt_start.elapsed().as_millis() as u64;
                    warn!(
                        "Strategy {} failed: {} (reason: {})",
                        name, e.message, e.reason
                    );
                    log.add_attempt(FallbackAttempt::failure(name, &e, duration_ms));
                }
            }
        }

        error!(
            "All strategies in fallback chain failed after {} attempts",
            log.attempts.len()
        );
        Err(FallbackError::AllStrategiesFailed(log))
    }
}
