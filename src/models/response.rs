//! Response Types
//!
//! Standard response envelope for every command.

use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// Coarse failure category exposed to callers.
///
/// Detailed error text stays in the logs; callers only learn which of these
/// three situations they are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    Failure,
}

/// Generic command response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl<T> CommandResponse<T> {
    /// Create a successful response with data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            error_kind: None,
        }
    }

    /// Create a generic failure response with message
    pub fn err(message: impl Into<String>) -> Self {
        Self::failed(ErrorKind::Failure, message)
    }

    /// Create a failure response of a given kind
    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            error_kind: Some(kind),
        }
    }

    /// Map an application error to its caller-visible form.
    ///
    /// `generic` is the message used for anything that is not an auth or
    /// not-found failure.
    pub fn from_error(err: &AppError, generic: &str) -> Self {
        match err {
            AppError::Unauthorized(_) => Self::failed(ErrorKind::Unauthorized, "Unauthorized"),
            AppError::NotFound(_) => Self::failed(ErrorKind::NotFound, "Pitch not found"),
            _ => Self::failed(ErrorKind::Failure, generic),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub service: String,
    pub database: bool,
    pub analytics: bool,
    pub config: bool,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            service: "pitch-writer".to_string(),
            database: false,
            analytics: false,
            config: false,
        }
    }
}
