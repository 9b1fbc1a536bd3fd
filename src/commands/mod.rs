//! Commands
//!
//! Entry points invoked by the caller bridge. Each command authenticates
//! the caller, runs one service operation, and wraps the outcome in a
//! [`CommandResponse`]. Error details are logged here and never returned.

pub mod ai;
pub mod analytics;
pub mod bridge;
pub mod dispatch;
pub mod health;
pub mod pitches;

pub use bridge::serve;
pub use dispatch::{dispatch, CommandReply, CommandRequest};

use tracing::{debug, error, warn};

use crate::models::response::CommandResponse;
use crate::utils::error::{AppError, AppResult};

/// Log a failed operation and map it to its caller-visible form
pub(crate) fn respond<T>(operation: &str, result: AppResult<T>, generic: &str) -> CommandResponse<T> {
    match result {
        Ok(data) => CommandResponse::ok(data),
        Err(e) => {
            match &e {
                AppError::Unauthorized(_) => warn!("{} rejected: {}", operation, e),
                AppError::NotFound(_) | AppError::Validation(_) => {
                    debug!("{} failed: {}", operation, e)
                }
                _ => error!("{} failed: {}", operation, e),
            }
            CommandResponse::from_error(&e, generic)
        }
    }
}
