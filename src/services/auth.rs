//! Caller Authentication
//!
//! Resolves an opaque session token to the owning user id. Every command
//! except the health check passes through here first.

use async_trait::async_trait;
use tracing::debug;

use crate::storage::database::Database;
use crate::utils::error::{AppError, AppResult};

#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The user id behind `token`, or `Unauthorized`
    async fn authenticate(&self, token: &str) -> AppResult<String>;
}

/// Session tokens stored in the `user_sessions` table
#[derive(Clone)]
pub struct SessionAuthenticator {
    db: Database,
}

impl SessionAuthenticator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Mint a new session token for `user_id`
    pub fn issue_session(&self, user_id: &str) -> AppResult<String> {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.db.insert_session(&token, user_id)?;
        debug!("Issued session for user {}", user_id);
        Ok(token)
    }

    /// Invalidate a session token
    pub fn revoke_session(&self, token: &str) -> AppResult<bool> {
        self.db.delete_session(token)
    }
}

#[async_trait]
impl Authenticator for SessionAuthenticator {
    async fn authenticate(&self, token: &str) -> AppResult<String> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthorized("Missing session token"));
        }
        self.db
            .session_user(token)?
            .ok_or_else(|| AppError::unauthorized("Unknown session token"))
    }
}
