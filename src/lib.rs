//! Pitch Writer - Rust Backend Library
//!
//! Backend for a business pitch editor. It includes:
//! - Command handlers and a JSON dispatcher for the caller bridge
//! - AI generation with workflow-to-provider fallback, enhancement and summaries
//! - Owner-scoped pitch storage with best-effort analytics and notifications
//! - Storage layer (SQLite, config) and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use commands::{dispatch, serve, CommandReply, CommandRequest};
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use state::{AppState, Collaborators};
pub use utils::error::{AppError, AppResult};
