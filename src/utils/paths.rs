//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! Everything lives under ~/.pitch-writer/.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the application directory (~/.pitch-writer/)
pub fn pitch_writer_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".pitch-writer"))
}

/// Get the config file path (~/.pitch-writer/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(pitch_writer_dir()?.join("config.json"))
}

/// Get the primary database path (~/.pitch-writer/pitches.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(pitch_writer_dir()?.join("pitches.db"))
}

/// Get the analytics database path (~/.pitch-writer/analytics.db)
pub fn analytics_database_path() -> AppResult<PathBuf> {
    Ok(pitch_writer_dir()?.join("analytics.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Ensure the parent directory of a file exists
pub fn ensure_parent_dir(file: &Path) -> AppResult<()> {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}
