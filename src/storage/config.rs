//! JSON Configuration Management
//!
//! Handles reading and writing the application configuration file.
//! Secrets never touch the file; they are layered in from the environment
//! after loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_parent_dir};

/// Configuration service for managing app settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
}

impl ConfigService {
    /// Load the config at the default location, creating it with defaults if missing
    pub fn new() -> AppResult<Self> {
        Self::open(&config_path()?)
    }

    /// Load the config at `path`, creating it with defaults if missing
    pub fn open(path: &Path) -> AppResult<Self> {
        ensure_parent_dir(path)?;

        let config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            let default_config = AppConfig::default();
            Self::save_to_file(path, &default_config)?;
            default_config
        };

        Ok(Self {
            config_path: path.to_path_buf(),
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::config)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// The configuration with environment secrets and overrides applied
    pub fn resolved_config(&self) -> AppConfig {
        let mut config = self.config.clone();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Update the configuration with a partial update
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut next = self.config.clone();
        next.apply_update(update);
        Self::save_to_file(&self.config_path, &next)?;
        self.config = next;
        Ok(self.config.clone())
    }
}
