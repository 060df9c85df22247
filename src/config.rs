//! Configuration management
//!
//! Handles loading, saving, and managing configuration for both project-level
//! and global setups. Project configurations take precedence over global ones.
//!
//! # Configuration Hierarchy
//!
//! 1. **Project-level**: `.fcm-composer/config.toml` in the project root
//! 2. **Global**: `~/.fcm-composer/config.toml` in the user home directory
//!
//! The configuration carries the optional fallback device token (consulted by
//! the message factory when a request names no target of its own), optional
//! validation limit overrides, and the log level.

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::request::ValidationLimits;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fallback: FallbackConfig,
    pub limits: LimitsConfig,
    pub logging: LoggingConfig,
}

/// Fallback delivery settings
///
/// The token here is read-only process-wide configuration: initialized once,
/// never mutated at runtime, and consulted once per build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// Device token used when a request carries no token/topic/condition
    pub token: Option<String>,
}

/// Optional overrides for the validator's field length limits
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_title_chars: Option<usize>,
    pub max_body_chars: Option<usize>,
    pub max_token_chars: Option<usize>,
    pub max_topic_chars: Option<usize>,
    pub max_condition_chars: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// The fallback token, with blank values treated as absent
    pub fn fallback_token(&self) -> Option<&str> {
        self.fallback
            .token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
    }

    /// Effective validation limits: defaults overlaid with any configured overrides
    pub fn validation_limits(&self) -> ValidationLimits {
        let defaults = ValidationLimits::default();
        ValidationLimits {
            max_title_chars: self.limits.max_title_chars.unwrap_or(defaults.max_title_chars),
            max_body_chars: self.limits.max_body_chars.unwrap_or(defaults.max_body_chars),
            max_token_chars: self.limits.max_token_chars.unwrap_or(defaults.max_token_chars),
            max_topic_chars: self.limits.max_topic_chars.unwrap_or(defaults.max_topic_chars),
            max_condition_chars: self
                .limits
                .max_condition_chars
                .unwrap_or(defaults.max_condition_chars),
        }
    }
}

/// Configuration manager
///
/// Loads configuration from the appropriate location based on the project
/// path, creating a default file when none exists yet.
pub struct ConfigManager {
    config_path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Create a new ConfigManager instance
    ///
    /// If a project path is provided, looks for project-level configuration
    /// first, then falls back to an existing global configuration before
    /// creating a fresh project config.
    pub fn new(project_path: Option<PathBuf>) -> AppResult<Self> {
        if let Some(ref path) = project_path {
            let project_config_path = Self::get_config_path(Some(path.clone()))?;

            if project_config_path.exists() {
                let config = Self::load_or_create(&project_config_path)?;
                return Ok(ConfigManager {
                    config_path: project_config_path,
                    config,
                });
            }

            let global_config_path = Self::get_config_path(None)?;
            if global_config_path.exists() {
                let config = Self::load_or_create(&global_config_path)?;
                return Ok(ConfigManager {
                    config_path: global_config_path,
                    config,
                });
            }

            let config = Self::load_or_create(&project_config_path)?;
            Ok(ConfigManager {
                config_path: project_config_path,
                config,
            })
        } else {
            let config_path = Self::get_config_path(None)?;
            let config = Self::load_or_create(&config_path)?;
            Ok(ConfigManager {
                config_path,
                config,
            })
        }
    }

    /// Create a manager that always uses project-level configuration,
    /// regardless of whether a global config exists
    pub fn new_project_config(project_path: PathBuf) -> AppResult<Self> {
        let config_path = Self::get_config_path(Some(project_path))?;
        let config = Self::load_or_create(&config_path)?;

        Ok(ConfigManager {
            config_path,
            config,
        })
    }

    pub fn get_config_path(project_path: Option<PathBuf>) -> AppResult<PathBuf> {
        let base_path = if let Some(path) = project_path {
            path.join(".fcm-composer")
        } else {
            let base_dirs = BaseDirs::new()
                .ok_or_else(|| AppError::config("Failed to get base directories"))?;
            base_dirs.home_dir().join(".fcm-composer")
        };

        fs::create_dir_all(&base_path)
            .map_err(|e| AppError::io_with_source(&base_path, "create config directory", e))?;

        Ok(base_path.join("config.toml"))
    }

    fn load_or_create(path: &Path) -> AppResult<Config> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| AppError::io_with_source(path, "read config file", e))?;
            toml::from_str(&content)
                .map_err(|e| AppError::config_with_source("Failed to parse config file", e))
        } else {
            let config = Config::default();
            let content = toml::to_string_pretty(&config)
                .map_err(|e| AppError::config_with_source("Failed to serialize default config", e))?;
            fs::write(path, content)
                .map_err(|e| AppError::io_with_source(path, "write default config", e))?;
            Ok(config)
        }
    }

    /// Persist the current configuration back to the file it was loaded from
    pub fn save(&self) -> AppResult<()> {
        let content = toml::to_string_pretty(&self.config)
            .map_err(|e| AppError::config_with_source("Failed to serialize config", e))?;
        fs::write(&self.config_path, content)
            .map_err(|e| AppError::io_with_source(&self.config_path, "write config file", e))?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
