//! Command handlers for the CLI
//!
//! Routes parsed commands into the library core: reading a request, running
//! it through the normalizer and message factory, and managing configuration.

use anyhow::Result;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::commands::{Commands, ConfigAction};
use super::context::CliContext;
use crate::config::ConfigManager;
use crate::errors::{AppError, AppResult};
use crate::message::MessageFactory;
use crate::request::{DefaultRequestValidator, RequestNormalizer, RequestValidator, SendRequest};
use crate::sender::{DryRunSender, MessageSender};

/// Handles execution of CLI commands
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    /// Execute the given command
    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Compose {
                input,
                fallback_token,
                pretty,
                dry_run,
            } => self.handle_compose(input.as_deref(), fallback_token.as_deref(), pretty, dry_run),
            Commands::Validate { input } => self.handle_validate(input.as_deref()),
            Commands::Init { global, force } => self.handle_init(global, force),
            Commands::Config { action } => self.handle_config(action),
        }
    }

    fn handle_compose(
        &self,
        input: Option<&Path>,
        fallback_token: Option<&str>,
        pretty: bool,
        dry_run: bool,
    ) -> Result<()> {
        let request = self.read_request(input)?;
        let config = self.context.config_manager.config();

        let normalizer = RequestNormalizer::with_validator(Box::new(
            DefaultRequestValidator::with_limits(config.validation_limits()),
        ));
        let normalized = normalizer.normalize(&request)?;

        // An explicit CLI/env override beats the configured fallback token
        let fallback = fallback_token.or_else(|| config.fallback_token());
        let message = MessageFactory::build(&normalized, fallback)?;

        let encoded = if pretty {
            serde_json::to_string_pretty(&message)?
        } else {
            serde_json::to_string(&message)?
        };
        println!("{encoded}");

        if dry_run {
            let receipt = DryRunSender::new().send(&message)?;
            println!("Dry run - message accepted: {}", receipt.message_id);
        }

        Ok(())
    }

    fn handle_validate(&self, input: Option<&Path>) -> Result<()> {
        let request = self.read_request(input)?;
        let validator = DefaultRequestValidator::with_limits(
            self.context.config_manager.config().validation_limits(),
        );

        validator.validate(&request)?;
        println!("Request is structurally valid");
        Ok(())
    }

    fn handle_init(&self, global: bool, force: bool) -> Result<()> {
        let project_path = if global {
            None
        } else {
            self.context
                .project_path
                .clone()
                .or_else(|| std::env::current_dir().ok())
        };

        let config_path = ConfigManager::get_config_path(project_path.clone())?;
        if config_path.exists() {
            if !force {
                println!(
                    "Configuration already initialized at: {}",
                    config_path.display()
                );
                println!("Use --force to overwrite");
                return Ok(());
            }
            fs::remove_file(&config_path)
                .map_err(|e| AppError::io_with_source(&config_path, "remove config file", e))?;
        }

        let manager = match project_path {
            Some(path) => ConfigManager::new_project_config(path)?,
            None => ConfigManager::new(None)?,
        };
        println!(
            "Configuration initialized successfully at: {}",
            manager.config_path().display()
        );
        Ok(())
    }

    fn handle_config(&self, action: ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Show => {
                let config = self.context.config_manager.config();
                println!("{}", toml::to_string_pretty(config).map_err(|e| {
                    AppError::config_with_source("Failed to serialize config", e)
                })?);
                Ok(())
            }
            ConfigAction::Get { key } => {
                let value = self.get_config_value(&key)?;
                println!("{value}");
                Ok(())
            }
            ConfigAction::Set { key, value } => {
                // Re-open the configuration mutably; the shared context handle is
                // read-only. A named project path always gets a project-level file,
                // never a write-through to an existing global config.
                let mut manager = match self.context.project_path.clone() {
                    Some(path) => ConfigManager::new_project_config(path)?,
                    None => ConfigManager::new(None)?,
                };
                Self::set_config_value(&mut manager, &key, &value)?;
                manager.save()?;
                println!("Configuration updated: {key} = {value}");
                Ok(())
            }
        }
    }

    fn get_config_value(&self, key: &str) -> AppResult<String> {
        let config = self.context.config_manager.config();
        let limits = config.validation_limits();

        let value = match key {
            "fallback.token" => config.fallback_token().unwrap_or("").to_string(),
            "logging.log_level" => config.logging.log_level.clone(),
            "limits.max_title_chars" => limits.max_title_chars.to_string(),
            "limits.max_body_chars" => limits.max_body_chars.to_string(),
            "limits.max_token_chars" => limits.max_token_chars.to_string(),
            "limits.max_topic_chars" => limits.max_topic_chars.to_string(),
            "limits.max_condition_chars" => limits.max_condition_chars.to_string(),
            _ => {
                return Err(AppError::InvalidArgument {
                    argument: key.to_string(),
                    reason: "unknown configuration key".to_string(),
                })
            }
        };
        Ok(value)
    }

    fn set_config_value(manager: &mut ConfigManager, key: &str, value: &str) -> AppResult<()> {
        let parse_limit = |value: &str| -> AppResult<usize> {
            value.parse().map_err(|_| AppError::InvalidConfigValue {
                key: key.to_string(),
                value: value.to_string(),
            })
        };

        let config = manager.config_mut();
        match key {
            "fallback.token" => {
                config.fallback.token = (!value.trim().is_empty()).then(|| value.to_string());
            }
            "logging.log_level" => config.logging.log_level = value.to_string(),
            "limits.max_title_chars" => config.limits.max_title_chars = Some(parse_limit(value)?),
            "limits.max_body_chars" => config.limits.max_body_chars = Some(parse_limit(value)?),
            "limits.max_token_chars" => config.limits.max_token_chars = Some(parse_limit(value)?),
            "limits.max_topic_chars" => config.limits.max_topic_chars = Some(parse_limit(value)?),
            "limits.max_condition_chars" => {
                config.limits.max_condition_chars = Some(parse_limit(value)?)
            }
            _ => {
                return Err(AppError::InvalidArgument {
                    argument: key.to_string(),
                    reason: "unknown configuration key".to_string(),
                })
            }
        }
        Ok(())
    }

    /// Read a request from the given file, or from stdin when no file is named
    fn read_request(&self, input: Option<&Path>) -> AppResult<SendRequest> {
        let content = match input {
            Some(path) => fs::read_to_string(path)
                .map_err(|e| AppError::io_with_source(path, "read request file", e))?,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| {
                        AppError::io_with_source(PathBuf::from("stdin"), "read request", e)
                    })?;
                buffer
            }
        };

        let request = serde_json::from_str(&content)?;
        Ok(request)
    }
}
