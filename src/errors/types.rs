//! Error types for the fcm-composer library
//!
//! This module defines all error conditions that can occur while validating,
//! normalizing, and assembling push messages, organized by functional domain
//! with proper context and source chains.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used throughout the crate
pub type AppResult<T> = Result<T, AppError>;

/// A single structural violation on an incoming request field
///
/// Collected by the request validator; a request may carry several of these
/// at once (one per offending field or data-payload entry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Dotted path of the offending field, e.g. `data["badge"]` or `notification.title`
    pub field: String,
    /// Human-readable reason the field was rejected
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main application error type
///
/// Covers every failure mode of the compose pipeline and its ambient
/// surfaces (configuration, I/O, CLI), organized by functional domain.
#[derive(Error, Debug)]
pub enum AppError {
    // Request validation errors
    #[error("Request validation failed: {}", format_violations(.violations))]
    StructuralValidation {
        /// All offending fields, in rule-evaluation order
        violations: Vec<FieldViolation>,
    },

    // Target resolution errors
    #[error("Target resolution failed: {message}")]
    TargetResolution { message: String },

    /// Internal invariant violation: the builder was handed a target kind it
    /// does not know how to apply. Unreachable while targets are modeled as a
    /// closed enum; kept as a programming-defect signal rather than a
    /// user-facing validation error.
    #[error("Unsupported delivery target kind: {kind}")]
    UnsupportedTarget { kind: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration value for '{key}': {value}")]
    InvalidConfigValue { key: String, value: String },

    // I/O errors
    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Serialization errors
    #[error("JSON serialization error: {context}")]
    JsonSerialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("JSON deserialization error: {context}")]
    JsonDeserialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("TOML parsing error: {context}")]
    TomlParsing {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // CLI errors
    #[error("Invalid command argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    // Catch-all for errors that don't fit other categories
    #[error("{message}")]
    Other {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    /// Create a validation error from a list of collected field violations
    pub fn structural(violations: Vec<FieldViolation>) -> Self {
        Self::StructuralValidation { violations }
    }

    /// Create a validation error for a single offending field
    pub fn violation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::StructuralValidation {
            violations: vec![FieldViolation::new(field, reason)],
        }
    }

    /// Create a target-resolution error
    pub fn target_resolution(message: impl Into<String>) -> Self {
        Self::TargetResolution {
            message: message.into(),
        }
    }

    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new I/O error with source
    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The structural violations carried by this error, if any
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::StructuralValidation { violations } => violations,
            _ => &[],
        }
    }

    /// Get the error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::StructuralValidation { .. } => "validation",
            Self::TargetResolution { .. } | Self::UnsupportedTarget { .. } => "target",
            Self::Config { .. } | Self::ConfigNotFound { .. } | Self::InvalidConfigValue { .. } => {
                "config"
            }
            Self::Io { .. } => "io",
            Self::JsonSerialization { .. }
            | Self::JsonDeserialization { .. }
            | Self::TomlParsing { .. } => "serialization",
            Self::InvalidArgument { .. } => "cli",
            Self::Other { .. } => "internal",
        }
    }
}

// Conversions from common standard library and third-party error types
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let operation = match err.kind() {
            std::io::ErrorKind::NotFound => "file not found",
            std::io::ErrorKind::PermissionDenied => "permission denied",
            _ => "I/O operation",
        }
        .to_string();

        Self::Io {
            path: PathBuf::from("unknown"),
            operation,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            Self::JsonDeserialization {
                context: format!(
                    "invalid JSON at line {} column {}",
                    err.line(),
                    err.column()
                ),
                source: Some(Box::new(err)),
            }
        } else {
            Self::JsonSerialization {
                context: "JSON serialization error".to_string(),
                source: Some(Box::new(err)),
            }
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::TomlParsing {
            context: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
