//! Centralized error handling module
//!
//! Provides the structured, typed error surface for the compose pipeline and
//! its ambient layers (configuration, I/O, CLI).

pub mod types;

pub use types::{AppError, AppResult, FieldViolation};

/// Convert from anyhow::Error for interop at the CLI boundary
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Other {
            message: err.to_string(),
            source: None,
        }
    }
}
