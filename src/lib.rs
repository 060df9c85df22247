//! FCM Composer Library
//!
//! Transforms client-facing push-notification requests into fully-formed
//! FCM-style messages: structural validation of the wire payload, merging of
//! flat and nested content fields, delivery-target precedence resolution
//! (with a configured fallback token), and assembly of Android / APNs
//! configuration blocks.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod message;
pub mod request;
pub mod sender;

// Re-export commonly used types for convenience
pub use config::{Config, ConfigManager};
pub use domain::PushRequest;
pub use errors::{AppError, AppResult, FieldViolation};
pub use message::{Message, MessageFactory, Target};
pub use request::{RequestNormalizer, SendRequest};
pub use sender::{DeliveryReceipt, DryRunSender, MessageSender};
