//! Provider-ready message types
//!
//! The output side of the compose pipeline: a [`Message`] serializes to the
//! FCM v1 wire shape, with absent blocks skipped entirely and the delivery
//! target flattened to exactly one of `token` / `topic` / `condition`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The resolved delivery target
///
/// Modeled as a tagged variant with exactly one active case so that the
/// precedence rule lives in one place (the factory's resolver) and consumers
/// never juggle three nullable fields. Serializes externally tagged, which
/// flattens to a single `token` / `topic` / `condition` key on the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Token(String),
    Topic(String),
    Condition(String),
}

impl Target {
    /// The wire field name this target serializes under
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Token(_) => "token",
            Self::Topic(_) => "topic",
            Self::Condition(_) => "condition",
        }
    }

    /// The target value itself
    pub fn value(&self) -> &str {
        match self {
            Self::Token(value) | Self::Topic(value) | Self::Condition(value) => value,
        }
    }
}

/// A fully assembled push message, ready to hand to a sender
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub apns: Option<ApnsConfig>,

    #[serde(flatten)]
    pub target: Target,

    pub validate_only: bool,
}

/// Notification display block
///
/// Title and body are passed through verbatim (possibly empty); the block as a
/// whole is only present when at least one field is non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Android-specific configuration block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<String>,
}

/// Apple-push configuration block
///
/// `headers` may be present and empty (the caller supplied a headers object
/// that yielded no non-blank entries), while `payload` is only ever present
/// with at least one aps key. The two follow different emission rules and are
/// deliberately not unified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApnsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ApnsPayload>,
}

/// APNs payload wrapper around the aps dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApnsPayload {
    pub aps: BTreeMap<String, serde_json::Value>,
}
