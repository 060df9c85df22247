//! Wire-level request types
//!
//! These structs mirror the JSON body a caller submits. Content may arrive as
//! flat top-level fields, as a nested `notification` object, or both; the
//! normalizer merges them into a single domain representation. All fields are
//! optional at this level so that shape problems surface as validation errors
//! rather than deserialization failures.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An incoming push-notification request as received on the wire
///
/// `data` values are `Option<String>` on purpose: JSON `null` entries must be
/// observable so the validator can reject them instead of silently dropping
/// them during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendRequest {
    /// Flat notification title, overridden by `notification.title` when both are set
    pub title: Option<String>,
    /// Flat notification body, overridden by `notification.body` when both are set
    pub body: Option<String>,
    /// Flat image URL, overridden by `notification.image` when both are set
    pub image_url: Option<String>,

    /// Explicit device registration token
    pub token: Option<String>,
    /// Topic name, without the `/topics/` prefix
    pub topic: Option<String>,
    /// Condition expression over topic names
    pub condition: Option<String>,

    /// Custom key/value payload delivered alongside (or instead of) the notification
    pub data: Option<HashMap<String, Option<String>>>,

    /// Ask the provider to validate the message without delivering it
    pub validate_only: bool,

    /// Nested notification content, taking per-field precedence over the flat fields
    pub notification: Option<NotificationPayload>,
    /// Android-specific delivery options
    pub android: Option<AndroidOptions>,
    /// Apple-push-specific delivery options
    pub apns: Option<ApnsOptions>,
}

/// Nested notification content block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPayload {
    pub title: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
}

/// Android delivery options as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AndroidOptions {
    /// Free-form priority string, conventionally "normal" or "high"
    pub priority: Option<String>,
    /// Time-to-live duration string, e.g. "3600s", stored verbatim
    pub ttl: Option<String>,
}

/// Apple-push delivery options as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApnsOptions {
    pub headers: Option<ApnsHeaderOptions>,
    pub payload: Option<ApnsPayloadOptions>,
}

/// APNs header values; blank strings are treated as absent downstream
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApnsHeaderOptions {
    pub apns_priority: Option<String>,
    pub apns_expiration: Option<String>,
}

/// APNs payload wrapper carrying the aps dictionary
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApnsPayloadOptions {
    pub aps: Option<ApsOptions>,
}

/// The aps dictionary fields this core understands
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApsOptions {
    /// Silent-push flag, conventionally 0 or 1
    pub content_available: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_request() {
        let request: SendRequest = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(request.token.as_deref(), Some("abc"));
        assert!(request.notification.is_none());
        assert!(!request.validate_only);
    }

    #[test]
    fn test_deserialize_full_request() {
        let request: SendRequest = serde_json::from_str(
            r#"{
                "title": "flat title",
                "imageUrl": "https://example.com/a.png",
                "topic": "news",
                "data": {"k": "v"},
                "validateOnly": true,
                "notification": {"title": "nested title", "image": "https://example.com/b.png"},
                "android": {"priority": "high", "ttl": "3600s"},
                "apns": {
                    "headers": {"apnsPriority": "10", "apnsExpiration": "0"},
                    "payload": {"aps": {"contentAvailable": 1}}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(request.title.as_deref(), Some("flat title"));
        assert_eq!(
            request.notification.as_ref().unwrap().title.as_deref(),
            Some("nested title")
        );
        assert!(request.validate_only);
        assert_eq!(
            request.android.as_ref().unwrap().priority.as_deref(),
            Some("high")
        );
        let apns = request.apns.as_ref().unwrap();
        assert_eq!(
            apns.headers.as_ref().unwrap().apns_priority.as_deref(),
            Some("10")
        );
        assert_eq!(
            apns.payload
                .as_ref()
                .unwrap()
                .aps
                .as_ref()
                .unwrap()
                .content_available,
            Some(1)
        );
    }

    #[test]
    fn test_null_data_value_is_observable() {
        let request: SendRequest =
            serde_json::from_str(r#"{"token": "abc", "data": {"k": null}}"#).unwrap();
        let data = request.data.unwrap();
        assert_eq!(data.get("k"), Some(&None));
    }
}
