//! Message assembly
//!
//! Pure transformation from a normalized [`PushRequest`] plus an optional
//! configured fallback token into a provider-ready [`Message`]. Holds the
//! only branching logic in the pipeline: block emission predicates, APNs
//! defaulting rules, and delivery-target precedence. Performs no I/O and is
//! deterministic for identical inputs.

use std::collections::BTreeMap;

use tracing::debug;

use super::types::{AndroidConfig, ApnsConfig, ApnsPayload, Message, Notification, Target};
use crate::domain::{non_blank, AndroidParams, ApnsParams, PushRequest};
use crate::errors::{AppError, AppResult};

/// APNs header key for delivery priority
const APNS_PRIORITY_HEADER: &str = "apns-priority";
/// APNs header key for message expiration
const APNS_EXPIRATION_HEADER: &str = "apns-expiration";
/// aps dictionary key for the silent-push flag
const APS_CONTENT_AVAILABLE: &str = "content-available";

/// Stateless builder turning normalized requests into provider messages
pub struct MessageFactory;

impl MessageFactory {
    /// Build a provider message from a normalized request
    ///
    /// `fallback_token` is the server-configured default device token; it is
    /// consulted only when the request carries no usable target of its own.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::TargetResolution`] when neither the request nor
    /// the configuration yields a deliverable target.
    pub fn build(request: &PushRequest, fallback_token: Option<&str>) -> AppResult<Message> {
        let target = Self::resolve_target(request, fallback_token)?;
        debug!(kind = target.kind(), "resolved delivery target");

        let notification = (!request.notification.is_blank()).then(|| Notification {
            title: request.notification.title.clone(),
            body: request.notification.body.clone(),
            image: non_blank(request.notification.image_url.as_deref()).map(str::to_string),
        });

        let data = request
            .data
            .as_ref()
            .filter(|entries| !entries.is_empty())
            .cloned();

        Ok(Message {
            notification,
            data,
            android: request.android.as_ref().map(Self::android_config),
            apns: request.apns.as_ref().map(Self::apns_config),
            target,
            validate_only: request.validate_only,
        })
    }

    /// Resolve the delivery target, first match wins:
    /// token, then topic, then condition, then the configured fallback token.
    fn resolve_target(request: &PushRequest, fallback_token: Option<&str>) -> AppResult<Target> {
        if let Some(token) = non_blank(request.token.as_deref()) {
            return Ok(Target::Token(token.to_string()));
        }
        if let Some(topic) = non_blank(request.topic.as_deref()) {
            return Ok(Target::Topic(topic.to_string()));
        }
        if let Some(condition) = non_blank(request.condition.as_deref()) {
            return Ok(Target::Condition(condition.to_string()));
        }
        if let Some(fallback) = non_blank(fallback_token) {
            return Ok(Target::Token(fallback.to_string()));
        }

        Err(AppError::target_resolution(
            "no deliverable target: the request carries no token, topic, or condition, \
             and no fallback token is configured",
        ))
    }

    /// Assemble the Android block: priority is upper-cased only when
    /// non-blank, never defaulted; ttl is copied verbatim when non-blank.
    fn android_config(params: &AndroidParams) -> AndroidConfig {
        AndroidConfig {
            priority: non_blank(params.priority.as_deref()).map(|p| p.to_uppercase()),
            ttl: non_blank(params.ttl.as_deref()).map(str::to_string),
        }
    }

    /// Assemble the APNs block
    ///
    /// Headers and payload follow different emission rules: the headers map is
    /// emitted (possibly empty) whenever a headers object was supplied, while
    /// the payload is emitted only when the aps dictionary keeps at least one
    /// key after defaulting.
    fn apns_config(params: &ApnsParams) -> ApnsConfig {
        let headers = params.headers.as_ref().map(|supplied| {
            let mut headers = BTreeMap::new();
            if let Some(priority) = non_blank(supplied.priority.as_deref()) {
                headers.insert(APNS_PRIORITY_HEADER.to_string(), priority.to_string());
            }
            if let Some(expiration) = non_blank(supplied.expiration.as_deref()) {
                headers.insert(APNS_EXPIRATION_HEADER.to_string(), expiration.to_string());
            }
            headers
        });

        let payload = params.aps.as_ref().and_then(|aps| {
            let mut entries = BTreeMap::new();
            if let Some(flag) = aps.content_available {
                entries.insert(
                    APS_CONTENT_AVAILABLE.to_string(),
                    serde_json::Value::from(flag),
                );
            }
            (!entries.is_empty()).then_some(ApnsPayload { aps: entries })
        });

        ApnsConfig { headers, payload }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ApnsHeaderParams, ApsParams, NotificationContent};

    fn empty_request() -> PushRequest {
        PushRequest {
            notification: NotificationContent::default(),
            data: None,
            android: None,
            apns: None,
            token: None,
            topic: None,
            condition: None,
            validate_only: false,
        }
    }

    #[test]
    fn test_token_wins_over_topic_and_condition() {
        let request = PushRequest {
            token: Some("T".to_string()),
            topic: Some("G".to_string()),
            condition: Some("C".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, Some("F")).unwrap();
        assert_eq!(message.target, Target::Token("T".to_string()));
    }

    #[test]
    fn test_topic_wins_over_condition() {
        let request = PushRequest {
            topic: Some("G".to_string()),
            condition: Some("C".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        assert_eq!(message.target, Target::Topic("G".to_string()));
    }

    #[test]
    fn test_condition_used_when_alone() {
        let request = PushRequest {
            condition: Some("'a' in topics".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        assert_eq!(message.target, Target::Condition("'a' in topics".to_string()));
    }

    #[test]
    fn test_fallback_token_used_last() {
        let message = MessageFactory::build(&empty_request(), Some("F")).unwrap();
        assert_eq!(message.target, Target::Token("F".to_string()));
    }

    #[test]
    fn test_blank_targets_are_skipped() {
        let request = PushRequest {
            token: Some("   ".to_string()),
            topic: Some("news".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        assert_eq!(message.target, Target::Topic("news".to_string()));
    }

    #[test]
    fn test_no_target_fails_resolution() {
        let err = MessageFactory::build(&empty_request(), None).unwrap_err();
        assert_eq!(err.category(), "target");
        assert!(err.to_string().contains("no deliverable target"));
    }

    #[test]
    fn test_blank_fallback_does_not_count() {
        let err = MessageFactory::build(&empty_request(), Some("  ")).unwrap_err();
        assert!(matches!(err, AppError::TargetResolution { .. }));
    }

    #[test]
    fn test_blank_content_produces_no_notification_block() {
        let request = PushRequest {
            token: Some("T".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        assert!(message.notification.is_none());
    }

    #[test]
    fn test_single_non_blank_field_keeps_notification_block() {
        let request = PushRequest {
            notification: NotificationContent {
                body: "hello".to_string(),
                ..Default::default()
            },
            token: Some("T".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        let notification = message.notification.unwrap();
        assert_eq!(notification.title, "");
        assert_eq!(notification.body, "hello");
    }

    #[test]
    fn test_android_priority_upper_cased() {
        let request = PushRequest {
            android: Some(AndroidParams {
                priority: Some("high".to_string()),
                ttl: Some("3600s".to_string()),
            }),
            token: Some("T".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        let android = message.android.unwrap();
        assert_eq!(android.priority.as_deref(), Some("HIGH"));
        assert_eq!(android.ttl.as_deref(), Some("3600s"));
    }

    #[test]
    fn test_blank_android_priority_stays_absent() {
        let request = PushRequest {
            android: Some(AndroidParams {
                priority: Some("".to_string()),
                ttl: None,
            }),
            token: Some("T".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        let android = message.android.unwrap();
        assert!(android.priority.is_none());
        assert!(android.ttl.is_none());
    }

    #[test]
    fn test_apns_headers_emitted_empty_when_all_blank() {
        let request = PushRequest {
            apns: Some(ApnsParams {
                headers: Some(ApnsHeaderParams {
                    priority: Some("  ".to_string()),
                    expiration: Some("".to_string()),
                }),
                aps: None,
            }),
            token: Some("T".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        let apns = message.apns.unwrap();
        assert_eq!(apns.headers, Some(BTreeMap::new()));
        assert!(apns.payload.is_none());
    }

    #[test]
    fn test_apns_payload_absent_when_aps_yields_no_keys() {
        let request = PushRequest {
            apns: Some(ApnsParams {
                headers: None,
                aps: Some(ApsParams {
                    content_available: None,
                }),
            }),
            token: Some("T".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        let apns = message.apns.unwrap();
        assert!(apns.headers.is_none());
        assert!(apns.payload.is_none());
    }

    #[test]
    fn test_apns_blocks_fully_populated() {
        let request = PushRequest {
            apns: Some(ApnsParams {
                headers: Some(ApnsHeaderParams {
                    priority: Some("10".to_string()),
                    expiration: Some("0".to_string()),
                }),
                aps: Some(ApsParams {
                    content_available: Some(1),
                }),
            }),
            token: Some("T".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        let apns = message.apns.unwrap();

        let headers = apns.headers.unwrap();
        assert_eq!(headers.get("apns-priority").map(String::as_str), Some("10"));
        assert_eq!(headers.get("apns-expiration").map(String::as_str), Some("0"));

        let payload = apns.payload.unwrap();
        assert_eq!(
            payload.aps.get("content-available"),
            Some(&serde_json::Value::from(1))
        );
    }

    #[test]
    fn test_empty_data_block_not_emitted() {
        let request = PushRequest {
            data: Some(BTreeMap::new()),
            token: Some("T".to_string()),
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        assert!(message.data.is_none());
    }

    #[test]
    fn test_validate_only_passes_through() {
        let request = PushRequest {
            token: Some("T".to_string()),
            validate_only: true,
            ..empty_request()
        };

        let message = MessageFactory::build(&request, None).unwrap();
        assert!(message.validate_only);
    }

    #[test]
    fn test_build_is_idempotent() {
        let request = PushRequest {
            notification: NotificationContent {
                title: "t".to_string(),
                body: "b".to_string(),
                image_url: Some("https://example.com/a.png".to_string()),
            },
            data: Some(BTreeMap::from([("k".to_string(), "v".to_string())])),
            android: Some(AndroidParams {
                priority: Some("normal".to_string()),
                ttl: None,
            }),
            ..empty_request()
        };

        let first = MessageFactory::build(&request, Some("F")).unwrap();
        let second = MessageFactory::build(&request, Some("F")).unwrap();
        assert_eq!(first, second);
    }
}
