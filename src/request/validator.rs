//! Structural request validation
//!
//! Checks the wire-level request shape before normalization: field length
//! limits, image URL format, topic naming, and data-payload key/value
//! invariants. Violations are collected across all rules and reported
//! together in a single error rather than stopping at the first bad field.

use url::Url;

use super::types::SendRequest;
use crate::errors::{AppError, AppResult, FieldViolation};

/// Trait for request validators
///
/// Validators ensure an incoming request meets format and shape requirements
/// before it is normalized into the domain model.
pub trait RequestValidator: Send + Sync {
    /// Validate a wire-level request
    ///
    /// Returns `Ok(())` when the request is structurally sound, or a
    /// [`AppError::StructuralValidation`] carrying every violated field.
    fn validate(&self, request: &SendRequest) -> AppResult<()>;
}

/// Field length limits enforced by the default validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationLimits {
    pub max_title_chars: usize,
    pub max_body_chars: usize,
    pub max_token_chars: usize,
    pub max_topic_chars: usize,
    pub max_condition_chars: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_title_chars: 200,
            max_body_chars: 2000,
            max_token_chars: 4096,
            max_topic_chars: 256,
            max_condition_chars: 1024,
        }
    }
}

/// Default implementation of RequestValidator
///
/// Applies the documented structural rules to both the flat and the nested
/// content fields, so a violation is reported against whichever variant the
/// caller actually used.
pub struct DefaultRequestValidator {
    limits: ValidationLimits,
}

impl DefaultRequestValidator {
    /// Create a validator with the default field limits
    pub fn new() -> Self {
        Self {
            limits: ValidationLimits::default(),
        }
    }

    /// Create a validator with custom field limits
    pub fn with_limits(limits: ValidationLimits) -> Self {
        Self { limits }
    }

    fn check_length(
        &self,
        field: &str,
        value: Option<&str>,
        limit: usize,
        violations: &mut Vec<FieldViolation>,
    ) {
        if let Some(value) = value {
            let length = value.chars().count();
            if length > limit {
                violations.push(FieldViolation::new(
                    field,
                    format!("exceeds {limit} characters (got {length})"),
                ));
            }
        }
    }

    fn check_image_url(
        &self,
        field: &str,
        value: Option<&str>,
        violations: &mut Vec<FieldViolation>,
    ) {
        // Blank image URLs are treated as absent, not malformed
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            if Url::parse(value).is_err() {
                violations.push(FieldViolation::new(field, "is not a valid URL"));
            }
        }
    }

    fn check_topic(&self, request: &SendRequest, violations: &mut Vec<FieldViolation>) {
        self.check_length(
            "topic",
            request.topic.as_deref(),
            self.limits.max_topic_chars,
            violations,
        );
        if let Some(topic) = request.topic.as_deref() {
            if topic.starts_with("/topics/") {
                violations.push(FieldViolation::new(
                    "topic",
                    "must not carry the /topics/ prefix",
                ));
            }
        }
    }

    fn check_data(&self, request: &SendRequest, violations: &mut Vec<FieldViolation>) {
        let Some(data) = request.data.as_ref() else {
            return;
        };

        // Sort entries so violation order does not depend on map iteration order
        let mut entries: Vec<_> = data.iter().collect();
        entries.sort_by_key(|(key, _)| key.as_str());

        for (key, value) in entries {
            if key.trim().is_empty() {
                violations.push(FieldViolation::new(
                    format!("data[{key:?}]"),
                    "key must not be blank",
                ));
            }
            if value.is_none() {
                violations.push(FieldViolation::new(
                    format!("data[{key:?}]"),
                    "value must not be null",
                ));
            }
        }
    }
}

impl Default for DefaultRequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestValidator for DefaultRequestValidator {
    fn validate(&self, request: &SendRequest) -> AppResult<()> {
        let mut violations = Vec::new();
        let limits = &self.limits;

        self.check_length(
            "title",
            request.title.as_deref(),
            limits.max_title_chars,
            &mut violations,
        );
        self.check_length(
            "body",
            request.body.as_deref(),
            limits.max_body_chars,
            &mut violations,
        );
        self.check_image_url("imageUrl", request.image_url.as_deref(), &mut violations);

        if let Some(notification) = request.notification.as_ref() {
            self.check_length(
                "notification.title",
                notification.title.as_deref(),
                limits.max_title_chars,
                &mut violations,
            );
            self.check_length(
                "notification.body",
                notification.body.as_deref(),
                limits.max_body_chars,
                &mut violations,
            );
            self.check_image_url(
                "notification.image",
                notification.image.as_deref(),
                &mut violations,
            );
        }

        self.check_length(
            "token",
            request.token.as_deref(),
            limits.max_token_chars,
            &mut violations,
        );
        self.check_topic(request, &mut violations);
        self.check_length(
            "condition",
            request.condition.as_deref(),
            limits.max_condition_chars,
            &mut violations,
        );

        self.check_data(request, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::structural(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::types::NotificationPayload;
    use std::collections::HashMap;

    fn request_with_token() -> SendRequest {
        SendRequest {
            token: Some("device-token".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_request_passes() {
        let validator = DefaultRequestValidator::new();
        let mut request = request_with_token();
        request.title = Some("hello".to_string());
        request.image_url = Some("https://example.com/a.png".to_string());

        assert!(validator.validate(&request).is_ok());
    }

    #[test]
    fn test_title_length_limit() {
        let validator = DefaultRequestValidator::new();
        let mut request = request_with_token();
        request.title = Some("x".repeat(201));

        let err = validator.validate(&request).unwrap_err();
        assert_eq!(err.violations()[0].field, "title");
        assert!(err.to_string().contains("exceeds 200 characters"));
    }

    #[test]
    fn test_nested_fields_validated_independently() {
        let validator = DefaultRequestValidator::new();
        let mut request = request_with_token();
        request.notification = Some(NotificationPayload {
            title: Some("y".repeat(201)),
            body: None,
            image: Some("not a url".to_string()),
        });

        let err = validator.validate(&request).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["notification.title", "notification.image"]);
    }

    #[test]
    fn test_invalid_image_url_rejected() {
        let validator = DefaultRequestValidator::new();
        let mut request = request_with_token();
        request.image_url = Some("://missing-scheme".to_string());

        let err = validator.validate(&request).unwrap_err();
        assert_eq!(err.violations()[0].field, "imageUrl");
    }

    #[test]
    fn test_blank_image_url_is_not_an_error() {
        let validator = DefaultRequestValidator::new();
        let mut request = request_with_token();
        request.image_url = Some("   ".to_string());

        assert!(validator.validate(&request).is_ok());
    }

    #[test]
    fn test_topic_prefix_rejected() {
        let validator = DefaultRequestValidator::new();
        let request = SendRequest {
            topic: Some("/topics/news".to_string()),
            ..Default::default()
        };

        let err = validator.validate(&request).unwrap_err();
        assert!(err.to_string().contains("/topics/ prefix"));
    }

    #[test]
    fn test_all_data_violations_collected() {
        let validator = DefaultRequestValidator::new();
        let mut data = HashMap::new();
        data.insert("".to_string(), Some("v".to_string()));
        data.insert("missing".to_string(), None);
        data.insert("ok".to_string(), Some("fine".to_string()));

        let mut request = request_with_token();
        request.data = Some(data);

        let err = validator.validate(&request).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["data[\"\"]", "data[\"missing\"]"]);
    }

    #[test]
    fn test_violations_span_multiple_rules() {
        let validator = DefaultRequestValidator::new();
        let mut data = HashMap::new();
        data.insert(" ".to_string(), None);

        let request = SendRequest {
            topic: Some("t".repeat(257)),
            data: Some(data),
            ..Default::default()
        };

        let err = validator.validate(&request).unwrap_err();
        // One length violation plus a blank key and a null value on the same entry
        assert_eq!(err.violations().len(), 3);
    }

    #[test]
    fn test_custom_limits() {
        let validator = DefaultRequestValidator::with_limits(ValidationLimits {
            max_title_chars: 5,
            ..Default::default()
        });
        let mut request = request_with_token();
        request.title = Some("sixsix".to_string());

        assert!(validator.validate(&request).is_err());
    }
}
