//! Request normalization
//!
//! Converts a validated wire-level request into the provider-agnostic domain
//! model. Content supplied both nested and flat is merged per field with the
//! nested variant winning; target precedence is left to the message factory,
//! which is the only component with access to the configured fallback token.

use std::collections::BTreeMap;

use super::types::{ApnsOptions, SendRequest};
use super::validator::{DefaultRequestValidator, RequestValidator};
use crate::domain::{
    AndroidParams, ApnsHeaderParams, ApnsParams, ApsParams, NotificationContent, PushRequest,
};
use crate::errors::AppResult;

/// Picks the first present candidate, left to right
///
/// Presence is what matters here, not blankness: an explicitly supplied empty
/// string still overrides a lower-precedence candidate. Blank handling is the
/// factory's concern.
fn merge<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates.into_iter().flatten().next()
}

/// Normalizes wire requests into [`PushRequest`] values
pub struct RequestNormalizer {
    validator: Box<dyn RequestValidator>,
}

impl RequestNormalizer {
    /// Create a normalizer backed by the default structural validator
    pub fn new() -> Self {
        Self {
            validator: Box::new(DefaultRequestValidator::new()),
        }
    }

    /// Create a normalizer with a custom validator
    pub fn with_validator(validator: Box<dyn RequestValidator>) -> Self {
        Self { validator }
    }

    /// Validate and normalize a wire-level request
    ///
    /// Structural validation runs first; a request that fails it never reaches
    /// the merge logic.
    pub fn normalize(&self, request: &SendRequest) -> AppResult<PushRequest> {
        self.validator.validate(request)?;

        let nested = request.notification.as_ref();

        let notification = NotificationContent {
            title: merge([nested.and_then(|n| n.title.as_deref()), request.title.as_deref()])
                .unwrap_or_default()
                .to_string(),
            body: merge([nested.and_then(|n| n.body.as_deref()), request.body.as_deref()])
                .unwrap_or_default()
                .to_string(),
            image_url: merge([
                nested.and_then(|n| n.image.as_deref()),
                request.image_url.as_deref(),
            ])
            .map(str::to_string),
        };

        // An empty data map is indistinguishable from an absent one downstream
        let data = request
            .data
            .as_ref()
            .filter(|entries| !entries.is_empty())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|(key, value)| {
                        value.as_ref().map(|value| (key.clone(), value.clone()))
                    })
                    .collect::<BTreeMap<String, String>>()
            });

        let android = request.android.as_ref().map(|options| AndroidParams {
            priority: options.priority.clone(),
            ttl: options.ttl.clone(),
        });

        let apns = request.apns.as_ref().map(Self::map_apns);

        Ok(PushRequest {
            notification,
            data,
            android,
            apns,
            token: request.token.clone(),
            topic: request.topic.clone(),
            condition: request.condition.clone(),
            validate_only: request.validate_only,
        })
    }

    fn map_apns(options: &ApnsOptions) -> ApnsParams {
        ApnsParams {
            headers: options.headers.as_ref().map(|headers| ApnsHeaderParams {
                priority: headers.apns_priority.clone(),
                expiration: headers.apns_expiration.clone(),
            }),
            aps: options
                .payload
                .as_ref()
                .and_then(|payload| payload.aps.as_ref())
                .map(|aps| ApsParams {
                    content_available: aps.content_available,
                }),
        }
    }
}

impl Default for RequestNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
