//! Normalized, provider-agnostic request representation
//!
//! Produced by the request normalizer after structural validation. The flat
//! vs. nested content alternatives of the wire model are already merged here;
//! target precedence is deliberately NOT resolved yet, since the fallback
//! token only becomes available to the message factory.

use std::collections::BTreeMap;

/// Returns the value only when it is present and not blank/whitespace.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A normalized push request
///
/// All values are owned and immutable for the lifetime of one compose call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    pub notification: NotificationContent,
    /// Custom payload; `None` when the caller supplied no entries
    pub data: Option<BTreeMap<String, String>>,
    pub android: Option<AndroidParams>,
    pub apns: Option<ApnsParams>,
    /// Raw target candidates, copied verbatim from the wire request
    pub token: Option<String>,
    pub topic: Option<String>,
    pub condition: Option<String>,
    pub validate_only: bool,
}

/// Merged notification content
///
/// Title and body default to the empty string when neither the nested nor the
/// flat variant supplied them; the factory treats an all-blank content block
/// as "no notification" (data-only / silent push).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
}

impl NotificationContent {
    /// True when no field carries a non-blank value
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
            && self.body.trim().is_empty()
            && non_blank(self.image_url.as_deref()).is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AndroidParams {
    pub priority: Option<String>,
    pub ttl: Option<String>,
}

/// APNs parameters
///
/// `headers` records whether the caller supplied a headers object at all,
/// independently of whether any header value is non-blank; the factory's
/// emission rules depend on that distinction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApnsParams {
    pub headers: Option<ApnsHeaderParams>,
    pub aps: Option<ApsParams>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApnsHeaderParams {
    pub priority: Option<String>,
    pub expiration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApsParams {
    pub content_available: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank_filters_whitespace() {
        assert_eq!(non_blank(Some("x")), Some("x"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_notification_content_blankness() {
        assert!(NotificationContent::default().is_blank());

        let with_title = NotificationContent {
            title: "hello".to_string(),
            ..Default::default()
        };
        assert!(!with_title.is_blank());

        let with_image = NotificationContent {
            image_url: Some("https://example.com/a.png".to_string()),
            ..Default::default()
        };
        assert!(!with_image.is_blank());

        let whitespace_only = NotificationContent {
            title: "  ".to_string(),
            body: "\t".to_string(),
            image_url: Some(" ".to_string()),
        };
        assert!(whitespace_only.is_blank());
    }
}
