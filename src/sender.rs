//! Downstream sender seam
//!
//! The compose core hands its assembled [`Message`] to an external delivery
//! collaborator. That collaborator is modeled here as a trait; actual network
//! delivery lives outside this crate. [`DryRunSender`] is a stand-in
//! implementation that records the message instead of delivering it, used by
//! the CLI and in tests.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::AppResult;
use crate::message::Message;

/// Outcome reported by a sender for one accepted message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Provider-assigned identifier for the accepted message
    pub message_id: String,
    /// Whether the provider only validated the message without delivering it
    pub validated_only: bool,
    pub accepted_at: DateTime<Utc>,
}

/// Delivery collaborator interface
///
/// Implementations are expected to be side-effect free with respect to the
/// message itself; the compose pipeline never retries internally, since
/// resubmitting a malformed request with the same input cannot succeed.
pub trait MessageSender: Send + Sync {
    /// Hand an assembled message to the provider
    fn send(&self, message: &Message) -> AppResult<DeliveryReceipt>;
}

/// Sender that logs the message instead of delivering it
///
/// Useful for exercising the full pipeline without a provider: the receipt
/// carries a synthetic message id derived from the resolved target.
#[derive(Debug, Default)]
pub struct DryRunSender;

impl DryRunSender {
    pub fn new() -> Self {
        Self
    }
}

impl MessageSender for DryRunSender {
    fn send(&self, message: &Message) -> AppResult<DeliveryReceipt> {
        let accepted_at = Utc::now();
        let message_id = format!(
            "dry-run/{}/{}",
            message.target.kind(),
            accepted_at.timestamp_millis()
        );

        info!(
            target_kind = message.target.kind(),
            target_value = message.target.value(),
            validate_only = message.validate_only,
            has_notification = message.notification.is_some(),
            has_data = message.data.is_some(),
            "dry-run send"
        );

        Ok(DeliveryReceipt {
            message_id,
            validated_only: message.validate_only,
            accepted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Target;

    fn message(validate_only: bool) -> Message {
        Message {
            notification: None,
            data: None,
            android: None,
            apns: None,
            target: Target::Token("abc".to_string()),
            validate_only,
        }
    }

    #[test]
    fn test_dry_run_sender_accepts_message() {
        let sender = DryRunSender::new();
        let receipt = sender.send(&message(false)).unwrap();

        assert!(receipt.message_id.starts_with("dry-run/token/"));
        assert!(!receipt.validated_only);
    }

    #[test]
    fn test_dry_run_sender_reports_validate_only() {
        let sender = DryRunSender::new();
        let receipt = sender.send(&message(true)).unwrap();
        assert!(receipt.validated_only);
    }
}
