//! Provider message assembly: output types and the message factory

pub mod factory;
pub mod types;

pub use factory::MessageFactory;
pub use types::{AndroidConfig, ApnsConfig, ApnsPayload, Message, Notification, Target};
