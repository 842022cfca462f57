//! Inbound messages to the application core.
//!
//! The messaging adapter classifies nothing: it strips the configured
//! topic root and forwards every message through a single-consumer
//! channel. The [`ClockService`](super::service::ClockService) owns the
//! topic dispatch so the routing logic stays host-testable.

/// One pub/sub message, topic already relative to the configured root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub topic: String,
    pub payload: String,
}

impl InboundMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }
}
