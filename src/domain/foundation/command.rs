//! Request context that flows through inbound event processing.
//!
//! Every inbound chat event gets one `RequestMetadata`. Handlers and the
//! transducer never see it; the dispatcher uses it for log correlation and
//! for the generic failure reply.

use serde::{Deserialize, Serialize};

use super::{ChatId, CorrelationId, UserId};

/// Metadata context for one inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMetadata {
    /// The user who sent the event.
    pub user_id: UserId,

    /// The chat the event arrived in.
    pub chat_id: ChatId,

    /// Links every log line and the failure reply for this event.
    correlation_id: CorrelationId,

    /// Source of this event (e.g., "webhook", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl RequestMetadata {
    /// Creates metadata with a freshly generated correlation id.
    pub fn new(chat_id: ChatId, user_id: UserId) -> Self {
        Self {
            user_id,
            chat_id,
            correlation_id: CorrelationId::new(),
            source: None,
        }
    }

    /// Builder: Use an existing correlation id (e.g., from a request header).
    pub fn with_correlation_id(mut self, id: CorrelationId) -> Self {
        self.correlation_id = id;
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}
