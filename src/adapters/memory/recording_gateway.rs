//! Messaging gateway that records replies instead of sending them.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::Reply;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::MessagingGateway;

#[derive(Debug, Clone, Default)]
pub struct RecordingGateway {
    sent: Arc<RwLock<Vec<Reply>>>,
    fail: bool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every send fails with `GatewayError`.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    // === Test Helpers ===

    pub async fn sent(&self) -> Vec<Reply> {
        self.sent.read().await.clone()
    }

    pub async fn last(&self) -> Option<Reply> {
        self.sent.read().await.last().cloned()
    }

    pub async fn last_text(&self) -> Option<String> {
        self.last().await.map(|r| r.text)
    }

    pub async fn clear(&self) {
        self.sent.write().await.clear();
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send(&self, reply: &Reply) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(ErrorCode::GatewayError, "send disabled"));
        }
        self.sent.write().await.push(reply.clone());
        Ok(())
    }
}
