//! Messaging gateway port - outbound side of the chat platform.

use async_trait::async_trait;

use crate::domain::conversation::Reply;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Hand one reply to the chat platform.
    ///
    /// # Errors
    ///
    /// - `GatewayError` if the platform rejected or never received it
    async fn send(&self, reply: &Reply) -> Result<(), DomainError>;
}
