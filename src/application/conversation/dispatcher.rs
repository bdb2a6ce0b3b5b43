//! Dispatcher - routes one inbound message through commands or the
//! conversation transducer, persists the next state and sends the reply.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::{replies, Repositories};
use crate::domain::conversation::{
    ConversationState, InboundMessage, ParseMode, Reply, StateTag,
};
use crate::domain::foundation::{CorrelationId, DomainError, RequestMetadata, StateMachine};
use crate::ports::{ConversationStore, MessagingGateway};

use super::commands::Command;
use super::transducer::transduce;
use super::transition::Transition;

/// What happened to an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A reply was sent and the conversation moved to `next`.
    Replied { next: StateTag },
    /// Unknown command, or plain input with no flow in progress.
    Ignored,
    /// Infrastructure failure. The user was sent the generic failure reply
    /// carrying this id.
    Failed { correlation_id: CorrelationId },
}

pub struct Dispatcher {
    repos: Repositories,
    conversations: Arc<dyn ConversationStore>,
    gateway: Arc<dyn MessagingGateway>,
}

impl Dispatcher {
    pub fn new(
        repos: Repositories,
        conversations: Arc<dyn ConversationStore>,
        gateway: Arc<dyn MessagingGateway>,
    ) -> Self {
        Self {
            repos,
            conversations,
            gateway,
        }
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// Handles one inbound message end to end.
    pub async fn dispatch(
        &self,
        message: &InboundMessage,
        metadata: &RequestMetadata,
    ) -> DispatchOutcome {
        match self.try_dispatch(message).await {
            Ok(Some(next)) => DispatchOutcome::Replied { next },
            Ok(None) => DispatchOutcome::Ignored,
            Err(err) => self.fail(message, metadata, err).await,
        }
    }

    async fn try_dispatch(&self, message: &InboundMessage) -> Result<Option<StateTag>, DomainError> {
        let chat_id = message.chat_id;
        let user_id = message.user_id;

        if let Some(name) = message.command_name() {
            let Some(command) = Command::lookup(name) else {
                debug!(command = %name, "Ignoring unknown command");
                return Ok(None);
            };

            self.conversations.clear(chat_id, user_id).await?;
            let transition = command.run(&self.repos, message).await?;
            StateTag::None.transition_to(transition.next.tag())?;
            info!(
                chat_id = %chat_id,
                user_id = %user_id,
                command = command.name(),
                next = %transition.next.tag(),
                "Command handled"
            );
            return self.finish(message, transition).await.map(Some);
        }

        let state = self
            .conversations
            .get(chat_id, user_id)
            .await?
            .unwrap_or_default();

        match transduce(&self.repos, &state, message).await? {
            None => {
                debug!(chat_id = %chat_id, user_id = %user_id, "No conversation in progress");
                Ok(None)
            }
            Some(transition) => {
                debug!(
                    chat_id = %chat_id,
                    user_id = %user_id,
                    from = %state.tag(),
                    to = %transition.next.tag(),
                    "Conversation step"
                );
                self.finish(message, transition).await.map(Some)
            }
        }
    }

    /// Persists the next state, then replies.
    async fn finish(
        &self,
        message: &InboundMessage,
        transition: Transition,
    ) -> Result<StateTag, DomainError> {
        let (chat_id, user_id) = (message.chat_id, message.user_id);
        match &transition.next {
            ConversationState::None => self.conversations.clear(chat_id, user_id).await?,
            next => self.conversations.set(chat_id, user_id, next).await?,
        }
        self.gateway.send(&transition.reply_to(message)).await?;
        Ok(transition.next.tag())
    }

    async fn fail(
        &self,
        message: &InboundMessage,
        metadata: &RequestMetadata,
        err: DomainError,
    ) -> DispatchOutcome {
        let correlation_id = metadata.correlation_id();
        error!(
            correlation_id = %correlation_id,
            chat_id = %message.chat_id,
            user_id = %message.user_id,
            error = %err,
            "Failed to handle message"
        );

        let reply = Reply::to_chat(message, replies::something_went_wrong(correlation_id))
            .with_parse_mode(ParseMode::Markdown);
        if let Err(send_err) = self.gateway.send(&reply).await {
            warn!(
                correlation_id = %correlation_id,
                error = %send_err,
                "Failed to send failure reply"
            );
        }

        DispatchOutcome::Failed { correlation_id }
    }
}
