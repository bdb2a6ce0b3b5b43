//! Result of one conversation step.

use crate::domain::conversation::{ConversationState, InboundMessage, Reply};
use crate::domain::foundation::DomainError;
use crate::domain::pack::PackError;

/// How the reply relates to the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// Part of a command flow: quoted in groups, forced reply while waiting.
    Flow,
    /// Standalone notice such as a listing.
    Notice,
}

/// Next state plus the reply to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: ConversationState,
    pub text: String,
    pub shape: ReplyShape,
}

impl Transition {
    /// Re-prompt without advancing.
    pub fn stay(current: &ConversationState, text: impl Into<String>) -> Self {
        Self::advance(current.clone(), text)
    }

    pub fn advance(next: ConversationState, text: impl Into<String>) -> Self {
        Self {
            next,
            text: text.into(),
            shape: ReplyShape::Flow,
        }
    }

    /// Flow finished.
    pub fn done(text: impl Into<String>) -> Self {
        Self::advance(ConversationState::None, text)
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            next: ConversationState::None,
            text: text.into(),
            shape: ReplyShape::Notice,
        }
    }

    pub fn reply_to(&self, message: &InboundMessage) -> Reply {
        match self.shape {
            ReplyShape::Flow => Reply::in_flow(message, self.text.clone(), !self.next.is_idle()),
            ReplyShape::Notice => Reply::to_chat(message, self.text.clone()),
        }
    }
}

/// Separates domain outcomes, which steps turn into replies, from
/// infrastructure failures, which steps propagate.
pub(crate) trait SplitInfrastructure<T> {
    fn split_infrastructure(self) -> Result<Result<T, PackError>, DomainError>;
}

impl<T> SplitInfrastructure<T> for Result<T, PackError> {
    fn split_infrastructure(self) -> Result<Result<T, PackError>, DomainError> {
        match self {
            Ok(value) => Ok(Ok(value)),
            Err(e) => e.into_infrastructure().map(Err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ChatKind;
    use crate::domain::foundation::{ChatId, ErrorCode, MessageId, UserId};

    fn group_message() -> InboundMessage {
        InboundMessage::text(ChatId::new(-1), UserId::new(1), MessageId::new(9), "x")
            .in_chat(ChatKind::Group)
    }

    #[test]
    fn waiting_flow_reply_forces_reply_in_groups() {
        let t = Transition::advance(ConversationState::NewPackWaitName, "name?");
        let reply = t.reply_to(&group_message());
        assert!(reply.require_user_reply);
        assert_eq!(reply.quote_message_id, Some(MessageId::new(9)));
    }

    #[test]
    fn finished_flow_reply_only_quotes() {
        let reply = Transition::done("ok").reply_to(&group_message());
        assert!(!reply.require_user_reply);
        assert_eq!(reply.quote_message_id, Some(MessageId::new(9)));
    }

    #[test]
    fn notice_is_never_quoted() {
        let reply = Transition::notice("list").reply_to(&group_message());
        assert_eq!(reply.quote_message_id, None);
        assert!(!reply.require_user_reply);
    }

    #[test]
    fn stay_keeps_state_payload() {
        let state = ConversationState::SubscribeWaitPackName;
        assert_eq!(Transition::stay(&state, "again").next, state);
    }

    #[test]
    fn split_keeps_domain_errors_and_extracts_infrastructure() {
        let domain: Result<bool, PackError> = Err(PackError::not_found("cats"));
        assert!(matches!(domain.split_infrastructure(), Ok(Err(PackError::NotFound(_)))));

        let infra: Result<bool, PackError> =
            Err(PackError::Infrastructure(DomainError::database("down")));
        assert_eq!(
            infra.split_infrastructure().unwrap_err().code,
            ErrorCode::DatabaseError
        );
    }
}
