//! Outbound replies.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatId, MessageId};

use super::InboundMessage;

/// Text formatting the gateway should apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    Markdown,
}

/// A reply handed to the messaging gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub chat_id: ChatId,
    pub text: String,
    pub quote_message_id: Option<MessageId>,
    pub require_user_reply: bool,
    pub parse_mode: Option<ParseMode>,
}

impl Reply {
    /// Unquoted reply to the chat a message came from.
    pub fn to_chat(message: &InboundMessage, text: impl Into<String>) -> Self {
        Self {
            chat_id: message.chat_id,
            text: text.into(),
            quote_message_id: None,
            require_user_reply: false,
            parse_mode: None,
        }
    }

    /// Reply within a conversation flow.
    ///
    /// Outside private chats the reply quotes the originating message, and
    /// asks for a forced reply while the flow still awaits input.
    pub fn in_flow(message: &InboundMessage, text: impl Into<String>, awaiting_input: bool) -> Self {
        let mut reply = Self::to_chat(message, text);
        if !message.is_private() {
            reply.quote_message_id = Some(message.message_id);
            reply.require_user_reply = awaiting_input;
        }
        reply
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ChatKind;
    use crate::domain::foundation::UserId;

    fn message(kind: ChatKind) -> InboundMessage {
        InboundMessage::text(ChatId::new(5), UserId::new(6), MessageId::new(7), "x").in_chat(kind)
    }

    #[test]
    fn private_flow_reply_is_plain() {
        let reply = Reply::in_flow(&message(ChatKind::Private), "hi", true);
        assert_eq!(reply.quote_message_id, None);
        assert!(!reply.require_user_reply);
    }

    #[test]
    fn group_flow_reply_quotes_and_forces_reply_while_waiting() {
        let reply = Reply::in_flow(&message(ChatKind::Group), "hi", true);
        assert_eq!(reply.quote_message_id, Some(MessageId::new(7)));
        assert!(reply.require_user_reply);
    }

    #[test]
    fn group_flow_reply_does_not_force_reply_when_done() {
        let reply = Reply::in_flow(&message(ChatKind::Supergroup), "hi", false);
        assert_eq!(reply.quote_message_id, Some(MessageId::new(7)));
        assert!(!reply.require_user_reply);
    }

    #[test]
    fn chat_reply_never_quotes() {
        let reply = Reply::to_chat(&message(ChatKind::Group), "hi");
        assert_eq!(reply.chat_id, ChatId::new(5));
        assert_eq!(reply.quote_message_id, None);
    }
}
