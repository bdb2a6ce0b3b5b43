//! Decoded inbound chat events.
//!
//! The chat platform's transport delivers each event already decoded into
//! an [`InboundMessage`]; the bot never sees raw platform payloads.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ChatId, ClipId, MessageId, UserId};

/// MIME type of attachments accepted as clips.
pub const CLIP_MIME_TYPE: &str = "video/mp4";

/// Kind of chat a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChatKind {
    #[default]
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub mime_type: String,
    pub clip_id: ClipId,
}

impl Attachment {
    pub fn is_clip(&self) -> bool {
        self.mime_type == CLIP_MIME_TYPE
    }
}

/// One inbound chat event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    #[serde(default)]
    pub chat_kind: ChatKind,
    pub user_id: UserId,
    pub message_id: MessageId,
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub command_args: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

/// The shape of a message as seen by a waiting conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input<'a> {
    /// Non-blank text, trimmed.
    Text(&'a str),
    /// A clip attachment.
    Clip(&'a ClipId),
    /// Anything else.
    Other,
}

impl InboundMessage {
    /// Plain text message in a private chat.
    pub fn text(chat_id: ChatId, user_id: UserId, message_id: MessageId, text: &str) -> Self {
        Self {
            chat_id,
            chat_kind: ChatKind::Private,
            user_id,
            message_id,
            command: None,
            command_args: None,
            text: Some(text.to_string()),
            attachment: None,
        }
    }

    /// Command message in a private chat.
    pub fn command(
        chat_id: ChatId,
        user_id: UserId,
        message_id: MessageId,
        command: &str,
        args: &str,
    ) -> Self {
        Self {
            command: Some(command.to_string()),
            command_args: Some(args.to_string()),
            text: None,
            ..Self::text(chat_id, user_id, message_id, "")
        }
    }

    /// Attachment message in a private chat.
    pub fn attachment(
        chat_id: ChatId,
        user_id: UserId,
        message_id: MessageId,
        mime_type: &str,
        clip_id: ClipId,
    ) -> Self {
        Self {
            text: None,
            attachment: Some(Attachment {
                mime_type: mime_type.to_string(),
                clip_id,
            }),
            ..Self::text(chat_id, user_id, message_id, "")
        }
    }

    pub fn in_chat(mut self, kind: ChatKind) -> Self {
        self.chat_kind = kind;
        self
    }

    pub fn is_private(&self) -> bool {
        self.chat_kind.is_private()
    }

    /// Normalized command name: leading `/` and `@botname` suffix removed.
    pub fn command_name(&self) -> Option<&str> {
        let raw = self.command.as_deref()?.trim();
        let raw = raw.strip_prefix('/').unwrap_or(raw);
        let name = raw.split('@').next().unwrap_or(raw);
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Trimmed command arguments, empty when absent.
    pub fn command_argument(&self) -> &str {
        self.command_args.as_deref().map(str::trim).unwrap_or("")
    }

    /// Classifies the message for a waiting conversation state.
    pub fn input(&self) -> Input<'_> {
        if let Some(attachment) = &self.attachment {
            if attachment.is_clip() {
                return Input::Clip(&attachment.clip_id);
            }
        }
        match self.text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Input::Text(text),
            _ => Input::Other,
        }
    }
}
