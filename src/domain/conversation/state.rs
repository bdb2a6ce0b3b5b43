//! Conversation state machine.
//!
//! A conversation state records which follow-up input a (chat, user) pair
//! owes the bot. Each follow-up state carries exactly the data its flow has
//! collected so far.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ClipId, StateMachine};
use crate::domain::pack::PackName;

/// Stored conversation state for one (chat, user) pair.
///
/// `None` is equivalent to no stored state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ConversationState {
    /// Idle; no follow-up expected.
    #[default]
    None,

    /// Waiting for the name of a pack to create.
    NewPackWaitName,

    /// Waiting for the pack a new clip goes into.
    NewGifWaitPackName,

    /// Waiting for the clip to add.
    NewGifWaitClip { pack: PackName },

    /// Waiting for the keywords describing the clip.
    NewGifWaitKeywords { pack: PackName, clip_id: ClipId },

    /// Waiting for the pack to subscribe to.
    SubscribeWaitPackName,

    /// Waiting for the pack to unsubscribe from.
    UnsubscribeWaitPackName,

    /// Waiting for the pack to delete a clip from.
    DeleteGifWaitPackName,

    /// Waiting for the clip to delete.
    DeleteGifWaitClip { pack: PackName },
}

impl ConversationState {
    /// Returns the payload-free tag of this state.
    pub fn tag(&self) -> StateTag {
        match self {
            Self::None => StateTag::None,
            Self::NewPackWaitName => StateTag::NewPackWaitName,
            Self::NewGifWaitPackName => StateTag::NewGifWaitPackName,
            Self::NewGifWaitClip { .. } => StateTag::NewGifWaitClip,
            Self::NewGifWaitKeywords { .. } => StateTag::NewGifWaitKeywords,
            Self::SubscribeWaitPackName => StateTag::SubscribeWaitPackName,
            Self::UnsubscribeWaitPackName => StateTag::UnsubscribeWaitPackName,
            Self::DeleteGifWaitPackName => StateTag::DeleteGifWaitPackName,
            Self::DeleteGifWaitClip { .. } => StateTag::DeleteGifWaitClip,
        }
    }

    /// Returns true if no follow-up input is expected.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Discriminant of [`ConversationState`], used to declare allowed edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTag {
    None,
    NewPackWaitName,
    NewGifWaitPackName,
    NewGifWaitClip,
    NewGifWaitKeywords,
    SubscribeWaitPackName,
    UnsubscribeWaitPackName,
    DeleteGifWaitPackName,
    DeleteGifWaitClip,
}

impl StateTag {
    pub const ALL: [StateTag; 9] = [
        StateTag::None,
        StateTag::NewPackWaitName,
        StateTag::NewGifWaitPackName,
        StateTag::NewGifWaitClip,
        StateTag::NewGifWaitKeywords,
        StateTag::SubscribeWaitPackName,
        StateTag::UnsubscribeWaitPackName,
        StateTag::DeleteGifWaitPackName,
        StateTag::DeleteGifWaitClip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::NewPackWaitName => "new_pack_wait_name",
            Self::NewGifWaitPackName => "new_gif_wait_pack_name",
            Self::NewGifWaitClip => "new_gif_wait_clip",
            Self::NewGifWaitKeywords => "new_gif_wait_keywords",
            Self::SubscribeWaitPackName => "subscribe_wait_pack_name",
            Self::UnsubscribeWaitPackName => "unsubscribe_wait_pack_name",
            Self::DeleteGifWaitPackName => "delete_gif_wait_pack_name",
            Self::DeleteGifWaitClip => "delete_gif_wait_clip",
        }
    }
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for StateTag {
    fn can_transition_to(&self, target: &Self) -> bool {
        // Every waiting state may stay put (re-prompt) or finish.
        if self == target || *target == StateTag::None {
            return true;
        }

        use StateTag::*;
        matches!(
            (self, target),
            // Commands seed a flow from idle
            (None, NewPackWaitName)
                | (None, NewGifWaitPackName)
                | (None, NewGifWaitClip)
                | (None, SubscribeWaitPackName)
                | (None, UnsubscribeWaitPackName)
                | (None, DeleteGifWaitPackName)
                | (None, DeleteGifWaitClip)
                // Add-clip flow
                | (NewGifWaitPackName, NewGifWaitClip)
                | (NewGifWaitClip, NewGifWaitKeywords)
                // Delete-clip flow
                | (DeleteGifWaitPackName, DeleteGifWaitClip)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use StateTag::*;
        match self {
            None => vec![
                None,
                NewPackWaitName,
                NewGifWaitPackName,
                NewGifWaitClip,
                SubscribeWaitPackName,
                UnsubscribeWaitPackName,
                DeleteGifWaitPackName,
                DeleteGifWaitClip,
            ],
            NewGifWaitPackName => vec![NewGifWaitPackName, NewGifWaitClip, None],
            NewGifWaitClip => vec![NewGifWaitClip, NewGifWaitKeywords, None],
            DeleteGifWaitPackName => vec![DeleteGifWaitPackName, DeleteGifWaitClip, None],
            other => vec![*other, None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    fn pack() -> PackName {
        PackName::parse("cats").unwrap()
    }

    mod state_definition {
        use super::*;

        #[test]
        fn default_state_is_none() {
            assert_eq!(ConversationState::default(), ConversationState::None);
            assert!(ConversationState::default().is_idle());
        }

        #[test]
        fn unit_state_serializes_with_tag_only() {
            let json = serde_json::to_string(&ConversationState::SubscribeWaitPackName).unwrap();
            assert_eq!(json, r#"{"state":"subscribe_wait_pack_name"}"#);
        }

        #[test]
        fn payload_state_round_trips_through_json() {
            let state = ConversationState::NewGifWaitKeywords {
                pack: pack(),
                clip_id: ClipId::new("file-1").unwrap(),
            };
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(
                json,
                r#"{"state":"new_gif_wait_keywords","data":{"pack":"cats","clip_id":"file-1"}}"#
            );
            let back: ConversationState = serde_json::from_str(&json).unwrap();
            assert_eq!(back, state);
        }

        #[test]
        fn rejects_payload_with_invalid_pack_name() {
            let json = r#"{"state":"new_gif_wait_clip","data":{"pack":"bad name"}}"#;
            assert!(serde_json::from_str::<ConversationState>(json).is_err());
        }

        #[test]
        fn tag_matches_variant() {
            assert_eq!(
                ConversationState::DeleteGifWaitClip { pack: pack() }.tag(),
                StateTag::DeleteGifWaitClip
            );
            assert_eq!(StateTag::NewGifWaitClip.to_string(), "new_gif_wait_clip");
        }
    }

    mod transitions {
        use super::*;

        #[test]
        fn add_clip_flow_edges_are_allowed() {
            assert!(StateTag::None.can_transition_to(&StateTag::NewGifWaitPackName));
            assert!(StateTag::NewGifWaitPackName.can_transition_to(&StateTag::NewGifWaitClip));
            assert!(StateTag::NewGifWaitClip.can_transition_to(&StateTag::NewGifWaitKeywords));
            assert!(StateTag::NewGifWaitKeywords.can_transition_to(&StateTag::None));
        }

        #[test]
        fn every_state_may_stay_or_finish() {
            for tag in StateTag::ALL {
                assert!(tag.can_transition_to(&tag));
                assert!(tag.can_transition_to(&StateTag::None));
            }
        }

        #[test]
        fn skipping_a_step_is_rejected() {
            let err = StateTag::NewGifWaitPackName
                .transition_to(StateTag::NewGifWaitKeywords)
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        }

        #[test]
        fn crossing_flows_is_rejected() {
            assert!(!StateTag::SubscribeWaitPackName.can_transition_to(&StateTag::DeleteGifWaitClip));
            assert!(!StateTag::DeleteGifWaitPackName.can_transition_to(&StateTag::NewGifWaitClip));
        }

        #[test]
        fn valid_transitions_agree_with_can_transition_to() {
            for from in &StateTag::ALL {
                for to in &StateTag::ALL {
                    assert_eq!(
                        from.valid_transitions().contains(to),
                        from.can_transition_to(to),
                        "{} -> {}",
                        from,
                        to
                    );
                }
            }
        }

        #[test]
        fn keywords_state_is_only_reachable_from_clip_state() {
            let sources: Vec<_> = StateTag::ALL
                .iter()
                .filter(|t| **t != StateTag::NewGifWaitKeywords)
                .filter(|t| t.can_transition_to(&StateTag::NewGifWaitKeywords))
                .collect();
            assert_eq!(sources, vec![&StateTag::NewGifWaitClip]);
        }

        #[test]
        fn no_state_is_terminal() {
            assert!(!StateTag::None.is_terminal());
            assert!(!StateTag::NewPackWaitName.is_terminal());
        }
    }
}
