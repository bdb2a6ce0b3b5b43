//! HTTP DTOs for the bot endpoints.
//!
//! The webhook body is an [`InboundMessage`](crate::domain::conversation::InboundMessage)
//! as-is; only the acknowledgements and search results have their own shapes.

use serde::{Deserialize, Serialize};

use crate::application::DispatchOutcome;
use crate::domain::clip::Clip;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Query parameters of `GET /search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub user_id: i64,
    #[serde(default)]
    pub q: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Acknowledgement for a processed webhook event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookAck {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

impl From<&DispatchOutcome> for WebhookAck {
    fn from(outcome: &DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Replied { next } => Self {
                outcome: format!("replied:{}", next),
                correlation_id: None,
            },
            DispatchOutcome::Ignored => Self {
                outcome: "ignored".to_string(),
                correlation_id: None,
            },
            DispatchOutcome::Failed { correlation_id } => Self {
                outcome: "failed".to_string(),
                correlation_id: Some(correlation_id.to_string()),
            },
        }
    }
}

/// One inline search hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub pack: String,
    pub clip_id: String,
}

impl From<Clip> for SearchResult {
    fn from(clip: Clip) -> Self {
        Self {
            pack: clip.pack.as_str().to_string(),
            clip_id: clip.clip_id.as_str().to_string(),
        }
    }
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn unauthorized() -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: "Missing or invalid webhook secret".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: "Event processing was aborted".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::StateTag;
    use crate::domain::foundation::{ClipId, CorrelationId};
    use crate::domain::pack::PackName;

    #[test]
    fn ack_names_next_state() {
        let ack = WebhookAck::from(&DispatchOutcome::Replied {
            next: StateTag::NewPackWaitName,
        });
        assert_eq!(ack.outcome, "replied:new_pack_wait_name");
        assert!(ack.correlation_id.is_none());
    }

    #[test]
    fn failed_ack_carries_correlation_id() {
        let id = CorrelationId::new();
        let ack = WebhookAck::from(&DispatchOutcome::Failed { correlation_id: id });
        assert_eq!(ack.correlation_id, Some(id.to_string()));
    }

    #[test]
    fn search_result_uses_display_name() {
        let clip = Clip::new(PackName::parse("Cats").unwrap(), ClipId::new("f1").unwrap(), "x");
        let json = serde_json::to_value(SearchResult::from(clip)).unwrap();
        assert_eq!(json, serde_json::json!({ "pack": "Cats", "clip_id": "f1" }));
    }

    #[test]
    fn search_params_default_to_empty_query() {
        let params: SearchParams = serde_json::from_str(r#"{"user_id": 5}"#).unwrap();
        assert_eq!(params.q, "");
    }
}
