//! HTTP handlers for the bot endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tracing::{error, warn};

use crate::application::Dispatcher;
use crate::domain::conversation::InboundMessage;
use crate::domain::foundation::{RequestMetadata, UserId};

use super::dto::{ErrorResponse, SearchParams, SearchResult, WebhookAck};

/// Header carrying the shared webhook secret.
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct BotAppState {
    dispatcher: Arc<Dispatcher>,
    webhook_secret: Option<Arc<SecretString>>,
}

impl BotAppState {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            webhook_secret: None,
        }
    }

    /// Require `X-Webhook-Secret` on every webhook call.
    pub fn with_webhook_secret(mut self, secret: SecretString) -> Self {
        self.webhook_secret = Some(Arc::new(secret));
        self
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let Some(expected) = &self.webhook_secret else {
            return true;
        };
        let provided = headers
            .get(WEBHOOK_SECRET_HEADER)
            .map(|v| v.as_bytes())
            .unwrap_or_default();
        expected.expose_secret().as_bytes().ct_eq(provided).into()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// POST /webhook - Process one decoded inbound event
///
/// Answers 200 for every event that was processed, including ones whose
/// failure was already reported to the user, so the platform does not
/// redeliver them. Not subject to the request timeout.
pub async fn webhook(
    State(state): State<BotAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !state.authorized(&headers) {
        warn!("Rejected webhook call with bad secret");
        return (StatusCode::UNAUTHORIZED, Json(ErrorResponse::unauthorized())).into_response();
    }

    let message: InboundMessage = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!("Invalid event: {}", e))),
            )
                .into_response()
        }
    };

    let metadata = RequestMetadata::new(message.chat_id, message.user_id).with_source("webhook");

    // The step runs on its own task so a dropped connection cannot cut it short.
    let dispatcher = state.dispatcher.clone();
    let step = tokio::spawn(async move { dispatcher.dispatch(&message, &metadata).await });

    match step.await {
        Ok(outcome) => (StatusCode::OK, Json(WebhookAck::from(&outcome))).into_response(),
        Err(e) => {
            error!(error = %e, "Dispatch task did not complete");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal()),
            )
                .into_response()
        }
    }
}

/// GET /search?user_id=&q= - Inline clip search
///
/// Failures are logged and answered with an empty list.
pub async fn search(
    State(state): State<BotAppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchResult>> {
    let user_id = UserId::new(params.user_id);
    match state
        .dispatcher
        .repositories()
        .clips
        .search(user_id, &params.q)
        .await
    {
        Ok(clips) => Json(clips.into_iter().map(SearchResult::from).collect()),
        Err(e) => {
            error!(user_id = %user_id, query = %params.q, error = %e, "Inline search failed");
            Json(Vec::new())
        }
    }
}
