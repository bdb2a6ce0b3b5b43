//! HTTP routes for the bot endpoints.

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::handlers::{health, search, webhook, BotAppState};

/// Creates the bot router.
///
/// Every route is traced. The timeout covers the read-only routes only; a
/// webhook step always runs to completion.
pub fn bot_router(state: BotAppState, request_timeout: Duration) -> Router {
    let bounded = Router::new()
        .route("/health", get(health))
        .route("/search", get(search))
        .layer(TimeoutLayer::new(request_timeout));

    Router::new()
        .route("/webhook", post(webhook))
        .merge(bounded)
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
