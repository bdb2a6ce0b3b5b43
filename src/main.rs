//! Clip Pack Bot server.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clip_pack_bot::adapters::gateway::HttpMessagingGateway;
use clip_pack_bot::adapters::http::{bot_router, BotAppState};
use clip_pack_bot::adapters::memory::InMemoryConversationStore;
use clip_pack_bot::adapters::postgres::{
    self, PostgresClipStore, PostgresPackStore, PostgresSubscriptionStore,
};
use clip_pack_bot::adapters::redis::RedisConversationStore;
use clip_pack_bot::application::{Dispatcher, Repositories};
use clip_pack_bot::config::{AppConfig, StorageBackend};
use clip_pack_bot::ports::ConversationStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    info!(
        environment = ?config.server.environment,
        backend = ?config.storage.backend,
        "Starting Clip Pack Bot"
    );

    let (repos, conversations) = wire_stores(&config).await?;

    let bot_token = config
        .gateway
        .bot_token
        .clone()
        .unwrap_or_else(|| SecretString::new(String::new()));
    let gateway = HttpMessagingGateway::new(
        config.gateway.api_base_url.clone(),
        bot_token,
        config.gateway.timeout(),
    )?;

    let dispatcher = Dispatcher::new(repos, conversations, Arc::new(gateway));
    let mut state = BotAppState::new(Arc::new(dispatcher));
    if let Some(secret) = config.gateway.webhook_secret.clone() {
        state = state.with_webhook_secret(secret);
    }

    let app = bot_router(state, config.server.request_timeout());
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// JSON logs in production, human-readable otherwise.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

async fn wire_stores(
    config: &AppConfig,
) -> Result<(Repositories, Arc<dyn ConversationStore>), Box<dyn std::error::Error>> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory stores; data is lost on restart");
            Ok((
                Repositories::in_memory(),
                Arc::new(InMemoryConversationStore::new()),
            ))
        }
        StorageBackend::Postgres => {
            let pool = postgres::connect(&config.database).await?;
            let conversations =
                RedisConversationStore::connect(&config.redis.url, config.redis.conversation_ttl())
                    .await?;
            Ok((
                Repositories::new(
                    Arc::new(PostgresPackStore::new(pool.clone())),
                    Arc::new(PostgresSubscriptionStore::new(pool.clone())),
                    Arc::new(PostgresClipStore::new(pool)),
                ),
                Arc::new(conversations),
            ))
        }
    }
}
