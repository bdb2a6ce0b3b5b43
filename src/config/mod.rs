//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables use the `CLIP_PACK_BOT` prefix
//! and `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use clip_pack_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod database;
mod error;
mod gateway;
mod redis;
mod server;
mod storage;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Which store adapters to wire
    #[serde(default)]
    pub storage: StorageConfig,

    /// Only read by the `postgres` backend
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Conversation cache, only read by the `postgres` backend
    #[serde(default)]
    pub redis: RedisConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `CLIP_PACK_BOT__*` variables.
    ///
    /// - `CLIP_PACK_BOT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CLIP_PACK_BOT__GATEWAY__BOT_TOKEN=...` -> `gateway.bot_token`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a value cannot be parsed into its type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLIP_PACK_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Database and Redis settings are only checked when the persistent
    /// backend is selected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        if self.storage.is_persistent() {
            self.database.validate()?;
            self.redis.validate()?;
        }
        self.gateway.validate(&self.server.environment)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CLIP_PACK_BOT__GATEWAY__BOT_TOKEN",
        "CLIP_PACK_BOT__GATEWAY__WEBHOOK_SECRET",
        "CLIP_PACK_BOT__STORAGE__BACKEND",
        "CLIP_PACK_BOT__DATABASE__URL",
        "CLIP_PACK_BOT__REDIS__URL",
        "CLIP_PACK_BOT__SERVER__PORT",
        "CLIP_PACK_BOT__SERVER__ENVIRONMENT",
    ];

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        env::set_var("CLIP_PACK_BOT__GATEWAY__BOT_TOKEN", "123:abc");
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        for key in VARS {
            env::remove_var(key);
        }
        result
    }

    #[test]
    fn minimal_config_uses_memory_backend() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn postgres_backend_requires_database_and_redis() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("CLIP_PACK_BOT__STORAGE__BACKEND", "postgres")]).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));

        let config = load_with(&[
            ("CLIP_PACK_BOT__STORAGE__BACKEND", "postgres"),
            ("CLIP_PACK_BOT__DATABASE__URL", "postgres://bot@localhost/clips"),
            ("CLIP_PACK_BOT__REDIS__URL", "redis://localhost:6379"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.database.url, "postgres://bot@localhost/clips");
    }

    #[test]
    fn custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("CLIP_PACK_BOT__SERVER__PORT", "3000")]).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn production_requires_webhook_secret() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("CLIP_PACK_BOT__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::WebhookSecretRequired));

        let config = load_with(&[
            ("CLIP_PACK_BOT__SERVER__ENVIRONMENT", "production"),
            ("CLIP_PACK_BOT__GATEWAY__WEBHOOK_SECRET", "s3cret"),
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }
}
