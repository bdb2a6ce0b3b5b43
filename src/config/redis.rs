//! Redis configuration for the conversation state cache.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    #[serde(default)]
    pub url: String,

    /// Seconds an idle conversation is remembered
    #[serde(default = "default_conversation_ttl")]
    pub conversation_ttl_secs: u64,
}

impl RedisConfig {
    pub fn conversation_ttl(&self) -> Duration {
        Duration::from_secs(self.conversation_ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err(ValidationError::InvalidRedisUrl);
        }
        if self.conversation_ttl_secs == 0 {
            return Err(ValidationError::InvalidConversationTtl);
        }
        Ok(())
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            conversation_ttl_secs: default_conversation_ttl(),
        }
    }
}

fn default_conversation_ttl() -> u64 {
    24 * 60 * 60
}
