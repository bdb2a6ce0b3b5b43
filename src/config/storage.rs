//! Storage backend selection

use serde::Deserialize;

/// Which adapters back the pack, subscription, clip and conversation stores.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps. State is lost on restart.
    #[default]
    Memory,
    /// PostgreSQL for packs, subscriptions and clips; Redis for conversations.
    Postgres,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
}

impl StorageConfig {
    pub fn is_persistent(&self) -> bool {
        self.backend == StorageBackend::Postgres
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_memory() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert!(!config.is_persistent());
    }

    #[test]
    fn backend_names_are_lowercase() {
        let backend: StorageBackend = serde_json::from_str("\"postgres\"").unwrap();
        assert_eq!(backend, StorageBackend::Postgres);
    }
}
