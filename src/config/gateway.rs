//! Messaging gateway configuration
//!
//! The bot token and webhook secret are held as `SecretString` so they never
//! show up in `Debug` output or logs.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the chat platform's bot API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Bot API token, interpolated into every API path
    #[serde(default)]
    pub bot_token: Option<SecretString>,

    /// Shared secret expected in the `X-Webhook-Secret` header
    #[serde(default)]
    pub webhook_secret: Option<SecretString>,

    /// Outbound request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl GatewayConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate gateway configuration
    ///
    /// Production deployments must use HTTPS and configure a webhook secret.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let token_present = self
            .bot_token
            .as_ref()
            .is_some_and(|t| !t.expose_secret().is_empty());
        if !token_present {
            return Err(ValidationError::MissingRequired("GATEWAY__BOT_TOKEN"));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ValidationError::InvalidGatewayUrl);
        }
        if *environment == Environment::Production {
            if !self.api_base_url.starts_with("https://") {
                return Err(ValidationError::GatewayMustBeHttps);
            }
            if self.webhook_secret.is_none() {
                return Err(ValidationError::WebhookSecretRequired);
            }
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            bot_token: None,
            webhook_secret: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_token() -> GatewayConfig {
        GatewayConfig {
            bot_token: Some(SecretString::new("123:abc".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn token_is_required() {
        assert_eq!(
            GatewayConfig::default().validate(&Environment::Development),
            Err(ValidationError::MissingRequired("GATEWAY__BOT_TOKEN"))
        );
        let empty = GatewayConfig {
            bot_token: Some(SecretString::new(String::new())),
            ..Default::default()
        };
        assert!(empty.validate(&Environment::Development).is_err());
        assert!(with_token().validate(&Environment::Development).is_ok());
    }

    #[test]
    fn base_url_must_be_http() {
        let config = GatewayConfig {
            api_base_url: "ftp://example.com".to_string(),
            ..with_token()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidGatewayUrl)
        );
    }

    #[test]
    fn production_requirements() {
        let plain_http = GatewayConfig {
            api_base_url: "http://localhost:8081".to_string(),
            ..with_token()
        };
        assert!(plain_http.validate(&Environment::Development).is_ok());
        assert_eq!(
            plain_http.validate(&Environment::Production),
            Err(ValidationError::GatewayMustBeHttps)
        );

        assert_eq!(
            with_token().validate(&Environment::Production),
            Err(ValidationError::WebhookSecretRequired)
        );

        let complete = GatewayConfig {
            webhook_secret: Some(SecretString::new("s3cret".to_string())),
            ..with_token()
        };
        assert!(complete.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", with_token());
        assert!(!rendered.contains("123:abc"));
    }
}
