//! Bot API messaging gateway over HTTP.
//!
//! Replies are posted as JSON to `<api_base_url>/bot<token>/sendMessage`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::conversation::{ParseMode, Reply};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::MessagingGateway;

pub struct HttpMessagingGateway {
    client: Client,
    api_base_url: String,
    bot_token: SecretString,
}

impl HttpMessagingGateway {
    pub fn new(
        api_base_url: impl Into<String>,
        bot_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self {
            client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            bot_token,
        })
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base_url,
            self.bot_token.expose_secret()
        )
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ForceReply>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct ForceReply {
    force_reply: bool,
    selective: bool,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

impl<'a> From<&'a Reply> for SendMessageRequest<'a> {
    fn from(reply: &'a Reply) -> Self {
        Self {
            chat_id: reply.chat_id.as_i64(),
            text: &reply.text,
            reply_to_message_id: reply.quote_message_id.map(|id| id.as_i64()),
            reply_markup: reply.require_user_reply.then_some(ForceReply {
                force_reply: true,
                selective: true,
            }),
            parse_mode: reply.parse_mode.map(|mode| match mode {
                ParseMode::Markdown => "Markdown",
            }),
        }
    }
}

fn gateway_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::GatewayError, message)
}

#[async_trait]
impl MessagingGateway for HttpMessagingGateway {
    async fn send(&self, reply: &Reply) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest::from(reply))
            .send()
            .await
            // reqwest errors can carry the URL, which holds the token
            .map_err(|e| gateway_error(format!("sendMessage failed: {}", e.without_url())))?;

        let status = response.status();
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| gateway_error(format!("Invalid sendMessage response: {}", e.without_url())))?;

        if !status.is_success() || !body.ok {
            return Err(gateway_error(format!(
                "sendMessage rejected ({}): {}",
                status,
                body.description.unwrap_or_default()
            ))
            .with_detail("chat_id", reply.chat_id.to_string()));
        }

        debug!(chat_id = %reply.chat_id, "Reply delivered");
        Ok(())
    }
}
