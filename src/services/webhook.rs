// src/services/webhook.rs

//! Discord webhook delivery.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use crate::error::{AppError, Result};

/// Environment variable holding the webhook endpoint.
pub const WEBHOOK_URL_VAR: &str = "DISCORD_WEBHOOK_URL";

/// Delivers a formatted digest message.
#[async_trait]
pub trait Notify {
    /// Send one message; non-2xx responses are fatal.
    async fn notify(&self, content: &str) -> Result<()>;
}

/// Discord webhook message body.
#[derive(Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Notifier posting to a Discord webhook endpoint.
pub struct DiscordNotifier {
    client: Client,
    webhook_url: Url,
}

impl DiscordNotifier {
    /// Create a notifier, rejecting anything that is not a Discord
    /// webhook endpoint before any network call is made.
    pub fn new(client: Client, webhook_url: &str) -> Result<Self> {
        let url = Url::parse(webhook_url)?;

        let host_ok = url
            .host_str()
            .is_some_and(|h| h == "discord.com" || h.ends_with(".discord.com"));
        if !host_ok || !url.path().starts_with("/api/webhooks/") {
            return Err(AppError::config(format!(
                "{WEBHOOK_URL_VAR} is not a Discord webhook endpoint"
            )));
        }

        Ok(Self {
            client,
            webhook_url: url,
        })
    }

    /// Create a notifier from the `DISCORD_WEBHOOK_URL` environment variable.
    pub fn from_env(client: Client) -> Result<Self> {
        let raw = std::env::var(WEBHOOK_URL_VAR)
            .map_err(|_| AppError::config(format!("{WEBHOOK_URL_VAR} is not set")))?;
        Self::new(client, &raw)
    }
}

#[async_trait]
impl Notify for DiscordNotifier {
    async fn notify(&self, content: &str) -> Result<()> {
        self.client
            .post(self.webhook_url.clone())
            .json(&WebhookPayload { content })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new()
    }

    #[test]
    fn accepts_canonical_webhook_url() {
        let url = "https://discord.com/api/webhooks/123456/abcdef";
        assert!(DiscordNotifier::new(client(), url).is_ok());
    }

    #[test]
    fn rejects_foreign_host() {
        let url = "https://example.com/api/webhooks/123456/abcdef";
        assert!(matches!(
            DiscordNotifier::new(client(), url),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn rejects_wrong_path() {
        let url = "https://discord.com/api/other/123456";
        assert!(matches!(
            DiscordNotifier::new(client(), url),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn rejects_unparsable_url() {
        assert!(matches!(
            DiscordNotifier::new(client(), "not a url"),
            Err(AppError::Url(_))
        ));
    }

    #[test]
    fn payload_serializes_as_content_field() {
        let payload = WebhookPayload { content: "hello" };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"content":"hello"}"#);
    }
}
