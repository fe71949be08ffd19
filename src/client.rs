use anyhow::{Context, Result};
use reqwest::{
    IntoUrl, Url,
    blocking::{Client, Response},
    header::CONTENT_TYPE,
};

use crate::{message::Message, validate};

/// Posts messages to one webhook URL.
///
/// Holds no state besides the destination and the HTTP client, so one instance can be reused
/// for any number of sequential sends. Create one per destination.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http_client: Client,
    url: Url,
}

impl WebhookClient {
    /// # Errors
    /// Fails if the URL cannot be parsed, is not HTTP(S) or carries a fragment.
    pub fn new(webhook_url: impl IntoUrl) -> Result<Self> {
        Self::with_http_client(Client::new(), webhook_url)
    }

    /// Uses a caller-provided client, e.g. one with a timeout configured.
    ///
    /// # Errors
    /// See [`WebhookClient::new`].
    pub fn with_http_client(http_client: Client, webhook_url: impl IntoUrl) -> Result<Self> {
        let url = webhook_url.into_url().context("Invalid WebHook URL")?;
        validate::webhook_url(&url).context("Invalid WebHook URL")?;
        Ok(Self { http_client, url })
    }

    /// Targets `https://discord.com/api/webhooks/{id}/{token}`.
    ///
    /// # Errors
    /// Fails if the token contains characters a webhook token cannot have.
    pub fn from_parts(id: u64, token: &str) -> Result<Self> {
        validate::generic_token(token).context("Invalid WebHook token")?;
        let url = format!("https://discord.com/api/webhooks/{id}/{token}");
        Self::new(url)
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Builds a fresh [`Message`] with `configure` and sends it.
    ///
    /// # Errors
    /// See [`WebhookClient::send_message`].
    pub fn send<F>(&self, configure: F) -> Result<Response>
    where
        F: FnOnce(&mut Message),
    {
        self.send_message(&Message::build(configure))
    }

    /// Sends exactly one POST request carrying the message as JSON.
    ///
    /// The response is returned for any HTTP status; a non-success status is only logged.
    /// Nothing is retried.
    ///
    /// # Errors
    /// * The message is invalid (see [`Message::check`]); nothing is sent in that case
    /// * The request could not be sent or no response arrived
    pub fn send_message(&self, message: &Message) -> Result<Response> {
        let body: String = message.to_json()?;
        // The path carries the webhook token, so only the host is logged.
        let host: &str = self.url.host_str().unwrap_or_default();
        log::debug!("Sending message ({} bytes) to {host}", body.len());

        let resp: Response = self
            .http_client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .with_context(|| format!("Could not send POST request to {host}"))?;

        let status = resp.status();
        if status.is_success() {
            log::debug!("Webhook responded with status {status}");
        } else {
            log::warn!("Webhook responded with status {status}");
        }
        Ok(resp)
    }
}
