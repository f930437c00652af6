use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::domain::OutgoingEmail;

#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("failed to reach the email provider")]
    Request(#[from] reqwest::Error),

    #[error("email provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Something that can hand an email over for delivery.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Returns the provider's response payload on success.
    async fn send(
        &self,
        email: &OutgoingEmail,
    ) -> Result<serde_json::Value, ProviderError>;
}

/// Client for the Resend HTTP API.
pub struct ResendClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl ResendClient {
    pub fn new(
        base_url: String,
        api_key: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url,
            api_key,
        })
    }
}

#[async_trait]
impl EmailProvider for ResendClient {
    #[tracing::instrument(
        name = "sending email through resend",
        skip(self, email),
        fields(reply_to = %email.reply_to)
    )]
    async fn send(
        &self,
        email: &OutgoingEmail,
    ) -> Result<serde_json::Value, ProviderError> {
        let url = format!("{}/emails", self.base_url.trim_end_matches('/'));

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body: rejection_body(response.text().await),
            });
        }

        let data = response.json::<serde_json::Value>().await?;
        tracing::info!("email accepted by the provider");

        Ok(data)
    }
}

/// The rejection text to keep, or why it could not be read.
fn rejection_body(body: Result<String, reqwest::Error>) -> String {
    match body {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(
                error.message = %e,
                "failed to read the provider's rejection body"
            );
            format!("<unreadable response body: {}>", e)
        }
    }
}
