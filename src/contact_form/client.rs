use async_trait::async_trait;
use reqwest::Client;

use crate::contact_form::FAILURE_FALLBACK;

/// Raw values of the four form controls. They may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("the contact endpoint answered with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("failed to reach the contact endpoint")]
    Transport(#[source] reqwest::Error),

    #[error("the contact endpoint sent a malformed response")]
    MalformedResponse(#[source] reqwest::Error),
}

impl SubmitError {
    /// Text for the failure notification.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Rejected { message, .. } => message.clone().unwrap_or_default(),
            Self::Transport(e) | Self::MalformedResponse(e) => e.to_string(),
        };

        if message.trim().is_empty() {
            FAILURE_FALLBACK.to_string()
        } else {
            message
        }
    }
}

#[async_trait]
pub trait ContactTransport: Send + Sync {
    async fn send(&self, fields: &ContactFields) -> Result<(), SubmitError>;
}

#[derive(serde::Deserialize)]
struct ApiMessage {
    message: Option<String>,
}

/// Posts the form to `{base_url}/api/send-email`.
pub struct ContactApiClient {
    http_client: Client,
    endpoint: String,
}

impl ContactApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: format!(
                "{}/api/send-email",
                base_url.trim_end_matches('/')
            ),
        }
    }
}

#[async_trait]
impl ContactTransport for ContactApiClient {
    #[tracing::instrument(name = "posting contact form", skip(self, fields))]
    async fn send(&self, fields: &ContactFields) -> Result<(), SubmitError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(fields)
            .send()
            .await
            .map_err(SubmitError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiMessage>()
                .await
                .ok()
                .and_then(|body| body.message);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<ApiMessage>()
            .await
            .map_err(SubmitError::MalformedResponse)?;

        Ok(())
    }
}
