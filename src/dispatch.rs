use std::sync::Arc;

use serde_json::Value;

use crate::configuration::{EmailClientSettings, SubmissionSettings};
use crate::domain::{ContactSubmission, OutgoingEmail, SubmissionError};
use crate::email_client::{EmailProvider, ProviderError};

pub const SENT: &str = "Message sent successfully";
pub const FIELDS_REQUIRED: &str = "All fields are required";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const SEND_FAILED: &str = "Failed to send message";

/// An inbound request, independent of the server that received it.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub method: String,
    /// `None` when the body could not be decoded as JSON.
    pub body: Option<Value>,
}

impl DispatchRequest {
    pub fn new(method: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            method: method.into(),
            body,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    MethodNotAllowed,
    InternalServerError,
}

impl Status {
    pub fn as_u16(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::MethodNotAllowed => 405,
            Status::InternalServerError => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResponseBody {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResponse {
    pub status: Status,
    pub body: ResponseBody,
}

impl DispatchResponse {
    fn sent(data: Value) -> Self {
        Self {
            status: Status::Ok,
            body: ResponseBody {
                message: SENT,
                data: Some(data),
            },
        }
    }
}

impl From<&DispatchError> for DispatchResponse {
    fn from(e: &DispatchError) -> Self {
        Self {
            status: e.status(),
            body: ResponseBody {
                message: e.public_message(),
                data: None,
            },
        }
    }
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("method `{0}` is not allowed")]
    MethodNotAllowed(String),

    #[error(transparent)]
    InvalidSubmission(SubmissionError),

    #[error("the request body could not be destructured")]
    MalformedBody(#[source] SubmissionError),

    #[error("failed to send the contact email")]
    Provider(#[from] ProviderError),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<SubmissionError> for DispatchError {
    fn from(e: SubmissionError) -> Self {
        match e {
            SubmissionError::MalformedBody
            | SubmissionError::UnrenderableField(_) => Self::MalformedBody(e),
            e => Self::InvalidSubmission(e),
        }
    }
}

impl DispatchError {
    pub fn status(&self) -> Status {
        match self {
            Self::MethodNotAllowed(_) => Status::MethodNotAllowed,
            Self::InvalidSubmission(_) => Status::BadRequest,
            Self::MalformedBody(_) | Self::Provider(_) => {
                Status::InternalServerError
            }
        }
    }

    /// The only text the caller ever sees. Causes stay in the server log.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MethodNotAllowed(_) => METHOD_NOT_ALLOWED,
            Self::InvalidSubmission(SubmissionError::InvalidEmail(_)) => {
                INVALID_EMAIL
            }
            Self::InvalidSubmission(_) => FIELDS_REQUIRED,
            Self::MalformedBody(_) | Self::Provider(_) => SEND_FAILED,
        }
    }
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

/// Turns contact-form submissions into exactly one provider call each.
pub struct MailDispatchHandler {
    provider: Arc<dyn EmailProvider>,
    sender: String,
    recipient: String,
    submission: SubmissionSettings,
}

impl MailDispatchHandler {
    pub fn new(
        provider: Arc<dyn EmailProvider>,
        email_client: &EmailClientSettings,
        submission: SubmissionSettings,
    ) -> Self {
        Self {
            provider,
            sender: email_client.sender(),
            recipient: email_client.recipient_email.clone(),
            submission,
        }
    }

    #[tracing::instrument(
        name = "dispatching contact message",
        skip(self, request),
        fields(
            method = %request.method,
            submitter_name = tracing::field::Empty,
            submitter_email = tracing::field::Empty
        )
    )]
    pub async fn handle(&self, request: DispatchRequest) -> DispatchResponse {
        match self.dispatch(request).await {
            Ok(data) => DispatchResponse::sent(data),
            Err(e) => {
                if e.status() == Status::InternalServerError {
                    tracing::error!(
                        error.cause_chain = ?e,
                        error.message = %e,
                        "{}",
                        SEND_FAILED
                    );
                } else {
                    tracing::info!(
                        error.message = %e,
                        "contact submission rejected"
                    );
                }
                DispatchResponse::from(&e)
            }
        }
    }

    async fn dispatch(
        &self,
        request: DispatchRequest,
    ) -> Result<Value, DispatchError> {
        if request.method != "POST" {
            return Err(DispatchError::MethodNotAllowed(request.method));
        }

        let submission = ContactSubmission::parse(request.body.as_ref())?;
        if self.submission.validate_email_format {
            submission.ensure_valid_email()?;
        }
        tracing::Span::current()
            .record("submitter_name", submission.name.as_str())
            .record("submitter_email", submission.email.as_str());

        let email = OutgoingEmail::compose(
            &submission,
            &self.sender,
            &self.recipient,
            self.submission.escape_html,
        );

        Ok(self.provider.send(&email).await?)
    }
}
