use serde_json::Value;

/// The four fields of a contact-form submission, all present and non-empty.
///
/// Only lives for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("the request body is not a JSON object that fields can be read from")]
    MalformedBody,
    #[error("required field `{0}` is missing or empty")]
    MissingField(&'static str),
    #[error("field `{0}` holds a value that cannot be rendered as text")]
    UnrenderableField(&'static str),
    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),
}

const FIELDS: [&str; 4] = ["name", "email", "subject", "message"];

impl ContactSubmission {
    /// Read the submission out of a decoded request body.
    ///
    /// `None` and JSON `null` cannot be destructured at all and are reported
    /// as [`SubmissionError::MalformedBody`]. Any other non-object value has
    /// no fields, so the first field is reported missing.
    ///
    /// A field is missing when it is absent or falsy (`null`, `false`, `0`,
    /// `""`). Truthy numbers and `true` are used in their text form for
    /// `name`, `email` and `subject`. The message must be a string because
    /// its line breaks are rewritten.
    pub fn parse(body: Option<&Value>) -> Result<Self, SubmissionError> {
        let fields = match body {
            None | Some(Value::Null) => return Err(SubmissionError::MalformedBody),
            Some(Value::Object(fields)) => Some(fields),
            Some(_) => None,
        };
        let get = |key: &str| fields.and_then(|fields| fields.get(key));

        if let Some(missing) = FIELDS
            .into_iter()
            .find(|&key| get(key).map_or(true, is_falsy))
        {
            return Err(SubmissionError::MissingField(missing));
        }

        let text = |key: &'static str| {
            get(key)
                .and_then(scalar_text)
                .ok_or(SubmissionError::UnrenderableField(key))
        };
        let message = match get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => return Err(SubmissionError::UnrenderableField("message")),
        };

        Ok(Self {
            name: text("name")?,
            email: text("email")?,
            subject: text("subject")?,
            message,
        })
    }

    /// Reject addresses that `validator` does not consider well-formed.
    pub fn ensure_valid_email(&self) -> Result<(), SubmissionError> {
        if validator::validate_email(self.email.as_str()) {
            Ok(())
        } else {
            Err(SubmissionError::InvalidEmail(self.email.clone()))
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
