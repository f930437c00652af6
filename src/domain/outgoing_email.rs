use crate::domain::ContactSubmission;

/// The provider send payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub reply_to: String,
    pub html: String,
}

impl OutgoingEmail {
    /// Address `submission` to the site owner. Replies go to the submitter.
    ///
    /// With `escape_html` off, user text is interpolated into the body as is.
    pub fn compose(
        submission: &ContactSubmission,
        sender: &str,
        recipient: &str,
        escape_html: bool,
    ) -> Self {
        Self {
            from: sender.to_string(),
            to: vec![recipient.to_string()],
            subject: format!(
                "New message from {}: {}",
                submission.name, submission.subject
            ),
            reply_to: submission.email.clone(),
            html: render_html(submission, escape_html),
        }
    }
}

fn render_html(submission: &ContactSubmission, escape_html: bool) -> String {
    let text = |s: &str| {
        if escape_html {
            htmlescape::encode_minimal(s)
        } else {
            s.to_string()
        }
    };
    let href = if escape_html {
        htmlescape::encode_attribute(&submission.email)
    } else {
        submission.email.clone()
    };

    let name = text(&submission.name);
    let email = text(&submission.email);
    let subject = text(&submission.subject);
    let message = text(&submission.message).replace('\n', "<br>");

    format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6;">
  <h2>New message from your portfolio</h2>
  <p><strong>From:</strong> {name}</p>
  <p><strong>Email:</strong> <a href="mailto:{href}">{email}</a></p>
  <p><strong>Subject:</strong> {subject}</p>
  <hr>
  <h3>Message:</h3>
  <p>{message}</p>
</div>"#
    )
}
