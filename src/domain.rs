mod contact_submission;
mod outgoing_email;

pub use contact_submission::{ContactSubmission, SubmissionError};
pub use outgoing_email::OutgoingEmail;
