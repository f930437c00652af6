//! The contact form as seen from the page: field values, the submit
//! control's in-flight state, and the notification shown afterwards.

mod client;
mod controller;

pub use client::{ContactApiClient, ContactFields, ContactTransport, SubmitError};
pub use controller::{FormController, InFlightGuard, Notification};

pub const SUCCESS_NOTICE: &str = "Message sent successfully!";
pub const FAILURE_FALLBACK: &str = "Failed to send message. Please try again.";
pub const SUBMIT_LABEL: &str = "Send Message";
pub const SENDING_LABEL: &str = "Sending...";
