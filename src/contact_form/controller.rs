use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::contact_form::{
    ContactFields, ContactTransport, SENDING_LABEL, SUBMIT_LABEL, SUCCESS_NOTICE,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Failure(String),
}

/// Holds the in-flight flag for as long as it lives.
pub struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    pub fn acquire(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self { flag }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

pub struct FormController<T> {
    transport: T,
    fields: ContactFields,
    in_flight: Arc<AtomicBool>,
}

impl<T: ContactTransport> FormController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_in_flight_flag(transport, Arc::new(AtomicBool::new(false)))
    }

    /// Share `in_flight` with whatever renders the submit control.
    pub fn with_in_flight_flag(transport: T, in_flight: Arc<AtomicBool>) -> Self {
        Self {
            transport,
            fields: ContactFields::default(),
            in_flight,
        }
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut ContactFields {
        &mut self.fields
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The submit control is disabled while this is true.
    pub fn in_flight_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.in_flight)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_in_flight() {
            SENDING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Send the current field values once. Fields are cleared on success
    /// only, so a failed attempt can be resubmitted as is.
    #[tracing::instrument(name = "submitting contact form", skip(self))]
    pub async fn submit(&mut self) -> Notification {
        let _in_flight = InFlightGuard::acquire(&self.in_flight);

        match self.transport.send(&self.fields).await {
            Ok(()) => {
                self.fields.clear();
                Notification::Success(SUCCESS_NOTICE.to_string())
            }
            Err(e) => {
                tracing::warn!(
                    error.message = %e,
                    "contact form submission failed"
                );
                Notification::Failure(e.user_message())
            }
        }
    }
}
