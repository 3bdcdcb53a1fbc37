use thiserror::Error;

use crate::models::booking::EnquiryRequest;

#[derive(Debug, Error)]
#[error("failed to deliver enquiry: {0}")]
pub struct NotifyError(pub String);

/// Delivers booking enquiries to the property owner.
pub trait EnquiryNotifier: Send + Sync {
    fn notify(&self, enquiry: &EnquiryRequest) -> Result<(), NotifyError>;
}

/// Writes each enquiry to the application log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    recipient: Option<String>,
}

impl LogNotifier {
    pub fn new(recipient: Option<String>) -> Self {
        Self { recipient }
    }
}

impl EnquiryNotifier for LogNotifier {
    fn notify(&self, enquiry: &EnquiryRequest) -> Result<(), NotifyError> {
        log::info!(
            "new booking enquiry for {}: name={} email={} phone={} arrival={} departure={} message={}",
            self.recipient.as_deref().unwrap_or("owner"),
            enquiry.name,
            enquiry.email,
            enquiry.phone.as_deref().unwrap_or("N/A"),
            enquiry.checkin,
            enquiry.checkout,
            enquiry.message.as_deref().unwrap_or("N/A"),
        );
        Ok(())
    }
}
