//! Mailer seam for appointment notifications.

use async_trait::async_trait;
use log::debug;

/// A rendered notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

/// Errors returned by mailer implementations.
///
/// Delivery failure is a normal, inspectable outcome for callers; the
/// lifecycle service logs it and carries on.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The mail backend rejected or failed the delivery.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Email delivery collaborator.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver a single message.
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError>;
}

/// Mailer that records nothing and always succeeds.
///
/// Default wiring for embedders that have no delivery backend configured.
#[derive(Debug, Default, Clone)]
pub struct NullMailer;

#[async_trait]
impl Mailer for NullMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotifyError> {
        debug!(
            "discarding notification (to={}, subject={})",
            message.to, message.subject
        );
        Ok(())
    }
}
