//! Lifecycle error taxonomy and notification outcomes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an appointment.
pub type AppointmentId = Uuid;

/// Errors returned by appointment lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// Referenced appointment id does not exist.
    #[error("appointment not found: {0}")]
    NotFound(AppointmentId),
    /// Caller is not the owning user of the appointment.
    #[error("user {caller} does not own appointment {id}")]
    Forbidden {
        /// Appointment being acted on.
        id: AppointmentId,
        /// User id that attempted the operation.
        caller: String,
    },
    /// Supplied email failed format validation.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
    /// Deletion attempted without an affirmative confirmation flag.
    /// A normal abort requiring a follow-up turn, not a system failure.
    #[error("cancellation requires confirmation")]
    ConfirmationRequired(AppointmentId),
    /// Deletion attempted with an empty or missing reason.
    #[error("cancellation requires a reason")]
    ReasonRequired(AppointmentId),
    /// The backing store reported a failure.
    #[error("store error: {0}")]
    Store(String),
}

/// Outcome of a best-effort notification dispatch.
///
/// Notification failure never fails the lifecycle operation that triggered
/// it; the status is carried alongside the successful outcome instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status", content = "to")]
pub enum NotificationStatus {
    /// Notification was handed to the mailer successfully.
    Sent(String),
    /// The mailer reported a failure; logged only.
    Failed(String),
    /// No contact email on file, nothing dispatched.
    NotOnFile,
}

impl NotificationStatus {
    /// Whether a notification reached the mailer.
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationStatus::Sent(_))
    }
}
