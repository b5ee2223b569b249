//! Appointment lifecycle service for Carebook.
//!
//! This crate owns the business rules around appointment mutation: email
//! format validation, ownership checks, confirmation-gated deletion with a
//! mandatory reason, and best-effort notification dispatch. It sits directly
//! on the `carebook-store` abstraction and never retains its own copies of
//! appointment state.

mod email;
mod notify;
mod service;
mod templates;

/// Email format validation.
pub use email::is_valid_email;
/// Mailer seam and message types.
pub use notify::{EmailMessage, Mailer, NotifyError, NullMailer};
/// Lifecycle service and operation outcomes.
pub use service::{CancelOutcome, CreateOutcome, SchedulingService, UpdateOutcome};

/// Store interface, re-exported so callers of [`SchedulingService::store`]
/// can use the handle without a direct store dependency.
pub use carebook_store::AppointmentStore;
