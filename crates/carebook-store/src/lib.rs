//! Appointment records and store abstraction for Carebook.
//!
//! This crate owns the appointment data model, the cancellation audit log,
//! and the `AppointmentStore` trait with its default in-memory
//! implementation. No business rules live here beyond existence checks.

mod error;
mod model;
mod store;

/// Store error type.
pub use error::StoreError;
/// Appointment record model and partial-update type.
pub use model::{Appointment, AppointmentPatch, AppointmentStatus, CancellationRecord};
/// Store interface and default in-memory implementation.
pub use store::{AppointmentStore, MemoryAppointmentStore};
