//! Appointment record model used by stores.

use carebook_protocol::AppointmentId;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status recorded on an appointment.
///
/// `Scheduled` is the only state an appointment ever holds; deletion removes
/// the record outright rather than transitioning it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Created and awaiting its slot.
    Scheduled,
}

impl AppointmentStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
        }
    }
}

/// A scheduled appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique identifier, generated at creation and never reused.
    pub id: AppointmentId,
    /// Owning user; immutable after creation.
    pub user_id: String,
    /// Appointment slot, timezone-naive.
    pub date_time: NaiveDateTime,
    /// Free-text description of the visit.
    pub purpose: String,
    /// Lifecycle status.
    pub status: AppointmentStatus,
    /// Optional contact address for notifications.
    pub email: Option<String>,
}

/// Partial update for an appointment.
///
/// Only `Some` fields are applied; omitted fields are left untouched, never
/// cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentPatch {
    /// New appointment slot, if rescheduling.
    pub date_time: Option<NaiveDateTime>,
    /// New purpose text.
    pub purpose: Option<String>,
    /// New contact address.
    pub email: Option<String>,
}

impl AppointmentPatch {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.date_time.is_none() && self.purpose.is_none() && self.email.is_none()
    }

    /// Names of the fields carried by this patch, in declaration order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.date_time.is_some() {
            names.push("date_time");
        }
        if self.purpose.is_some() {
            names.push("purpose");
        }
        if self.email.is_some() {
            names.push("email");
        }
        names
    }
}

/// Audit record written when an appointment is cancelled.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CancellationRecord {
    /// Caller-supplied cancellation reason, non-empty.
    pub reason: String,
    /// When the record was written.
    pub recorded_at: DateTime<Utc>,
}
