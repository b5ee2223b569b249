//! Store interface and default in-memory implementation.

use crate::error::StoreError;
use crate::model::{Appointment, AppointmentPatch, AppointmentStatus, CancellationRecord};
use carebook_protocol::AppointmentId;
use chrono::{NaiveDateTime, Utc};
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// CRUD primitives over appointments plus the cancellation audit log.
///
/// Implementations perform no validation beyond existence checks; business
/// rules live in the scheduling service.
pub trait AppointmentStore: Send + Sync {
    /// Create an appointment with a fresh unique id.
    fn create(
        &self,
        user_id: &str,
        date_time: NaiveDateTime,
        purpose: &str,
        email: Option<String>,
    ) -> Result<Appointment, StoreError>;

    /// Fetch an appointment by id.
    fn get(&self, id: AppointmentId) -> Result<Option<Appointment>, StoreError>;

    /// Apply a partial update; returns the updated record, or `None` when
    /// the id does not exist.
    fn update(
        &self,
        id: AppointmentId,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, StoreError>;

    /// Delete an appointment; returns whether the id existed.
    fn delete(&self, id: AppointmentId) -> Result<bool, StoreError>;

    /// List appointments owned by a user, in insertion order.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Appointment>, StoreError>;

    /// Record a cancellation reason for an id, last-write-wins.
    ///
    /// Does not verify the appointment exists; callers are responsible for
    /// ordering this before the delete.
    fn log_cancellation(&self, id: AppointmentId, reason: &str) -> Result<(), StoreError>;

    /// Read the cancellation record for an id, if any.
    fn cancellation(&self, id: AppointmentId) -> Result<Option<CancellationRecord>, StoreError>;
}

/// In-memory appointment store backed by hash maps.
///
/// Insertion order of appointments is preserved for `list_by_user`.
#[derive(Default)]
pub struct MemoryAppointmentStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    /// Appointments keyed by id.
    appointments: HashMap<AppointmentId, Appointment>,
    /// Creation order of ids, pruned on delete.
    order: Vec<AppointmentId>,
    /// Cancellation audit log keyed by appointment id. Never pruned.
    cancellations: HashMap<AppointmentId, CancellationRecord>,
}

impl MemoryAppointmentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AppointmentStore for MemoryAppointmentStore {
    fn create(
        &self,
        user_id: &str,
        date_time: NaiveDateTime,
        purpose: &str,
        email: Option<String>,
    ) -> Result<Appointment, StoreError> {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            date_time,
            purpose: purpose.to_string(),
            status: AppointmentStatus::Scheduled,
            email,
        };
        info!(
            "created appointment (appointment_id={}, user_id={})",
            appointment.id, user_id
        );
        let mut inner = self.inner.write();
        inner.order.push(appointment.id);
        inner.appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    fn get(&self, id: AppointmentId) -> Result<Option<Appointment>, StoreError> {
        Ok(self.inner.read().appointments.get(&id).cloned())
    }

    fn update(
        &self,
        id: AppointmentId,
        patch: &AppointmentPatch,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut inner = self.inner.write();
        let Some(appointment) = inner.appointments.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(date_time) = patch.date_time {
            appointment.date_time = date_time;
        }
        if let Some(purpose) = &patch.purpose {
            appointment.purpose = purpose.clone();
        }
        if let Some(email) = &patch.email {
            appointment.email = Some(email.clone());
        }
        debug!(
            "updated appointment (appointment_id={}, fields={:?})",
            id,
            patch.field_names()
        );
        Ok(Some(appointment.clone()))
    }

    fn delete(&self, id: AppointmentId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write();
        let existed = inner.appointments.remove(&id).is_some();
        if existed {
            inner.order.retain(|entry| *entry != id);
            info!("deleted appointment (appointment_id={})", id);
        }
        Ok(existed)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Appointment>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.appointments.get(id))
            .filter(|appointment| appointment.user_id == user_id)
            .cloned()
            .collect())
    }

    fn log_cancellation(&self, id: AppointmentId, reason: &str) -> Result<(), StoreError> {
        debug!("logging cancellation (appointment_id={})", id);
        self.inner.write().cancellations.insert(
            id,
            CancellationRecord {
                reason: reason.to_string(),
                recorded_at: Utc::now(),
            },
        );
        Ok(())
    }

    fn cancellation(&self, id: AppointmentId) -> Result<Option<CancellationRecord>, StoreError> {
        Ok(self.inner.read().cancellations.get(&id).cloned())
    }
}
