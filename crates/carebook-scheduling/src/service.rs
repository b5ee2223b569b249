//! Lifecycle service enforcing business rules over the appointment store.

use crate::email::is_valid_email;
use crate::notify::{EmailMessage, Mailer};
use crate::templates;
use carebook_protocol::{AppointmentId, LifecycleError, NotificationStatus};
use carebook_store::{Appointment, AppointmentPatch, AppointmentStore};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::sync::Arc;

/// Outcome of a successful booking.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    /// The newly created appointment.
    pub appointment: Appointment,
    /// Confirmation notification status.
    pub notification: NotificationStatus,
}

/// Outcome of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateOutcome {
    /// The appointment after the patch was applied.
    pub appointment: Appointment,
    /// Names of the fields the patch carried.
    pub changed: Vec<&'static str>,
    /// Update notification status.
    pub notification: NotificationStatus,
}

/// Outcome of a confirmed cancellation.
#[derive(Debug, Clone)]
pub struct CancelOutcome {
    /// Snapshot of the appointment as it was before deletion.
    pub appointment: Appointment,
    /// The recorded cancellation reason.
    pub reason: String,
    /// Cancellation notification status.
    pub notification: NotificationStatus,
}

/// Appointment lifecycle service.
///
/// Wraps an [`AppointmentStore`] with validation (email format, ownership,
/// confirmation-before-delete, mandatory cancellation reason) and drives
/// notification side effects through the [`Mailer`] seam. Notification
/// failure never fails or rolls back a lifecycle operation.
pub struct SchedulingService {
    /// Backing store; the service never retains appointment copies.
    store: Arc<dyn AppointmentStore>,
    /// Best-effort notification collaborator.
    mailer: Arc<dyn Mailer>,
}

impl SchedulingService {
    /// Create a service over the given store and mailer.
    pub fn new(store: Arc<dyn AppointmentStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self { store, mailer }
    }

    /// Shared handle to the backing store.
    pub fn store(&self) -> Arc<dyn AppointmentStore> {
        self.store.clone()
    }

    /// Book a new appointment.
    ///
    /// Validates the email format before touching the store; when an email
    /// is supplied, a confirmation notification is dispatched after the
    /// record is created.
    pub async fn create(
        &self,
        user_id: &str,
        date_time: NaiveDateTime,
        purpose: &str,
        email: Option<String>,
    ) -> Result<CreateOutcome, LifecycleError> {
        if let Some(address) = &email
            && !is_valid_email(address)
        {
            return Err(LifecycleError::InvalidEmail(address.clone()));
        }

        let appointment = self
            .store
            .create(user_id, date_time, purpose, email)
            .map_err(|err| LifecycleError::Store(err.to_string()))?;
        info!(
            "booked appointment (appointment_id={}, user_id={})",
            appointment.id, user_id
        );

        let notification = match appointment.email.clone() {
            Some(to) => {
                self.dispatch(templates::confirmation(&appointment, &to))
                    .await
            }
            None => NotificationStatus::NotOnFile,
        };
        Ok(CreateOutcome {
            appointment,
            notification,
        })
    }

    /// Apply a partial update to an owned appointment.
    ///
    /// Existence, ownership, and email format are checked in that order;
    /// only the fields present in the patch are applied. If any email is on
    /// file afterwards (new or pre-existing) an update notification is
    /// dispatched.
    pub async fn update(
        &self,
        caller: &str,
        id: AppointmentId,
        patch: &AppointmentPatch,
    ) -> Result<UpdateOutcome, LifecycleError> {
        let existing = self.require_owned(caller, id)?;
        if let Some(address) = &patch.email
            && !is_valid_email(address)
        {
            return Err(LifecycleError::InvalidEmail(address.clone()));
        }

        let appointment = self
            .store
            .update(id, patch)
            .map_err(|err| LifecycleError::Store(err.to_string()))?
            .ok_or(LifecycleError::NotFound(id))?;
        info!(
            "updated appointment (appointment_id={}, user_id={}, fields={:?})",
            id,
            caller,
            patch.field_names()
        );

        // Prefer the freshly supplied address over the one already on file.
        let notification = match patch.email.clone().or(existing.email) {
            Some(to) => self.dispatch(templates::update_notice(&appointment, &to)).await,
            None => NotificationStatus::NotOnFile,
        };
        Ok(UpdateOutcome {
            appointment,
            changed: patch.field_names(),
            notification,
        })
    }

    /// Cancel an owned appointment.
    ///
    /// Gated on existence, ownership, an affirmative confirmation flag, and
    /// a non-blank reason. On success the reason is logged, the record
    /// deleted, and a cancellation notification dispatched when an email was
    /// on file.
    pub async fn cancel(
        &self,
        caller: &str,
        id: AppointmentId,
        confirmed: bool,
        reason: &str,
    ) -> Result<CancelOutcome, LifecycleError> {
        let appointment = self.require_owned(caller, id)?;
        if !confirmed {
            debug!("cancellation aborted, unconfirmed (appointment_id={id})");
            return Err(LifecycleError::ConfirmationRequired(id));
        }
        if reason.trim().is_empty() {
            return Err(LifecycleError::ReasonRequired(id));
        }

        self.store
            .log_cancellation(id, reason)
            .map_err(|err| LifecycleError::Store(err.to_string()))?;
        let deleted = self
            .store
            .delete(id)
            .map_err(|err| LifecycleError::Store(err.to_string()))?;
        if !deleted {
            // Cancellation records are append-only audit entries, so the
            // one just written is kept even though the delete missed.
            warn!("cancellation logged for a missing appointment (appointment_id={id})");
            return Err(LifecycleError::NotFound(id));
        }
        info!(
            "cancelled appointment (appointment_id={}, user_id={})",
            id, caller
        );

        let notification = match appointment.email.clone() {
            Some(to) => {
                self.dispatch(templates::cancellation_notice(&appointment, reason, &to))
                    .await
            }
            None => NotificationStatus::NotOnFile,
        };
        Ok(CancelOutcome {
            appointment,
            reason: reason.to_string(),
            notification,
        })
    }

    /// List appointments owned by a user, in store order.
    pub fn list(&self, user_id: &str) -> Result<Vec<Appointment>, LifecycleError> {
        self.store
            .list_by_user(user_id)
            .map_err(|err| LifecycleError::Store(err.to_string()))
    }

    /// Fetch an appointment and verify the caller owns it.
    fn require_owned(
        &self,
        caller: &str,
        id: AppointmentId,
    ) -> Result<Appointment, LifecycleError> {
        let appointment = self
            .store
            .get(id)
            .map_err(|err| LifecycleError::Store(err.to_string()))?
            .ok_or(LifecycleError::NotFound(id))?;
        if appointment.user_id != caller {
            return Err(LifecycleError::Forbidden {
                id,
                caller: caller.to_string(),
            });
        }
        Ok(appointment)
    }

    /// Hand a message to the mailer, reducing failure to a logged status.
    async fn dispatch(&self, message: EmailMessage) -> NotificationStatus {
        let to = message.to.clone();
        match self.mailer.send(&message).await {
            Ok(()) => {
                debug!("notification sent (to={}, subject={})", to, message.subject);
                NotificationStatus::Sent(to)
            }
            Err(err) => {
                warn!("notification failed (to={}): {}", to, err);
                NotificationStatus::Failed(to)
            }
        }
    }
}
