use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use carebook_scheduling::{Mailer, NullMailer, SchedulingService};
use carebook_store::MemoryAppointmentStore;

/// A fixed, valid appointment slot.
pub fn slot() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 9, 14)
        .expect("valid date")
        .and_hms_opt(10, 30, 0)
        .expect("valid time")
}

/// Scheduling service over a fresh in-memory store and a null mailer.
pub fn scheduling_service() -> Arc<SchedulingService> {
    scheduling_service_with(Arc::new(NullMailer))
}

/// Scheduling service over a fresh in-memory store and the given mailer.
pub fn scheduling_service_with(mailer: Arc<dyn Mailer>) -> Arc<SchedulingService> {
    Arc::new(SchedulingService::new(
        Arc::new(MemoryAppointmentStore::new()),
        mailer,
    ))
}
