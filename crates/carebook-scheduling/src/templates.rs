//! Notification message templates.

use crate::notify::EmailMessage;
use carebook_store::Appointment;

/// Date rendering used in email bodies, e.g. `Saturday, March 01, 2025`.
const DATE_FORMAT: &str = "%A, %B %d, %Y";
/// Time rendering used in email bodies, e.g. `10:00 AM`.
const TIME_FORMAT: &str = "%I:%M %p";

/// Confirmation email sent after a successful booking.
pub fn confirmation(appointment: &Appointment, to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Appointment Confirmation".to_string(),
        body: format!(
            "Dear Patient,\n\
             Your appointment has been confirmed:\n\
             Date: {date}\n\
             Time: {time}\n\
             Purpose: {purpose}\n\
             Appointment ID: {id}\n\
             If you need to reschedule or cancel, please contact us with your appointment ID.\n\
             Thank you,\n\
             Health Assistant Team\n",
            date = appointment.date_time.format(DATE_FORMAT),
            time = appointment.date_time.format(TIME_FORMAT),
            purpose = appointment.purpose,
            id = appointment.id,
        ),
    }
}

/// Notification sent after an appointment changed.
pub fn update_notice(appointment: &Appointment, to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Appointment Update Notification".to_string(),
        body: format!(
            "Dear Patient,\n\
             Your appointment has been updated:\n\
             Date: {date}\n\
             Time: {time}\n\
             Purpose: {purpose}\n\
             Appointment ID: {id}\n\
             If you need to make further changes, please contact us with your appointment ID.\n\
             Thank you,\n\
             Health Assistant Team\n",
            date = appointment.date_time.format(DATE_FORMAT),
            time = appointment.date_time.format(TIME_FORMAT),
            purpose = appointment.purpose,
            id = appointment.id,
        ),
    }
}

/// Notification sent after a confirmed cancellation.
pub fn cancellation_notice(appointment: &Appointment, reason: &str, to: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Appointment Cancellation Confirmation".to_string(),
        body: format!(
            "Dear Patient,\n\
             Your appointment has been cancelled:\n\
             Date: {date}\n\
             Time: {time}\n\
             Purpose: {purpose}\n\
             Reason for cancellation: {reason}\n\
             If you wish to reschedule, please contact us.\n\
             Thank you,\n\
             Health Assistant Team\n",
            date = appointment.date_time.format(DATE_FORMAT),
            time = appointment.date_time.format(TIME_FORMAT),
            purpose = appointment.purpose,
        ),
    }
}
