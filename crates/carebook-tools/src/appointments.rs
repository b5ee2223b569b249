//! Appointment lifecycle tools.
//!
//! Four tools wrap the [`SchedulingService`] for the conversational
//! interpreter: `create_appointment`, `update_appointment`,
//! `delete_appointment`, and `list_appointments`. Lifecycle rule violations
//! are translated into user-facing text rather than errors, so the
//! interpreter can relay them verbatim.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{Value, json};

use carebook_protocol::{AppointmentId, LifecycleError, NotificationStatus, ToolError};
use carebook_scheduling::SchedulingService;
use carebook_store::{Appointment, AppointmentPatch};

use crate::context::ToolContext;
use crate::registry::ToolRegistry;
use crate::tool::{Tool, parse_args};

/// Format used when echoing appointment slots back to the user.
const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Build a registry holding the four appointment tools.
pub fn appointment_tool_registry(service: Arc<SchedulingService>) -> ToolRegistry {
    let registry = ToolRegistry::new();
    registry.register(Arc::new(CreateAppointmentTool::new(service.clone())));
    registry.register(Arc::new(UpdateAppointmentTool::new(service.clone())));
    registry.register(Arc::new(DeleteAppointmentTool::new(service.clone())));
    registry.register(Arc::new(ListAppointmentsTool::new(service)));
    registry
}

/// Parse an ISO-style datetime argument, accepting `T` or space separators
/// and an optional seconds component.
fn parse_date_time(text: &str) -> Result<NaiveDateTime, ToolError> {
    if let Ok(dt) = text.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    Err(ToolError::InvalidArguments(format!(
        "date_time is not an ISO datetime: {text}"
    )))
}

/// Render a lifecycle failure as the text shown to the user.
///
/// `verb` is the attempted action ("update", "delete") and `gerund` its
/// progressive form used in store error messages.
fn render_error(err: LifecycleError, verb: &str, gerund: &str) -> String {
    match err {
        LifecycleError::NotFound(_) => "Appointment not found".to_string(),
        LifecycleError::Forbidden { .. } => {
            format!("You don't have permission to {verb} this appointment.")
        }
        LifecycleError::InvalidEmail(_) => {
            "Invalid email format. Please provide a valid email address.".to_string()
        }
        LifecycleError::ConfirmationRequired(_) => {
            "Cancellation aborted: Confirmation was negative".to_string()
        }
        LifecycleError::ReasonRequired(_) => {
            "Cancellation requires a reason. Please provide a reason for cancelling this appointment."
                .to_string()
        }
        LifecycleError::Store(msg) => format!("Error {gerund} appointment: {msg}"),
    }
}

/// Trailing sentence describing what happened to a notification.
fn notification_suffix(status: &NotificationStatus, kind: &str) -> String {
    match status {
        NotificationStatus::Sent(to) => format!(" {kind} sent to {to}."),
        NotificationStatus::Failed(to) => format!(" {kind} to {to} could not be delivered."),
        NotificationStatus::NotOnFile => String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct CreateArgs {
    /// Appointment datetime in ISO format.
    date_time: String,
    purpose: String,
    email: String,
}

/// Books a new appointment for the session's user.
pub struct CreateAppointmentTool {
    service: Arc<SchedulingService>,
}

impl CreateAppointmentTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for CreateAppointmentTool {
    fn name(&self) -> &str {
        "create_appointment"
    }

    fn description(&self) -> &str {
        "Create new appointment. Parameters: date_time (ISO format), purpose, email"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "date_time": {
                    "type": "string",
                    "description": "Appointment datetime in ISO format"
                },
                "purpose": { "type": "string" },
                "email": { "type": "string" }
            },
            "required": ["date_time", "purpose", "email"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
        let args: CreateArgs = parse_args(args)?;
        let date_time = parse_date_time(&args.date_time)?;

        match self
            .service
            .create(&ctx.user_id, date_time, &args.purpose, Some(args.email))
            .await
        {
            Ok(outcome) => Ok(format!(
                "Appointment created: {} - {} (ID: {}).{}",
                outcome.appointment.date_time.format(SLOT_FORMAT),
                outcome.appointment.purpose,
                outcome.appointment.id,
                notification_suffix(&outcome.notification, "Confirmation email")
            )),
            Err(err) => Ok(render_error(err, "create", "creating")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    appointment_id: AppointmentId,
    #[serde(default)]
    date_time: Option<String>,
    #[serde(default)]
    purpose: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Applies a partial update to an appointment the session's user owns.
pub struct UpdateAppointmentTool {
    service: Arc<SchedulingService>,
}

impl UpdateAppointmentTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for UpdateAppointmentTool {
    fn name(&self) -> &str {
        "update_appointment"
    }

    fn description(&self) -> &str {
        "Update existing appointment. Parameters: appointment_id, date_time (optional ISO), purpose (optional), email (optional)"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "appointment_id": { "type": "string" },
                "date_time": {
                    "type": "string",
                    "description": "New datetime in ISO format"
                },
                "purpose": { "type": "string" },
                "email": { "type": "string" }
            },
            "required": ["appointment_id"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
        let args: UpdateArgs = parse_args(args)?;
        let date_time = match args.date_time.as_deref() {
            Some(text) => Some(parse_date_time(text)?),
            None => None,
        };
        let patch = AppointmentPatch {
            date_time,
            purpose: args.purpose,
            email: args.email,
        };
        if patch.is_empty() {
            return Ok("No changes were requested.".to_string());
        }

        match self
            .service
            .update(&ctx.user_id, args.appointment_id, &patch)
            .await
        {
            Ok(outcome) => Ok(format!(
                "Updated appointment {} (changed: {}).{}",
                args.appointment_id,
                outcome.changed.join(", "),
                notification_suffix(&outcome.notification, "Update notification")
            )),
            Err(err) => Ok(render_error(err, "update", "updating")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DeleteArgs {
    appointment_id: AppointmentId,
    confirmation: bool,
    #[serde(default)]
    reason: String,
}

/// Cancels an appointment after confirmation, recording the reason.
pub struct DeleteAppointmentTool {
    service: Arc<SchedulingService>,
}

impl DeleteAppointmentTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for DeleteAppointmentTool {
    fn name(&self) -> &str {
        "delete_appointment"
    }

    fn description(&self) -> &str {
        "Delete appointment. Parameters: appointment_id, confirmation (true/false), reason"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "appointment_id": { "type": "string" },
                "confirmation": {
                    "type": "boolean",
                    "description": "Whether the user confirmed the cancellation"
                },
                "reason": { "type": "string" }
            },
            "required": ["appointment_id", "confirmation", "reason"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
        let args: DeleteArgs = parse_args(args)?;

        match self
            .service
            .cancel(
                &ctx.user_id,
                args.appointment_id,
                args.confirmation,
                &args.reason,
            )
            .await
        {
            Ok(outcome) => Ok(format!(
                "Appointment cancelled: {} - {}\nReason: {}{}",
                outcome.appointment.date_time.format(SLOT_FORMAT),
                outcome.appointment.purpose,
                outcome.reason,
                match &outcome.notification {
                    NotificationStatus::NotOnFile => String::new(),
                    status => format!("\n{}", notification_suffix(status, "Cancellation notification").trim_start()),
                }
            )),
            Err(err) => Ok(render_error(err, "delete", "deleting")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListArgs {
    /// Accepted for schema compatibility; the session binding wins.
    #[serde(default)]
    #[allow(dead_code)]
    user_id: Option<String>,
}

/// Lists the session user's appointments in booking order.
pub struct ListAppointmentsTool {
    service: Arc<SchedulingService>,
}

impl ListAppointmentsTool {
    pub fn new(service: Arc<SchedulingService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl Tool for ListAppointmentsTool {
    fn name(&self) -> &str {
        "list_appointments"
    }

    fn description(&self) -> &str {
        "List all appointments for a user. Requires: user_id"
    }

    fn args_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "user_id": {
                    "type": "string",
                    "description": "User ID to list appointments for"
                }
            },
            "required": ["user_id"]
        })
    }

    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<String, ToolError> {
        let _args: ListArgs = parse_args(args)?;

        match self.service.list(&ctx.user_id) {
            Ok(appointments) => Ok(render_appointments(&appointments)),
            Err(err) => Ok(match err {
                LifecycleError::Store(msg) => format!("Error retrieving appointments: {msg}"),
                other => render_error(other, "list", "listing"),
            }),
        }
    }
}

fn render_appointments(appointments: &[Appointment]) -> String {
    if appointments.is_empty() {
        return "No appointments found".to_string();
    }
    let lines: Vec<String> = appointments
        .iter()
        .map(|appt| {
            format!(
                "- {}: {} (ID: {})",
                appt.date_time.format(SLOT_FORMAT),
                appt.purpose,
                appt.id
            )
        })
        .collect();
    format!("Your appointments:\n{}", lines.join("\n"))
}
