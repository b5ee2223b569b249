//! Handlers for `/appointments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/appointments` | Body: [`CreateAppointmentBody`]; returns 201 + stored appointment |
//! | `GET`    | `/appointments/:user_id` | All appointments for a user |
//! | `PUT`    | `/appointments/:appointment_id` | Body: [`UpdateAppointmentBody`]; caller `user_id` required |
//! | `DELETE` | `/appointments/:appointment_id` | `?user_id` required; optional `reason` |

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;

use carebook_protocol::AppointmentId;
use carebook_store::{Appointment, AppointmentPatch};

use crate::{AppState, error::ApiError};

/// Reason recorded when a DELETE request does not supply one.
const DEFAULT_CANCELLATION_REASON: &str = "User requested cancellation";

/// Wire representation of an appointment.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AppointmentResponse {
    pub id: AppointmentId,
    pub user_id: String,
    /// ISO datetime, seconds included.
    pub date_time: String,
    pub purpose: String,
    pub status: String,
    pub email: Option<String>,
}

impl From<Appointment> for AppointmentResponse {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id,
            user_id: appt.user_id,
            date_time: appt.date_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            purpose: appt.purpose,
            status: appt.status.as_str().to_string(),
            email: appt.email,
        }
    }
}

fn parse_date_time(text: &str) -> Result<NaiveDateTime, ApiError> {
    if let Ok(dt) = text.parse::<NaiveDateTime>() {
        return Ok(dt);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    Err(ApiError::BadRequest(format!(
        "date_time is not an ISO datetime: {text}"
    )))
}

/// JSON body accepted by `POST /appointments`.
#[derive(Debug, Deserialize)]
pub struct CreateAppointmentBody {
    pub user_id: String,
    /// ISO datetime string.
    pub date_time: String,
    pub purpose: String,
    pub email: Option<String>,
}

/// `POST /appointments` — returns 201 + the stored appointment.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateAppointmentBody>,
) -> Result<impl IntoResponse, ApiError> {
    let date_time = parse_date_time(&body.date_time)?;
    let outcome = state
        .scheduling
        .create(&body.user_id, date_time, &body.purpose, body.email)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse::from(outcome.appointment)),
    ))
}

/// `GET /appointments/:user_id`
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<AppointmentResponse>>, ApiError> {
    let appointments = state.scheduling.list(&user_id)?;
    Ok(Json(
        appointments
            .into_iter()
            .map(AppointmentResponse::from)
            .collect(),
    ))
}

/// JSON body accepted by `PUT /appointments/:appointment_id`.
#[derive(Debug, Deserialize)]
pub struct UpdateAppointmentBody {
    /// The caller; must own the appointment.
    pub user_id: String,
    pub date_time: Option<String>,
    pub purpose: Option<String>,
    pub email: Option<String>,
}

/// `PUT /appointments/:appointment_id`
pub async fn update(
    State(state): State<AppState>,
    Path(appointment_id): Path<AppointmentId>,
    Json(body): Json<UpdateAppointmentBody>,
) -> Result<Json<AppointmentResponse>, ApiError> {
    let date_time = match body.date_time.as_deref() {
        Some(text) => Some(parse_date_time(text)?),
        None => None,
    };
    let patch = AppointmentPatch {
        date_time,
        purpose: body.purpose,
        email: body.email,
    };
    let outcome = state
        .scheduling
        .update(&body.user_id, appointment_id, &patch)
        .await?;
    Ok(Json(AppointmentResponse::from(outcome.appointment)))
}

/// Query accepted by `DELETE /appointments/:appointment_id`.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    /// The caller; must own the appointment.
    pub user_id: String,
    /// Recorded cancellation reason.
    pub reason: Option<String>,
}

/// `DELETE /appointments/:appointment_id` — the method itself carries the
/// confirmation.
pub async fn delete(
    State(state): State<AppState>,
    Path(appointment_id): Path<AppointmentId>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let reason = params
        .reason
        .unwrap_or_else(|| DEFAULT_CANCELLATION_REASON.to_string());
    state
        .scheduling
        .cancel(&params.user_id, appointment_id, true, &reason)
        .await?;
    Ok(Json(json!({ "message": "Appointment deleted successfully" })))
}
