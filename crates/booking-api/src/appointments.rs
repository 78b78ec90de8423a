//! Handlers for `/appointments` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/appointments` | All appointments, earliest `start_time` first |
//! | `POST` | `/appointments` | Body: [`AppointmentSubmission`]; returns 201 + stored appointment |
//! | `GET`  | `/appointments/by-date` | `?date=YYYY-MM-DD`; start/end pairs for that day |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use booking_core::{
  appointment::{Appointment, AppointmentSubmission},
  store::AppointmentStore,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /appointments`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Appointment>>, ApiError>
where
  S: AppointmentStore,
{
  let appointments = store.list_all().await.map_err(ApiError::store)?;
  Ok(Json(appointments))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /appointments` — returns 201 + the stored [`Appointment`].
///
/// Validation runs to completion before the store is touched.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  payload: Result<Json<AppointmentSubmission>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: AppointmentStore,
{
  let Json(submission) =
    payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

  let new = submission.validate().inspect_err(|e| {
    tracing::warn!(error = %e, "rejected appointment submission");
  })?;

  let appointment = store.create(new).await.map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(appointment)))
}

// ─── By date ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ByDateParams {
  /// Calendar day as `YYYY-MM-DD`.
  pub date: Option<String>,
}

/// The time range of one appointment, without patient details.
#[derive(Debug, Serialize)]
pub struct TimeSlot {
  pub start_time: NaiveDateTime,
  pub end_time:   NaiveDateTime,
}

/// `GET /appointments/by-date?date=YYYY-MM-DD`
pub async fn by_date<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ByDateParams>,
) -> Result<Json<Vec<TimeSlot>>, ApiError>
where
  S: AppointmentStore,
{
  let raw = params.date.ok_or_else(|| {
    ApiError::BadRequest("missing required 'date' query param (YYYY-MM-DD)".into())
  })?;
  let day = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
    ApiError::BadRequest("invalid date format. Use YYYY-MM-DD".into())
  })?;

  let slots = store
    .list_starting_on(day)
    .await
    .map_err(ApiError::store)?
    .into_iter()
    .map(|a| TimeSlot { start_time: a.start_time, end_time: a.end_time })
    .collect();
  Ok(Json(slots))
}
