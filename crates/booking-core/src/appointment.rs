//! Appointment types and the validation that turns a raw submission into a
//! storable record.
//!
//! Timestamps carry no timezone. Submissions that do specify an offset keep
//! their wall-clock time and the offset is dropped.

use chrono::{DateTime, Datelike as _, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Field, ValidationError};

// ─── Stored record ───────────────────────────────────────────────────────────

/// A booking as persisted by the store.
///
/// Invariant: `end_time > start_time` and `patient_name` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
  pub id:            i64,
  pub patient_name:  String,
  pub patient_phone: String,
  pub start_time:    NaiveDateTime,
  pub end_time:      NaiveDateTime,
  pub source:        Option<String>,
}

/// A validated appointment that has not been assigned an id yet.
///
/// Only obtainable through [`AppointmentSubmission::validate`] or
/// [`NewAppointment::new`], both of which enforce the record invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
  patient_name:  String,
  patient_phone: String,
  start_time:    NaiveDateTime,
  end_time:      NaiveDateTime,
  source:        Option<String>,
}

impl NewAppointment {
  /// Build a new appointment from already-typed values.
  pub fn new(
    patient_name:  impl Into<String>,
    patient_phone: impl Into<String>,
    start_time:    NaiveDateTime,
    end_time:      NaiveDateTime,
    source:        Option<String>,
  ) -> Result<Self, ValidationError> {
    let patient_name = required_text(Some(patient_name.into()), Field::PatientName)?;
    let patient_phone =
      required_text(Some(patient_phone.into()), Field::PatientPhone)?;
    if end_time <= start_time {
      return Err(ValidationError::InvalidRange);
    }
    Ok(Self { patient_name, patient_phone, start_time, end_time, source })
  }

  pub fn patient_name(&self) -> &str { &self.patient_name }

  pub fn patient_phone(&self) -> &str { &self.patient_phone }

  pub fn start_time(&self) -> NaiveDateTime { self.start_time }

  pub fn end_time(&self) -> NaiveDateTime { self.end_time }

  pub fn source(&self) -> Option<&str> { self.source.as_deref() }

  /// Attach the store-assigned id.
  pub fn into_appointment(self, id: i64) -> Appointment {
    Appointment {
      id,
      patient_name: self.patient_name,
      patient_phone: self.patient_phone,
      start_time: self.start_time,
      end_time: self.end_time,
      source: self.source,
    }
  }
}

// ─── Submission ──────────────────────────────────────────────────────────────

/// The payload accepted by `POST /appointments`.
///
/// Every field is optional at the decoding stage so that absence is reported
/// as a [`ValidationError::MissingField`] naming the field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentSubmission {
  pub patient_name:  Option<String>,
  pub patient_phone: Option<String>,
  pub start_time:    Option<String>,
  pub end_time:      Option<String>,
  pub source:        Option<String>,
}

impl AppointmentSubmission {
  /// Check presence, parse timestamps and enforce ordering.
  ///
  /// Required fields are checked in declaration order, so the first missing
  /// field is the one reported.
  pub fn validate(self) -> Result<NewAppointment, ValidationError> {
    let patient_name = required_text(self.patient_name, Field::PatientName)?;
    let patient_phone = required_text(self.patient_phone, Field::PatientPhone)?;
    let start_raw = required_text(self.start_time, Field::StartTime)?;
    let end_raw = required_text(self.end_time, Field::EndTime)?;

    let start_time = parse_datetime(&start_raw)
      .ok_or(ValidationError::InvalidFormat(Field::StartTime))?;
    let end_time = parse_datetime(&end_raw)
      .ok_or(ValidationError::InvalidFormat(Field::EndTime))?;

    if end_time <= start_time {
      return Err(ValidationError::InvalidRange);
    }

    Ok(NewAppointment {
      patient_name,
      patient_phone,
      start_time,
      end_time,
      source: self.source,
    })
  }
}

fn required_text(
  value: Option<String>,
  field: Field,
) -> Result<String, ValidationError> {
  match value.as_deref().map(str::trim) {
    Some(v) if !v.is_empty() => Ok(v.to_owned()),
    _ => Err(ValidationError::MissingField(field)),
  }
}

// ─── Datetime parsing ────────────────────────────────────────────────────────

const OFFSET_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f%:z",
  "%Y-%m-%d %H:%M:%S%.f%:z",
  "%Y-%m-%dT%H:%M%:z",
  "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M",
  "%Y-%m-%d %H:%M",
];

/// Years the store can encode as four digits; stored text sorts
/// chronologically only within this range.
const YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Parse an ISO 8601 calendar date-time.
///
/// Accepts `T` or space as the separator, optional seconds and fraction, an
/// optional `Z` / `±HH:MM` suffix (ignored, the wall-clock time is kept), or a
/// bare date meaning midnight. Years outside `0000..=9999` are rejected.
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
  parse_any(input.trim()).filter(|dt| YEARS.contains(&dt.year()))
}

fn parse_any(s: &str) -> Option<NaiveDateTime> {
  let with_offset = s
    .strip_suffix(['Z', 'z'])
    .map(|rest| format!("{rest}+00:00"));
  let candidate = with_offset.as_deref().unwrap_or(s);

  for fmt in OFFSET_FORMATS {
    if let Ok(dt) = DateTime::parse_from_str(candidate, fmt) {
      return Some(dt.naive_local());
    }
  }

  // A trailing `Z` that did not form a valid offset timestamp is malformed.
  if with_offset.is_some() {
    return None;
  }

  for fmt in NAIVE_FORMATS {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(dt);
    }
  }

  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .ok()
    .map(|d| d.and_time(NaiveTime::MIN))
}
