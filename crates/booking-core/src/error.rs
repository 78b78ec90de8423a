//! Validation errors for appointment submissions.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A submitted field that validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
  PatientName,
  PatientPhone,
  StartTime,
  EndTime,
}

impl Field {
  pub fn as_str(self) -> &'static str {
    match self {
      Field::PatientName => "patient_name",
      Field::PatientPhone => "patient_phone",
      Field::StartTime => "start_time",
      Field::EndTime => "end_time",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("missing field: {0}")]
  MissingField(Field),

  #[error(
    "invalid datetime format for {0}. Use ISO 8601, e.g. 2025-10-06T14:30:00"
  )]
  InvalidFormat(Field),

  #[error("end_time must be after start_time")]
  InvalidRange,
}

impl ValidationError {
  /// The field the error refers to, if it concerns a single field.
  pub fn field(&self) -> Option<Field> {
    match self {
      ValidationError::MissingField(f) | ValidationError::InvalidFormat(f) => {
        Some(*f)
      }
      ValidationError::InvalidRange => None,
    }
  }

  /// Stable machine-readable code for API responses.
  pub fn code(&self) -> &'static str {
    match self {
      ValidationError::MissingField(_) => "missing_field",
      ValidationError::InvalidFormat(_) => "invalid_format",
      ValidationError::InvalidRange => "invalid_range",
    }
  }
}
