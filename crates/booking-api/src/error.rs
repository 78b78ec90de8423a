//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every error is rendered as `{"error": <message>, "code": <code>}`, with a
//! `field` key added when the error concerns a single submitted field.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use booking_core::ValidationError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::Validation(e) => {
        let mut body = json!({ "error": e.to_string(), "code": e.code() });
        if let Some(field) = e.field() {
          body["field"] = json!(field);
        }
        (StatusCode::BAD_REQUEST, body)
      }
      ApiError::BadRequest(m) => (
        StatusCode::BAD_REQUEST,
        json!({ "error": m, "code": "bad_request" }),
      ),
      ApiError::Store(e) => {
        // Store details stay in the log; clients get a generic message.
        tracing::error!(error = %e, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          json!({ "error": "internal server error", "code": "internal" }),
        )
      }
    };
    (status, Json(body)).into_response()
  }
}
