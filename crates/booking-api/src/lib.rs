//! JSON REST API for appointment booking.
//!
//! Exposes an axum [`Router`] backed by any
//! [`booking_core::store::AppointmentStore`]. Transport concerns (CORS, request
//! tracing, binding) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = booking_api::api_router(Arc::new(store));
//! ```

pub mod appointments;
pub mod error;
pub mod health;

use std::sync::Arc;

use axum::{Router, routing::get};
use booking_core::store::AppointmentStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: AppointmentStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler))
    .route(
      "/appointments",
      get(appointments::list::<S>).post(appointments::create::<S>),
    )
    .route("/appointments/by-date", get(appointments::by_date::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
