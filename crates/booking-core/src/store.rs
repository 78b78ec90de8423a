//! The `AppointmentStore` trait.
//!
//! Implemented by storage backends (e.g. `booking-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::NaiveDate;

use crate::appointment::{Appointment, NewAppointment};

/// Abstraction over an appointment store backend.
///
/// Appointments are insert-only: there is no update or delete.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait AppointmentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a validated appointment and return it with its assigned id.
  ///
  /// Ids are unique and ascending in insertion order.
  fn create(
    &self,
    input: NewAppointment,
  ) -> impl Future<Output = Result<Appointment, Self::Error>> + Send + '_;

  /// Every stored appointment, ordered by `start_time` then `id`.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Appointment>, Self::Error>> + Send + '_;

  /// Appointments whose `start_time` falls on `day`, in the same order as
  /// [`list_all`](Self::list_all).
  fn list_starting_on(
    &self,
    day: NaiveDate,
  ) -> impl Future<Output = Result<Vec<Appointment>, Self::Error>> + Send + '_;
}
