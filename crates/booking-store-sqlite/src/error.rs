//! Error type for `booking-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored row no longer satisfies the appointment invariants.
  #[error("corrupt appointment row {id}: {source}")]
  CorruptRow {
    id:     i64,
    #[source]
    source: booking_core::ValidationError,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
