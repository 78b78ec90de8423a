//! [`SqliteStore`] — the SQLite implementation of [`AppointmentStore`].

use std::path::Path;

use booking_core::{
  appointment::{Appointment, NewAppointment},
  store::AppointmentStore,
};
use chrono::NaiveDate;

use crate::{
  Result,
  encode::{RawAppointment, encode_day_bounds, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An appointment store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` over the appointment columns and decode every row.
  async fn select(
    &self,
    filter: &'static str,
    lower: Option<String>,
    upper: Option<String>,
  ) -> Result<Vec<Appointment>> {
    let raws: Vec<RawAppointment> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM appointments {filter} ORDER BY start_time ASC, id ASC",
          RawAppointment::COLUMNS,
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = if filter.is_empty() {
          stmt
            .query_map([], RawAppointment::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          stmt
            .query_map(rusqlite::params![lower, upper], RawAppointment::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAppointment::into_appointment).collect()
  }
}

// ─── AppointmentStore impl ───────────────────────────────────────────────────

impl AppointmentStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, input: NewAppointment) -> Result<Appointment> {
    let patient_name  = input.patient_name().to_owned();
    let patient_phone = input.patient_phone().to_owned();
    let start_str     = encode_dt(input.start_time());
    let end_str       = encode_dt(input.end_time());
    let source        = input.source().map(str::to_owned);

    let id: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO appointments (
             patient_name, patient_phone, start_time, end_time, source
           ) VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![patient_name, patient_phone, start_str, end_str, source],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(id)
      })
      .await?;

    tracing::info!(id, start_time = %input.start_time(), "appointment created");
    Ok(input.into_appointment(id))
  }

  async fn list_all(&self) -> Result<Vec<Appointment>> {
    self.select("", None, None).await
  }

  async fn list_starting_on(&self, day: NaiveDate) -> Result<Vec<Appointment>> {
    let (lower, upper) = encode_day_bounds(day);
    self
      .select(
        "WHERE start_time >= ?1 AND (?2 IS NULL OR start_time < ?2)",
        Some(lower),
        upper,
      )
      .await
  }
}
