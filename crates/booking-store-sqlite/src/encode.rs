//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored without a zone as `YYYY-MM-DDTHH:MM:SS[.fff…]`, the
//! same form they are serialised to over the API. Within years 0000–9999 this
//! sorts lexicographically in chronological order, which `ORDER BY` relies on.

use booking_core::appointment::{Appointment, NewAppointment};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{Error, Result};

// ─── NaiveDateTime ────────────────────────────────────────────────────────────

const DT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn encode_dt(dt: NaiveDateTime) -> String { dt.format(DT_FORMAT).to_string() }

pub fn decode_dt(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, DT_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// Half-open `[start, end)` bounds covering one calendar day. `end` is `None`
/// for the last representable date.
pub fn encode_day_bounds(day: NaiveDate) -> (String, Option<String>) {
  let start = encode_dt(day.and_time(NaiveTime::MIN));
  let end = day
    .succ_opt()
    .map(|next| encode_dt(next.and_time(NaiveTime::MIN)));
  (start, end)
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// Column values for one `appointments` row as read from SQLite.
pub struct RawAppointment {
  pub id:            i64,
  pub patient_name:  String,
  pub patient_phone: String,
  pub start_time:    String,
  pub end_time:      String,
  pub source:        Option<String>,
}

impl RawAppointment {
  /// Column list whose order matches [`RawAppointment::from_row`].
  pub const COLUMNS: &'static str =
    "id, patient_name, patient_phone, start_time, end_time, source";

  /// Map a row selected with [`RawAppointment::COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawAppointment {
      id:            row.get(0)?,
      patient_name:  row.get(1)?,
      patient_phone: row.get(2)?,
      start_time:    row.get(3)?,
      end_time:      row.get(4)?,
      source:        row.get(5)?,
    })
  }

  /// Decode timestamps and re-check the record invariants.
  pub fn into_appointment(self) -> Result<Appointment> {
    let id = self.id;
    let start_time = decode_dt(&self.start_time)?;
    let end_time = decode_dt(&self.end_time)?;
    let new = NewAppointment::new(
      self.patient_name,
      self.patient_phone,
      start_time,
      end_time,
      self.source,
    )
    .map_err(|source| Error::CorruptRow { id, source })?;
    Ok(new.into_appointment(id))
  }
}
