//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use booking_core::{
  appointment::{Appointment, AppointmentSubmission, NewAppointment},
  store::AppointmentStore,
};
use chrono::NaiveDate;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn booking(name: &str, start: &str, end: &str) -> NewAppointment {
  AppointmentSubmission {
    patient_name:  Some(name.into()),
    patient_phone: Some("+1-555-0100".into()),
    start_time:    Some(start.into()),
    end_time:      Some(end.into()),
    source:        Some("web".into()),
  }
  .validate()
  .expect("valid booking")
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_and_echoes_fields() {
  let s = store().await;
  let new = booking("John Doe", "2025-10-06T14:30:00", "2025-10-06T15:00:00");

  let created = s.create(new.clone()).await.unwrap();
  assert_eq!(created.id, 1);
  assert_eq!(created, new.into_appointment(1));
}

#[tokio::test]
async fn created_record_is_listed_exactly_once() {
  let s = store().await;
  let created = s
    .create(booking("John Doe", "2025-10-06T14:30:00", "2025-10-06T15:00:00"))
    .await
    .unwrap();

  let all = s.list_all().await.unwrap();
  assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn ids_are_unique_and_ascending() {
  let s = store().await;
  let mut ids = Vec::new();
  for hour in 9..14 {
    let start = format!("2025-10-06T{hour:02}:00:00");
    let end = format!("2025-10-06T{hour:02}:30:00");
    ids.push(s.create(booking("Pat", &start, &end)).await.unwrap().id);
  }
  assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids: {ids:?}");
}

#[tokio::test]
async fn overlapping_bookings_are_accepted() {
  let s = store().await;
  s.create(booking("A", "2025-10-06T09:00:00", "2025-10-06T10:00:00"))
    .await
    .unwrap();
  s.create(booking("B", "2025-10-06T09:30:00", "2025-10-06T10:30:00"))
    .await
    .unwrap();
  assert_eq!(s.list_all().await.unwrap().len(), 2);
}

#[tokio::test]
async fn missing_source_is_stored_as_null() {
  let s = store().await;
  let new = NewAppointment::new(
    "Jane",
    "555",
    NaiveDate::from_ymd_opt(2025, 10, 6).unwrap().and_hms_opt(9, 0, 0).unwrap(),
    NaiveDate::from_ymd_opt(2025, 10, 6).unwrap().and_hms_opt(9, 30, 0).unwrap(),
    None,
  )
  .unwrap();
  s.create(new).await.unwrap();

  let all = s.list_all().await.unwrap();
  assert_eq!(all[0].source, None);
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_lists_nothing() {
  let s = store().await;
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_is_ordered_by_start_time() {
  let s = store().await;
  s.create(booking("T2", "2025-10-06T12:00:00", "2025-10-06T12:30:00"))
    .await
    .unwrap();
  s.create(booking("T1", "2025-10-06T09:00:00", "2025-10-06T09:30:00"))
    .await
    .unwrap();
  s.create(booking("T3", "2025-10-07T08:00:00", "2025-10-07T08:30:00"))
    .await
    .unwrap();

  let names: Vec<String> = s
    .list_all()
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.patient_name)
    .collect();
  assert_eq!(names, ["T1", "T2", "T3"]);
}

#[tokio::test]
async fn equal_start_times_fall_back_to_id() {
  let s = store().await;
  let first = s
    .create(booking("first", "2025-10-06T09:00:00", "2025-10-06T10:00:00"))
    .await
    .unwrap();
  let second = s
    .create(booking("second", "2025-10-06T09:00:00", "2025-10-06T09:15:00"))
    .await
    .unwrap();

  let ids: Vec<i64> = s.list_all().await.unwrap().iter().map(|a| a.id).collect();
  assert_eq!(ids, [first.id, second.id]);
}

#[tokio::test]
async fn fractional_seconds_order_correctly() {
  let s = store().await;
  s.create(booking("later", "2025-10-06T09:00:00.500", "2025-10-06T10:00:00"))
    .await
    .unwrap();
  s.create(booking("earlier", "2025-10-06T09:00:00", "2025-10-06T10:00:00"))
    .await
    .unwrap();

  let all = s.list_all().await.unwrap();
  assert_eq!(all[0].patient_name, "earlier");
  assert_eq!(all[1].patient_name, "later");
}

#[tokio::test]
async fn list_starting_on_filters_by_calendar_day() {
  let s = store().await;
  s.create(booking("eve", "2025-10-05T23:30:00", "2025-10-06T00:30:00"))
    .await
    .unwrap();
  s.create(booking("noon", "2025-10-06T12:00:00", "2025-10-06T12:30:00"))
    .await
    .unwrap();
  s.create(booking("dawn", "2025-10-06T00:00:00", "2025-10-06T00:30:00"))
    .await
    .unwrap();
  s.create(booking("next", "2025-10-07T00:00:00", "2025-10-07T00:30:00"))
    .await
    .unwrap();

  let day = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
  let names: Vec<String> = s
    .list_starting_on(day)
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.patient_name)
    .collect();
  assert_eq!(names, ["dawn", "noon"]);
}

#[tokio::test]
async fn list_starting_on_empty_day() {
  let s = store().await;
  s.create(booking("A", "2025-10-06T09:00:00", "2025-10-06T10:00:00"))
    .await
    .unwrap();
  let day = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
  assert!(s.list_starting_on(day).await.unwrap().is_empty());
}

// ─── Durability ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn records_survive_reopening_the_file() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("appointments.db");

  let created = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create(booking("John Doe", "2025-10-06T14:30:00", "2025-10-06T15:00:00"))
      .await
      .unwrap()
  };

  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.list_all().await.unwrap(), vec![created]);

  let next = reopened
    .create(booking("Jane", "2025-10-06T16:00:00", "2025-10-06T16:30:00"))
    .await
    .unwrap();
  assert_eq!(next.id, 2);
}

#[tokio::test]
async fn listed_record_round_trips_through_json() {
  let s = store().await;
  s.create(booking("John Doe", "2025-10-06T14:30:00", "2025-10-06T15:00:00"))
    .await
    .unwrap();
  let listed = s.list_all().await.unwrap().remove(0);

  let text = serde_json::to_string(&listed).unwrap();
  let back: Appointment = serde_json::from_str(&text).unwrap();
  assert_eq!(back, listed);
}
