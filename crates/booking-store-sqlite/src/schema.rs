//! SQL schema for the appointment store.
//!
//! Executed once at connection startup. There is no migration machinery;
//! `PRAGMA user_version` records the layout for whoever adds one.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Insert-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS appointments (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_name  TEXT NOT NULL CHECK (length(trim(patient_name)) > 0),
    patient_phone TEXT NOT NULL,
    start_time    TEXT NOT NULL,   -- YYYY-MM-DDTHH:MM:SS[.ffffff], no zone
    end_time      TEXT NOT NULL,
    source        TEXT,
    CHECK (end_time > start_time)
);

CREATE INDEX IF NOT EXISTS appointments_start_idx
    ON appointments(start_time, id);

PRAGMA user_version = 1;
";
