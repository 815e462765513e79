//! SQLite-backed measurement history.
//!
//! One append-only table, written by the persistence loop and read by the
//! query server. Access is serialized behind a mutex: every call is a
//! short synchronous statement, so the persistence loop's single-row
//! inserts and concurrent query-server reads never interleave mid-write.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, params};

use crate::error::Result;
use crate::state::Reading;

/// One persisted sampling snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRecord {
    /// Local time, `%Y-%m-%d %H:%M:%S` — lexicographically sortable.
    pub datetime: String,
    pub room_temp: f64,
    pub water_temp: f64,
    pub light_level: f64,
}

impl MeasurementRecord {
    /// Stamp a reading with the given local timestamp.
    pub fn stamped(datetime: String, reading: Reading) -> Self {
        Self {
            datetime,
            room_temp: f64::from(reading.room_temp),
            water_temp: f64::from(reading.water_temp),
            light_level: f64::from(reading.light_level),
        }
    }
}

/// Clone-able handle to the measurement table.
#[derive(Clone)]
pub struct MeasurementStore {
    conn: Arc<Mutex<Connection>>,
}

impl MeasurementStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub fn open(path: &Path) -> Result<Self> {
        Self::init(Connection::open(path)?)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS measurements (
                datetime TEXT,
                room_temp REAL,
                water_temp REAL,
                light_level REAL
            )",
            [],
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Append one record. A single statement, so the write is transactional.
    pub fn append(&self, record: &MeasurementRecord) -> Result<()> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        conn.execute(
            "INSERT INTO measurements (datetime, room_temp, water_temp, light_level)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.datetime,
                record.room_temp,
                record.water_temp,
                record.light_level
            ],
        )?;
        Ok(())
    }

    /// Fetch records filtered by inclusive timestamp bounds, in storage
    /// order. Both bounds optional: both → `BETWEEN`, one → the matching
    /// inequality, none → every record.
    pub fn query_range(&self, start: Option<&str>, end: Option<&str>) -> Result<Vec<MeasurementRecord>> {
        let conn = self.conn.lock().unwrap_or_else(|e| e.into_inner());
        const COLUMNS: &str = "SELECT datetime, room_temp, water_temp, light_level FROM measurements";

        let (sql, bounds): (String, Vec<&str>) = match (start, end) {
            (Some(s), Some(e)) => (
                format!("{COLUMNS} WHERE datetime BETWEEN ?1 AND ?2"),
                vec![s, e],
            ),
            (Some(s), None) => (format!("{COLUMNS} WHERE datetime >= ?1"), vec![s]),
            (None, Some(e)) => (format!("{COLUMNS} WHERE datetime <= ?1"), vec![e]),
            (None, None) => (COLUMNS.to_string(), Vec::new()),
        };

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(bounds), |row| {
            Ok(MeasurementRecord {
                datetime: row.get(0)?,
                room_temp: row.get(1)?,
                water_temp: row.get(2)?,
                light_level: row.get(3)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
