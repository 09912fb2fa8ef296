//! Storage layer for the Moment life calendar.
//!
//! Provides a small string key-value store on top of `rusqlite`, and
//! helpers that keep the whole [`AppState`] under a single key.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! # Schema
//!
//! One table, `kv_store`, maps a TEXT key to a TEXT value. `updated_at` is an
//! ISO 8601 UTC timestamp (e.g., `2025-01-15T10:30:00.000Z`) of the last write.
//!
//! The app state lives under [`STORAGE_KEY_APP_STATE`] as the camelCase JSON
//! document described in [`moment_core::state`]. Reading it applies the
//! lenient decoding policy: bad records are dropped, and a document that
//! cannot be decoded at all is treated as absent rather than as an error.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use moment_core::{AppState, STORAGE_KEY_APP_STATE};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to serialize state for storage.
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
    /// A stored timestamp could not be parsed.
    #[error("invalid timestamp for key {key}: {timestamp}")]
    TimestampParse {
        key: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        tracing::debug!(path = %path.display(), "opened database");
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reads the value stored under `key`.
    pub fn get_item(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_item(&mut self, key: &str, value: &str) -> Result<(), DbError> {
        self.set_item_at(key, value, Utc::now())
    }

    fn set_item_at(&mut self, key: &str, value: &str, now: DateTime<Utc>) -> Result<(), DbError> {
        self.conn.execute(
            "
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, value, format_timestamp(now)],
        )?;
        tracing::debug!(key, bytes = value.len(), "stored item");
        Ok(())
    }

    /// Removes `key`. Returns false if it was not present.
    pub fn remove_item(&mut self, key: &str) -> Result<bool, DbError> {
        let removed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?", params![key])?;
        Ok(removed > 0)
    }

    /// When `key` was last written, if present.
    pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>, DbError> {
        let timestamp: Option<String> = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        timestamp
            .map(|timestamp| {
                DateTime::parse_from_rfc3339(&timestamp)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|source| DbError::TimestampParse {
                        key: key.to_string(),
                        timestamp,
                        source,
                    })
            })
            .transpose()
    }

    /// Lists stored keys in ascending order.
    pub fn keys(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv_store ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }

    // ========== App State ==========

    /// Loads the persisted app state.
    ///
    /// Returns `None` when nothing is stored or the stored document cannot
    /// be decoded.
    pub fn load_state(&self) -> Result<Option<AppState>, DbError> {
        let Some(json) = self.get_item(STORAGE_KEY_APP_STATE)? else {
            return Ok(None);
        };
        match AppState::from_json(&json) {
            Ok(state) => Ok(Some(state)),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable persisted state");
                Ok(None)
            }
        }
    }

    /// Loads the persisted app state, or the default state if there is none.
    pub fn load_state_or_default(&self) -> Result<AppState, DbError> {
        Ok(self.load_state()?.unwrap_or_default())
    }

    /// Persists the app state, replacing what was stored.
    pub fn save_state(&mut self, state: &AppState) -> Result<(), DbError> {
        let json = state.to_json()?;
        self.set_item(STORAGE_KEY_APP_STATE, &json)
    }

    /// Deletes the persisted app state.
    pub fn clear_state(&mut self) -> Result<bool, DbError> {
        self.remove_item(STORAGE_KEY_APP_STATE)
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;
    use moment_core::{NewEvent, Theme};

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        state.set_birthdate(Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap());
        state.set_theme(Theme::Indigo);
        state.add_event(
            NewEvent {
                title: "Graduation".to_string(),
                event_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
                color: Some("#10b981".to_string()),
                icon: Some("academic".to_string()),
            },
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        );
        state
    }

    #[test]
    fn open_in_memory_database() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn schema_matches_data_model() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let mut stmt = db
            .conn
            .prepare("PRAGMA table_info(kv_store)")
            .expect("prepare table_info");
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .expect("query table_info")
            .map(|row| row.expect("table_info row"))
            .collect();
        assert_eq!(columns, vec!["key", "value", "updated_at"]);
    }

    #[test]
    fn set_get_remove_item() {
        let mut db = Database::open_in_memory().expect("open in-memory db");
        assert_eq!(db.get_item("k").unwrap(), None);

        db.set_item("k", "v1").unwrap();
        db.set_item("k", "v2").unwrap();
        assert_eq!(db.get_item("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(db.keys().unwrap(), vec!["k"]);

        assert!(db.remove_item("k").unwrap());
        assert!(!db.remove_item("k").unwrap());
        assert_eq!(db.get_item("k").unwrap(), None);
    }

    #[test]
    fn updated_at_tracks_last_write() {
        let mut db = Database::open_in_memory().expect("open in-memory db");
        let written = Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        db.set_item_at("k", "v", written).unwrap();
        assert_eq!(db.updated_at("k").unwrap(), Some(written));
        assert_eq!(db.updated_at("missing").unwrap(), None);
    }

    #[test]
    fn state_roundtrips() {
        let mut db = Database::open_in_memory().expect("open in-memory db");
        assert_eq!(db.load_state().unwrap(), None);

        let state = sample_state();
        db.save_state(&state).unwrap();
        assert_eq!(db.load_state().unwrap(), Some(state));
    }

    #[test]
    fn corrupt_state_is_treated_as_absent() {
        let mut db = Database::open_in_memory().expect("open in-memory db");
        db.set_item(STORAGE_KEY_APP_STATE, "{ definitely not json").unwrap();
        assert_eq!(db.load_state().unwrap(), None);
        assert_eq!(db.load_state_or_default().unwrap(), AppState::default());
    }

    #[test]
    fn clear_state_removes_document() {
        let mut db = Database::open_in_memory().expect("open in-memory db");
        db.save_state(&sample_state()).unwrap();
        assert!(db.clear_state().unwrap());
        assert_eq!(db.load_state().unwrap(), None);
    }

    #[test]
    fn state_persists_across_connections() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("moment.db");
        let state = sample_state();
        {
            let mut db = Database::open(&path).unwrap();
            db.save_state(&state).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.load_state().unwrap(), Some(state));
    }
}
