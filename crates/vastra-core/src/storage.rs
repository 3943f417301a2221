use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::VastraError;

const SCHEMA_V1: &str = include_str!("../../../migrations/001_initial.sql");
const SCHEMA_V2: &str = include_str!("../../../migrations/002_kv_updated_at.sql");

/// Version stamped on every value written. Bump together with
/// [`migrate_value`] whenever a persisted shape changes.
pub const VALUE_SCHEMA: u32 = 1;

/// SQLite-backed key-value storage for store snapshots.
///
/// Opening is fallible; reads and writes after a successful open never
/// fail the caller. A read that cannot be satisfied yields the provided
/// default and a write that cannot be satisfied leaves the in-memory
/// state authoritative for the session. Both are logged.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, VastraError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, VastraError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Read the value under `key`, or `default` when the key is absent,
    /// unreadable, malformed, or of an unknown schema version.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let row = match self.read_row(key) {
            Ok(row) => row,
            Err(e) => {
                warn!(key, error = %e, "failed to read persisted value, using default");
                return default;
            }
        };
        let Some((schema, raw)) = row else {
            return default;
        };

        let raw = if schema == VALUE_SCHEMA {
            raw
        } else if schema < VALUE_SCHEMA {
            match migrate_value(key, schema, raw) {
                Some(migrated) => migrated,
                None => return default,
            }
        } else {
            warn!(key, schema, "value written by a newer version, using default");
            return default;
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "malformed persisted value, using default");
                default
            }
        }
    }

    /// Serialize `value` and write it under `key`. Failures are logged and
    /// swallowed; the caller's in-memory state stays authoritative.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize value, skipping persist");
                return;
            }
        };
        match self.write_row(key, &json) {
            Ok(()) => debug!(key, bytes = json.len(), "persisted value"),
            Err(e) => warn!(key, error = %e, "failed to persist value, keeping in-memory state"),
        }
    }

    /// Remove `key`. Absence is not an error; failures are logged.
    pub fn clear(&self, key: &str) {
        if let Err(e) = self.delete_row(key) {
            warn!(key, error = %e, "failed to clear persisted value");
        }
    }

    fn read_row(&self, key: &str) -> Result<Option<(u32, String)>, VastraError> {
        self.conn
            .query_row(
                "SELECT schema, value FROM kv WHERE key = ?1",
                params![key],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(Into::into)
    }

    fn write_row(&self, key: &str, json: &str) -> Result<(), VastraError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, schema, value, updated_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, VALUE_SCHEMA, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn delete_row(&self, key: &str) -> Result<(), VastraError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ── Migrations ──────────────────────────────────────────────────

/// Run schema migrations using `PRAGMA user_version` for version tracking.
fn run_migrations(conn: &Connection) -> Result<(), VastraError> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", 1)?;
    }
    if version < 2 {
        conn.execute_batch(SCHEMA_V2)?;
        conn.pragma_update(None, "user_version", 2)?;
    }
    Ok(())
}

/// Lift a raw persisted value from an older layout to [`VALUE_SCHEMA`].
/// Returns `None` when no path exists; the caller falls back to the
/// default. Version 1 is the first stamped layout, so no steps exist yet.
fn migrate_value(key: &str, schema: u32, raw: String) -> Option<String> {
    warn!(key, schema, bytes = raw.len(), "no migration step for persisted value, using default");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let storage = Storage::open_memory().unwrap();
        let value = vec!["black".to_string(), "white".to_string()];
        storage.save("colors", &value);

        let loaded: Vec<String> = storage.load("colors", Vec::new());
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_load_missing_key_returns_default() {
        let storage = Storage::open_memory().unwrap();
        let loaded: Vec<String> = storage.load("nothing", vec!["fallback".to_string()]);
        assert_eq!(loaded, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_load_malformed_value_returns_default() {
        let storage = Storage::open_memory().unwrap();
        storage.save("numbers", &vec![1, 2, 3]);
        storage
            .conn
            .execute("UPDATE kv SET value = '{not json' WHERE key = 'numbers'", [])
            .unwrap();

        let loaded: Vec<i64> = storage.load("numbers", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_newer_schema_returns_default() {
        let storage = Storage::open_memory().unwrap();
        storage.save("numbers", &vec![1, 2, 3]);
        storage
            .conn
            .execute("UPDATE kv SET schema = 99 WHERE key = 'numbers'", [])
            .unwrap();

        let loaded: Vec<i64> = storage.load("numbers", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_load_unknown_older_schema_returns_default() {
        let storage = Storage::open_memory().unwrap();
        storage.save("numbers", &vec![1, 2, 3]);
        storage
            .conn
            .execute("UPDATE kv SET schema = 0 WHERE key = 'numbers'", [])
            .unwrap();

        let loaded: Vec<i64> = storage.load("numbers", Vec::new());
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let storage = Storage::open_memory().unwrap();
        storage.save("count", &1);
        storage.save("count", &2);

        let loaded: i64 = storage.load("count", 0);
        assert_eq!(loaded, 2);
    }

    #[test]
    fn test_clear() {
        let storage = Storage::open_memory().unwrap();
        storage.save("count", &7);
        storage.clear("count");

        let loaded: i64 = storage.load("count", 0);
        assert_eq!(loaded, 0);

        // Clearing an absent key is not an error.
        storage.clear("count");
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let storage = Storage::open(&path).unwrap();
            storage.save("count", &42);
        }

        let storage = Storage::open(&path).unwrap();
        let loaded: i64 = storage.load("count", 0);
        assert_eq!(loaded, 42);
    }
}
