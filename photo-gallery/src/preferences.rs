use crate::providers::KeyValueStore;
use crate::service::PhotoGalleryError;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::Path;
use std::sync::Mutex;

/// Initialize the preferences schema
pub fn init_preferences_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS preferences_schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    let current_version: i32 = conn
        .query_row(
            "SELECT version FROM preferences_schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or(0);

    if current_version < 1 {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;
        conn.execute(
            "INSERT INTO preferences_schema_version (version) VALUES (1)",
            [],
        )?;
    }

    Ok(())
}

/// Key-value preferences persisted in SQLite
pub struct SqlitePreferences {
    conn: Mutex<Connection>,
}

impl SqlitePreferences {
    /// Open (or create) the preferences database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PhotoGalleryError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, PhotoGalleryError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, PhotoGalleryError> {
        init_preferences_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, PhotoGalleryError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| PhotoGalleryError::Other("Preferences lock poisoned".to_string()))?;
        Ok(f(&conn)?)
    }
}

#[async_trait]
impl KeyValueStore for SqlitePreferences {
    async fn set(&self, key: &str, value: &str) -> Result<(), PhotoGalleryError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO preferences (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
                params![key, value],
            )
        })?;
        log::debug!("Stored preference {} ({} bytes)", key, value.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, PhotoGalleryError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let prefs = SqlitePreferences::open_in_memory().unwrap();
        assert_eq!(prefs.get("photos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_and_overwrite() {
        let prefs = SqlitePreferences::open_in_memory().unwrap();
        prefs.set("photos", "[]").await.unwrap();
        assert_eq!(prefs.get("photos").await.unwrap().as_deref(), Some("[]"));

        prefs.set("photos", "[{}]").await.unwrap();
        assert_eq!(prefs.get("photos").await.unwrap().as_deref(), Some("[{}]"));
    }

    #[test]
    fn test_schema_init_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_preferences_schema(&conn).unwrap();
        init_preferences_schema(&conn).unwrap();
        let versions: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM preferences_schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(versions, 1);
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs/gallery.db");
        {
            let prefs = SqlitePreferences::open(&path).unwrap();
            prefs.set("photos", "[1]").await.unwrap();
        }
        let prefs = SqlitePreferences::open(&path).unwrap();
        assert_eq!(prefs.get("photos").await.unwrap().as_deref(), Some("[1]"));
    }
}
