use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use serde::{Serialize, de::DeserializeOwned};

use crate::errors::{Result, StickiesError};

pub const NOTES_KEY: &str = "notes";
pub const DARK_MODE_KEY: &str = "isDarkMode";

/// Durable string key-value store backed by a single SQLite table.
pub struct Store {
    connection: Connection,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Store> {
        let conn = Connection::open(path).map_err(StickiesError::sql("open store"))?;
        Self::init(conn)
    }

    pub fn in_memory() -> Result<Store> {
        let conn = Connection::open_in_memory().map_err(StickiesError::sql("open store"))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Store> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )
        .map_err(StickiesError::sql("create kv table"))?;

        Ok(Store { connection: conn })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(StickiesError::sql("get"))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(StickiesError::sql("set"))?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn remove(&self, key: &str) -> Result<()> {
        self.connection
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(StickiesError::sql("remove"))?;

        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.connection
            .execute("DELETE FROM kv", [])
            .map_err(StickiesError::sql("clear"))?;

        Ok(())
    }

    /// Reads and parses a JSON value. A missing key is `Ok(None)`, a present
    /// but unparsable value is an error.
    pub fn read_json<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(StickiesError::serialization(key)),
            None => Ok(None),
        }
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(StickiesError::serialization(key))?;
        self.set(key, &raw)
    }
}
