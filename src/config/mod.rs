//! Key-value configuration storage backed by SQLite.
//!
//! Shares a database with [`SessionHistory`](crate::navigator::history::SessionHistory);
//! pass the same path to both.

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OptionalExtension};
use std::sync::Mutex;

use crate::consts::{BASE_URL_KEY, DEFAULT_BASE_URL};

/// Keys the client reads.
pub const KNOWN_KEYS: &[&str] = &[BASE_URL_KEY];

/// Persistent key-value configuration store.
pub struct Config {
    conn: Mutex<Connection>,
}

impl Config {
    /// Open or create the config table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open config database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS config (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
        )
        .context("failed to create config table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row("SELECT value FROM config WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a config value (upsert). Unknown keys are refused.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO config (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM config WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Server to talk to: the explicit override, else the stored
    /// `base_url`, else [`DEFAULT_BASE_URL`].
    pub fn base_url(&self, flag: Option<&str>) -> Result<String> {
        if let Some(url) = flag {
            return Ok(url.to_string());
        }
        Ok(self
            .get(BASE_URL_KEY)?
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
    }
}

fn check_key(key: &str) -> Result<()> {
    if !KNOWN_KEYS.contains(&key) {
        bail!(
            "unknown config key: {key} (known: {})",
            KNOWN_KEYS.join(", ")
        );
    }
    Ok(())
}
