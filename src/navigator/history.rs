use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::sync::Mutex;
use tracing::debug;

use super::Navigator;

/// One visited location.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub url: String,
    pub timestamp: String,
}

/// SQLite-backed session history, the client's stand-in for a browser's
/// location bar and back stack.
///
/// Shares a database with [`Config`](crate::config::Config); pass the same
/// path to both.
pub struct SessionHistory {
    conn: Mutex<Connection>,
}

impl SessionHistory {
    /// Open or create the history table in the given database.
    /// Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open history database")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS history (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL DEFAULT (datetime('now')),
                url       TEXT NOT NULL
            )",
        )
        .context("failed to create history table")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    /// Push a new entry on top of the history.
    pub fn visit(&self, url: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO history (url) VALUES (?1)", [url])?;
        Ok(())
    }

    /// Overwrite the current entry. An empty history gets its first entry.
    pub fn replace_current(&self, url: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE history SET url = ?1, timestamp = datetime('now')
             WHERE id = (SELECT MAX(id) FROM history)",
            [url],
        )?;
        if updated == 0 {
            conn.execute("INSERT INTO history (url) VALUES (?1)", [url])?;
        }
        Ok(())
    }

    /// The current location, if anything was ever visited.
    pub fn current(&self) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let url = conn
            .query_row(
                "SELECT url FROM history ORDER BY id DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(url)
    }

    /// All entries in visiting order.
    pub fn entries(&self) -> Result<Vec<HistoryEntry>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT url, timestamp FROM history ORDER BY id ASC")?;
        let entries = stmt
            .query_map([], |row| {
                Ok(HistoryEntry {
                    url: row.get(0)?,
                    timestamp: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM history", [])?;
        Ok(())
    }
}

#[async_trait]
impl Navigator for SessionHistory {
    async fn replace(&self, url: &str) -> Result<()> {
        debug!(url, "replacing current location");
        self.replace_current(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(history: &SessionHistory) -> Vec<String> {
        history
            .entries()
            .unwrap()
            .into_iter()
            .map(|e| e.url)
            .collect()
    }

    #[test]
    fn empty_history_has_no_current() {
        let history = SessionHistory::in_memory().unwrap();
        assert!(history.current().unwrap().is_none());
        assert!(history.entries().unwrap().is_empty());
    }

    #[test]
    fn visit_pushes_entries() {
        let history = SessionHistory::in_memory().unwrap();
        history.visit("/").unwrap();
        history.visit("/1").unwrap();
        assert_eq!(urls(&history), vec!["/", "/1"]);
        assert_eq!(history.current().unwrap().unwrap(), "/1");
    }

    #[test]
    fn replace_overwrites_current_entry() {
        let history = SessionHistory::in_memory().unwrap();
        history.visit("/").unwrap();
        history.visit("/1").unwrap();
        history.replace_current("/2").unwrap();
        assert_eq!(urls(&history), vec!["/", "/2"]);
        assert_eq!(history.current().unwrap().unwrap(), "/2");
    }

    #[test]
    fn replace_on_empty_history_creates_entry() {
        let history = SessionHistory::in_memory().unwrap();
        history.replace_current("/done").unwrap();
        assert_eq!(urls(&history), vec!["/done"]);
    }

    #[tokio::test]
    async fn navigator_replace_does_not_grow_history() {
        let history = SessionHistory::in_memory().unwrap();
        history.visit("/").unwrap();
        for url in ["/1", "/2", "/3", "/done"] {
            history.replace(url).await.unwrap();
        }
        assert_eq!(urls(&history), vec!["/done"]);
    }

    #[test]
    fn clear_empties_history() {
        let history = SessionHistory::in_memory().unwrap();
        history.visit("/").unwrap();
        history.clear().unwrap();
        assert!(history.current().unwrap().is_none());
    }

    #[test]
    fn persists_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history-test.db");
        let path_str = path.to_str().unwrap();

        {
            let history = SessionHistory::open(path_str).unwrap();
            history.visit("/4").unwrap();
        }

        {
            let history = SessionHistory::open(path_str).unwrap();
            assert_eq!(history.current().unwrap().unwrap(), "/4");
        }
    }
}
