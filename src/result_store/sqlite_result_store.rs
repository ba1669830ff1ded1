use super::{parse_stored_result, ResultStore, QUIZ_RESULT_KEY};
use crate::quiz::QuizResult;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS quiz_state (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// SQLite-backed result store: a single key-value table holding the
/// serialized quiz result under [`QUIZ_RESULT_KEY`].
pub struct SqliteResultStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteResultStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        let is_new_db = !path.exists();

        let conn = Connection::open(path).context("Failed to open quiz result database")?;
        if is_new_db {
            info!("Creating new quiz result database at {:?}", path);
        }
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize quiz result schema")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO quiz_state (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT value FROM quiz_state WHERE key = ?1")?;
        let value: Option<String> = stmt.query_row(params![key], |row| row.get(0)).optional()?;
        Ok(value)
    }
}

impl ResultStore for SqliteResultStore {
    fn save(&self, result: &QuizResult) -> Result<()> {
        let serialized =
            serde_json::to_string(result).context("Failed to serialize quiz result")?;
        self.set_raw(QUIZ_RESULT_KEY, &serialized)
    }

    fn load(&self) -> Result<Option<QuizResult>> {
        let raw = self.get_raw(QUIZ_RESULT_KEY)?;
        Ok(raw.as_deref().and_then(parse_stored_result))
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM quiz_state WHERE key = ?1",
            params![QUIZ_RESULT_KEY],
        )?;
        Ok(())
    }
}
