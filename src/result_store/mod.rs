mod memory_result_store;
mod sqlite_result_store;

pub use memory_result_store::MemoryResultStore;
pub use sqlite_result_store::SqliteResultStore;

use crate::quiz::QuizResult;
use anyhow::Result;
use tracing::warn;

/// Fixed key under which the single live quiz result is persisted.
pub const QUIZ_RESULT_KEY: &str = "mood_quiz_result";

/// Persists at most one [`QuizResult`] under a fixed key, across restarts.
/// Last write wins, no history.
pub trait ResultStore: Send + Sync {
    /// Serializes and stores the result, overwriting any prior value.
    fn save(&self, result: &QuizResult) -> Result<()>;
    /// Returns the last-saved result, or `None` if nothing was saved or the
    /// stored value does not parse. A parse failure is never propagated.
    fn load(&self) -> Result<Option<QuizResult>>;
    /// Deletes the persisted value. Idempotent.
    fn clear(&self) -> Result<()>;
}

/// Shared lenient parse for stored values: the origin is user-writable
/// storage, so corrupt or old-schema values are logged and treated as
/// "no stored result".
pub(crate) fn parse_stored_result(raw: &str) -> Option<QuizResult> {
    match serde_json::from_str(raw) {
        Ok(result) => Some(result),
        Err(err) => {
            warn!("Discarding unparseable stored quiz result: {}", err);
            None
        }
    }
}
