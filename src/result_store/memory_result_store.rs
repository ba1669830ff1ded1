use super::{parse_stored_result, ResultStore};
use crate::quiz::QuizResult;
use anyhow::{Context, Result};
use std::sync::Mutex;

/// In-memory result store. Holds the serialized JSON value so the same
/// round-trip contract as the SQLite store is exercised. Used by tests and
/// as a throwaway backend.
#[derive(Default)]
pub struct MemoryResultStore {
    value: Mutex<Option<String>>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preloads an arbitrary raw value, corrupt ones included.
    pub fn with_raw_value(raw: &str) -> Self {
        Self {
            value: Mutex::new(Some(raw.to_owned())),
        }
    }
}

impl ResultStore for MemoryResultStore {
    fn save(&self, result: &QuizResult) -> Result<()> {
        let serialized =
            serde_json::to_string(result).context("Failed to serialize quiz result")?;
        *self.value.lock().unwrap() = Some(serialized);
        Ok(())
    }

    fn load(&self) -> Result<Option<QuizResult>> {
        let value = self.value.lock().unwrap();
        Ok(value.as_deref().and_then(parse_stored_result))
    }

    fn clear(&self) -> Result<()> {
        *self.value.lock().unwrap() = None;
        Ok(())
    }
}
