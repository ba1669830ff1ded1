use super::result::QuizResult;
use super::scoring;
use super::selection::{Selection, SelectionStore};
use crate::catalog::Catalog;
use crate::result_store::ResultStore;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("unknown artwork id: {0}")]
    UnknownArtwork(String),
}

/// One quiz flow: the current picks, the last computed result, and the
/// persistence handle. Owned by exactly one logical session at a time;
/// callers pass instances explicitly instead of going through a global.
pub struct QuizSession {
    catalog: Arc<Catalog>,
    selections: SelectionStore,
    result_store: Arc<dyn ResultStore>,
    quiz_result: Option<QuizResult>,
    rng: StdRng,
}

impl QuizSession {
    /// Builds a session with empty selections, restoring any persisted
    /// result from the store.
    pub fn new(catalog: Arc<Catalog>, result_store: Arc<dyn ResultStore>) -> Result<Self> {
        Self::with_rng(catalog, result_store, StdRng::from_os_rng())
    }

    /// Like [`QuizSession::new`] but with a caller-supplied generator, so
    /// tests can pin the match count sequence.
    pub fn with_rng(
        catalog: Arc<Catalog>,
        result_store: Arc<dyn ResultStore>,
        rng: StdRng,
    ) -> Result<Self> {
        let quiz_result = result_store.load()?;
        if quiz_result.is_some() {
            info!("Restored a persisted quiz result");
        }
        Ok(Self {
            catalog,
            selections: SelectionStore::new(),
            result_store,
            quiz_result,
            rng,
        })
    }

    /// Picks an artwork by id. Overflow past four picks is a silent no-op;
    /// an id the catalog does not know is an error.
    pub fn select_artwork(&mut self, artwork_id: &str) -> Result<(), QuizError> {
        let artwork = self
            .catalog
            .get_artwork(artwork_id)
            .ok_or_else(|| QuizError::UnknownArtwork(artwork_id.to_owned()))?;
        self.selections.select(artwork);
        Ok(())
    }

    /// Removes a pick by id. Absent ids are a no-op.
    pub fn remove_selection(&mut self, artwork_id: &str) {
        self.selections.remove(artwork_id);
    }

    pub fn clear_selections(&mut self) {
        self.selections.clear();
    }

    pub fn selections(&self) -> &[Selection] {
        self.selections.selections()
    }

    pub fn is_complete(&self) -> bool {
        self.selections.is_complete()
    }

    /// Scores the current picks, persists the result, and caches it.
    /// Returns `None` without side effects when fewer than four picks are
    /// present.
    pub fn calculate_result(&mut self) -> Result<Option<&QuizResult>> {
        if !self.selections.is_complete() {
            return Ok(None);
        }
        let result =
            scoring::compute_result(self.selections.selections(), &self.catalog, &mut self.rng)?;
        self.result_store.save(&result)?;
        self.quiz_result = Some(result);
        Ok(self.quiz_result.as_ref())
    }

    /// Clears the picks, the cached result, and the persisted value.
    pub fn reset_quiz(&mut self) -> Result<()> {
        self.selections.clear();
        self.quiz_result = None;
        self.result_store.clear()
    }

    pub fn quiz_result(&self) -> Option<&QuizResult> {
        self.quiz_result.as_ref()
    }
}
