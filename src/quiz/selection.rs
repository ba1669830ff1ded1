use crate::catalog::Artwork;
use serde::{Deserialize, Serialize};

/// Maximum number of ranked picks in a quiz.
pub const MAX_SELECTIONS: usize = 4;

/// Weight percentage for each rank, 1-based. Always sums to 100 for a
/// complete set.
const RANK_WEIGHTS: [u32; MAX_SELECTIONS] = [40, 30, 20, 10];

/// The weight percentage for a 1-based rank.
pub fn weight_for_order(order: usize) -> u32 {
    RANK_WEIGHTS[order - 1]
}

/// One ranked pick: an artwork snapshot plus its rank and rank-derived weight.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub artwork: Artwork,
    pub order: usize,
    pub weight: u32,
}

/// Holds the ordered list of current picks (0 to 4) and keeps the
/// rank/weight invariants: orders are always a contiguous `1..=N` and each
/// weight is derived from the order via the fixed table.
#[derive(Default, Debug, Clone)]
pub struct SelectionStore {
    selections: Vec<Selection>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an artwork as the lowest-ranked pick.
    ///
    /// Re-selecting an already-picked artwork moves it to the end: it is
    /// removed first, everything after it shifts up a rank, then it is
    /// re-appended. A fifth distinct artwork is silently ignored.
    ///
    /// Returns whether the list changed.
    pub fn select(&mut self, artwork: &Artwork) -> bool {
        self.remove(&artwork.id);
        if self.selections.len() >= MAX_SELECTIONS {
            return false;
        }
        let order = self.selections.len() + 1;
        self.selections.push(Selection {
            artwork: artwork.clone(),
            order,
            weight: weight_for_order(order),
        });
        true
    }

    /// Removes the pick with the given artwork id, if present, and
    /// reindexes the remaining picks. Returns whether anything was removed.
    pub fn remove(&mut self, artwork_id: &str) -> bool {
        let before = self.selections.len();
        self.selections.retain(|s| s.artwork.id != artwork_id);
        if self.selections.len() == before {
            return false;
        }
        self.reindex();
        true
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// True iff exactly four picks are present. This is the only
    /// precondition for scoring.
    pub fn is_complete(&self) -> bool {
        self.selections.len() == MAX_SELECTIONS
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    fn reindex(&mut self) {
        for (i, selection) in self.selections.iter_mut().enumerate() {
            selection.order = i + 1;
            selection.weight = weight_for_order(selection.order);
        }
    }
}
