//! Pure scoring: turns a completed selection set into a mood profile.
//!
//! Nothing in here mutates its inputs or touches storage. Given the same
//! four ordered selections, the profile is always identical; only the
//! cosmetic match count is randomized, from a caller-supplied generator.

use super::result::{MoodProfile, QuizResult};
use super::selection::{Selection, MAX_SELECTIONS};
use crate::catalog::Catalog;
use rand::Rng;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Inclusive range for the cosmetic match count.
pub const MATCH_COUNT_RANGE: RangeInclusive<u32> = 20..=50;

/// How many keywords a profile exposes at most.
const TOP_KEYWORDS: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("scoring requires exactly 4 selections, got {0}")]
    IncompleteSelection(usize),
}

/// Flat compatibility for everything outside the top three ranks,
/// including the rank-4 pick and all unpicked artworks.
const DEFAULT_COMPATIBILITY: u32 = 25;

/// Rank-tier compatibility: 100/75/50 for ranks 1-3, flat default otherwise.
fn compatibility_for_order(order: usize) -> u32 {
    match order {
        1 => 100,
        2 => 75,
        3 => 50,
        _ => DEFAULT_COMPATIBILITY,
    }
}

/// Aggregates keyword weights across the selections, preserving first-seen
/// order (ascending selection rank, keyword list order within an artwork).
fn aggregate_keywords(selections: &[Selection]) -> Vec<(String, u32)> {
    let mut scored: Vec<(String, u32)> = Vec::new();
    for selection in selections {
        for keyword in &selection.artwork.mood_keywords {
            match scored.iter_mut().find(|(k, _)| k == keyword) {
                Some((_, score)) => *score += selection.weight,
                None => scored.push((keyword.clone(), selection.weight)),
            }
        }
    }
    scored
}

/// Display label from the top keywords. Degrades when the catalog yields
/// fewer than two distinct keywords instead of indexing out of range.
fn describe_mood(keywords: &[String]) -> String {
    match keywords {
        [] => "eclectic mood".to_owned(),
        [only] => format!("{} mood", only),
        [first, second, ..] => format!("{} {} mood", first, second),
    }
}

/// Computes the mood profile for a completed selection set.
pub fn compute_profile(
    selections: &[Selection],
    catalog: &Catalog,
) -> Result<MoodProfile, ScoringError> {
    if selections.len() != MAX_SELECTIONS {
        return Err(ScoringError::IncompleteSelection(selections.len()));
    }

    let mut scored = aggregate_keywords(selections);
    // Stable sort: equal scores keep first-seen order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    let keywords: Vec<String> = scored
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(|(keyword, _)| keyword)
        .collect();

    let theme_of_order = |order: usize| {
        selections
            .iter()
            .find(|s| s.order == order)
            .map(|s| s.artwork.theme.clone())
            .unwrap_or_default()
    };

    let mut compatibility_score: BTreeMap<String, u32> = catalog
        .iter_artworks()
        .map(|artwork| (artwork.id.clone(), DEFAULT_COMPATIBILITY))
        .collect();
    for selection in selections {
        compatibility_score.insert(
            selection.artwork.id.clone(),
            compatibility_for_order(selection.order),
        );
    }

    Ok(MoodProfile {
        primary: theme_of_order(1),
        secondary: theme_of_order(2),
        description: describe_mood(&keywords),
        keywords,
        compatibility_score,
    })
}

/// Computes a full quiz result: the profile plus a timestamp and a fresh
/// cosmetic match count drawn from `rng`.
pub fn compute_result<R: Rng>(
    selections: &[Selection],
    catalog: &Catalog,
    rng: &mut R,
) -> Result<QuizResult, ScoringError> {
    let profile = compute_profile(selections, catalog)?;
    Ok(QuizResult {
        selections: selections.to_vec(),
        profile,
        timestamp: chrono::Utc::now().timestamp_millis(),
        match_count: rng.random_range(MATCH_COUNT_RANGE),
    })
}
