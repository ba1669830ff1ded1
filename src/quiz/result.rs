use super::Selection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The aggregated outcome of scoring a completed selection set.
///
/// Immutable once computed; owned by a [`QuizResult`].
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoodProfile {
    /// Theme of the rank-1 artwork.
    pub primary: String,
    /// Theme of the rank-2 artwork (empty if absent).
    pub secondary: String,
    /// Display label composed from the top two aggregated keywords.
    pub description: String,
    /// Up to four keywords, by aggregated weight descending.
    pub keywords: Vec<String>,
    /// Rank-tier score for every catalog artwork, keyed by artwork id.
    pub compatibility_score: BTreeMap<String, u32>,
}

/// A completed quiz outcome, as persisted.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// The four picks at scoring time.
    pub selections: Vec<Selection>,
    pub profile: MoodProfile,
    /// Epoch milliseconds at scoring time.
    pub timestamp: i64,
    /// Cosmetic, randomized match estimate. Display only.
    pub match_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_result_serializes_with_documented_keys() {
        let result = QuizResult {
            selections: vec![],
            profile: MoodProfile {
                primary: "kpop".to_owned(),
                secondary: "ballad".to_owned(),
                description: "energetic warm mood".to_owned(),
                keywords: vec!["energetic".to_owned()],
                compatibility_score: BTreeMap::from([("A".to_owned(), 100)]),
            },
            timestamp: 1_725_000_000_000,
            match_count: 37,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("matchCount").is_some());
        assert!(json["profile"].get("compatibilityScore").is_some());
        assert_eq!(json["timestamp"], 1_725_000_000_000_i64);
    }

    #[test]
    fn quiz_result_round_trips_through_json() {
        let result = QuizResult {
            selections: vec![],
            profile: MoodProfile {
                primary: "retro".to_owned(),
                secondary: String::new(),
                description: "nostalgic mood".to_owned(),
                keywords: vec!["nostalgic".to_owned()],
                compatibility_score: BTreeMap::new(),
            },
            timestamp: 42,
            match_count: 20,
        };
        let json = serde_json::to_string(&result).unwrap();
        let parsed: QuizResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }
}
