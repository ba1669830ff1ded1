//! End-to-end quiz flows over the library surface: catalog loading,
//! selection, scoring, and persistence across store handles.

use moodmatch_server::catalog::{Artwork, Catalog};
use moodmatch_server::quiz::{compute_profile, QuizSession, MATCH_COUNT_RANGE};
use moodmatch_server::result_store::{ResultStore, SqliteResultStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tempfile::TempDir;

fn artwork(id: &str, theme: &str, keywords: &[&str]) -> Artwork {
    Artwork {
        id: id.to_owned(),
        title: format!("artwork {}", id),
        theme: theme.to_owned(),
        description: format!("a {} piece", theme),
        mood_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        color: "#123456".to_owned(),
        image_url: format!("/img/{}.webp", id),
    }
}

fn scenario_catalog() -> Arc<Catalog> {
    let artworks = vec![
        artwork("A", "kpop", &["energetic", "trendy"]),
        artwork("B", "ballad", &["emotional", "warm"]),
        artwork("C", "graffiti", &["free", "bold"]),
        artwork("D", "retro", &["nostalgic", "warm"]),
    ];
    Arc::new(Catalog::build(artworks).catalog.unwrap())
}

#[test]
fn scenario_from_the_product_notes() {
    // Selection order A,B,C,D with weights 40/30/20/10. Keyword sums:
    // energetic=40, trendy=40, emotional=30, warm=40, free=20, bold=20,
    // nostalgic=10.
    let catalog = scenario_catalog();
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteResultStore::new(temp_dir.path().join("quiz.db")).unwrap());
    let mut session =
        QuizSession::with_rng(catalog.clone(), store, StdRng::seed_from_u64(7)).unwrap();

    for id in ["A", "B", "C", "D"] {
        session.select_artwork(id).unwrap();
    }
    let weights: Vec<u32> = session.selections().iter().map(|s| s.weight).collect();
    assert_eq!(weights, vec![40, 30, 20, 10]);

    let result = session.calculate_result().unwrap().unwrap();
    assert_eq!(result.profile.primary, "kpop");
    assert_eq!(result.profile.secondary, "ballad");
    assert_eq!(
        result.profile.keywords,
        vec!["energetic", "trendy", "warm", "emotional"]
    );
    assert_eq!(result.profile.compatibility_score["A"], 100);
    assert_eq!(result.profile.compatibility_score["B"], 75);
    assert_eq!(result.profile.compatibility_score["C"], 50);
    assert_eq!(result.profile.compatibility_score["D"], 25);
    assert!(MATCH_COUNT_RANGE.contains(&result.match_count));
    assert!(result.timestamp > 0);
}

#[test]
fn result_survives_a_simulated_restart() {
    let catalog = scenario_catalog();
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("quiz.db");

    let saved = {
        let store = Arc::new(SqliteResultStore::new(&db_path).unwrap());
        let mut session =
            QuizSession::with_rng(catalog.clone(), store, StdRng::seed_from_u64(7)).unwrap();
        for id in ["A", "B", "C", "D"] {
            session.select_artwork(id).unwrap();
        }
        session.calculate_result().unwrap().unwrap().clone()
    };

    // Fresh store handle and session on the same database file.
    let store = Arc::new(SqliteResultStore::new(&db_path).unwrap());
    let session = QuizSession::with_rng(catalog, store.clone(), StdRng::seed_from_u64(8)).unwrap();

    assert_eq!(store.load().unwrap(), Some(saved.clone()));
    assert_eq!(session.quiz_result(), Some(&saved));
}

#[test]
fn reset_clears_the_database_too() {
    let catalog = scenario_catalog();
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("quiz.db");
    let store = Arc::new(SqliteResultStore::new(&db_path).unwrap());
    let mut session =
        QuizSession::with_rng(catalog.clone(), store.clone(), StdRng::seed_from_u64(7)).unwrap();

    for id in ["A", "B", "C", "D"] {
        session.select_artwork(id).unwrap();
    }
    session.calculate_result().unwrap();
    session.reset_quiz().unwrap();

    let fresh_store = Arc::new(SqliteResultStore::new(&db_path).unwrap());
    assert!(fresh_store.load().unwrap().is_none());
}

#[test]
fn reordering_by_reselection_changes_the_profile() {
    let catalog = scenario_catalog();
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(SqliteResultStore::new(temp_dir.path().join("quiz.db")).unwrap());
    let mut session =
        QuizSession::with_rng(catalog.clone(), store, StdRng::seed_from_u64(7)).unwrap();

    for id in ["A", "B", "C", "D"] {
        session.select_artwork(id).unwrap();
    }
    // Re-picking A demotes it to rank 4; B becomes the primary pick.
    session.select_artwork("A").unwrap();

    let profile = compute_profile(session.selections(), &catalog).unwrap();
    assert_eq!(profile.primary, "ballad");
    assert_eq!(profile.secondary, "graffiti");
    assert_eq!(profile.compatibility_score["B"], 100);
    assert_eq!(profile.compatibility_score["A"], 25);
}
