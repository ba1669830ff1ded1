use serde::{Deserialize, Serialize};

/// A selectable artwork in the mood quiz catalog.
///
/// Artworks are defined once at startup and never mutated. `color` and
/// `image_url` are display hints for clients, the core never interprets them.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub theme: String,
    pub description: String,
    pub mood_keywords: Vec<String>,
    pub color: String,
    pub image_url: String,
}
