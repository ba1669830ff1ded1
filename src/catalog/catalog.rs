use super::Artwork;
use std::collections::HashMap;

/// Non-fatal (and one fatal) issues found while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    /// Two artworks share an id. Fatal: the catalog cannot be built.
    DuplicateArtworkId(String),
    /// An artwork has no mood keywords, it will never contribute to scoring.
    NoMoodKeywords(String),
    /// An artwork has an empty theme label.
    EmptyTheme(String),
}

pub struct CatalogBuildResult {
    pub catalog: Option<Catalog>,
    pub problems: Vec<Problem>,
}

/// The fixed set of selectable artworks. Built once at startup, never mutated.
pub struct Catalog {
    artworks: Vec<Artwork>,
    ids_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn build(artworks: Vec<Artwork>) -> CatalogBuildResult {
        let mut problems = Vec::new();
        let mut ids_index = HashMap::with_capacity(artworks.len());
        let mut fatal = false;

        for (position, artwork) in artworks.iter().enumerate() {
            if ids_index.insert(artwork.id.clone(), position).is_some() {
                problems.push(Problem::DuplicateArtworkId(artwork.id.clone()));
                fatal = true;
            }
            if artwork.mood_keywords.is_empty() {
                problems.push(Problem::NoMoodKeywords(artwork.id.clone()));
            }
            if artwork.theme.is_empty() {
                problems.push(Problem::EmptyTheme(artwork.id.clone()));
            }
        }

        let catalog = if fatal {
            None
        } else {
            Some(Catalog {
                artworks,
                ids_index,
            })
        };
        CatalogBuildResult { catalog, problems }
    }

    pub fn get_artwork(&self, id: &str) -> Option<&Artwork> {
        self.ids_index.get(id).map(|&i| &self.artworks[i])
    }

    pub fn iter_artworks(&self) -> impl Iterator<Item = &Artwork> {
        self.artworks.iter()
    }

    pub fn get_artworks_count(&self) -> usize {
        self.artworks.len()
    }

    #[cfg(test)]
    pub fn dummy() -> Catalog {
        let artworks = vec![
            dummy_artwork("A", "kpop", &["energetic", "trendy"]),
            dummy_artwork("B", "ballad", &["emotional", "warm"]),
            dummy_artwork("C", "graffiti", &["free", "bold"]),
            dummy_artwork("D", "retro", &["nostalgic", "warm"]),
            dummy_artwork("E", "jazz", &["smooth", "late-night"]),
        ];
        Catalog::build(artworks)
            .catalog
            .expect("dummy catalog must build")
    }
}

#[cfg(test)]
pub fn dummy_artwork(id: &str, theme: &str, keywords: &[&str]) -> Artwork {
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
