//! Catalog loading functionality

use super::{Artwork, Catalog};
use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::info;

/// Loads the artwork catalog from a JSON file (an array of artworks).
///
/// Non-fatal problems are logged and tolerated; a fatal problem (duplicate
/// artwork id) aborts the load.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
    let artworks: Vec<Artwork> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {:?}", path))?;

    let build_result = Catalog::build(artworks);
    let problems = build_result.problems;

    if !problems.is_empty() {
        info!("Found {} problems:", problems.len());
        for problem in problems.iter() {
            info!("- {:?}", problem);
        }
    }
    match (&build_result.catalog, problems.is_empty()) {
        (Some(_), true) => info!("Catalog checked, no issues found."),
        (Some(_), false) => info!(
            "Catalog was built, but check the {} non-fatal issues above.",
            problems.len()
        ),
        (None, _) => info!(
            "Check the {} problems above, the catalog could not be initialized.",
            problems.len()
        ),
    }
    if let Some(catalog) = build_result.catalog {
        info!("Catalog has {} artworks", catalog.get_artworks_count());
        return Ok(catalog);
    }

    bail!("Could not load catalog from {:?}", path)
}
