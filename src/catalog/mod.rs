mod artwork;
mod catalog;
mod load;

pub use artwork::Artwork;
pub use catalog::{Catalog, CatalogBuildResult, Problem as LoadCatalogProblem};
pub use load::load_catalog;

#[cfg(test)]
pub use catalog::dummy_artwork;
