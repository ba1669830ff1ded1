//! Moodmatch Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog;
pub mod config;
pub mod quiz;
pub mod result_store;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{load_catalog, Artwork, Catalog};
pub use quiz::{QuizResult, QuizSession, SelectionStore};
pub use result_store::{MemoryResultStore, ResultStore, SqliteResultStore};
pub use server::{run_server, RequestsLoggingLevel};
