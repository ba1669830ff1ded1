mod result;
mod scoring;
mod selection;
mod session;

pub use result::{MoodProfile, QuizResult};
pub use scoring::{compute_profile, compute_result, ScoringError, MATCH_COUNT_RANGE};
pub use selection::{weight_for_order, Selection, SelectionStore, MAX_SELECTIONS};
pub use session::{QuizError, QuizSession};
