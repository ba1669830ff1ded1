use axum::extract::FromRef;

use crate::catalog::Catalog;
use crate::quiz::QuizSession;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::ServerConfig;

pub type GuardedCatalog = Arc<Catalog>;
pub type GuardedQuizSession = Arc<Mutex<QuizSession>>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: GuardedCatalog,
    pub quiz_session: GuardedQuizSession,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog: GuardedCatalog,
        quiz_session: QuizSession,
        hash: String,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            catalog,
            quiz_session: Arc::new(Mutex::new(quiz_session)),
            hash,
        }
    }
}

impl FromRef<ServerState> for GuardedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for GuardedQuizSession {
    fn from_ref(input: &ServerState) -> Self {
        input.quiz_session.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
