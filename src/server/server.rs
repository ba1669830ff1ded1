use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use crate::catalog::{Artwork, Catalog};
use crate::quiz::{QuizError, QuizSession};
use tower_http::services::ServeDir;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use super::{log_requests, state::*, RequestsLoggingLevel, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub artworks: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        artworks: state.catalog.get_artworks_count(),
    };
    Json(stats)
}

async fn get_catalog(State(catalog): State<GuardedCatalog>) -> Response {
    let artworks: Vec<Artwork> = catalog.iter_artworks().cloned().collect();
    Json(artworks).into_response()
}

async fn get_artwork(State(catalog): State<GuardedCatalog>, Path(id): Path<String>) -> Response {
    match catalog.get_artwork(&id) {
        Some(artwork) => Json(artwork).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn get_selections(State(session): State<GuardedQuizSession>) -> Response {
    let session = session.lock().unwrap();
    Json(session.selections().to_vec()).into_response()
}

async fn post_selection(
    State(session): State<GuardedQuizSession>,
    Path(artwork_id): Path<String>,
) -> Response {
    let mut session = session.lock().unwrap();
    match session.select_artwork(&artwork_id) {
        Ok(()) => Json(session.selections().to_vec()).into_response(),
        Err(QuizError::UnknownArtwork(_)) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_selection(
    State(session): State<GuardedQuizSession>,
    Path(artwork_id): Path<String>,
) -> Response {
    let mut session = session.lock().unwrap();
    session.remove_selection(&artwork_id);
    Json(session.selections().to_vec()).into_response()
}

async fn delete_selections(State(session): State<GuardedQuizSession>) -> Response {
    let mut session = session.lock().unwrap();
    session.clear_selections();
    StatusCode::NO_CONTENT.into_response()
}

async fn post_result(State(session): State<GuardedQuizSession>) -> Response {
    let mut session = session.lock().unwrap();
    match session.calculate_result() {
        Ok(Some(result)) => Json(result.clone()).into_response(),
        Ok(None) => (
            StatusCode::CONFLICT,
            "The quiz needs exactly 4 selections before scoring.",
        )
            .into_response(),
        Err(err) => {
            error!("Failed to calculate quiz result: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn get_result(State(session): State<GuardedQuizSession>) -> Response {
    let session = session.lock().unwrap();
    match session.quiz_result() {
        Some(result) => Json(result.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn post_reset(State(session): State<GuardedQuizSession>) -> Response {
    let mut session = session.lock().unwrap();
    match session.reset_quiz() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!("Failed to reset quiz: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn make_app(
    config: ServerConfig,
    catalog: Arc<Catalog>,
    quiz_session: QuizSession,
    hash: String,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), catalog, quiz_session, hash);

    let catalog_routes: Router = Router::new()
        .route("/", get(get_catalog))
        .route("/artwork/{id}", get(get_artwork))
        .with_state(state.clone());

    let quiz_routes: Router = Router::new()
        .route("/selections", get(get_selections))
        .route("/selections", delete(delete_selections))
        .route("/selections/{artwork_id}", post(post_selection))
        .route("/selections/{artwork_id}", delete(delete_selection))
        .route("/result", post(post_result))
        .route("/result", get(get_result))
        .route("/reset", post(post_reset))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let mut app: Router = home_router
        .nest("/v1/catalog", catalog_routes)
        .nest("/v1/quiz", quiz_routes);

    app = app.layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(
    catalog: Arc<Catalog>,
    quiz_session: QuizSession,
    requests_logging_level: RequestsLoggingLevel,
    port: u16,
    frontend_dir_path: Option<String>,
) -> Result<()> {
    let config = ServerConfig {
        port,
        requests_logging_level,
        frontend_dir_path,
    };
    let hash = env!("GIT_HASH").to_string();
    let app = make_app(config, catalog, quiz_session, hash)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;

    Ok(axum::serve(listener, app).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizResult;
    use crate::result_store::MemoryResultStore;
    use axum::body::Body;
    use axum::http::Request;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tower::ServiceExt; // for `oneshot`

    fn make_test_app() -> Router {
        let catalog = Arc::new(Catalog::dummy());
        let store = Arc::new(MemoryResultStore::new());
        let session =
            QuizSession::with_rng(catalog.clone(), store, StdRng::seed_from_u64(7)).unwrap();
        make_app(
            ServerConfig::default(),
            catalog,
            session,
            "123456".to_owned(),
        )
        .unwrap()
    }

    async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn serves_catalog() {
        let app = make_test_app();
        let (status, body) = send(&app, "GET", "/v1/catalog").await;
        assert_eq!(status, StatusCode::OK);
        let artworks: Vec<Artwork> = serde_json::from_slice(&body).unwrap();
        assert_eq!(artworks.len(), 5);

        let (status, _) = send(&app, "GET", "/v1/catalog/artwork/A").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "GET", "/v1/catalog/artwork/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn selecting_unknown_artwork_is_not_found() {
        let app = make_test_app();
        let (status, _) = send(&app, "POST", "/v1/quiz/selections/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn result_before_four_selections_conflicts() {
        let app = make_test_app();
        send(&app, "POST", "/v1/quiz/selections/A").await;
        let (status, _) = send(&app, "POST", "/v1/quiz/result").await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = send(&app, "GET", "/v1/quiz/result").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn full_quiz_flow_over_http() {
        let app = make_test_app();

        for id in ["A", "B", "C", "D"] {
            let (status, _) = send(&app, "POST", &format!("/v1/quiz/selections/{}", id)).await;
            assert_eq!(status, StatusCode::OK);
        }

        // The fifth pick is silently ignored.
        let (status, body) = send(&app, "POST", "/v1/quiz/selections/E").await;
        assert_eq!(status, StatusCode::OK);
        let selections: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(selections.len(), 4);

        let (status, body) = send(&app, "POST", "/v1/quiz/result").await;
        assert_eq!(status, StatusCode::OK);
        let result: QuizResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.profile.primary, "kpop");
        assert_eq!(result.profile.compatibility_score["A"], 100);
        assert_eq!(result.profile.compatibility_score["E"], 25);

        let (status, body) = send(&app, "GET", "/v1/quiz/result").await;
        assert_eq!(status, StatusCode::OK);
        let fetched: QuizResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched, result);

        let (status, _) = send(&app, "POST", "/v1/quiz/reset").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", "/v1/quiz/result").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (_, body) = send(&app, "GET", "/v1/quiz/selections").await;
        let selections: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert!(selections.is_empty());
    }

    #[tokio::test]
    async fn clearing_selections_empties_the_list() {
        let app = make_test_app();
        send(&app, "POST", "/v1/quiz/selections/A").await;
        send(&app, "POST", "/v1/quiz/selections/B").await;

        let (status, _) = send(&app, "DELETE", "/v1/quiz/selections").await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, "GET", "/v1/quiz/selections").await;
        let selections: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert!(selections.is_empty());
    }

    #[tokio::test]
    async fn removing_a_selection_reindexes_over_http() {
        let app = make_test_app();
        for id in ["A", "B", "C"] {
            send(&app, "POST", &format!("/v1/quiz/selections/{}", id)).await;
        }

        let (status, body) = send(&app, "DELETE", "/v1/quiz/selections/A").await;
        assert_eq!(status, StatusCode::OK);
        let selections: Vec<serde_json::Value> = serde_json::from_slice(&body).unwrap();
        assert_eq!(selections.len(), 2);
        assert_eq!(selections[0]["artwork"]["id"], "B");
        assert_eq!(selections[0]["order"], 1);
        assert_eq!(selections[0]["weight"], 40);
    }
}
