// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers::quiz, state::AppState};

/// Assembles the main application router.
///
/// * Mounts the quiz screens under `/quiz`.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (quiz service).
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin([
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/quiz", get(quiz::show_list))
        .route("/quiz/insert", post(quiz::insert))
        .route("/quiz/update", post(quiz::update))
        .route("/quiz/delete", post(quiz::delete))
        .route("/quiz/play", get(quiz::play))
        .route("/quiz/check", post(quiz::check))
        .route("/quiz/random", get(quiz::show_random_quizzes))
        .route("/quiz/{id}", get(quiz::show_update))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
