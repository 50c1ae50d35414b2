// src/routes.rs

use axum::{
    Json, Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, chatbot, questions, results, tips},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, questions, results, ai, chatbot).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config, Provider Chain).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:5173".parse().unwrap(),
        "http://127.0.0.1:5173".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Generation is public: questions are transient and tied to no user
    // until a result is submitted.
    let question_routes = Router::new().route("/", get(questions::generate_questions));

    let result_routes = Router::new()
        .route("/", post(results::submit_result))
        .route("/{id}", get(results::get_result))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let ai_routes = Router::new().route("/tips", post(tips::generate_tips));

    let chatbot_routes = Router::new()
        .route("/", post(chatbot::chat))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/api/health", get(health))
        .nest("/api/auth", auth_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/results", result_routes)
        .nest("/api/ai", ai_routes)
        .nest("/api/chatbot", chatbot_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "ok": true,
        "service": "WellNest API",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}
