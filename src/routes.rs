// src/routes.rs

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{auth, content, results, test},
    state::AppState,
    utils::jwt::{auth_middleware, optional_auth_middleware},
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, bilets, topics, test, results).
/// * Applies global middleware (Trace, CORS) and the static SPA fallback.
/// * Injects global state.
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

    let auth_layer = middleware::from_fn_with_state(state.clone(), auth_middleware);
    let optional_auth_layer =
        middleware::from_fn_with_state(state.clone(), optional_auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        // Protected auth routes
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .route("/profile", put(auth::update_profile))
                .layer(auth_layer.clone()),
        );

    // Listings annotate per-user history when a token is present but stay
    // readable without one.
    let bilet_routes = Router::new()
        .route("/", get(content::list_bilets))
        .layer(optional_auth_layer.clone());

    let topic_routes = Router::new()
        .route("/", get(content::list_topics))
        .layer(optional_auth_layer);

    let test_routes = Router::new()
        .route("/{test_type}/{test_id}", get(test::get_test))
        .merge(
            Router::new()
                .route("/{test_type}/{test_id}/submit", post(test::submit_test))
                .layer(auth_layer.clone()),
        );

    let history_routes = Router::new()
        .route("/results", get(results::list_results))
        .route("/stats", get(results::get_stats))
        .layer(auth_layer);

    let static_dir = state.config.static_dir.clone();

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/bilets", bilet_routes)
        .nest("/api/topics", topic_routes)
        .nest("/api/test", test_routes)
        .nest("/api", history_routes)
        // Global middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Built SPA assets; unknown paths fall through to a plain 404.
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
