// ============================================================================
// POST BOARD - CRUD over posts with seed-on-first-read
// ============================================================================

// - Paginated listing that seeds an empty store from a mock API
// - Create / read / update / delete by id
// - Static API key on every JSON route
// - Server-rendered UI with optimistic add/delete
// - Structured logging and JSON errors

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod states;
pub mod store;

pub use states::AppState;

use axum::{Router, middleware, routing::get};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    auth::require_api_key,
    errors::method_not_allowed,
    routes::{health, post, ui},
};

/// Build the full application router around `state`.
pub fn app(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Protected routes (API key required)
    let api = Router::new()
        .route("/posts", get(post::list_posts).post(post::create_post))
        .route(
            "/posts/{id}",
            get(post::get_post)
                .patch(post::update_post)
                .put(post::update_post)
                .delete(post::delete_post),
        )
        // Set before the layer so wrong-method requests are also key-checked
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        .route("/", get(ui::index_page))
        .route("/post/{id}", get(ui::post_page))
        .merge(api)
        .method_not_allowed_fallback(method_not_allowed)
        // Add state and middleware
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}
