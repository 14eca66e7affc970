mod handlers;
pub mod views;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::CreatedAtPolicy;
use crate::db::Database;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub created_at_policy: CreatedAtPolicy,
}

/// Build the application router.
///
/// The form routes accept both GET (query string) and POST (form body).
pub fn create_router(db: Database, created_at_policy: CreatedAtPolicy) -> Router {
    let state = AppState {
        db,
        created_at_policy,
    };

    Router::new()
        .route("/", get(handlers::list_notes))
        .route("/add", get(handlers::add_note).post(handlers::add_note))
        .route("/delete", get(handlers::delete_note).post(handlers::delete_note))
        .route("/update", get(handlers::update_note).post(handlers::update_note))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
