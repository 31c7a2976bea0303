//! SilicoQuest HTTP API.
//!
//! Exposes the progression controller over JSON so a browser front end can
//! drive the quest.

pub mod config;
pub mod error;
pub mod host;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/quest", routes::quest::router())
        .nest("/api/v1/catalog", routes::catalog::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
