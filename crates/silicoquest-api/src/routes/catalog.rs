//! Read-only access to the chapter catalog.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;
use silicoquest_catalog::Chapter;

use crate::state::AppState;

/// Response body for GET /.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    /// Content hash of the catalog.
    pub fingerprint: String,
    pub max_total_score: u32,
    pub chapters: Vec<Chapter>,
}

/// GET /
async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = &state.catalog;
    Json(CatalogResponse {
        fingerprint: catalog.fingerprint().to_owned(),
        max_total_score: catalog.max_total_score(),
        chapters: catalog.chapters().to_vec(),
    })
}

/// Returns the router for the catalog.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_catalog))
}
