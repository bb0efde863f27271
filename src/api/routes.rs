//! API route configuration.

use crate::api::handlers::{build_handler, lookup_handler, random_slug_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes nested under `/api`.
///
/// # Endpoints
///
/// - `POST /slugs`         - Register a slug for a URL
/// - `GET  /slugs/{slug}`  - Look up a slug's mapping
/// - `GET  /random-slug`   - Suggest a random slug candidate
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/slugs", post(build_handler))
        .route("/slugs/{slug}", get(lookup_handler))
        .route("/random-slug", get(random_slug_handler))
}
