//! Handler for random slug suggestions.

use axum::{Json, extract::State};

use crate::api::dto::slug::RandomSlugResponse;
use crate::state::AppState;

/// `GET /api/random-slug`
///
/// The candidate is not reserved; registering it may still conflict.
pub async fn random_slug_handler(State(state): State<AppState>) -> Json<RandomSlugResponse> {
    Json(RandomSlugResponse {
        slug: state.slug_service.random_slug(),
    })
}
