//! Handler for slug lookup.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::slug::SlugResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the mapping for a slug without redirecting.
///
/// # Endpoint
///
/// `GET /api/slugs/{slug}`
///
/// # Errors
///
/// Returns 404 Not Found if the slug is not registered.
pub async fn lookup_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SlugResponse>, AppError> {
    let record = state.slug_service.lookup(&slug).await?;

    Ok(Json(record.into()))
}
