//! Handler for short link redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its stored URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// Every request is resolved against the store; nothing is cached.
///
/// # Errors
///
/// Returns 404 Not Found with a JSON body if the slug is not registered.
/// Returns 503 Service Unavailable on storage faults.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state.slug_service.resolve(&slug).await?;

    Ok(Redirect::temporary(&url))
}
