//! Handler for slug registration.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::slug::{BuildRequest, BuildResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a slug for a URL.
///
/// # Endpoint
///
/// `POST /api/slugs`
///
/// # Request Body
///
/// ```json
/// { "slug": "xy9", "url": "example.com" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "slug": "xy9",
///   "url": "http://example.com",
///   "short_url": "slugz.ca/xy9"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` on invalid input
/// - `409 Conflict` if the slug is taken
/// - `503 Service Unavailable` on storage faults
pub async fn build_handler(
    State(state): State<AppState>,
    Json(payload): Json<BuildRequest>,
) -> Result<(StatusCode, Json<BuildResponse>), AppError> {
    let built = state
        .slug_service
        .build(&payload.slug, &payload.url)
        .await?;

    Ok((StatusCode::CREATED, Json(built.into())))
}
