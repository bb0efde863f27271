//! Slug record entity mapping a slug to its target URL.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, SLUG_REQUIRED_MESSAGE};

/// A persisted slug mapping.
///
/// Records are immutable: once inserted they are only ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct SlugRecord {
    pub slug: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl SlugRecord {
    /// Creates a new SlugRecord instance.
    pub fn new(slug: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            slug,
            url,
            created_at,
        }
    }
}

/// Input data for inserting a new slug mapping.
///
/// `url` is expected to be scheme-normalized already; the store persists it
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSlugRecord {
    pub slug: String,
    pub url: String,
}

impl NewSlugRecord {
    pub fn new(slug: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            url: url.into(),
        }
    }

    /// Checks the invariants every store relies on before writing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the slug is empty.
    pub fn ensure_insertable(&self) -> Result<(), AppError> {
        if self.slug.is_empty() {
            return Err(AppError::bad_request(
                SLUG_REQUIRED_MESSAGE,
                json!({ "field": "slug" }),
            ));
        }

        Ok(())
    }

    /// Converts the payload into a stored record stamped with `created_at`.
    pub fn into_record(self, created_at: DateTime<Utc>) -> SlugRecord {
        SlugRecord::new(self.slug, self.url, created_at)
    }
}
