//! DTOs for slug endpoints.

use serde::{Deserialize, Serialize};

use crate::application::services::BuiltUrl;
use crate::domain::entities::SlugRecord;

/// Request to register a slug.
///
/// Missing fields deserialize as empty strings so that the registry reports
/// them with its usual "Please enter ..." messages. All other checks, length
/// caps included, run in the registry in their fixed order.
#[derive(Debug, Deserialize)]
pub struct BuildRequest {
    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub url: String,
}

/// Response for a newly registered slug.
#[derive(Debug, Serialize)]
pub struct BuildResponse {
    pub slug: String,
    pub url: String,
    pub short_url: String,
}

impl From<BuiltUrl> for BuildResponse {
    fn from(built: BuiltUrl) -> Self {
        Self {
            slug: built.record.slug,
            url: built.record.url,
            short_url: built.short_url,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SlugResponse {
    pub slug: String,
    pub url: String,
}

impl From<SlugRecord> for SlugResponse {
    fn from(record: SlugRecord) -> Self {
        Self {
            slug: record.slug,
            url: record.url,
        }
    }
}

/// A fresh random slug candidate.
#[derive(Debug, Serialize)]
pub struct RandomSlugResponse {
    pub slug: String,
}
