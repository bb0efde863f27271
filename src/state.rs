//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::SlugService;
use crate::domain::repositories::SlugRepository;
use crate::utils::slug_generator::SlugGenerator;

/// Registry wired to trait objects, so the store backend and generator can be
/// chosen at startup.
pub type DynSlugService = SlugService<dyn SlugRepository, dyn SlugGenerator>;

#[derive(Clone)]
pub struct AppState {
    pub slug_service: Arc<DynSlugService>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn SlugRepository>,
        generator: Arc<dyn SlugGenerator>,
        short_domain: impl Into<String>,
    ) -> Self {
        Self {
            slug_service: Arc::new(SlugService::new(repository, generator, short_domain)),
        }
    }
}
