#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;
use slugz::domain::entities::{NewSlugRecord, SlugRecord};
use slugz::domain::repositories::SlugRepository;
use slugz::error::AppError;
use slugz::infrastructure::persistence::{MemorySlugRepository, PgSlugRepository};
use slugz::routes::router;
use slugz::state::AppState;
use slugz::utils::slug_generator::SlugGenerator;
use sqlx::PgPool;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const TEST_DOMAIN: &str = "slugz.ca";

/// Generator that hands out a fixed list of slugs in order, cycling.
pub struct SequenceSlugGenerator {
    slugs: Vec<String>,
    next: AtomicUsize,
}

impl SequenceSlugGenerator {
    pub fn new(slugs: &[&str]) -> Self {
        Self {
            slugs: slugs.iter().map(|s| s.to_string()).collect(),
            next: AtomicUsize::new(0),
        }
    }
}

impl SlugGenerator for SequenceSlugGenerator {
    fn generate(&self) -> String {
        let i = self.next.fetch_add(1, Ordering::Relaxed);
        self.slugs[i % self.slugs.len()].clone()
    }
}

/// Store whose every call fails as unreachable.
pub struct UnavailableSlugRepository;

#[async_trait]
impl SlugRepository for UnavailableSlugRepository {
    async fn find_by_slug(&self, _slug: &str) -> Result<Option<SlugRecord>, AppError> {
        Err(AppError::storage_unavailable(json!({})))
    }

    async fn insert(&self, _new_record: NewSlugRecord) -> Result<SlugRecord, AppError> {
        Err(AppError::storage_unavailable(json!({})))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::storage_unavailable(json!({})))
    }
}

pub fn memory_state() -> (AppState, Arc<MemorySlugRepository>) {
    memory_state_with(Arc::new(SequenceSlugGenerator::new(&["rand001", "rand002"])))
}

pub fn memory_state_with(
    generator: Arc<dyn SlugGenerator>,
) -> (AppState, Arc<MemorySlugRepository>) {
    let repo = Arc::new(MemorySlugRepository::new());
    let state = AppState::new(repo.clone(), generator, TEST_DOMAIN);
    (state, repo)
}

pub fn unavailable_state() -> AppState {
    AppState::new(
        Arc::new(UnavailableSlugRepository),
        Arc::new(SequenceSlugGenerator::new(&["rand001"])),
        TEST_DOMAIN,
    )
}

pub fn pg_state(pool: PgPool) -> AppState {
    AppState::new(
        Arc::new(PgSlugRepository::new(Arc::new(pool))),
        Arc::new(SequenceSlugGenerator::new(&["rand001"])),
        TEST_DOMAIN,
    )
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn insert_slug(pool: &PgPool, slug: &str, url: &str) {
    sqlx::query("INSERT INTO slugs (slug, url) VALUES ($1, $2)")
        .bind(slug)
        .bind(url)
        .execute(pool)
        .await
        .unwrap();
}
