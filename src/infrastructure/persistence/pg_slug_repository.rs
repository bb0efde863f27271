//! PostgreSQL implementation of the slug repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewSlugRecord, SlugRecord};
use crate::domain::repositories::SlugRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_slug;

/// PostgreSQL repository for slug storage and lookup.
///
/// Uniqueness is enforced by the `slugs_slug_key` constraint. Inserts use
/// `ON CONFLICT DO NOTHING`, so a lost race yields no row instead of an error
/// and is reported as a conflict.
pub struct PgSlugRepository {
    pool: Arc<PgPool>,
}

impl PgSlugRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlugRepository for PgSlugRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<SlugRecord>, AppError> {
        let record = sqlx::query_as::<_, SlugRecord>(
            r#"
            SELECT slug, url, created_at
            FROM slugs
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn insert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError> {
        new_record.ensure_insertable()?;

        let inserted = sqlx::query_as::<_, SlugRecord>(
            r#"
            INSERT INTO slugs (slug, url)
            VALUES ($1, $2)
            ON CONFLICT (slug) DO NOTHING
            RETURNING slug, url, created_at
            "#,
        )
        .bind(&new_record.slug)
        .bind(&new_record.url)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_slug(&e) {
                AppError::slug_exists(&new_record.slug)
            } else {
                AppError::from(e)
            }
        })?;

        inserted.ok_or_else(|| AppError::slug_exists(&new_record.slug))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
