//! Repository trait for slug mapping storage.

use crate::domain::entities::{NewSlugRecord, SlugRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for slug records.
///
/// The store is the single authority on slug uniqueness. Implementations must
/// make [`SlugRepository::insert`] an atomic conditional write: of any number
/// of concurrent inserts for the same slug, exactly one succeeds and the rest
/// observe [`AppError::Conflict`]. A prior [`SlugRepository::find_by_slug`]
/// by the caller is never relied upon for correctness.
///
/// Implementations must be safe for unbounded concurrent use without external
/// locking.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSlugRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemorySlugRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlugRepository: Send + Sync {
    /// Finds the record for `slug`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(SlugRecord))` if found
    /// - `Ok(None)` if not found (absence is not an error)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] on storage faults.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<SlugRecord>, AppError>;

    /// Inserts a new record, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for an empty slug, without touching
    /// storage.
    /// Returns [`AppError::Conflict`] if a record with the same slug exists,
    /// including one inserted concurrently.
    /// Returns [`AppError::StorageUnavailable`] on storage faults.
    async fn insert(&self, new_record: NewSlugRecord) -> Result<SlugRecord, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageUnavailable`] if it is not.
    async fn ping(&self) -> Result<(), AppError>;
}
