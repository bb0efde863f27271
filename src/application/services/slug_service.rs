//! Slug registry service: creation and resolution of slug mappings.

use std::fmt;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewSlugRecord, SlugRecord};
use crate::domain::repositories::SlugRepository;
use crate::error::{AppError, SLUG_NOT_FOUND_MESSAGE, SLUG_REQUIRED_MESSAGE};
use crate::utils::slug_generator::{SlugGenerator, validate_slug};
use crate::utils::url_validator::{is_valid_url, normalize_scheme};

pub const URL_REQUIRED_MESSAGE: &str = "Please enter a URL!";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL!";
pub const URL_TOO_LONG_MESSAGE: &str = "URL must be at most 2048 characters";

/// Longest target URL accepted by [`SlugService::build`].
pub const MAX_URL_LENGTH: usize = 2048;

/// Result of a successful [`SlugService::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltUrl {
    /// Fully-qualified short link, `<short_domain>/<slug>`.
    pub short_url: String,
    /// The record as persisted by the store.
    pub record: SlugRecord,
}

impl fmt::Display for BuiltUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_url)
    }
}

/// The slug registry.
///
/// Owns input validation, slug generation, and orchestration against the
/// store. Holds no cached records and no cross-call state; every call goes to
/// the store, which is the single source of truth.
pub struct SlugService<R: SlugRepository + ?Sized, G: SlugGenerator + ?Sized> {
    repository: Arc<R>,
    generator: Arc<G>,
    short_domain: String,
}

impl<R: SlugRepository + ?Sized, G: SlugGenerator + ?Sized> SlugService<R, G> {
    /// Creates a new registry.
    ///
    /// `short_domain` is the public origin short links are built on, e.g.
    /// `slugz.ca` or `https://s.example.com`. A trailing `/` is ignored.
    pub fn new(repository: Arc<R>, generator: Arc<G>, short_domain: impl Into<String>) -> Self {
        let short_domain = short_domain.into().trim_end_matches('/').to_string();

        Self {
            repository,
            generator,
            short_domain,
        }
    }

    /// Registers `slug` as a short link for `url`.
    ///
    /// # Validation
    ///
    /// Checked in this order, first failure wins:
    ///
    /// 1. URL is non-empty
    /// 2. Slug is non-empty
    /// 3. URL has a valid absolute http(s) shape, scheme optional
    /// 4. URL is at most [`MAX_URL_LENGTH`] characters
    /// 5. Slug format (see [`validate_slug`])
    ///
    /// A URL without scheme is stored with `http://` prefixed.
    ///
    /// # Uniqueness
    ///
    /// An existing slug is rejected up front without attempting an insert.
    /// The store's insert is still the authority: if another caller claims the
    /// slug between the check and the insert, the same conflict is returned.
    /// No retry with another slug is attempted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for malformed input.
    /// Returns [`AppError::Conflict`] if the slug is already registered.
    /// Returns [`AppError::StorageUnavailable`] on store faults.
    pub async fn build(&self, slug: &str, url: &str) -> Result<BuiltUrl, AppError> {
        if url.is_empty() {
            return Err(AppError::bad_request(
                URL_REQUIRED_MESSAGE,
                json!({ "field": "url" }),
            ));
        }

        if slug.is_empty() {
            return Err(AppError::bad_request(
                SLUG_REQUIRED_MESSAGE,
                json!({ "field": "slug" }),
            ));
        }

        if !is_valid_url(url) {
            return Err(AppError::bad_request(
                INVALID_URL_MESSAGE,
                json!({ "field": "url", "url": url }),
            ));
        }

        let url_length = url.chars().count();
        if url_length > MAX_URL_LENGTH {
            return Err(AppError::bad_request(
                URL_TOO_LONG_MESSAGE,
                json!({ "field": "url", "provided_length": url_length, "max_length": MAX_URL_LENGTH }),
            ));
        }

        validate_slug(slug)?;

        let normalized_url = normalize_scheme(url);

        if self.repository.find_by_slug(slug).await?.is_some() {
            debug!(slug, "Slug already registered");
            return Err(AppError::slug_exists(slug));
        }

        let record = self
            .repository
            .insert(NewSlugRecord::new(slug, normalized_url))
            .await
            .inspect_err(|e| {
                if matches!(e, AppError::Conflict { .. }) {
                    warn!(slug, "Slug claimed concurrently between check and insert");
                }
            })?;

        let short_url = self.short_url(&record.slug);
        info!(slug = %record.slug, url = %record.url, "Slug created");

        Ok(BuiltUrl { short_url, record })
    }

    /// Resolves `slug` to its target URL.
    ///
    /// The URL is returned exactly as stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug is not registered.
    /// Returns [`AppError::StorageUnavailable`] on store faults.
    pub async fn resolve(&self, slug: &str) -> Result<String, AppError> {
        self.lookup(slug).await.map(|record| record.url)
    }

    /// Fetches the full record for `slug`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn lookup(&self, slug: &str) -> Result<SlugRecord, AppError> {
        match self.repository.find_by_slug(slug).await? {
            Some(record) => {
                debug!(slug, url = %record.url, "Slug resolved");
                Ok(record)
            }
            None => {
                debug!(slug, "Slug not found");
                Err(AppError::not_found(
                    SLUG_NOT_FOUND_MESSAGE,
                    json!({ "slug": slug }),
                ))
            }
        }
    }

    /// Returns a fresh random slug candidate.
    ///
    /// The candidate is not reserved and may already be taken; a collision
    /// shows up as an ordinary conflict from [`Self::build`].
    pub fn random_slug(&self) -> String {
        self.generator.generate()
    }

    /// Constructs the full short link for `slug`.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.short_domain, slug)
    }

    pub fn short_domain(&self) -> &str {
        &self.short_domain
    }

    /// Checks that the underlying store is reachable.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockSlugRepository;
    use crate::utils::slug_generator::{MockSlugGenerator, SLUG_INVALID_CHARS_MESSAGE};
    use chrono::Utc;

    const DOMAIN: &str = "slugz.ca";

    fn stored(new_record: NewSlugRecord) -> SlugRecord {
        new_record.into_record(Utc::now())
    }

    fn service(
        repo: MockSlugRepository,
        generator: MockSlugGenerator,
    ) -> SlugService<MockSlugRepository, MockSlugGenerator> {
        SlugService::new(Arc::new(repo), Arc::new(generator), DOMAIN)
    }

    fn repo_service(repo: MockSlugRepository) -> SlugService<MockSlugRepository, MockSlugGenerator> {
        service(repo, MockSlugGenerator::new())
    }

    #[tokio::test]
    async fn test_build_success() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "xy9")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|r| r.slug == "xy9" && r.url == "http://test.com")
            .times(1)
            .returning(|r| Ok(stored(r)));

        let built = repo_service(repo)
            .build("xy9", "http://test.com")
            .await
            .unwrap();

        assert_eq!(built.short_url, "slugz.ca/xy9");
        assert_eq!(built.to_string(), "slugz.ca/xy9");
        assert_eq!(built.record.url, "http://test.com");
    }

    #[tokio::test]
    async fn test_build_prefixes_missing_scheme() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|r| r.url == "http://example.com")
            .times(1)
            .returning(|r| Ok(stored(r)));

        let built = repo_service(repo).build("abc", "example.com").await.unwrap();
        assert_eq!(built.record.url, "http://example.com");
    }

    #[tokio::test]
    async fn test_build_keeps_https_url_unchanged() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|r| r.url == "https://example.com")
            .times(1)
            .returning(|r| Ok(stored(r)));

        let built = repo_service(repo)
            .build("abc2", "https://example.com")
            .await
            .unwrap();
        assert_eq!(built.record.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_build_existing_slug_skips_insert() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug()
            .times(1)
            .returning(|slug| Ok(Some(stored(NewSlugRecord::new(slug, "http://old.com")))));
        repo.expect_insert().times(0);

        let err = repo_service(repo)
            .build("taken", "http://new.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "Slug already exists");
    }

    #[tokio::test]
    async fn test_build_lost_race_propagates_conflict_without_retry() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|r| Err(AppError::slug_exists(&r.slug)));

        let mut generator = MockSlugGenerator::new();
        generator.expect_generate().times(0);

        let err = service(repo, generator)
            .build("race", "http://example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "Slug already exists");
    }

    #[tokio::test]
    async fn test_build_empty_inputs_report_url_first() {
        let err = repo_service(MockSlugRepository::new())
            .build("", "")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), URL_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_build_empty_slug() {
        let err = repo_service(MockSlugRepository::new())
            .build("", "example.com")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), SLUG_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_build_invalid_url_checked_before_slug_format() {
        let err = repo_service(MockSlugRepository::new())
            .build("bad/slug", "not a url")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), INVALID_URL_MESSAGE);
    }

    #[tokio::test]
    async fn test_build_overlong_url_checked_after_empty_slug() {
        let long_url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));

        let err = repo_service(MockSlugRepository::new())
            .build("", &long_url)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), SLUG_REQUIRED_MESSAGE);

        let err = repo_service(MockSlugRepository::new())
            .build("bad/slug", &long_url)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), URL_TOO_LONG_MESSAGE);
    }

    #[tokio::test]
    async fn test_build_overlong_slug_with_empty_url_reports_url() {
        let err = repo_service(MockSlugRepository::new())
            .build(&"a".repeat(257), "")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), URL_REQUIRED_MESSAGE);
    }

    #[tokio::test]
    async fn test_build_invalid_slug_never_reaches_store() {
        let err = repo_service(MockSlugRepository::new())
            .build("bad/slug", "example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), SLUG_INVALID_CHARS_MESSAGE);
    }

    #[tokio::test]
    async fn test_build_storage_fault_is_not_conflict() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug()
            .returning(|_| Err(AppError::storage_unavailable(json!({}))));
        repo.expect_insert().times(0);

        let err = repo_service(repo)
            .build("abc", "example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_build_insert_fault_propagates() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_insert()
            .returning(|_| Err(AppError::storage_unavailable(json!({}))));

        let err = repo_service(repo)
            .build("abc", "example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::StorageUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "xy9")
            .returning(|slug| Ok(Some(stored(NewSlugRecord::new(slug, "http://test.com")))));

        let url = repo_service(repo).resolve("xy9").await.unwrap();
        assert_eq!(url, "http://test.com");
    }

    #[tokio::test]
    async fn test_resolve_missing() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));

        let err = repo_service(repo).resolve("zzz").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), SLUG_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_resolve_storage_fault() {
        let mut repo = MockSlugRepository::new();
        repo.expect_find_by_slug()
            .returning(|_| Err(AppError::storage_unavailable(json!({}))));

        let err = repo_service(repo).resolve("abc").await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_random_slug_asks_generator_each_time() {
        let mut generator = MockSlugGenerator::new();
        let mut seq = mockall::Sequence::new();
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "first".to_string());
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| "second".to_string());

        let service = service(MockSlugRepository::new(), generator);
        assert_eq!(service.random_slug(), "first");
        assert_eq!(service.random_slug(), "second");
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service: SlugService<MockSlugRepository, MockSlugGenerator> = SlugService::new(
            Arc::new(MockSlugRepository::new()),
            Arc::new(MockSlugGenerator::new()),
            "https://s.example.com/",
        );

        assert_eq!(service.short_domain(), "https://s.example.com");
        assert_eq!(service.short_url("abc"), "https://s.example.com/abc");
    }
}
