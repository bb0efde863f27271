//! Slug store implementations.
//!
//! - [`PgSlugRepository`] - PostgreSQL, uniqueness enforced by a unique index
//! - [`MemorySlugRepository`] - Sharded in-process map, uniqueness enforced by
//!   atomic entry insertion

pub mod memory_slug_repository;
pub mod pg_slug_repository;

pub use memory_slug_repository::MemorySlugRepository;
pub use pg_slug_repository::PgSlugRepository;
