//! Domain layer containing the registry's data model and storage contract.
//!
//! - [`entities`] - The persisted [`entities::SlugRecord`]
//! - [`repositories`] - The [`repositories::SlugRepository`] storage trait
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Concrete stores live in [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
