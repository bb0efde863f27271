//! Core domain entities.
//!
//! Entities come in pairs: [`NewSlugRecord`] is the
//! insert payload, [`SlugRecord`] is what the store hands back.

pub mod slug;

pub use slug::{NewSlugRecord, SlugRecord};
