//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Input checks
//! live in the registry, not here.

pub mod health;
pub mod slug;
