//! Business logic services for the application layer.

pub mod slug_service;

pub use slug_service::{BuiltUrl, SlugService};
