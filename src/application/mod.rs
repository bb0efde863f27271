//! Application layer.
//!
//! Orchestrates validation, slug generation, and store calls. Handlers and
//! the admin CLI talk to this layer only.
//!
//! - [`services::slug_service::SlugService`] - Slug registration and resolution

pub mod services;
