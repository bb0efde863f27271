//! HTTP request handlers.
//!
//! Each handler module corresponds to a single endpoint.

pub mod build;
pub mod health;
pub mod lookup;
pub mod random_slug;
pub mod redirect;

pub use build::build_handler;
pub use health::health_handler;
pub use lookup::lookup_handler;
pub use random_slug::random_slug_handler;
pub use redirect::redirect_handler;
