//! Utility functions for slug generation, URL validation, and error mapping.
//!
//! - [`slug_generator`] - Random slug candidates
//! - [`url_validator`] - URL shape validation and scheme normalization
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod slug_generator;
pub mod url_validator;
