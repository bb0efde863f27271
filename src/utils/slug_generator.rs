//! Slug generation and validation utilities.
//!
//! Generators produce candidate slugs only. They never consult the store, so a
//! candidate may already be taken; uniqueness is decided by the store's insert.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Maximum slug length accepted by the registry.
pub const MAX_SLUG_LENGTH: usize = 256;

/// Default length of slugs drawn from [`SLUG_ALPHABET`].
pub const DEFAULT_SLUG_LENGTH: usize = 7;

/// Number of random bytes hex-encoded by [`HexSlugGenerator`].
const HEX_SLUG_BYTES: usize = 3;

/// Characters used by [`AlphabetSlugGenerator`].
const SLUG_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Characters that cannot appear inside a single path segment.
const FORBIDDEN_SLUG_CHARS: &[char] = &['/', '?', '#', '%', '\\'];

pub const SLUG_TOO_LONG_MESSAGE: &str = "Slug must be at most 256 characters";
pub const SLUG_INVALID_CHARS_MESSAGE: &str =
    "Slug contains characters that are not allowed in a link";

/// Source of candidate slugs.
///
/// Implementations must be cheap to call repeatedly: callers ask for a fresh
/// candidate whenever the user hits "randomize" or a candidate collides.
#[cfg_attr(test, mockall::automock)]
pub trait SlugGenerator: Send + Sync {
    /// Returns a new candidate slug.
    fn generate(&self) -> String;
}

/// Draws fixed-length slugs from a 62-character alphanumeric alphabet.
#[derive(Debug, Clone)]
pub struct AlphabetSlugGenerator {
    length: usize,
}

impl AlphabetSlugGenerator {
    /// Creates a generator producing slugs of `length` characters.
    ///
    /// A length of zero is bumped to one so that every candidate is a valid slug.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(1, MAX_SLUG_LENGTH),
        }
    }
}

impl Default for AlphabetSlugGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SLUG_LENGTH)
    }
}

impl SlugGenerator for AlphabetSlugGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();

        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..SLUG_ALPHABET.len());
                SLUG_ALPHABET[idx] as char
            })
            .collect()
    }
}

/// Hex-encodes three random bytes, producing six lowercase hex characters.
#[derive(Debug, Clone, Default)]
pub struct HexSlugGenerator;

impl SlugGenerator for HexSlugGenerator {
    fn generate(&self) -> String {
        let mut buffer = [0u8; HEX_SLUG_BYTES];

        if let Err(e) = getrandom::fill(&mut buffer) {
            tracing::warn!(error = %e, "OS entropy unavailable, falling back to thread rng");
            rand::rng().fill(&mut buffer);
        }

        hex::encode(buffer)
    }
}

/// Validates the format of a non-empty slug.
///
/// Emptiness is checked by the registry itself so that the empty-field
/// messages keep their fixed order relative to URL validation.
///
/// # Rules
///
/// - At most [`MAX_SLUG_LENGTH`] characters
/// - No whitespace, control characters, or `/ ? # % \`
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    let length = slug.chars().count();
    if length > MAX_SLUG_LENGTH {
        return Err(AppError::bad_request(
            SLUG_TOO_LONG_MESSAGE,
            json!({ "provided_length": length, "max_length": MAX_SLUG_LENGTH }),
        ));
    }

    if slug
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_SLUG_CHARS.contains(&c))
    {
        return Err(AppError::bad_request(
            SLUG_INVALID_CHARS_MESSAGE,
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}
