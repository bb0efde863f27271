//! URL shape validation and scheme normalization.
//!
//! Target URLs are stored exactly as submitted, apart from a missing scheme
//! being filled in with `http://`. No host lowercasing or port stripping is
//! performed, so a resolved URL is byte-for-byte what the creator typed.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// Accepted URL shape: optional http(s) scheme, optional `www.`, a host with a
/// 2-6 letter TLD, and an optional path/query tail.
///
/// The scheme is matched case-insensitively in ASCII only, so no non-ASCII
/// character can stand in for a scheme letter.
static URL_SHAPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i-u:https?://)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-zA-Z]{2,6}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)$",
    )
    .expect("URL shape regex is valid")
});

/// Returns true if `input` already starts with `http://` or `https://`.
fn has_http_scheme(input: &str) -> bool {
    let lower = input
        .get(..8)
        .unwrap_or(input)
        .to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Prefixes `http://` when the input carries no http(s) scheme.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_scheme("example.com"), "http://example.com");
/// assert_eq!(normalize_scheme("https://example.com"), "https://example.com");
/// ```
pub fn normalize_scheme(input: &str) -> String {
    if has_http_scheme(input) {
        input.to_string()
    } else {
        format!("http://{input}")
    }
}

/// Checks that `input` is a well-formed absolute http(s) URL, scheme optional.
///
/// Both the shape regex and a full parse of the scheme-normalized form must
/// succeed, which rejects strings like `javascript:` URLs, bare words, and
/// hosts without a TLD.
pub fn is_valid_url(input: &str) -> bool {
    if !URL_SHAPE_REGEX.is_match(input) {
        return false;
    }

    match Url::parse(&normalize_scheme(input)) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
