//! Shared-secret authentication for the publish endpoint.

use axum::http::HeaderMap;

/// Header carrying the caller's shared secret (`X-Api-Key`; header names are case-insensitive).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Returns true when both secrets are non-empty and equal after trimming whitespace.
///
/// # Example
///
/// ```rust
/// use facebook_poster::is_authorized;
///
/// assert!(is_authorized(Some(" secret "), "secret"));
/// assert!(!is_authorized(Some("secret"), ""));
/// assert!(!is_authorized(None, "secret"));
/// ```
pub fn is_authorized(provided: Option<&str>, expected: &str) -> bool {
    let expected = expected.trim();
    match provided.map(str::trim) {
        Some(provided) => !expected.is_empty() && !provided.is_empty() && provided == expected,
        None => false,
    }
}

/// Checks the `X-Api-Key` header of a request against the configured secret.
///
/// A header value that is not valid UTF-8 counts as missing.
pub fn authorize_headers(headers: &HeaderMap, expected: &str) -> bool {
    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    is_authorized(provided, expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_matching_secrets_are_authorized() {
        assert!(is_authorized(Some("s3cret"), "s3cret"));
        assert!(is_authorized(Some("  s3cret\n"), " s3cret "));
    }

    #[test]
    fn test_mismatched_or_empty_secrets_are_rejected() {
        assert!(!is_authorized(Some("wrong"), "s3cret"));
        assert!(!is_authorized(Some(""), "s3cret"));
        assert!(!is_authorized(Some("   "), "s3cret"));
        assert!(!is_authorized(Some(""), ""));
        assert!(!is_authorized(Some("s3cret"), "   "));
        assert!(!is_authorized(None, ""));
    }

    #[test]
    fn test_authorize_headers() {
        let mut headers = HeaderMap::new();
        assert!(!authorize_headers(&headers, "s3cret"));

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("s3cret"));
        assert!(authorize_headers(&headers, "s3cret"));
        assert!(!authorize_headers(&headers, "other"));
    }
}
