//! Bearer token extraction.
//!
//! The gateway does not verify tokens itself; it forwards whatever the
//! client presents and lets the record service decide.

use axum::http::{header::AUTHORIZATION, HeaderMap};

/// Extract the bearer token from the `Authorization` header.
///
/// The header value is split on single spaces. It is accepted only when it
/// yields exactly two parts and the first is `bearer` in any case. A header
/// that is not visible ASCII, or an empty token, counts as absent.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Some(token)
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extracts_token() {
        let headers = headers_with("Bearer valid_token");
        assert_eq!(extract_bearer_token(&headers), Some("valid_token"));
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert_eq!(extract_bearer_token(&headers_with("bearer abc")), Some("abc"));
        assert_eq!(extract_bearer_token(&headers_with("BEARER abc")), Some("abc"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_wrong_scheme() {
        assert_eq!(extract_bearer_token(&headers_with("Basic dXNlcjpwYXNz")), None);
    }

    #[test]
    fn test_wrong_part_count() {
        assert_eq!(extract_bearer_token(&headers_with("Bearer")), None);
        assert_eq!(extract_bearer_token(&headers_with("Bearer a b")), None);
        // Double space yields three parts
        assert_eq!(extract_bearer_token(&headers_with("Bearer  abc")), None);
    }

    #[test]
    fn test_empty_token_is_absent() {
        assert_eq!(extract_bearer_token(&headers_with("Bearer ")), None);
    }

    #[test]
    fn test_non_ascii_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
