//! Endpoint URL construction.
//!
//! The configured base URL commonly already ends in `/api`, and callers
//! pass paths that sometimes carry the same prefix. Joining naively would
//! produce `/api/api/...`, so the duplicated prefix is collapsed.

/// Path prefix that must not be duplicated between base and path.
const API_PREFIX: &str = "/api";

/// Join a base URL and an endpoint path.
///
/// - Trailing slashes on the base are dropped.
/// - A missing leading slash on the path is added.
/// - When the base ends with `/api` and the path starts with the `/api`
///   segment, the path's copy is stripped.
#[must_use]
pub(crate) fn build_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');

    let mut path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if base.ends_with(API_PREFIX) && is_api_prefixed(&path) {
        path = path
            .get(API_PREFIX.len()..)
            .map_or_else(String::new, ToString::to_string);
    }

    format!("{base}{path}")
}

/// Whether the path starts with the `/api` segment (not merely a string
/// prefix: `/apiary` does not count).
fn is_api_prefixed(path: &str) -> bool {
    path == API_PREFIX
        || path
            .strip_prefix(API_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_api_prefix() {
        assert_eq!(
            build_url("http://host/api", "/api/products"),
            "http://host/api/products"
        );
    }

    #[test]
    fn test_plain_join() {
        assert_eq!(
            build_url("http://host/api", "/products"),
            "http://host/api/products"
        );
    }

    #[test]
    fn test_trailing_slash_on_base() {
        assert_eq!(
            build_url("http://host/api/", "/products"),
            "http://host/api/products"
        );
    }

    #[test]
    fn test_missing_leading_slash_on_path() {
        assert_eq!(
            build_url("http://host/api", "products"),
            "http://host/api/products"
        );
    }

    #[test]
    fn test_base_without_api_prefix_keeps_path() {
        assert_eq!(
            build_url("http://host", "/api/rag/query"),
            "http://host/api/rag/query"
        );
    }

    #[test]
    fn test_api_segment_not_string_prefix() {
        assert_eq!(
            build_url("http://host/api", "/apiary"),
            "http://host/api/apiary"
        );
    }

    #[test]
    fn test_rag_namespace_under_api_base() {
        assert_eq!(
            build_url("http://host/api", "/api/rag/query"),
            "http://host/api/rag/query"
        );
    }
}
