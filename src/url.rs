//! URL canonicalization primitives shared by the parser and the matcher.
//!
//! These are pure functions with no locking and no logging on the hot
//! path; `is_valid`'s regex is compiled once behind `once_cell`.

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_URL_LEN: usize = 2048;

static VALID_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^https?://[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*(/.*)?$",
    )
    .expect("static URL validation pattern must compile")
});

/// Extract the lowercase host from a URL, stripping scheme, port, path,
/// query, and fragment. Returns an empty string for an empty input.
pub fn extract_domain(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let after_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };

    let end = after_scheme
        .find(['/', '?', '#', ':'])
        .unwrap_or(after_scheme.len());

    after_scheme[..end].to_ascii_lowercase()
}

/// Extract the path component of a URL, defaulting to `"/"` when the URL
/// has no path segment.
pub fn extract_path(url: &str) -> String {
    let after_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };

    match after_scheme.find('/') {
        Some(idx) => {
            let rest = &after_scheme[idx..];
            let end = rest.find(['?', '#']).unwrap_or(rest.len());
            rest[..end].to_string()
        }
        None => "/".to_string(),
    }
}

/// Lowercase the scheme and host of a URL, leaving path/query/fragment
/// case intact, and strip one trailing slash that follows a non-empty
/// path. Idempotent: `normalize(normalize(u)) == normalize(u)`.
pub fn normalize(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let scheme_end = match url.find("://") {
        Some(idx) => idx + 3,
        None => 0,
    };

    let (scheme, rest) = url.split_at(scheme_end);
    let host_end = rest.find('/').unwrap_or(rest.len());
    let (host, tail) = rest.split_at(host_end);

    let mut out = String::with_capacity(url.len());
    out.push_str(&scheme.to_ascii_lowercase());
    out.push_str(&host.to_ascii_lowercase());

    if tail.len() > 1 && tail.ends_with('/') {
        out.push_str(&tail[..tail.len() - 1]);
    } else {
        out.push_str(tail);
    }

    out
}

/// Validate URL shape and length: `http(s)://` followed by a dotted host
/// of valid DNS labels and an optional path, no longer than 2048 bytes.
pub fn is_valid(url: &str) -> bool {
    url.len() <= MAX_URL_LEN && VALID_URL_RE.is_match(url)
}

/// Test whether `host` matches `pattern`, where `pattern` may be a bare
/// host (exact or any subdomain) or a `*.`-prefixed wildcard host.
pub fn domain_matches(host: &str, pattern: &str) -> bool {
    if host == pattern {
        return true;
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        // suffix retains its leading dot, e.g. "*.example.com" -> ".example.com"
        return host.ends_with(suffix);
    }

    host.len() > pattern.len() && host.ends_with(pattern) && {
        let boundary = host.len() - pattern.len() - 1;
        host.as_bytes()[boundary] == b'.'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_domain_strips_scheme_path_port() {
        assert_eq!(extract_domain("https://example.com/path"), "example.com");
        assert_eq!(extract_domain("http://sub.Example.COM:8080/"), "sub.example.com");
        assert_eq!(extract_domain("https://example.com"), "example.com");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn extract_domain_handles_query_and_fragment() {
        assert_eq!(extract_domain("https://sub.Example.COM:8080/p?x#f"), "sub.example.com");
    }

    #[test]
    fn extract_path_defaults_to_root() {
        assert_eq!(extract_path("https://example.com"), "/");
        assert_eq!(extract_path("https://example.com/a/b?x=1"), "/a/b");
    }

    #[test]
    fn normalize_lowercases_scheme_and_host_only() {
        assert_eq!(normalize("HTTPS://Example.com/Path/"), "https://example.com/Path");
        assert_eq!(normalize("HTTPS://Example.com/"), "https://example.com/");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("HTTPS://Example.COM/Path/");
        let twice = normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn is_valid_accepts_and_rejects() {
        assert!(is_valid("https://example.com/path"));
        assert!(is_valid("http://a.b-c.example.com"));
        assert!(!is_valid("not a url"));
        assert!(!is_valid(&format!("https://example.com/{}", "a".repeat(3000))));
    }

    #[test]
    fn domain_matches_exact_subdomain_and_wildcard() {
        assert!(domain_matches("example.com", "example.com"));
        assert!(domain_matches("sub.example.com", "example.com"));
        assert!(!domain_matches("example.com", "sub.example.com"));
        assert!(domain_matches("sub.example.com", "*.example.com"));
        assert!(!domain_matches("example.com", "*.example.com"));
        assert!(!domain_matches("notexample.com", "example.com"));
    }
}
