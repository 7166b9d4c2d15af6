/// Checks if a host matches a site domain pattern
///
/// Two kinds of patterns are supported:
/// 1. Exact: "udemy.com" matches only "udemy.com"
/// 2. Wildcard: "*.udemy.com" matches "udemy.com" and any subdomain,
///    such as "www.udemy.com" or "business.udemy.com"
///
/// Matching ignores ASCII case.
///
/// # Examples
///
/// ```
/// use curriculum_extract::url::matches_domain;
///
/// assert!(matches_domain("udemy.com", "UDEMY.com"));
/// assert!(!matches_domain("udemy.com", "www.udemy.com"));
///
/// assert!(matches_domain("*.udemy.com", "udemy.com"));
/// assert!(matches_domain("*.udemy.com", "www.udemy.com"));
/// assert!(!matches_domain("*.udemy.com", "notudemy.com"));
/// ```
pub fn matches_domain(pattern: &str, host: &str) -> bool {
    let pattern = pattern.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    match pattern.strip_prefix("*.") {
        Some(base) => host == base || host.ends_with(&format!(".{}", base)),
        None => host == pattern,
    }
}
