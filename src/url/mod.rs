//! Course page URL checks
//!
//! Before extracting, the host makes sure the page actually belongs to the
//! course site. Browser-internal pages are recognised separately so they
//! can be reported without attempting to parse a host.

mod matcher;

pub use matcher::matches_domain;

use crate::{UrlError, UrlResult};
use ::url::Url;

/// URL prefixes of pages that belong to the browser itself
const BROWSER_INTERNAL_PREFIXES: &[&str] = &[
    "chrome://",
    "chrome-extension://",
    "brave://",
    "edge://",
    "about:",
    "view-source:",
    "data:",
    "file://",
];

/// Where a page URL points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Browser settings, extension pages, local files and the like
    BrowserInternal,
    /// A page on the course site
    CourseSite,
    /// Any other web page
    OtherSite,
}

impl PageKind {
    /// Returns true if extraction should be attempted
    pub fn is_course_site(&self) -> bool {
        matches!(self, Self::CourseSite)
    }
}

/// Classifies a page URL against the site's domain pattern
///
/// # Arguments
///
/// * `raw` - The page URL as reported by the host
/// * `domain_pattern` - The course site's domain, optionally starting with "*."
///
/// # Returns
///
/// * `Ok(PageKind)` - The page's classification
/// * `Err(UrlError)` - The URL is neither browser-internal nor a parseable web URL with a host
///
/// # Examples
///
/// ```
/// use curriculum_extract::url::{classify_page_url, PageKind};
///
/// let kind = classify_page_url("https://www.udemy.com/course/rust/", "*.udemy.com").unwrap();
/// assert_eq!(kind, PageKind::CourseSite);
///
/// let kind = classify_page_url("chrome://extensions", "*.udemy.com").unwrap();
/// assert_eq!(kind, PageKind::BrowserInternal);
/// ```
pub fn classify_page_url(raw: &str, domain_pattern: &str) -> UrlResult<PageKind> {
    let raw = raw.trim();

    if BROWSER_INTERNAL_PREFIXES
        .iter()
        .any(|prefix| raw.starts_with(prefix))
    {
        return Ok(PageKind::BrowserInternal);
    }

    let url = Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(raw.to_string()))?;

    if matches_domain(domain_pattern, host) {
        Ok(PageKind::CourseSite)
    } else {
        Ok(PageKind::OtherSite)
    }
}
