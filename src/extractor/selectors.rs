//! Selector fallback chains and the site profile
//!
//! Each field the extractor reads is described by an ordered list of CSS
//! selectors. Chains are evaluated first-selector-wins: once a selector
//! matches, later candidates are not consulted, regardless of where in the
//! document their matches would sit. A [`SiteProfile`] bundles every chain
//! and text pattern for one version of the site's markup, so alternative
//! markup versions can be swapped in from configuration or tests.

use crate::dom::PageDocument;
use crate::ConfigError;
use regex::Regex;
use serde::Deserialize;

/// Ordered list of alternative CSS selectors for one field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SelectorChain(Vec<String>);

impl SelectorChain {
    /// Builds a chain from selectors in priority order
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(selectors.into_iter().map(Into::into).collect())
    }

    /// First element matched by the highest-priority selector that matches anything
    pub fn first_match<D: PageDocument>(&self, doc: &D, scope: D::Node) -> Option<D::Node> {
        self.0
            .iter()
            .find_map(|selector| doc.query_selector(scope, selector))
    }

    /// All elements matched by the highest-priority selector that matches anything
    pub fn all_matches<D: PageDocument>(&self, doc: &D, scope: D::Node) -> Vec<D::Node> {
        self.0
            .iter()
            .map(|selector| doc.query_selector_all(scope, selector))
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }

    /// The chain as one comma-joined selector group
    ///
    /// Matches in document order rather than by priority, for places where
    /// the chain only filters candidates.
    pub fn as_group(&self) -> String {
        self.0.join(", ")
    }

    fn validate(&self, field: &str) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::Validation(format!(
                "selector chain '{}' must contain at least one selector",
                field
            )));
        }

        for selector in &self.0 {
            scraper::Selector::parse(selector).map_err(|e| {
                ConfigError::InvalidSelector(format!("{} '{}': {}", field, selector, e))
            })?;
        }

        Ok(())
    }
}

/// Every selector chain and text pattern for one markup version of the site
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteProfile {
    /// Course title
    pub title: SelectorChain,

    /// Course headline/description
    pub description: SelectorChain,

    /// Container holding the instructor links
    pub instructors: SelectorChain,

    /// Author labels inside the instructor container
    pub authors: SelectorChain,

    /// Dedicated curriculum region
    pub region: SelectorChain,

    /// Headings scanned when the dedicated region is missing
    pub headings: SelectorChain,

    /// Containers a matching heading may be scoped to
    pub heading_container: SelectorChain,

    /// Text a curriculum heading must match
    pub heading_pattern: String,

    /// Course stats line inside the scope
    pub stats: SelectorChain,

    /// Direct children of the scope considered for the stats fallback
    pub stats_candidates: SelectorChain,

    /// Text the stats fallback must match
    pub stats_pattern: String,

    /// Accordion panels, one per curriculum section
    pub panel: SelectorChain,

    /// Section title inside a panel
    pub section_title: SelectorChain,

    /// Lesson count / duration spans inside a panel
    pub section_extras: SelectorChain,

    /// "Show more" trigger that renders the remaining sections
    pub show_more: SelectorChain,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            title: SelectorChain::new([r#"h1[data-purpose="lead-title"]"#, "h1.clp-lead__title"]),
            description: SelectorChain::new([
                r#"div[data-purpose="lead-headline"]"#,
                "div.clp-lead__headline",
            ]),
            instructors: SelectorChain::new([
                r#"div[data-purpose="instructor-name-top"]"#,
                r#"div[class*="instructor-links--instructor-links--"]"#,
            ]),
            authors: SelectorChain::new([
                "a.ud-instructor-links span.ud-btn-label",
                r#"a[href*="/user/"]"#,
            ]),
            region: SelectorChain::new([
                r#"div[data-purpose="course-curriculum"]"#,
                r#"[class*="curriculum--curriculum-container"]"#,
            ]),
            headings: SelectorChain::new(["h1, h2, h3, h4"]),
            heading_container: SelectorChain::new(["section, div"]),
            heading_pattern: r"(?i)conte[uú]do do curso|curr[ií]culo|course content".to_string(),
            stats: SelectorChain::new([
                r#"div[data-purpose="curriculum-stats"]"#,
                r#"[class*="curriculum--content-length"]"#,
            ]),
            stats_candidates: SelectorChain::new([".ud-text-sm", "div"]),
            stats_pattern:
                r"(?i)\bse[cç][õoãa]|\bdura[cç][ãa]o|\bsections?\b|\bduration\b|\btotal length\b"
                    .to_string(),
            panel: SelectorChain::new([r#"[class*="accordion-panel-module--panel--"]"#]),
            section_title: SelectorChain::new([
                r#"span[class^="section--section-title"]"#,
                r#"span[class^="ud-accordion-panel-title"]"#,
                r#"[data-purpose="section-title"]"#,
            ]),
            section_extras: SelectorChain::new([
                r#"span[class^="section--section-content"]"#,
                r#"[data-purpose="section-content"]"#,
            ]),
            show_more: SelectorChain::new([
                r#"button[data-purpose="show-more"]"#,
                r#"[data-purpose="curriculum-show-more"]"#,
                r#"button[class*="curriculum--show-more"]"#,
            ]),
        }
    }
}

impl SiteProfile {
    /// Checks that every chain is non-empty and parses, and both patterns compile
    pub fn validate(&self) -> Result<(), ConfigError> {
        let chains = [
            ("title", &self.title),
            ("description", &self.description),
            ("instructors", &self.instructors),
            ("authors", &self.authors),
            ("region", &self.region),
            ("headings", &self.headings),
            ("heading-container", &self.heading_container),
            ("stats", &self.stats),
            ("stats-candidates", &self.stats_candidates),
            ("panel", &self.panel),
            ("section-title", &self.section_title),
            ("section-extras", &self.section_extras),
            ("show-more", &self.show_more),
        ];
        for (field, chain) in chains {
            chain.validate(field)?;
        }

        self.compile_patterns()?;
        Ok(())
    }

    /// Compiles the heading and stats patterns
    pub(crate) fn compile_patterns(&self) -> Result<(Regex, Regex), ConfigError> {
        let compile = |field: &str, pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| ConfigError::InvalidPattern(format!("{}: {}", field, e)))
        };
        Ok((
            compile("heading-pattern", &self.heading_pattern)?,
            compile("stats-pattern", &self.stats_pattern)?,
        ))
    }
}
