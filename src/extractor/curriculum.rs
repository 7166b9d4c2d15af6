//! Curriculum region scoping, stats lookup and panel enumeration
//!
//! The region is resolved once per extraction and confines every later
//! search, so panels reusing the accordion CSS module elsewhere on the page
//! (career promos, related courses) are not mistaken for sections.

use super::metadata::{first_text, joined_texts};
use super::normalize::normalize;
use super::selectors::SiteProfile;
use crate::dom::PageDocument;
use crate::ExtractError;
use regex::Regex;
use std::fmt;

/// Joins a section's extras, and separates them from the title in the report
pub const EXTRAS_SEPARATOR: &str = " • ";

/// One numbered entry of the curriculum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumSection {
    /// 1-based position among retained sections
    pub index: usize,

    /// Normalized, never empty
    pub title: String,

    /// Lesson count, duration etc. joined with [`EXTRAS_SEPARATOR`]; may be empty
    pub extras: String,
}

impl fmt::Display for CurriculumSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.extras.is_empty() {
            write!(f, "{}) {}", self.index, self.title)
        } else {
            write!(
                f,
                "{}) {}{}{}",
                self.index, self.title, EXTRAS_SEPARATOR, self.extras
            )
        }
    }
}

/// How the curriculum scope was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The dedicated curriculum region element
    Region,

    /// The container around a "course content" heading
    Heading,

    /// Nothing found; the whole document is searched
    Document,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Region => "region",
            ScopeKind::Heading => "heading",
            ScopeKind::Document => "document",
        }
    }
}

/// The subtree all curriculum searches are confined to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope<N> {
    pub node: N,
    pub kind: ScopeKind,
}

/// Resolves the curriculum scope
///
/// Tries the dedicated region first. Without it, strict mode fails with
/// [`ExtractError::RegionNotFound`]; otherwise the first heading whose text
/// matches `heading_pattern` is scoped to its nearest sectioning ancestor (or
/// its parent), and failing that the whole document is used.
pub fn resolve_scope<D: PageDocument>(
    doc: &D,
    profile: &SiteProfile,
    heading_pattern: &Regex,
    strict: bool,
) -> Result<Scope<D::Node>, ExtractError> {
    let root = doc.root();

    if let Some(region) = profile.region.first_match(doc, root) {
        return Ok(Scope {
            node: region,
            kind: ScopeKind::Region,
        });
    }

    if strict {
        return Err(ExtractError::RegionNotFound);
    }

    let heading = doc
        .query_selector_all(root, &profile.headings.as_group())
        .into_iter()
        .find(|heading| heading_pattern.is_match(&normalize(&doc.text_content(*heading))));

    let Some(heading) = heading else {
        tracing::warn!("No curriculum region or heading found, searching the whole document");
        return Ok(Scope {
            node: root,
            kind: ScopeKind::Document,
        });
    };

    let container_group = profile.heading_container.as_group();
    let container = doc
        .parent(heading)
        .and_then(|parent| doc.closest(parent, &container_group))
        .or_else(|| doc.parent(heading));

    match container {
        Some(node) => Ok(Scope {
            node,
            kind: ScopeKind::Heading,
        }),
        None => Ok(Scope {
            node: root,
            kind: ScopeKind::Document,
        }),
    }
}

/// Finds the course stats line inside the scope
///
/// Falls back to the first direct child of the scope whose text matches
/// `stats_pattern`. The fallback is skipped in document mode, where the
/// children are `<head>` and `<body>`.
pub fn locate_stats<D: PageDocument>(
    doc: &D,
    scope: &Scope<D::Node>,
    profile: &SiteProfile,
    stats_pattern: &Regex,
) -> String {
    let stats = first_text(doc, scope.node, &profile.stats);
    if !stats.is_empty() || scope.kind == ScopeKind::Document {
        return stats;
    }

    let candidates = profile.stats_candidates.as_group();
    doc.children(scope.node)
        .into_iter()
        .filter(|child| doc.matches(*child, &candidates))
        .map(|child| normalize(&doc.text_content(child)))
        .find(|text| stats_pattern.is_match(text))
        .unwrap_or_default()
}

/// Enumerates the scope's panels into numbered sections
///
/// Panels without a title element, or whose title normalizes to nothing,
/// are skipped and do not consume an index.
pub fn enumerate_sections<D: PageDocument>(
    doc: &D,
    scope: D::Node,
    profile: &SiteProfile,
) -> Vec<CurriculumSection> {
    let mut sections = Vec::new();

    for panel in profile.panel.all_matches(doc, scope) {
        let title = first_text(doc, panel, &profile.section_title);
        if title.is_empty() {
            tracing::debug!(
                "Skipping panel without title (class=\"{}\")",
                doc.class_name(panel)
            );
            continue;
        }

        let extras = profile.section_extras.all_matches(doc, panel);
        sections.push(CurriculumSection {
            index: sections.len() + 1,
            title,
            extras: joined_texts(doc, &extras, EXTRAS_SEPARATOR),
        });
    }

    sections
}
