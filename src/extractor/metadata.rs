use super::normalize::normalize;
use super::selectors::{SelectorChain, SiteProfile};
use crate::dom::PageDocument;

/// Course-level information shown above the curriculum
///
/// Every field is whitespace-normalized and empty when the page lacks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseMetadata {
    pub title: String,
    pub description: String,
    /// Instructor names joined with ", " in document order
    pub authors: String,
}

impl CourseMetadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.authors.is_empty()
    }
}

/// Locates title, description and authors anywhere in the document
pub fn locate_metadata<D: PageDocument>(doc: &D, profile: &SiteProfile) -> CourseMetadata {
    let root = doc.root();

    let metadata = CourseMetadata {
        title: first_text(doc, root, &profile.title),
        description: first_text(doc, root, &profile.description),
        authors: locate_authors(doc, root, profile),
    };

    if metadata.title.is_empty() {
        tracing::debug!("Course title not found");
    }
    if metadata.authors.is_empty() {
        tracing::debug!("No instructors found");
    }

    metadata
}

/// Normalized text of the chain's first match, empty when nothing matches
pub(crate) fn first_text<D: PageDocument>(
    doc: &D,
    scope: D::Node,
    chain: &SelectorChain,
) -> String {
    chain
        .first_match(doc, scope)
        .map(|node| normalize(&doc.text_content(node)))
        .unwrap_or_default()
}

/// Normalized, non-empty texts of all nodes, joined with `separator`
pub(crate) fn joined_texts<D: PageDocument>(doc: &D, nodes: &[D::Node], separator: &str) -> String {
    nodes
        .iter()
        .map(|node| normalize(&doc.text_content(*node)))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn locate_authors<D: PageDocument>(doc: &D, root: D::Node, profile: &SiteProfile) -> String {
    let Some(container) = profile.instructors.first_match(doc, root) else {
        return String::new();
    };

    let labels = profile.authors.all_matches(doc, container);
    joined_texts(doc, &labels, ", ")
}
