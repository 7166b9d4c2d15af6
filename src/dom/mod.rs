//! DOM access for the extractor
//!
//! The extraction core never touches a concrete HTML tree. It talks to a
//! [`PageDocument`], a small capability interface modelled on the browser's
//! `querySelector` family, so it can run against a parsed HTML snapshot
//! ([`HtmlPage`]) or an in-memory fake in tests.

mod html;

pub use html::HtmlPage;

use thiserror::Error;

/// Errors raised by the one mutating DOM operation, [`PageDocument::activate`]
#[derive(Debug, Error)]
pub enum DomError {
    #[error("node is no longer attached to the document")]
    Detached,

    #[error("element cannot be activated: {0}")]
    NotInteractive(String),
}

/// Capability interface over a rendered course page
///
/// Node handles are cheap copies. Every query is scoped to a node and never
/// returns the scope node itself, matching `Element.querySelectorAll`.
pub trait PageDocument {
    /// Handle to one element of the document
    type Node: Copy + Eq + std::fmt::Debug;

    /// The document's root element
    fn root(&self) -> Self::Node;

    /// All descendants of `scope` matching `selector`, in document order
    fn query_selector_all(&self, scope: Self::Node, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `scope` matching `selector`, in document order
    fn query_selector(&self, scope: Self::Node, selector: &str) -> Option<Self::Node> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    /// Whether `node` itself matches `selector`
    fn matches(&self, node: Self::Node, selector: &str) -> bool;

    /// Parent element, `None` for the root
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Element children in document order
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// `node` itself or its nearest ancestor matching `selector`
    fn closest(&self, node: Self::Node, selector: &str) -> Option<Self::Node> {
        let mut current = Some(node);
        while let Some(candidate) = current {
            if self.matches(candidate, selector) {
                return Some(candidate);
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Concatenated text of all descendant text nodes
    fn text_content(&self, node: Self::Node) -> String;

    /// Raw `class` attribute, empty when absent
    fn class_name(&self, node: Self::Node) -> String;

    /// Whether the element is currently rendered
    fn is_visible(&self, node: Self::Node) -> bool;

    /// Simulates a user click on `node`
    fn activate(&mut self, node: Self::Node) -> Result<(), DomError>;
}
