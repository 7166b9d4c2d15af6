//! [`PageDocument`] over a parsed HTML snapshot
//!
//! A saved course page is static: scripts never run, so activation cannot
//! render new markup. Instead activation is recorded, and any element named
//! by the trigger's `aria-controls` attribute is revealed through a
//! visibility overlay.

use super::{DomError, PageDocument};
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

/// A course page parsed with `scraper`
pub struct HtmlPage {
    html: Html,
    root: NodeId,
    revealed: HashSet<NodeId>,
    activations: Vec<NodeId>,
}

impl HtmlPage {
    /// Parses a full HTML document
    ///
    /// # Example
    ///
    /// ```
    /// use curriculum_extract::dom::{HtmlPage, PageDocument};
    ///
    /// let page = HtmlPage::parse(r#"<html><body><h1 class="t">Rust</h1></body></html>"#);
    /// let title = page.query_selector(page.root(), "h1.t").unwrap();
    /// assert_eq!(page.text_content(title), "Rust");
    /// ```
    pub fn parse(html: &str) -> Self {
        let html = Html::parse_document(html);
        let root = html.root_element().id();
        Self {
            html,
            root,
            revealed: HashSet::new(),
            activations: Vec::new(),
        }
    }

    /// The `<link rel="canonical">` URL of the page, if declared
    pub fn canonical_url(&self) -> Option<String> {
        let selector = Selector::parse("link[rel='canonical'][href]").ok()?;
        self.html
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())
            .map(str::to_string)
    }

    /// Nodes activated so far, in activation order
    pub fn activations(&self) -> &[NodeId] {
        &self.activations
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        self.html.tree.get(node).and_then(ElementRef::wrap)
    }

    fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().id() == Some(id))
            .map(|element| element.id())
    }
}

impl PageDocument for HtmlPage {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn query_selector_all(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let (Some(scope_element), Some(selector)) = (self.element(scope), parse_selector(selector))
        else {
            return Vec::new();
        };

        scope_element
            .select(&selector)
            .map(|element| element.id())
            .filter(|id| *id != scope)
            .collect()
    }

    fn query_selector(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let scope_element = self.element(scope)?;
        let selector = parse_selector(selector)?;

        scope_element
            .select(&selector)
            .map(|element| element.id())
            .find(|id| *id != scope)
    }

    fn matches(&self, node: NodeId, selector: &str) -> bool {
        match (self.element(node), parse_selector(selector)) {
            (Some(element), Some(selector)) => selector.matches(&element),
            _ => false,
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?
            .parent()
            .and_then(ElementRef::wrap)
            .map(|element| element.id())
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.element(node)
            .map(|element| {
                element
                    .children()
                    .filter_map(ElementRef::wrap)
                    .map(|child| child.id())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn text_content(&self, node: NodeId) -> String {
        self.element(node)
            .map(|element| element.text().collect::<String>())
            .unwrap_or_default()
    }

    fn class_name(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|element| element.value().attr("class"))
            .unwrap_or_default()
            .to_string()
    }

    fn is_visible(&self, node: NodeId) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };

        let lineage =
            std::iter::once(element).chain(element.ancestors().filter_map(ElementRef::wrap));
        for current in lineage {
            if self.revealed.contains(&current.id()) {
                return true;
            }
            if hides_element(current) {
                return false;
            }
        }
        true
    }

    fn activate(&mut self, node: NodeId) -> Result<(), DomError> {
        let element = self.element(node).ok_or(DomError::Detached)?;

        if element.value().attr("disabled").is_some() {
            return Err(DomError::NotInteractive(format!(
                "<{}> is disabled",
                element.value().name()
            )));
        }

        let targets: Vec<NodeId> = element
            .value()
            .attr("aria-controls")
            .map(|ids| {
                ids.split_whitespace()
                    .filter_map(|id| self.find_by_id(id))
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!("Activated {:?}, revealing {} element(s)", node, targets.len());
        self.revealed.extend(targets);
        self.activations.push(node);
        Ok(())
    }
}

/// Parses a CSS selector, logging instead of failing on bad input
fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!("Ignoring invalid selector '{}': {}", css, e);
            None
        }
    }
}

/// Whether this element (not its ancestors) takes itself out of the layout
fn hides_element(element: ElementRef<'_>) -> bool {
    let value = element.value();
    if value.attr("hidden").is_some() || value.name() == "template" {
        return true;
    }
    value.attr("style").is_some_and(style_hides)
}

/// Inline-style visibility: `display:none`, `visibility:hidden|collapse`,
/// or zero width together with zero height
fn style_hides(style: &str) -> bool {
    let mut zero_width = false;
    let mut zero_height = false;

    for declaration in style.split(';') {
        let Some((property, value)) = declaration.split_once(':') else {
            continue;
        };
        let property = property.trim().to_ascii_lowercase();
        let value = value.to_ascii_lowercase();
        let value = value.trim().trim_end_matches("!important").trim();

        match property.as_str() {
            "display" if value == "none" => return true,
            "visibility" if value == "hidden" || value == "collapse" => return true,
            "width" => zero_width = is_zero_length(value),
            "height" => zero_height = is_zero_length(value),
            _ => {}
        }
    }

    zero_width && zero_height
}

fn is_zero_length(value: &str) -> bool {
    value
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
        .parse::<f64>()
        .map(|n| n == 0.0)
        .unwrap_or(false)
}
