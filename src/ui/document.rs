//! Rendering adapter between the dashboard core and whatever displays it.
//!
//! The core never touches a real DOM. It asks a [`Document`] for the nodes
//! annotated with translation keys and writes text back through `set_text`,
//! `set_placeholder` and `set_title`. [`MemoryDocument`] is a small
//! in-memory element tree implementing the adapter; it backs the tests and
//! the terminal front end.

use crate::ui::feedback::{Feedback, Severity, Toast};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Attribute carrying a translation key for an element's text (or placeholder).
pub const I18N_ATTR: &str = "data-i18n";

/// Attribute carrying a translation key for an element's title.
pub const I18N_TITLE_ATTR: &str = "data-i18n-title";

/// Element id of the language selector control.
pub const LANGUAGE_SWITCHER_ID: &str = "languageSwitcher";

pub type NodeId = usize;

/// Where a translated string goes on an annotated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Visible text content.
    Text,
    /// Input-like element: the translation becomes the placeholder.
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableNode {
    pub id: NodeId,
    pub key: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitledNode {
    pub id: NodeId,
    pub key: String,
}

/// Rendering adapter used by the language controller and chart registry.
pub trait Document {
    /// Nodes carrying [`I18N_ATTR`], in document order.
    fn translatable_nodes(&self) -> Vec<TranslatableNode>;

    /// Nodes carrying [`I18N_TITLE_ATTR`], in document order.
    fn titled_nodes(&self) -> Vec<TitledNode>;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn set_placeholder(&mut self, node: NodeId, text: &str);

    fn set_title(&mut self, node: NodeId, text: &str);

    /// Set the value of a select-like control. Returns `false` when no
    /// element has that id.
    fn set_control_value(&mut self, element_id: &str, value: &str) -> bool;

    /// Whether an element with this id exists.
    fn has_element(&self, element_id: &str) -> bool;
}

/// One element of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub attributes: HashMap<String, String>,
    pub text: String,
    pub placeholder: Option<String>,
    pub title: Option<String>,
    pub value: Option<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// Shorthand for an element whose text follows a translation key.
    pub fn translated(tag: &str, key: &str) -> Self {
        Self::new(tag).with_attr(I18N_ATTR, key)
    }

    fn is_input_like(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea")
    }
}

/// In-memory document: a flat list of elements plus the toast and loading
/// state a browser page would show.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    toast: Option<Toast>,
    toast_history: Vec<Toast>,
    loading: HashSet<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element and return its node id.
    pub fn push(&mut self, element: Element) -> NodeId {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node)
    }

    pub fn element_by_id(&self, element_id: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|el| el.id.as_deref() == Some(element_id))
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The toast currently on screen, if any.
    pub fn current_toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Every toast shown so far, oldest first.
    pub fn toast_history(&self) -> &[Toast] {
        &self.toast_history
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn is_loading(&self, container_id: &str) -> bool {
        self.loading.contains(container_id)
    }

    fn annotated(&self, attr: &str) -> impl Iterator<Item = (NodeId, &Element, &String)> + '_ {
        let attr = attr.to_string();
        self.elements
            .iter()
            .enumerate()
            .filter_map(move |(id, el)| el.attributes.get(&attr).map(|key| (id, el, key)))
    }
}

impl Document for MemoryDocument {
    fn translatable_nodes(&self) -> Vec<TranslatableNode> {
        self.annotated(I18N_ATTR)
            .map(|(id, el, key)| TranslatableNode {
                id,
                key: key.clone(),
                kind: if el.is_input_like() {
                    NodeKind::Input
                } else {
                    NodeKind::Text
                },
            })
            .collect()
    }

    fn titled_nodes(&self) -> Vec<TitledNode> {
        self.annotated(I18N_TITLE_ATTR)
            .map(|(id, _, key)| TitledNode {
                id,
                key: key.clone(),
            })
            .collect()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.elements.get_mut(node) {
            el.text = text.to_string();
        }
    }

    fn set_placeholder(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.elements.get_mut(node) {
            el.placeholder = Some(text.to_string());
        }
    }

    fn set_title(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.elements.get_mut(node) {
            el.title = Some(text.to_string());
        }
    }

    fn set_control_value(&mut self, element_id: &str, value: &str) -> bool {
        match self
            .elements
            .iter_mut()
            .find(|el| el.id.as_deref() == Some(element_id))
        {
            Some(el) => {
                el.value = Some(value.to_string());
                true
            }
            None => false,
        }
    }

    fn has_element(&self, element_id: &str) -> bool {
        self.element_by_id(element_id).is_some()
    }
}

impl Feedback for MemoryDocument {
    fn show_message(&mut self, text: &str, severity: Severity, duration: Duration) {
        let toast = Toast {
            text: text.to_string(),
            severity,
            duration,
        };
        match severity {
            Severity::Success | Severity::Info => info!("💬 {}", text),
            Severity::Warning => warn!("💬 {}", text),
            Severity::Error => error!("💬 {}", text),
        }
        self.toast_history.push(toast.clone());
        self.toast = Some(toast);
    }

    fn show_loading(&mut self, container_id: &str) {
        if self.has_element(container_id) {
            self.loading.insert(container_id.to_string());
        } else {
            debug!("No loading container {}", container_id);
        }
    }

    fn hide_loading(&mut self, container_id: &str) {
        self.loading.remove(container_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translatable_nodes_classify_inputs() {
        let mut doc = MemoryDocument::new();
        let heading = doc.push(Element::translated("h1", "sidebar.system"));
        let input = doc.push(Element::translated("INPUT", "host.ip_placeholder"));
        let area = doc.push(Element::translated("textarea", "host.username"));
        doc.push(Element::new("div"));

        let nodes = doc.translatable_nodes();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].id, heading);
        assert_eq!(nodes[0].kind, NodeKind::Text);
        assert_eq!(nodes[1].id, input);
        assert_eq!(nodes[1].kind, NodeKind::Input);
        assert_eq!(nodes[2].id, area);
        assert_eq!(nodes[2].kind, NodeKind::Input);
    }

    #[test]
    fn test_titled_nodes() {
        let mut doc = MemoryDocument::new();
        doc.push(Element::new("button").with_attr(I18N_TITLE_ATTR, "host.delete_title"));
        let titled = doc.titled_nodes();
        assert_eq!(titled.len(), 1);
        assert_eq!(titled[0].key, "host.delete_title");
    }

    #[test]
    fn test_empty_document_has_no_nodes() {
        let doc = MemoryDocument::new();
        assert!(doc.translatable_nodes().is_empty());
        assert!(doc.titled_nodes().is_empty());
    }

    #[test]
    fn test_setters_ignore_unknown_nodes() {
        let mut doc = MemoryDocument::new();
        doc.set_text(42, "ignored");
        doc.set_title(42, "ignored");
        doc.set_placeholder(42, "ignored");
        assert!(doc.is_empty());
    }

    #[test]
    fn test_set_control_value() {
        let mut doc = MemoryDocument::new();
        doc.push(Element::new("select").with_id(LANGUAGE_SWITCHER_ID));
        assert!(doc.set_control_value(LANGUAGE_SWITCHER_ID, "en"));
        assert!(!doc.set_control_value("missing", "en"));
        assert_eq!(
            doc.element_by_id(LANGUAGE_SWITCHER_ID)
                .and_then(|el| el.value.as_deref()),
            Some("en")
        );
    }

    #[test]
    fn test_toast_replaces_previous() {
        let mut doc = MemoryDocument::new();
        doc.success("first");
        doc.error("second");
        let toast = doc.current_toast().expect("toast shown");
        assert_eq!(toast.text, "second");
        assert_eq!(toast.severity, Severity::Error);
        assert_eq!(doc.toast_history().len(), 2);
    }

    #[test]
    fn test_loading_requires_container() {
        let mut doc = MemoryDocument::new();
        doc.push(Element::new("div").with_id("hostList"));
        doc.show_loading("hostList");
        doc.show_loading("missing");
        assert!(doc.is_loading("hostList"));
        assert!(!doc.is_loading("missing"));
    }

    #[test]
    fn test_hide_loading_is_idempotent() {
        let mut doc = MemoryDocument::new();
        doc.hide_loading("hostList");
        doc.push(Element::new("div").with_id("hostList"));
        doc.show_loading("hostList");
        doc.hide_loading("hostList");
        doc.hide_loading("hostList");
        assert!(!doc.is_loading("hostList"));
    }
}
