//! Node data stored in the document arena.

use crate::events::ListenerEntry;
use smallvec::SmallVec;

/// Namespace URI for SVG elements.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
/// Namespace URI for HTML elements.
pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// HTML elements that never take children.
pub(crate) const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// The namespace an element was created in. It governs tag-name casing
/// and which properties accept assignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
}

impl Namespace {
    /// The namespace URI.
    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Html => HTML_NAMESPACE,
            Self::Svg => SVG_NAMESPACE,
        }
    }
}

/// What kind of node this is.
#[derive(Debug, Clone, Default)]
pub enum NodeKind {
    #[default]
    Document,
    Element(ElementData),
    Text(String),
}

/// Data for an element node.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Tag name: ASCII lowercase for HTML elements, verbatim for SVG.
    pub tag: String,
    pub namespace: Namespace,
    /// Customized built-in element name, when created with an `is` hint.
    pub is: Option<String>,
    /// Attributes in insertion order.
    pub attrs: SmallVec<(String, String), 4>,
}

impl ElementData {
    #[must_use]
    pub fn new(tag: impl Into<String>, namespace: Namespace) -> Self {
        Self {
            tag: tag.into(),
            namespace,
            is: None,
            attrs: SmallVec::new(),
        }
    }

    /// Attribute value, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing any existing value in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(entry) = self
            .attrs
            .iter_mut()
            .find(|(attr_name, _)| attr_name == name)
        {
            entry.1 = value.to_owned();
        } else {
            self.attrs.push((name.to_owned(), value.to_owned()));
        }
    }

    /// Remove an attribute, reporting whether it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let position = self
            .attrs
            .iter()
            .position(|(attr_name, _)| attr_name == name);
        if let Some(found) = position {
            self.attrs.remove(found);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Class tokens from the `class` attribute, in order.
    pub fn class_tokens(&self) -> impl Iterator<Item = &str> {
        self.attr("class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }
}

/// A node in the document tree: its kind plus any registered event
/// listeners.
#[derive(Debug, Clone, Default)]
pub struct DomNode {
    pub kind: NodeKind,
    pub listeners: Vec<ListenerEntry>,
}

impl DomNode {
    #[must_use]
    pub fn element(data: ElementData) -> Self {
        Self {
            kind: NodeKind::Element(data),
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text(text.into()),
            listeners: Vec::new(),
        }
    }
}
