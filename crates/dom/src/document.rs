//! Document tree and node operations.
//!
//! `Document` owns an arena of nodes and exposes the host-side surface the
//! element builder mutates through: creation (namespace-aware, with the
//! customized built-in `is` hint), attributes, class list, dataset, style
//! text, text and markup content, property reflection, selector queries,
//! and event listener registration/dispatch. Everything is synchronous and
//! mutates the tree directly.

use crate::events::{Event, Listener, ListenerEntry, ListenerOptions};
use crate::fragment;
use crate::node::{DomNode, ElementData, Namespace, NodeKind};
use crate::properties::{self, DomError, PropertyValue};
use dom_selectors::{ElementAdapter, matches_selector_list, parse_selector_list};
use indextree::{Arena, NodeId};

pub struct Document {
    arena: Arena<DomNode>,
    root: NodeId,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(DomNode::default());
        Self { arena, root }
    }

    /// The document node itself.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    // ----- creation -----

    /// Create an HTML element. Tag names are lowercased.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_element_in(Namespace::Html, tag)
    }

    /// Create an element in the given namespace. SVG tag names keep their
    /// case (`linearGradient`), HTML tag names are lowercased.
    pub fn create_element_in(&mut self, namespace: Namespace, tag: &str) -> NodeId {
        let tag = match namespace {
            Namespace::Html => tag.to_ascii_lowercase(),
            Namespace::Svg => tag.to_owned(),
        };
        self.arena
            .new_node(DomNode::element(ElementData::new(tag, namespace)))
    }

    /// Create an HTML element carrying a customized built-in name.
    pub fn create_element_is(&mut self, tag: &str, is: &str) -> NodeId {
        let node = self.create_element(tag);
        if let Some(data) = self.element_mut(node) {
            data.is = Some(is.to_owned());
        }
        node
    }

    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.arena.new_node(DomNode::text(text))
    }

    // ----- structure -----

    /// Append `child` as the last child of `parent`, detaching it from any
    /// current parent first. Appending a node under itself is rejected and
    /// logged rather than applied.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        child.detach(&mut self.arena);
        if let Err(error) = parent.checked_append(child, &mut self.arena) {
            log::warn!("append_child rejected: {error}");
        }
    }

    /// Detach all children of `node`. Detached nodes stay alive and can be
    /// re-appended, as removed DOM nodes do.
    pub fn remove_children(&mut self, node: NodeId) {
        let children: Vec<NodeId> = node.children(&self.arena).collect();
        for child in children {
            child.detach(&mut self.arena);
        }
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        node.children(&self.arena).collect()
    }

    #[must_use]
    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.parent()
    }

    // ----- node access -----

    pub(crate) fn node(&self, node: NodeId) -> Option<&DomNode> {
        self.arena.get(node).map(indextree::Node::get)
    }

    pub(crate) fn element(&self, node: NodeId) -> Option<&ElementData> {
        match &self.node(node)?.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Document | NodeKind::Text(_) => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
        match &mut self.arena.get_mut(node)?.get_mut().kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Document | NodeKind::Text(_) => None,
        }
    }

    #[must_use]
    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|data| data.tag.as_str())
    }

    #[must_use]
    pub fn namespace(&self, node: NodeId) -> Option<Namespace> {
        self.element(node).map(|data| data.namespace)
    }

    /// The `is` hint the element was created with, if any.
    #[must_use]
    pub fn is_hint(&self, node: NodeId) -> Option<&str> {
        self.element(node)?.is.as_deref()
    }

    /// The text of a text node.
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.kind {
            NodeKind::Text(text) => Some(text.as_str()),
            NodeKind::Document | NodeKind::Element(_) => None,
        }
    }

    // ----- attributes -----

    #[must_use]
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attr(name)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.element_mut(node) {
            data.set_attr(name, value);
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> bool {
        self.element_mut(node)
            .is_some_and(|data| data.remove_attr(name))
    }

    #[must_use]
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.element(node).is_some_and(|data| data.has_attr(name))
    }

    /// Force a boolean attribute on or off; returns its resulting state.
    pub fn toggle_attribute(&mut self, node: NodeId, name: &str, force: bool) -> bool {
        if let Some(data) = self.element_mut(node) {
            if force {
                data.set_attr(name, "");
            } else {
                data.remove_attr(name);
            }
        }
        force
    }

    // ----- class list -----

    /// Add a class token if not already present. Whitespace-only tokens
    /// are ignored.
    pub fn class_list_add(&mut self, node: NodeId, token: &str) {
        let token = token.trim();
        if token.is_empty() {
            return;
        }
        let Some(data) = self.element_mut(node) else {
            return;
        };
        if data.class_tokens().any(|existing| existing == token) {
            return;
        }
        let mut classes = data.attr("class").unwrap_or("").trim().to_owned();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(token);
        data.set_attr("class", &classes);
    }

    #[must_use]
    pub fn class_list_contains(&self, node: NodeId, token: &str) -> bool {
        self.element(node)
            .is_some_and(|data| data.class_tokens().any(|existing| existing == token))
    }

    // ----- dataset -----

    /// Set a custom data entry. The camelCase key is reflected as a
    /// `data-kebab-case` attribute, per `DOMStringMap`.
    pub fn dataset_set(&mut self, node: NodeId, key: &str, value: &str) {
        let name = dataset_attr_name(key);
        self.set_attribute(node, &name, value);
    }

    #[must_use]
    pub fn dataset_get(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attribute(node, &dataset_attr_name(key))
    }

    // ----- style / content -----

    /// Assign the element's style text. Reflected as the `style`
    /// attribute, as `style.cssText` assignment is.
    pub fn set_style_text(&mut self, node: NodeId, css: &str) {
        self.set_attribute(node, "style", css);
    }

    #[must_use]
    pub fn style_text(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "style")
    }

    /// Replace all children with a single text node (empty text leaves the
    /// node childless).
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.remove_children(node);
        if !text.is_empty() {
            let text_node = self.create_text_node(text);
            self.append_child(node, text_node);
        }
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        for descendant in node.descendants(&self.arena) {
            if let Some(text) = self.text(descendant) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children with nodes scanned from markup text.
    pub fn set_inner_markup(&mut self, node: NodeId, markup: &str) {
        self.remove_children(node);
        fragment::append_fragment(self, node, markup);
    }

    // ----- property reflection -----

    /// Whether `name` is a settable property on this node.
    #[must_use]
    pub fn has_property(&self, node: NodeId, name: &str) -> bool {
        self.element(node)
            .is_some_and(|data| properties::has_property(data, name))
    }

    /// Assign a reflected property.
    ///
    /// # Errors
    /// `DomError::ReadOnly` when the property rejects assignment,
    /// `DomError::UnknownProperty` when the name is outside the reflected
    /// surface or the node is not an element. Callers recover by writing
    /// an attribute instead.
    pub fn set_property(
        &mut self,
        node: NodeId,
        name: &str,
        value: &PropertyValue,
    ) -> Result<(), DomError> {
        if !self.is_element(node) {
            return Err(DomError::UnknownProperty(name.to_owned()));
        }
        match name {
            "textContent" => {
                self.set_text_content(node, &value.as_string());
                Ok(())
            }
            "innerHTML" => {
                self.set_inner_markup(node, &value.as_string());
                Ok(())
            }
            _ => {
                let Some(data) = self.element_mut(node) else {
                    return Err(DomError::UnknownProperty(name.to_owned()));
                };
                properties::set_element_property(data, name, value)
            }
        }
    }

    // ----- selector queries -----

    /// First element in tree order matching the selector, or `None`.
    #[must_use]
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let list = parse_selector_list(selector);
        if list.selectors.is_empty() {
            return None;
        }
        self.root
            .descendants(&self.arena)
            .filter(|id| self.is_element(*id))
            .find(|id| matches_selector_list(self, *id, &list))
    }

    /// All elements in tree order matching the selector.
    #[must_use]
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let list = parse_selector_list(selector);
        if list.selectors.is_empty() {
            return Vec::new();
        }
        self.root
            .descendants(&self.arena)
            .filter(|id| self.is_element(*id))
            .filter(|id| matches_selector_list(self, *id, &list))
            .collect()
    }

    // ----- events -----

    pub fn add_event_listener(
        &mut self,
        node: NodeId,
        event_type: &str,
        listener: Listener,
        options: ListenerOptions,
    ) {
        if let Some(node_ref) = self.arena.get_mut(node) {
            node_ref.get_mut().listeners.push(ListenerEntry {
                event_type: event_type.to_owned(),
                listener,
                options,
            });
        }
    }

    /// Registered listeners on a node, in registration order.
    #[must_use]
    pub fn listeners(&self, node: NodeId) -> &[ListenerEntry] {
        self.node(node).map_or(&[], |data| data.listeners.as_slice())
    }

    /// Dispatch an event on a node, invoking matching listeners in
    /// registration order. `once` listeners are removed before invocation.
    /// Returns the number of listeners invoked. Target-only: no
    /// propagation phases.
    pub fn dispatch_event(&mut self, node: NodeId, event_type: &str) -> usize {
        let Some(node_ref) = self.arena.get_mut(node) else {
            return 0;
        };
        let dom_node = node_ref.get_mut();
        let mut fired = Vec::new();
        let mut kept = Vec::with_capacity(dom_node.listeners.len());
        for entry in dom_node.listeners.drain(..) {
            if entry.event_type == event_type {
                fired.push(entry.listener.clone());
                if !entry.options.once {
                    kept.push(entry);
                }
            } else {
                kept.push(entry);
            }
        }
        dom_node.listeners = kept;

        let event = Event {
            event_type: event_type.to_owned(),
            target: node,
        };
        for listener in &fired {
            listener.invoke(&event);
        }
        fired.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementAdapter for Document {
    type Handle = NodeId;

    fn parent_element(&self, element: NodeId) -> Option<NodeId> {
        let parent = self.arena.get(element)?.parent()?;
        self.is_element(parent).then_some(parent)
    }

    fn previous_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        let mut current = self.arena.get(element)?.previous_sibling();
        while let Some(sibling) = current {
            if self.is_element(sibling) {
                return Some(sibling);
            }
            current = self.arena.get(sibling)?.previous_sibling();
        }
        None
    }

    fn tag_name(&self, element: NodeId) -> &str {
        self.element(element).map_or("", |data| data.tag.as_str())
    }

    fn element_id(&self, element: NodeId) -> Option<&str> {
        self.attribute(element, "id")
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|data| data.class_tokens().any(|token| token == class))
    }

    fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.element(element)?.attr(name)
    }
}

/// Convert a camelCase dataset key to its `data-*` attribute name.
fn dataset_attr_name(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 5);
    name.push_str("data-");
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            name.push('-');
            name.push(ch.to_ascii_lowercase());
        } else {
            name.push(ch);
        }
    }
    name
}
