//! The element builder: resolve a target node and apply an options bag.
//!
//! Each options key is dispatched through, in order: the children intent,
//! intent-keyword remapping for keys that are not node properties,
//! property assignment with attribute fallback, templating-style `?`/`@`
//! hint prefixes, and finally value-shape dispatch with a generic string
//! attribute as the universal fallback.

use crate::options::Options;
use crate::value::Value;
use dom::{Document, Listener, ListenerOptions, Namespace, NodeId, PropertyValue, format_number};
use std::sync::Arc;

/// How the target node is designated.
#[derive(Clone, Debug)]
pub enum Tag {
    /// A tag name, `svg`/`svg:`-prefixed name, or `<`-prefixed selector.
    Name(String),
    /// An existing node, used directly.
    Node(NodeId),
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for Tag {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<NodeId> for Tag {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// Child content appended after all options are applied.
#[derive(Clone, Debug)]
pub enum Child {
    Text(String),
    Node(NodeId),
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NodeId> for Child {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// Build or select an element and apply `options` and `children` to it.
///
/// Returns the mutated node, or `None` when a `<`-prefixed selector tag
/// matches nothing — a lookup failure, not a fault. All mutations are
/// applied directly and synchronously; a partial application is left in
/// place as-is.
pub fn build(
    doc: &mut Document,
    tag: impl Into<Tag>,
    options: &Options,
    children: &[Child],
) -> Option<NodeId> {
    let mut custom = false;
    let node = match tag.into() {
        Tag::Name(name) => {
            if let Some(selector) = name.strip_prefix('<') {
                let found = doc.query_selector(selector);
                if found.is_none() {
                    log::debug!("selector lookup `{selector}` matched nothing");
                }
                found?
            } else if name == "svg" {
                doc.create_element_in(Namespace::Svg, &name)
            } else if let Some(local) = name.strip_prefix("svg:") {
                doc.create_element_in(Namespace::Svg, local)
            } else if let Some(Value::Str(is_name)) = options.get("is") {
                custom = true;
                doc.create_element_is(&name, is_name)
            } else {
                doc.create_element(&name)
            }
        }
        Tag::Node(existing) => existing,
    };
    let svg = doc.namespace(node) == Some(Namespace::Svg);

    for (key, value) in options.iter() {
        // The creation hint was already consumed; don't reprocess it as an
        // attribute.
        if custom && key == "is" {
            continue;
        }
        apply_option(doc, node, svg, key, value);
    }

    for child in children {
        match child {
            Child::Text(text) => {
                let text_node = doc.create_text_node(text);
                doc.append_child(node, text_node);
            }
            Child::Node(child_node) => doc.append_child(node, *child_node),
        }
    }

    Some(node)
}

/// Apply one options entry to the node. Rules are mutually exclusive per
/// key; the first match wins.
fn apply_option(doc: &mut Document, node: NodeId, svg: bool, key: &str, value: &Value) {
    // Embedded-children variant: append the sequence, never an attribute.
    if key == "children" || key == "childNodes" {
        append_value_children(doc, node, value);
        return;
    }

    let mut key = key;
    if !doc.has_property(node, key) {
        match key {
            "aria" => {
                apply_aria(doc, node, value);
                return;
            }
            "data" => {
                apply_data(doc, node, value);
                return;
            }
            "style" => {
                let css = value.as_attr_string();
                if svg {
                    doc.set_attribute(node, "style", &css);
                } else {
                    doc.set_style_text(node, &css);
                }
                return;
            }
            "class" => key = "className",
            "html" => key = "innerHTML",
            "text" => key = "textContent",
            _ => {}
        }
    }

    // Re-checked after intent remapping.
    if doc.has_property(node, key) {
        if key == "classList" {
            match value {
                Value::List(tokens) => {
                    for token in tokens {
                        doc.class_list_add(node, &token.as_attr_string());
                    }
                }
                // A non-sequence value is treated as a one-token sequence.
                other => doc.class_list_add(node, &other.as_attr_string()),
            }
            return;
        }
        if let Err(error) = doc.set_property(node, key, &to_property_value(value)) {
            // SVG-friendly recovery: a rejected property lands as an
            // attribute of the same (remapped) name.
            log::debug!("assignment to `{key}` failed ({error}); writing attribute instead");
            doc.set_attribute(node, key, &value.as_attr_string());
        }
        return;
    }

    // Templating-library-style hint prefixes.
    let mut coerced: Option<Value> = None;
    if let Some(rest) = key.strip_prefix('?') {
        key = rest;
        coerced = Some(Value::Bool(value.truthy()));
    } else if let Some(rest) = key.strip_prefix('@') {
        key = rest;
        if let Value::List(pair) = value {
            // [listener, options] form; a non-listener head is dropped.
            if let Some(listener) = pair.first().and_then(listener_value) {
                let listener_opts = pair
                    .get(1)
                    .map_or_else(ListenerOptions::default, listener_options);
                doc.add_event_listener(node, key, listener, listener_opts);
            }
            return;
        }
    }
    let value = coerced.as_ref().unwrap_or(value);

    // Decide what to do by inferring the value shape.
    match value {
        Value::Bool(flag) => {
            doc.toggle_attribute(node, key, *flag);
        }
        Value::Undefined | Value::Null => {}
        Value::Object(object) => match object.handler() {
            // Capability check first: an object carrying handle-event is a
            // listener and is never serialized.
            Some(handler) => doc.add_event_listener(
                node,
                key,
                Listener::Handler(handler),
                ListenerOptions::default(),
            ),
            None => doc.set_attribute(node, key, &value.to_json_string()),
        },
        Value::List(_) | Value::Node(_) => {
            doc.set_attribute(node, key, &value.to_json_string());
        }
        Value::Func(callback) => {
            doc.add_event_listener(
                node,
                key,
                Listener::Callback(Arc::clone(callback)),
                ListenerOptions::default(),
            );
        }
        // Last resort: a generic string attribute.
        Value::Number(_) | Value::Str(_) => {
            doc.set_attribute(node, key, &value.as_attr_string());
        }
    }
}

/// Append a `children`/`childNodes` value: a sequence of text and node
/// entries, or a single such entry.
fn append_value_children(doc: &mut Document, node: NodeId, value: &Value) {
    match value {
        Value::List(items) => {
            for item in items {
                append_child_value(doc, node, item);
            }
        }
        single => append_child_value(doc, node, single),
    }
}

fn append_child_value(doc: &mut Document, node: NodeId, item: &Value) {
    match item {
        Value::Str(text) => {
            let text_node = doc.create_text_node(text);
            doc.append_child(node, text_node);
        }
        Value::Number(number) => {
            let text_node = doc.create_text_node(&format_number(*number));
            doc.append_child(node, text_node);
        }
        Value::Node(child) => doc.append_child(node, *child),
        _ => {}
    }
}

/// `aria` intent: every sub-key becomes `aria-<lowercased sub-key>`,
/// except `role`, which maps to the bare `role` attribute.
fn apply_aria(doc: &mut Document, node: NodeId, value: &Value) {
    let Value::Object(map) = value else {
        return;
    };
    for (sub_key, sub_value) in map.entries() {
        let name = if sub_key == "role" {
            sub_key.to_owned()
        } else {
            format!("aria-{}", sub_key.to_lowercase())
        };
        doc.set_attribute(node, &name, &sub_value.as_attr_string());
    }
}

/// `data` intent: merge the mapping into the dataset, sub-key by sub-key.
fn apply_data(doc: &mut Document, node: NodeId, value: &Value) {
    let Value::Object(map) = value else {
        return;
    };
    for (sub_key, sub_value) in map.entries() {
        doc.dataset_set(node, sub_key, &sub_value.as_attr_string());
    }
}

/// The listener capability test: a callable, or an object exposing
/// handle-event.
fn listener_value(value: &Value) -> Option<Listener> {
    match value {
        Value::Func(callback) => Some(Listener::Callback(Arc::clone(callback))),
        Value::Object(object) => object.handler().map(Listener::Handler),
        _ => None,
    }
}

/// Listener options from the second element of a listener pair.
fn listener_options(value: &Value) -> ListenerOptions {
    let Value::Object(map) = value else {
        return ListenerOptions::default();
    };
    ListenerOptions {
        once: map.get("once").is_some_and(Value::truthy),
        capture: map.get("capture").is_some_and(Value::truthy),
        passive: map.get("passive").is_some_and(Value::truthy),
    }
}

fn to_property_value(value: &Value) -> PropertyValue {
    match value {
        Value::Undefined => PropertyValue::Undefined,
        Value::Null => PropertyValue::Null,
        Value::Bool(flag) => PropertyValue::Bool(*flag),
        Value::Number(number) => PropertyValue::Number(*number),
        Value::Str(text) => PropertyValue::Str(text.clone()),
        other => PropertyValue::Str(other.as_attr_string()),
    }
}
