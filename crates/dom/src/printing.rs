//! Snapshots and serialization for debugging and tests.

use core::fmt;

use crate::document::Document;
use crate::node::{Namespace, VOID_TAGS};
use indextree::NodeId;
use serde_json::{Map, Value, json};

// -----------------------
// Module-scope helpers
// -----------------------

fn flush_text(children: &mut Vec<Value>, text_buf: &mut String) {
    if !text_buf.is_empty() {
        children.push(json!({ "type": "text", "text": text_buf.clone() }));
    }
    text_buf.clear();
}

/// Children of a node as JSON, with adjacent text nodes coalesced so
/// equivalent trees snapshot identically.
fn coalesce_children(doc: &Document, id: NodeId) -> Vec<Value> {
    let mut children: Vec<Value> = Vec::new();
    let mut text_buf = String::new();
    for child in doc.children(id) {
        if let Some(text) = doc.text(child) {
            text_buf.push_str(text);
            continue;
        }
        flush_text(&mut children, &mut text_buf);
        children.push(node_to_json(doc, child));
    }
    flush_text(&mut children, &mut text_buf);
    children
}

fn node_to_json(doc: &Document, id: NodeId) -> Value {
    if let Some(data) = doc.element(id) {
        // Sort attributes by name for determinism.
        let mut pairs: Vec<(String, String)> = data.attrs.iter().cloned().collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        let mut attrs = Map::new();
        for (name, value) in pairs {
            attrs.insert(name, Value::String(value));
        }
        let mut object = Map::new();
        object.insert("type".to_owned(), json!("element"));
        object.insert("tag".to_owned(), json!(data.tag));
        if data.namespace == Namespace::Svg {
            object.insert("namespace".to_owned(), json!("svg"));
        }
        if let Some(is) = &data.is {
            object.insert("is".to_owned(), json!(is));
        }
        object.insert("attrs".to_owned(), Value::Object(attrs));
        object.insert(
            "children".to_owned(),
            Value::Array(coalesce_children(doc, id)),
        );
        Value::Object(object)
    } else if let Some(text) = doc.text(id) {
        json!({ "type": "text", "text": text })
    } else {
        json!({ "type": "document", "children": coalesce_children(doc, id) })
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_markup(doc: &Document, id: NodeId, out: &mut String) {
    if let Some(data) = doc.element(id) {
        out.push('<');
        out.push_str(&data.tag);
        for (name, value) in &data.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
        if data.namespace == Namespace::Html && VOID_TAGS.contains(&data.tag.as_str()) {
            out.push('>');
            return;
        }
        out.push('>');
        for child in doc.children(id) {
            write_markup(doc, child, out);
        }
        out.push_str("</");
        out.push_str(&data.tag);
        out.push('>');
    } else if let Some(text) = doc.text(id) {
        out.push_str(&escape_text(text));
    } else {
        for child in doc.children(id) {
            write_markup(doc, child, out);
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
            for _ in 0..depth {
                f.write_str("  ")?;
            }
            Ok(())
        }

        fn escape_debug(text: &str) -> String {
            let mut out = String::with_capacity(text.len());
            for ch in text.chars() {
                match ch {
                    '\\' => out.push_str("\\\\"),
                    '"' => out.push_str("\\\""),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    '\t' => out.push_str("\\t"),
                    _ => out.push(ch),
                }
            }
            out
        }

        fn fmt_node(
            doc: &Document,
            id: NodeId,
            f: &mut fmt::Formatter<'_>,
            depth: usize,
        ) -> fmt::Result {
            if let Some(data) = doc.element(id) {
                write_indent(f, depth)?;
                write!(f, "<{}", data.tag)?;
                let mut pairs: Vec<(String, String)> = data.attrs.iter().cloned().collect();
                pairs.sort_by(|a, b| a.0.cmp(&b.0));
                for (name, value) in pairs {
                    write!(f, " {}=\"{}\"", name, escape_debug(&value))?;
                }
                writeln!(f, ">")?;
                for child in doc.children(id) {
                    fmt_node(doc, child, f, depth + 1)?;
                }
                write_indent(f, depth)?;
                writeln!(f, "</{}>", data.tag)
            } else if let Some(text) = doc.text(id) {
                write_indent(f, depth)?;
                writeln!(f, "\"{}\"", escape_debug(text))
            } else {
                write_indent(f, depth)?;
                writeln!(f, "#document")?;
                for child in doc.children(id) {
                    fmt_node(doc, child, f, depth + 1)?;
                }
                Ok(())
            }
        }

        fmt_node(self, self.root(), f, 0)
    }
}

impl Document {
    /// Build a deterministic JSON representation of the whole document.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag":"div", "attrs":{..}, "children":[ ... ] }
    /// - Text: { "type":"text", "text":"..." }
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root())
    }

    /// JSON snapshot of a single subtree.
    #[must_use]
    pub fn node_to_json_value(&self, node: NodeId) -> Value {
        node_to_json(self, node)
    }

    /// Pretty JSON string for snapshots and test comparisons.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value())
            .unwrap_or_else(|_| String::from("{}"))
    }

    /// Markup serialization of a node's children.
    #[must_use]
    pub fn inner_markup_string(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            write_markup(self, child, &mut out);
        }
        out
    }

    /// Markup serialization of a node including itself.
    #[must_use]
    pub fn outer_markup_string(&self, node: NodeId) -> String {
        let mut out = String::new();
        write_markup(self, node, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_round_trips_through_the_scanner() {
        let mut doc = Document::new();
        let host = doc.create_element("div");
        doc.set_inner_markup(host, r#"<p class="x">a &amp; b</p><br>"#);
        assert_eq!(
            doc.inner_markup_string(host),
            r#"<p class="x">a &amp; b</p><br>"#
        );
    }

    #[test]
    fn json_snapshot_sorts_attributes() {
        let mut doc = Document::new();
        let root = doc.root();
        let node = doc.create_element("div");
        doc.set_attribute(node, "b", "2");
        doc.set_attribute(node, "a", "1");
        doc.append_child(root, node);
        let snapshot = doc.to_json_value();
        let attrs = &snapshot["children"][0]["attrs"];
        let keys: Vec<&String> = attrs.as_object().map(|map| map.keys().collect()).unwrap();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn boolean_attributes_serialize_without_value() {
        let mut doc = Document::new();
        let node = doc.create_element("input");
        doc.toggle_attribute(node, "disabled", true);
        assert_eq!(doc.outer_markup_string(node), "<input disabled>");
    }
}
