//! Minimal markup-fragment scanner for inner-markup assignment.
//!
//! This is a tolerant tag/text scanner, not an HTML parser: it tracks a
//! parent stack, creates elements and text nodes as it goes, and silently
//! truncates on malformed input. Comments and doctype chunks are skipped.

use crate::document::Document;
use crate::node::{Namespace, VOID_TAGS};
use indextree::NodeId;

/// Scan `markup` and append the resulting nodes under `parent`.
pub(crate) fn append_fragment(doc: &mut Document, parent: NodeId, markup: &str) {
    let mut stack: Vec<NodeId> = vec![parent];
    let mut index = 0_usize;

    while index < markup.len() {
        let rest = markup.get(index..).unwrap_or("");
        let Some(lt) = rest.find('<') else {
            append_text(doc, &stack, rest);
            break;
        };
        if lt > 0 {
            append_text(doc, &stack, rest.get(..lt).unwrap_or(""));
            index += lt;
            continue;
        }
        let Some(gt) = rest.find('>') else {
            // Unclosed tag: drop the remainder.
            break;
        };
        let inside = rest.get(1..gt).unwrap_or("");
        index += gt + 1;

        if inside.starts_with('/') {
            if stack.len() > 1 {
                stack.pop();
            }
            continue;
        }
        if inside.starts_with('!') || inside.starts_with('?') {
            continue;
        }

        let self_closing = inside.ends_with('/');
        let inside = inside.strip_suffix('/').unwrap_or(inside).trim();
        let tag_end = inside
            .find(|ch: char| ch.is_whitespace())
            .unwrap_or(inside.len());
        let raw_tag = inside.get(..tag_end).unwrap_or("");
        if raw_tag.is_empty() {
            continue;
        }

        // SVG subtrees keep the SVG namespace and verbatim tag case.
        let top = stack.last().copied().unwrap_or(parent);
        let in_svg = raw_tag.eq_ignore_ascii_case("svg")
            || doc.namespace(top) == Some(Namespace::Svg);
        let namespace = if in_svg { Namespace::Svg } else { Namespace::Html };
        let element = doc.create_element_in(namespace, raw_tag);

        for (name, value) in parse_attributes(inside.get(tag_end..).unwrap_or("")) {
            doc.set_attribute(element, &name, &value);
        }
        doc.append_child(top, element);

        let tag_lower = raw_tag.to_ascii_lowercase();
        if !self_closing && !VOID_TAGS.contains(&tag_lower.as_str()) {
            stack.push(element);
        }
    }
}

fn append_text(doc: &mut Document, stack: &[NodeId], text: &str) {
    if text.is_empty() {
        return;
    }
    let Some(&top) = stack.last() else {
        return;
    };
    let node = doc.create_text_node(&decode_entities(text));
    doc.append_child(top, node);
}

/// Parse the attribute section of a start tag: `name`, `name=value`,
/// `name="value"`, `name='value'`.
fn parse_attributes(input: &str) -> Vec<(String, String)> {
    let bytes = input.as_bytes();
    let mut attrs = Vec::new();
    let mut index = 0_usize;

    while index < bytes.len() {
        while bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
            index += 1;
        }
        let name_start = index;
        while bytes
            .get(index)
            .is_some_and(|byte| !byte.is_ascii_whitespace() && *byte != b'=')
        {
            index += 1;
        }
        if index == name_start {
            break;
        }
        let name = String::from_utf8_lossy(bytes.get(name_start..index).unwrap_or(&[]))
            .to_ascii_lowercase();

        while bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
            index += 1;
        }
        let value = if bytes.get(index) == Some(&b'=') {
            index += 1;
            while bytes.get(index).is_some_and(u8::is_ascii_whitespace) {
                index += 1;
            }
            match bytes.get(index) {
                Some(&quote) if quote == b'"' || quote == b'\'' => {
                    index += 1;
                    let value_start = index;
                    while bytes.get(index).is_some_and(|byte| *byte != quote) {
                        index += 1;
                    }
                    let value = bytes.get(value_start..index).unwrap_or(&[]);
                    if index < bytes.len() {
                        index += 1;
                    }
                    String::from_utf8_lossy(value).into_owned()
                }
                _ => {
                    let value_start = index;
                    while bytes
                        .get(index)
                        .is_some_and(|byte| !byte.is_ascii_whitespace())
                    {
                        index += 1;
                    }
                    String::from_utf8_lossy(bytes.get(value_start..index).unwrap_or(&[]))
                        .into_owned()
                }
            }
        } else {
            String::new()
        };
        attrs.push((name, decode_entities(&value)));
    }
    attrs
}

/// Decode the named entities the serializer emits. Anything else passes
/// through untouched.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
