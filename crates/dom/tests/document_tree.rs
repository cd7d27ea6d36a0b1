//! Integration tests for the document tree: structure, selector queries,
//! serialization, and property reflection working together.

use dom::{Document, Listener, ListenerOptions, Namespace, NodeId, PropertyValue};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Build a small page:
/// `<body><nav class="menu"><a href="/a">A</a><a href="/b" class="active">B</a></nav><main id="content"><p>hello</p></main></body>`
fn fixture() -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.root();
    let body = doc.create_element("body");
    doc.append_child(root, body);

    let nav = doc.create_element("nav");
    doc.set_attribute(nav, "class", "menu");
    doc.append_child(body, nav);
    for (href, label, active) in [("/a", "A", false), ("/b", "B", true)] {
        let anchor = doc.create_element("a");
        doc.set_attribute(anchor, "href", href);
        if active {
            doc.set_attribute(anchor, "class", "active");
        }
        doc.set_text_content(anchor, label);
        doc.append_child(nav, anchor);
    }

    let main = doc.create_element("main");
    doc.set_attribute(main, "id", "content");
    doc.append_child(body, main);
    let paragraph = doc.create_element("p");
    doc.set_text_content(paragraph, "hello");
    doc.append_child(main, paragraph);

    (doc, body)
}

#[test]
fn selector_forms_resolve_against_the_tree() {
    env_logger::builder().is_test(true).try_init().ok();
    let (doc, _body) = fixture();
    assert!(doc.query_selector("#content").is_some());
    assert!(doc.query_selector(".active").is_some());
    assert!(doc.query_selector("nav > a").is_some());
    assert!(doc.query_selector("[href=\"/b\"]").is_some());
    assert!(doc.query_selector("main p").is_some());
    assert!(doc.query_selector("#nope").is_none());
    assert!(doc.query_selector("nav > p").is_none());
}

#[test]
fn query_selector_returns_first_in_tree_order() {
    let (doc, _body) = fixture();
    let first = doc.query_selector("a").unwrap();
    assert_eq!(doc.attribute(first, "href"), Some("/a"));
    assert_eq!(doc.query_selector_all("a").len(), 2);
}

#[test]
fn markup_serialization_matches_the_tree() {
    let (doc, body) = fixture();
    assert_eq!(
        doc.outer_markup_string(body),
        "<body><nav class=\"menu\"><a href=\"/a\">A</a>\
         <a href=\"/b\" class=\"active\">B</a></nav>\
         <main id=\"content\"><p>hello</p></main></body>"
    );
}

#[test]
fn json_snapshot_is_stable_across_equal_trees() {
    let (doc_a, _) = fixture();
    let (doc_b, _) = fixture();
    assert_eq!(doc_a.to_json_value(), doc_b.to_json_value());
    assert_eq!(doc_a.to_json_string(), doc_b.to_json_string());
}

#[test]
fn inner_markup_assignment_replaces_children() {
    let (mut doc, _body) = fixture();
    let main = doc.query_selector("#content").unwrap();
    doc.set_inner_markup(main, "<ul><li>one</li><li>two</li></ul>");
    let list = doc.query_selector("#content > ul").unwrap();
    assert_eq!(doc.children(list).len(), 2);
    assert_eq!(doc.text_content(main), "onetwo");
}

#[test]
fn text_content_concatenates_descendants() {
    let (doc, body) = fixture();
    assert_eq!(doc.text_content(body), "ABhello");
}

#[test]
fn property_assignment_reflects_into_attributes() {
    let mut doc = Document::new();
    let node = doc.create_element("input");
    doc.set_property(node, "id", &PropertyValue::Str("field".to_owned()))
        .unwrap();
    doc.set_property(node, "value", &PropertyValue::Str("7".to_owned()))
        .unwrap();
    doc.set_property(node, "checked", &PropertyValue::Bool(true))
        .unwrap();
    assert_eq!(doc.attribute(node, "id"), Some("field"));
    assert_eq!(doc.attribute(node, "value"), Some("7"));
    assert_eq!(doc.attribute(node, "checked"), Some(""));
}

#[test]
fn svg_namespace_rejects_class_name_assignment() {
    let mut doc = Document::new();
    let rect = doc.create_element_in(Namespace::Svg, "rect");
    let result = doc.set_property(rect, "className", &PropertyValue::Str("x".to_owned()));
    assert!(result.is_err());
    assert!(!doc.has_property(rect, "style"));
    assert!(doc.has_property(rect, "classList"));
}

#[test]
fn listeners_fire_in_registration_order() {
    let mut doc = Document::new();
    let node = doc.create_element("button");
    let order = Arc::new(AtomicUsize::new(0));
    let first_seen = Arc::new(AtomicUsize::new(0));
    let second_seen = Arc::new(AtomicUsize::new(0));

    let order_a = Arc::clone(&order);
    let slot_a = Arc::clone(&first_seen);
    doc.add_event_listener(
        node,
        "click",
        Listener::Callback(Arc::new(move |_event| {
            slot_a.store(order_a.fetch_add(1, Ordering::SeqCst) + 1, Ordering::SeqCst);
        })),
        ListenerOptions::default(),
    );
    let order_b = Arc::clone(&order);
    let slot_b = Arc::clone(&second_seen);
    doc.add_event_listener(
        node,
        "click",
        Listener::Callback(Arc::new(move |_event| {
            slot_b.store(order_b.fetch_add(1, Ordering::SeqCst) + 1, Ordering::SeqCst);
        })),
        ListenerOptions::default(),
    );

    assert_eq!(doc.dispatch_event(node, "click"), 2);
    assert_eq!(first_seen.load(Ordering::SeqCst), 1);
    assert_eq!(second_seen.load(Ordering::SeqCst), 2);
}

#[test]
fn detached_nodes_can_be_reappended() {
    let mut doc = Document::new();
    let parent = doc.create_element("div");
    let child = doc.create_element("span");
    doc.append_child(parent, child);
    doc.remove_children(parent);
    assert!(doc.children(parent).is_empty());
    assert_eq!(doc.parent_node(child), None);
    doc.append_child(parent, child);
    assert_eq!(doc.children(parent), vec![child]);
}
