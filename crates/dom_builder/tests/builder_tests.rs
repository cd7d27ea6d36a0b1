//! Behavioral tests for the element builder: tag resolution, option
//! dispatch, event registration, and child appending.

use anyhow::{Context, Result};
use dom_builder::{
    Child, Document, Event, HandleEvent, Namespace, ObjectValue, Options, Value, build,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn init_logs() {
    env_logger::builder().is_test(true).try_init().ok();
}

/// Counting callback plus its shared counter.
fn counting_callback() -> (Value, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    let value = Value::callback(move |_event: &Event| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    (value, count)
}

#[test]
fn plain_tag_creates_one_html_element() {
    let mut doc = Document::new();
    let node = build(&mut doc, "div", &Options::new(), &[]).unwrap();
    assert_eq!(doc.tag_name(node), Some("div"));
    assert_eq!(doc.namespace(node), Some(Namespace::Html));
    // No attributes beyond those in options.
    assert_eq!(doc.outer_markup_string(node), "<div></div>");
}

#[test]
fn svg_tag_and_prefix_create_in_svg_namespace() {
    let mut doc = Document::new();
    let svg = build(&mut doc, "svg", &Options::new(), &[]).unwrap();
    assert_eq!(doc.tag_name(svg), Some("svg"));
    assert_eq!(doc.namespace(svg), Some(Namespace::Svg));

    let rect = build(&mut doc, "svg:rect", &Options::new(), &[]).unwrap();
    assert_eq!(doc.tag_name(rect), Some("rect"));
    assert_eq!(doc.namespace(rect), Some(Namespace::Svg));
}

#[test]
fn selector_miss_returns_none() {
    init_logs();
    let mut doc = Document::new();
    assert!(build(&mut doc, "<#missing", &Options::new(), &[]).is_none());
}

#[test]
fn selector_hit_mutates_the_existing_element() -> Result<()> {
    let mut doc = Document::new();
    let root = doc.root();
    let app = doc.create_element("main");
    doc.set_attribute(app, "id", "app");
    doc.append_child(root, app);

    let found = build(
        &mut doc,
        "<#app",
        &Options::new().set("class", "ready"),
        &[],
    )
    .context("selector should match the appended element")?;
    assert_eq!(found, app);
    assert_eq!(doc.attribute(app, "class"), Some("ready"));
    Ok(())
}

#[test]
fn existing_node_is_used_directly() {
    let mut doc = Document::new();
    let node = doc.create_element("p");
    let returned = build(
        &mut doc,
        node,
        &Options::new().set("title", "note"),
        &["body".into()],
    )
    .unwrap();
    assert_eq!(returned, node);
    assert_eq!(doc.attribute(node, "title"), Some("note"));
    assert_eq!(doc.text_content(node), "body");
}

#[test]
fn aria_map_sets_prefixed_attributes() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new().set(
            "aria",
            ObjectValue::new().entry("label", "x").entry("level", "2"),
        ),
        &[],
    )
    .unwrap();
    assert_eq!(doc.attribute(node, "aria-label"), Some("x"));
    assert_eq!(doc.attribute(node, "aria-level"), Some("2"));
}

#[test]
fn aria_role_maps_to_bare_role_attribute() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new().set("aria", ObjectValue::new().entry("role", "button")),
        &[],
    )
    .unwrap();
    assert_eq!(doc.attribute(node, "role"), Some("button"));
    assert_eq!(doc.attribute(node, "aria-role"), None);
}

#[test]
fn aria_sub_keys_are_lowercased() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new().set("aria", ObjectValue::new().entry("labelledBy", "title")),
        &[],
    )
    .unwrap();
    assert_eq!(doc.attribute(node, "aria-labelledby"), Some("title"));
}

#[test]
fn class_sets_the_class_name_property() {
    let mut doc = Document::new();
    let node = build(&mut doc, "div", &Options::new().set("class", "a b"), &[]).unwrap();
    assert_eq!(doc.attribute(node, "class"), Some("a b"));
}

#[test]
fn class_list_adds_tokens_without_duplicates() {
    let mut doc = Document::new();
    let node = doc.create_element("div");
    doc.set_attribute(node, "class", "a");
    build(
        &mut doc,
        node,
        &Options::new().set("classList", vec![Value::from("a"), Value::from("b")]),
        &[],
    )
    .unwrap();
    assert!(doc.class_list_contains(node, "a"));
    assert!(doc.class_list_contains(node, "b"));
    assert_eq!(doc.attribute(node, "class"), Some("a b"));
}

#[test]
fn data_map_merges_into_dataset() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new().set(
            "data",
            ObjectValue::new().entry("userId", "7").entry("kind", "row"),
        ),
        &[],
    )
    .unwrap();
    assert_eq!(doc.attribute(node, "data-user-id"), Some("7"));
    assert_eq!(doc.attribute(node, "data-kind"), Some("row"));
}

#[test]
fn style_sets_style_text_on_html_and_attribute_on_svg() {
    let mut doc = Document::new();
    let div = build(
        &mut doc,
        "div",
        &Options::new().set("style", "color: red"),
        &[],
    )
    .unwrap();
    assert_eq!(doc.style_text(div), Some("color: red"));

    let circle = build(
        &mut doc,
        "svg:circle",
        &Options::new().set("style", "fill: blue"),
        &[],
    )
    .unwrap();
    assert_eq!(doc.attribute(circle, "style"), Some("fill: blue"));
}

#[test]
fn svg_class_falls_back_to_an_attribute_of_the_remapped_name() {
    init_logs();
    let mut doc = Document::new();
    let circle = build(
        &mut doc,
        "svg:circle",
        &Options::new().set("class", "ring"),
        &[],
    )
    .unwrap();
    // `className` assignment is rejected on SVG, so the value lands as an
    // attribute under the remapped name.
    assert_eq!(doc.attribute(circle, "className"), Some("ring"));
    assert_eq!(doc.attribute(circle, "class"), None);
}

#[test]
fn text_and_html_intents_replace_content() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new().set("text", "1 < 2"),
        &[],
    )
    .unwrap();
    assert_eq!(doc.text_content(node), "1 < 2");

    let host = build(
        &mut doc,
        "div",
        &Options::new().set("html", "<span class=\"x\">hi</span>"),
        &[],
    )
    .unwrap();
    let children = doc.children(host);
    assert_eq!(children.len(), 1);
    assert_eq!(doc.tag_name(children[0]), Some("span"));
    assert_eq!(doc.attribute(children[0], "class"), Some("x"));
    assert_eq!(doc.text_content(children[0]), "hi");
}

#[test]
fn boolean_hint_prefix_coerces_and_toggles() {
    let mut doc = Document::new();
    let off = build(&mut doc, "button", &Options::new().set("?disabled", 0), &[]).unwrap();
    assert!(!doc.has_attribute(off, "disabled"));

    let on = build(&mut doc, "button", &Options::new().set("?disabled", 1), &[]).unwrap();
    assert_eq!(doc.attribute(on, "disabled"), Some(""));
}

#[test]
fn event_pair_registers_listener_with_options() {
    let mut doc = Document::new();
    let (callback, count) = counting_callback();
    let node = build(
        &mut doc,
        "button",
        &Options::new().set(
            "@click",
            vec![callback, ObjectValue::new().entry("once", true).into()],
        ),
        &[],
    )
    .unwrap();

    doc.dispatch_event(node, "click");
    doc.dispatch_event(node, "click");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn event_prefix_with_plain_callback_registers_persistently() {
    let mut doc = Document::new();
    let (callback, count) = counting_callback();
    let node = build(&mut doc, "button", &Options::new().set("@click", callback), &[]).unwrap();

    doc.dispatch_event(node, "click");
    doc.dispatch_event(node, "click");
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert!(!doc.has_attribute(node, "click"));
}

#[test]
fn bare_callback_value_registers_for_the_key_as_event_type() {
    let mut doc = Document::new();
    let (callback, count) = counting_callback();
    let node = build(&mut doc, "input", &Options::new().set("input", callback), &[]).unwrap();

    doc.dispatch_event(node, "input");
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[derive(Default)]
struct Recorder {
    count: AtomicUsize,
}

impl HandleEvent for Recorder {
    fn handle_event(&self, _event: &Event) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn handle_event_capability_registers_as_listener() {
    let mut doc = Document::new();
    let recorder = Arc::new(Recorder::default());
    let value = Value::Object(
        ObjectValue::new().with_handler(Arc::clone(&recorder) as Arc<dyn HandleEvent>),
    );
    let node = build(&mut doc, "div", &Options::new().set("click", value), &[]).unwrap();

    // Capability dispatch, not serialization: no attribute appears.
    assert!(!doc.has_attribute(node, "click"));
    doc.dispatch_event(node, "click");
    assert_eq!(recorder.count.load(Ordering::SeqCst), 1);
}

#[test]
fn plain_object_value_serializes_to_json_attribute() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new().set(
            "config",
            ObjectValue::new().entry("a", 1).entry("b", "x"),
        ),
        &[],
    )
    .unwrap();
    assert_eq!(doc.attribute(node, "config"), Some(r#"{"a":1,"b":"x"}"#));
}

#[test]
fn undefined_and_null_values_are_skipped() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new()
            .set("missing", Value::Undefined)
            .set("empty", Value::Null),
        &[],
    )
    .unwrap();
    assert_eq!(doc.outer_markup_string(node), "<div></div>");
}

#[test]
fn numbers_and_booleans_fall_back_to_attributes() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new()
            .set("width", 42)
            .set("draggable-hint", true)
            .set("tabIndex", 3),
        &[],
    )
    .unwrap();
    assert_eq!(doc.attribute(node, "width"), Some("42"));
    // Plain booleans toggle a boolean attribute.
    assert_eq!(doc.attribute(node, "draggable-hint"), Some(""));
    // tabIndex is a reflected property.
    assert_eq!(doc.attribute(node, "tabindex"), Some("3"));
}

#[test]
fn is_hint_passes_through_to_creation_and_is_not_reprocessed() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "button",
        &Options::new().set("is", "fancy-button"),
        &[],
    )
    .unwrap();
    assert_eq!(doc.is_hint(node), Some("fancy-button"));
    assert!(!doc.has_attribute(node, "is"));
}

#[test]
fn is_on_an_existing_node_is_processed_generically() {
    let mut doc = Document::new();
    let node = doc.create_element("button");
    build(
        &mut doc,
        node,
        &Options::new().set("is", "fancy-button"),
        &[],
    )
    .unwrap();
    // No creation happened, so the hint degrades to a plain attribute.
    assert_eq!(doc.attribute(node, "is"), Some("fancy-button"));
}

#[test]
fn positional_and_embedded_children_produce_identical_trees() {
    let mut doc = Document::new();
    let inner_a = doc.create_element("em");
    doc.set_text_content(inner_a, "x");
    let positional = build(
        &mut doc,
        "p",
        &Options::new(),
        &[Child::Text("lead ".to_owned()), Child::Node(inner_a)],
    )
    .unwrap();

    let inner_b = doc.create_element("em");
    doc.set_text_content(inner_b, "x");
    let embedded = build(
        &mut doc,
        "p",
        &Options::new().set(
            "children",
            vec![Value::from("lead "), Value::Node(inner_b)],
        ),
        &[],
    )
    .unwrap();

    assert_eq!(
        doc.node_to_json_value(positional),
        doc.node_to_json_value(embedded)
    );
    assert_eq!(doc.outer_markup_string(positional), "<p>lead <em>x</em></p>");
}

#[test]
fn children_are_appended_after_options() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "p",
        &Options::new().set("text", "first"),
        &[" second".into()],
    )
    .unwrap();
    assert_eq!(doc.text_content(node), "first second");
}

#[test]
fn identical_calls_produce_identical_observable_state() {
    let build_once = |doc: &mut Document| {
        build(
            doc,
            "section",
            &Options::new()
                .set("class", "card wide")
                .set("data", ObjectValue::new().entry("rowId", "9"))
                .set("aria", ObjectValue::new().entry("label", "Card"))
                .set("?hidden", false)
                .set("style", "margin: 0"),
            &["content".into()],
        )
        .unwrap()
    };
    let mut doc = Document::new();
    let first = build_once(&mut doc);
    let second = build_once(&mut doc);
    assert_ne!(first, second);
    assert_eq!(
        doc.node_to_json_value(first),
        doc.node_to_json_value(second)
    );
}

#[test]
fn unrecognized_keys_fall_through_to_string_attributes() {
    let mut doc = Document::new();
    let node = build(
        &mut doc,
        "div",
        &Options::new().set("custom-thing", "v1"),
        &[],
    )
    .unwrap();
    assert_eq!(doc.attribute(node, "custom-thing"), Some("v1"));
}
