//! Declarative element construction over the in-memory DOM.
//!
//! One operation, [`build`], resolves a target node — created from a tag
//! name, found by a `<`-prefixed selector, or passed in directly — and
//! applies a declarative bag of properties, attributes, ARIA labels,
//! dataset entries, styles, class lists, and event listeners to it in a
//! single synchronous call, then appends child content.
//!
//! ```
//! use dom_builder::{Document, ObjectValue, Options, build};
//!
//! let mut doc = Document::new();
//! let button = build(
//!     &mut doc,
//!     "button",
//!     &Options::new()
//!         .set("class", "primary")
//!         .set("aria", ObjectValue::new().entry("label", "Save")),
//!     &["Save".into()],
//! )
//! .unwrap();
//! assert_eq!(doc.attribute(button, "class"), Some("primary"));
//! assert_eq!(doc.attribute(button, "aria-label"), Some("Save"));
//! assert_eq!(doc.text_content(button), "Save");
//! ```

mod builder;
mod options;
mod value;

pub use builder::{Child, Tag, build};
pub use options::Options;
pub use value::{ObjectValue, Value};

// The host-document surface callers need alongside the builder.
pub use dom::{
    Document, DomError, Event, EventCallback, HandleEvent, Listener, ListenerOptions, Namespace,
    NodeId,
};
