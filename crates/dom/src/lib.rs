//! In-memory document-object model hosting the element builder.
//!
//! This crate is the "host document" collaborator: namespace-aware element
//! creation, attributes, dataset, class list, style text, text and markup
//! content, property reflection, selector queries, and synchronous event
//! dispatch. It is a substrate for building and inspecting small trees,
//! not a browser: no layout, no rendering, no CSS cascade.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]

pub mod document;
pub mod events;
mod fragment;
pub mod node;
mod printing;
pub mod properties;

pub use document::Document;
pub use events::{Event, EventCallback, HandleEvent, Listener, ListenerEntry, ListenerOptions};
pub use node::{DomNode, ElementData, HTML_NAMESPACE, Namespace, NodeKind, SVG_NAMESPACE};
pub use properties::{DomError, PropertyValue, format_number};

/// Node handle into a [`Document`] arena.
pub use indextree::NodeId;
