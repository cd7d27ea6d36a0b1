//! Selectors Level 3 subset for single-element document queries.
//! Spec: <https://www.w3.org/TR/selectors-3/>
//!
//! This crate implements the slice of the selectors grammar needed to
//! resolve a lookup-style tag against a document:
//! - Simple selectors: universal, type, class, id, attribute presence
//!   and attribute equality
//! - Combinators: descendant, child, adjacent sibling, general sibling
//! - Selector lists separated by commas
//!
//! Matching is abstracted over an [`ElementAdapter`] so the document tree
//! stays decoupled from the matching engine.

mod matcher;
mod parser;

pub use matcher::{matches_complex, matches_compound, matches_selector_list};
pub use parser::{parse_complex_selector, parse_selector_list};

/// An adapter that abstracts DOM access for selector matching.
/// Implement this for your document layer.
pub trait ElementAdapter {
    type Handle: Copy + Eq;

    /// Parent element, if any. Non-element ancestors (the document node)
    /// terminate the chain.
    fn parent_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Previous sibling element, skipping non-element siblings.
    fn previous_sibling_element(&self, element: Self::Handle) -> Option<Self::Handle>;

    /// Tag name in ASCII lowercase (per HTML parsing conventions).
    fn tag_name(&self, element: Self::Handle) -> &str;

    /// The element's `id` attribute, if present.
    fn element_id(&self, element: Self::Handle) -> Option<&str>;

    /// True if the element has the given class token (case-sensitive).
    fn has_class(&self, element: Self::Handle, class: &str) -> bool;

    /// The attribute value, if the attribute is present.
    fn attribute(&self, element: Self::Handle, name: &str) -> Option<&str>;
}

/// Simple selectors (subset).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Universal selector `*` — matches any element.
    Universal,
    /// Type selector, stored in ASCII lowercase.
    Type(String),
    /// Class selector `.token`.
    Class(String),
    /// ID selector `#value`.
    Id(String),
    /// Attribute selector `[name]` or `[name=value]`. A `None` expected
    /// value is a presence test.
    Attribute {
        name: String,
        value: Option<String>,
    },
}

/// A compound selector is a sequence of simple selectors with no
/// combinators between them.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub simples: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// True when no simple selectors were parsed into this compound.
    pub fn is_empty(&self) -> bool {
        self.simples.is_empty()
    }
}

/// Combinators between compound selectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

/// A complex selector: a leading compound followed by
/// (combinator, compound) pairs, left to right.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ComplexSelector {
    pub first: CompoundSelector,
    pub rest: Vec<(Combinator, CompoundSelector)>,
}

/// A selector list separated by commas.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}
