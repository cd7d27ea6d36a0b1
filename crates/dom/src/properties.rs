//! Property reflection over element nodes.
//!
//! The builder's disambiguation heuristic needs to ask "does this key name
//! a settable property on the node?" and then attempt the assignment. This
//! module is that facility: a curated IDL-ish surface of element
//! properties, with assignment semantics that reflect into attributes or
//! fail the way the host bindings would (read-only on SVG counterparts).

use crate::node::{ElementData, Namespace};
use core::fmt;
use std::error::Error;

/// A value handed to property assignment. Mirrors the small set of
/// primitive shapes the assignment paths distinguish.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl PropertyValue {
    /// String coercion, matching host stringification of primitives.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_owned(),
            Self::Null => "null".to_owned(),
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => format_number(*number),
            Self::Str(text) => text.clone(),
        }
    }

    /// Boolean coercion for boolean-typed properties.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Str(text) => !text.is_empty(),
        }
    }

    /// Numeric coercion for integer-typed properties. Non-numeric input
    /// coerces to zero, as IDL `long` conversion does.
    #[must_use]
    pub fn as_long(&self) -> i64 {
        let number = match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(flag) => f64::from(u8::from(*flag)),
            Self::Number(number) => *number,
            Self::Str(text) => text.trim().parse().unwrap_or(f64::NAN),
        };
        if number.is_finite() { number as i64 } else { 0 }
    }
}

/// Errors raised by property assignment. Recovered by callers falling
/// back to attribute writes; never fatal.
#[derive(Debug)]
pub enum DomError {
    /// The property exists but rejects assignment (e.g. `className` on an
    /// SVG element, `dataset` everywhere).
    ReadOnly(String),
    /// The name is not part of the reflected property surface, or the
    /// node is not an element.
    UnknownProperty(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly(name) => write!(formatter, "property `{name}` is read-only"),
            Self::UnknownProperty(name) => write!(formatter, "unknown property `{name}`"),
        }
    }
}

impl Error for DomError {}

/// Properties present on every element.
const GLOBAL_PROPERTIES: &[&str] = &[
    "id",
    "className",
    "classList",
    "title",
    "lang",
    "dir",
    "slot",
    "hidden",
    "tabIndex",
    "role",
    "innerHTML",
    "textContent",
    "style",
    "dataset",
];

/// Properties present only on the listed tags.
const TAG_PROPERTIES: &[(&str, &[&str])] = &[
    ("value", &["input", "button", "select", "textarea", "option"]),
    ("name", &["input", "button", "select", "textarea", "form"]),
    ("type", &["input", "button"]),
    (
        "disabled",
        &["input", "button", "select", "textarea", "option", "fieldset"],
    ),
    ("checked", &["input"]),
    ("placeholder", &["input", "textarea"]),
    ("href", &["a", "area"]),
];

/// Whether `name` is a settable property on this element.
///
/// `style` is not reflected on SVG elements, so style handling for them
/// goes through the literal `style` attribute instead.
#[must_use]
pub fn has_property(element: &ElementData, name: &str) -> bool {
    if GLOBAL_PROPERTIES.contains(&name) {
        if name == "style" && element.namespace == Namespace::Svg {
            return false;
        }
        return true;
    }
    TAG_PROPERTIES
        .iter()
        .any(|(property, tags)| *property == name && tags.contains(&element.tag.as_str()))
}

/// Assign a property that lives on the element data itself. Structural
/// properties (`textContent`, `innerHTML`) are handled by the document.
///
/// # Errors
/// `ReadOnly` when the property rejects assignment, `UnknownProperty`
/// when the name is outside the reflected surface.
pub(crate) fn set_element_property(
    element: &mut ElementData,
    name: &str,
    value: &PropertyValue,
) -> Result<(), DomError> {
    if !has_property(element, name) {
        return Err(DomError::UnknownProperty(name.to_owned()));
    }
    match name {
        "className" => {
            if element.namespace == Namespace::Svg {
                // SVGAnimatedString: readable, not assignable.
                return Err(DomError::ReadOnly(name.to_owned()));
            }
            element.set_attr("class", &value.as_string());
        }
        // [PutForwards=value]: assignment replaces the class text.
        "classList" => element.set_attr("class", &value.as_string()),
        "style" => element.set_attr("style", &value.as_string()),
        "dataset" => return Err(DomError::ReadOnly(name.to_owned())),
        "hidden" | "disabled" | "checked" => {
            if value.truthy() {
                element.set_attr(name, "");
            } else {
                element.remove_attr(name);
            }
        }
        "tabIndex" => element.set_attr("tabindex", &value.as_long().to_string()),
        "id" | "title" | "lang" | "dir" | "slot" | "role" | "value" | "name" | "type"
        | "placeholder" | "href" => {
            element.set_attr(&name.to_ascii_lowercase(), &value.as_string());
        }
        _ => return Err(DomError::UnknownProperty(name.to_owned())),
    }
    Ok(())
}

/// Format a number the way host string coercion does: integral values
/// print without a fractional part.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
