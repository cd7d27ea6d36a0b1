//! Option values and their coercions.
//!
//! `Value` is the tagged union the dispatch chain distinguishes: the host
//! primitive shapes, sequences, string-keyed objects, callables, and node
//! handles. Objects may additionally carry the handle-event capability,
//! which is what makes them registrable as listeners.

use core::fmt;
use dom::{Event, EventCallback, HandleEvent, NodeId, format_number};
use std::sync::Arc;

/// A value carried by an options entry.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    /// An ordered sequence (child lists, listener pairs, class tokens).
    List(Vec<Value>),
    /// A string-keyed object, possibly carrying the handle-event
    /// capability.
    Object(ObjectValue),
    /// A callable; registered as an event listener when dispatched.
    Func(EventCallback),
    /// An existing document node, for child sequences.
    Node(NodeId),
}

impl Value {
    /// Wrap a callable.
    pub fn callback(callback: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(callback))
    }

    /// Wrap an object whose only purpose is the handle-event capability.
    pub fn handler(handler: impl HandleEvent + 'static) -> Self {
        Self::Object(ObjectValue::new().with_handler(Arc::new(handler)))
    }

    /// Boolean coercion: absent values are false, objects and callables
    /// are true, numbers and strings follow host truthiness.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Str(text) => !text.is_empty(),
            Self::List(_) | Self::Object(_) | Self::Func(_) | Self::Node(_) => true,
        }
    }

    /// String coercion for attribute writes. Objects and sequences use
    /// their canonical JSON form.
    #[must_use]
    pub fn as_attr_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_owned(),
            Self::Null => "null".to_owned(),
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => format_number(*number),
            Self::Str(text) => text.clone(),
            Self::List(_) | Self::Object(_) | Self::Node(_) => self.to_json_string(),
            Self::Func(_) => "function".to_owned(),
        }
    }

    /// Canonical JSON form. Mirrors host serialization: absent values in
    /// sequences become null, absent or callable object entries are
    /// dropped, and non-finite numbers become null.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Undefined | Self::Null | Self::Func(_) => serde_json::Value::Null,
            Self::Bool(flag) => serde_json::Value::Bool(*flag),
            Self::Number(number) => serde_json::Number::from_f64(*number)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            Self::Str(text) => serde_json::Value::String(text.clone()),
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Object(object) => {
                let mut map = serde_json::Map::new();
                for (key, entry) in object.entries() {
                    if matches!(entry, Self::Undefined | Self::Func(_)) {
                        continue;
                    }
                    map.insert(key.to_owned(), entry.to_json());
                }
                serde_json::Value::Object(map)
            }
            Self::Node(_) => serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    #[must_use]
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.to_json()).unwrap_or_else(|_| "null".to_owned())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => formatter.write_str("Undefined"),
            Self::Null => formatter.write_str("Null"),
            Self::Bool(flag) => formatter.debug_tuple("Bool").field(flag).finish(),
            Self::Number(number) => formatter.debug_tuple("Number").field(number).finish(),
            Self::Str(text) => formatter.debug_tuple("Str").field(text).finish(),
            Self::List(items) => formatter.debug_tuple("List").field(items).finish(),
            Self::Object(object) => object.fmt(formatter),
            Self::Func(_) => formatter.write_str("Func"),
            Self::Node(id) => formatter.debug_tuple("Node").field(id).finish(),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<ObjectValue> for Value {
    fn from(object: ObjectValue) -> Self {
        Self::Object(object)
    }
}

impl From<NodeId> for Value {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// A string-keyed object value with insertion-ordered entries and an
/// optional handle-event capability.
#[derive(Clone, Default)]
pub struct ObjectValue {
    entries: Vec<(String, Value)>,
    handler: Option<Arc<dyn HandleEvent>>,
}

impl ObjectValue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, keeping first-insertion order.
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|(name, _)| *name == key) {
            existing.1 = value;
        } else {
            self.entries.push((key, value));
        }
        self
    }

    /// Attach the handle-event capability.
    #[must_use]
    pub fn with_handler(mut self, handler: Arc<dyn HandleEvent>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// The capability probe: a present handler makes this object a
    /// listener wherever one is accepted.
    #[must_use]
    pub fn handler(&self) -> Option<Arc<dyn HandleEvent>> {
        self.handler.as_ref().map(Arc::clone)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.handler.is_none()
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ObjectValue")
            .field("entries", &self.entries)
            .field("has_handler", &self.handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_matches_host_rules() {
        assert!(!Value::Undefined.truthy());
        assert!(!Value::Null.truthy());
        assert!(!Value::Number(0.0).truthy());
        assert!(!Value::Number(f64::NAN).truthy());
        assert!(!Value::from("").truthy());
        assert!(Value::from("x").truthy());
        assert!(Value::List(vec![]).truthy());
        assert!(Value::Object(ObjectValue::new()).truthy());
    }

    #[test]
    fn json_serialization_is_canonical() {
        let value = Value::Object(
            ObjectValue::new()
                .entry("a", 1)
                .entry("skip", Value::Undefined)
                .entry("b", vec![Value::from(true), Value::Undefined]),
        );
        assert_eq!(value.to_json_string(), r#"{"a":1,"b":[true,null]}"#);
    }

    #[test]
    fn attr_string_coercion() {
        assert_eq!(Value::from(42).as_attr_string(), "42");
        assert_eq!(Value::from(2.5).as_attr_string(), "2.5");
        assert_eq!(Value::from(true).as_attr_string(), "true");
        assert_eq!(Value::Null.as_attr_string(), "null");
        assert_eq!(
            Value::from(vec![Value::from(1), Value::from(2)]).as_attr_string(),
            "[1,2]"
        );
    }

    #[test]
    fn object_entries_keep_insertion_order_and_replace_in_place() {
        let object = ObjectValue::new()
            .entry("b", 1)
            .entry("a", 2)
            .entry("b", 3);
        let keys: Vec<&str> = object.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert!(matches!(object.get("b"), Some(Value::Number(n)) if *n == 3.0));
    }
}
