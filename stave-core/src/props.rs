//! Property bags passed to components.
//!
//! A [`Props`] value is an open mapping from string keys to [`PropValue`]s.
//! There is no schema: each component reads the keys it cares about and
//! applies its own defaults through the accessor helpers.
//!
//! Bags are shared handles. Cloning is cheap and every write goes through
//! copy-on-write, so a bag handed to one node can never be mutated through
//! another node holding the same handle.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::{Component, Node};

/// Reserved key under which a composite element receives its children.
pub const CHILDREN: &str = "children";

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// Explicit null.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String value.
    String(String),
    /// Ordered list of values.
    Array(Vec<PropValue>),
    /// Nested property bag.
    Map(Props),
    /// A component reference (render prop or callable).
    Component(Component),
    /// A pre-built node (slot content, composite children).
    Node(Node),
}

impl PropValue {
    /// Human-readable name of the value's type, for error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Component(_) => "component",
            Self::Node(_) => "node",
        }
    }

    /// Whether this value is one of the conditional-suppression values.
    ///
    /// Exactly `null`, `false` and the empty string suppress output. `0`,
    /// `"0"` and every other value are real content.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        match self {
            Self::Null | Self::Bool(false) => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Borrow as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Read as a bool.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Read as an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Read as a float; integers widen.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow as a slice of values.
    #[must_use]
    pub fn as_array(&self) -> Option<&[PropValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as a nested bag.
    #[must_use]
    pub fn as_props(&self) -> Option<&Props> {
        match self {
            Self::Map(props) => Some(props),
            _ => None,
        }
    }

    /// Borrow as a component reference.
    #[must_use]
    pub fn as_component(&self) -> Option<&Component> {
        match self {
            Self::Component(component) => Some(component),
            _ => None,
        }
    }

    /// Borrow as a node.
    #[must_use]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Whether a composite component appears anywhere inside this value.
    #[must_use]
    pub fn references_composite(&self) -> bool {
        match self {
            Self::Component(component) => !component.is_primitive(),
            Self::Node(node) => node.references_composite(),
            Self::Array(items) => items.iter().any(Self::references_composite),
            Self::Map(props) => props.iter().any(|(_, v)| v.references_composite()),
            _ => false,
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for PropValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&String> for PropValue {
    fn from(value: &String) -> Self {
        Self::String(value.clone())
    }
}

impl From<Props> for PropValue {
    fn from(value: Props) -> Self {
        Self::Map(value)
    }
}

impl From<Component> for PropValue {
    fn from(value: Component) -> Self {
        Self::Component(value)
    }
}

impl From<Node> for PropValue {
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl<T: Into<PropValue>> From<Vec<T>> for PropValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<serde_json::Value> for PropValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Map(Props::from(map)),
        }
    }
}

impl Serialize for PropValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => items.serialize(serializer),
            Self::Map(props) => props.serialize(serializer),
            Self::Component(component) => component.serialize(serializer),
            Self::Node(node) => node.serialize(serializer),
        }
    }
}

/// An immutable-once-shared property bag.
#[derive(Clone, Default, PartialEq)]
pub struct Props(Arc<BTreeMap<String, PropValue>>);

impl Props {
    /// Create an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this bag with `key` set to `value`.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set `key` to `value`, copying the underlying map if it is shared.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        Arc::make_mut(&mut self.0).insert(key.into(), value.into());
    }

    /// Keep only the entries for which `keep` returns true. A bag that
    /// loses nothing is left shared.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &PropValue) -> bool) {
        if self.iter().all(|(k, v)| keep(k, v)) {
            return;
        }
        Arc::make_mut(&mut self.0).retain(|k, v| keep(k.as_str(), v));
    }

    /// Look up a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Whether `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// String value for `key`, if present and a string.
    #[must_use]
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    /// String value for `key`, or `default` when absent or not a string.
    #[must_use]
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.str(key).unwrap_or(default)
    }

    /// Bool value for `key`, or `default`.
    #[must_use]
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(PropValue::as_bool).unwrap_or(default)
    }

    /// Integer value for `key`, if present and an integer.
    #[must_use]
    pub fn i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(PropValue::as_i64)
    }

    /// Integer value for `key`, or `default`.
    #[must_use]
    pub fn i64_or(&self, key: &str, default: i64) -> i64 {
        self.i64(key).unwrap_or(default)
    }

    /// Numeric value for `key`; integers widen to float.
    #[must_use]
    pub fn f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(PropValue::as_f64)
    }

    /// Array value for `key`, or an empty slice.
    #[must_use]
    pub fn array(&self, key: &str) -> &[PropValue] {
        self.get(key).and_then(PropValue::as_array).unwrap_or(&[])
    }

    /// Nested bag for `key`.
    #[must_use]
    pub fn props(&self, key: &str) -> Option<&Props> {
        self.get(key).and_then(PropValue::as_props)
    }

    /// Component reference stored under `key`.
    #[must_use]
    pub fn component(&self, key: &str) -> Option<&Component> {
        self.get(key).and_then(PropValue::as_component)
    }

    /// Children handed to a composite invocation, or [`Node::Empty`].
    #[must_use]
    pub fn children(&self) -> Node {
        self.get(CHILDREN)
            .and_then(PropValue::as_node)
            .cloned()
            .unwrap_or(Node::Empty)
    }
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Props {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter().collect()
    }
}

impl Serialize for Props {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}
