//! The renderable node union.

use std::fmt;

use serde::Serialize;

use crate::{Component, PropValue, Props, RenderError, RenderResult};

/// A text leaf value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextValue {
    /// String content.
    Str(String),
    /// Integer content.
    Int(i64),
    /// Floating point content.
    Float(f64),
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for TextValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for TextValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for TextValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for TextValue {
    fn from(value: usize) -> Self {
        Self::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for TextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// An element descriptor: a component reference, its props and children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    /// Tag or composite this element refers to.
    pub component: Component,
    /// Properties passed to the component.
    pub props: Props,
    /// Ordered children.
    pub children: Vec<Node>,
}

impl Element {
    /// Tag name (or composite display name).
    #[must_use]
    pub fn tag(&self) -> &str {
        self.component.name()
    }

    /// Concatenated text of all descendant text leaves, in order.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Direct children that are elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

/// A renderable node.
///
/// `Empty` is the explicit "nothing to render" variant that conditional
/// expressions collapse to. It never survives composition below the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Node {
    /// An element (primitive or composite).
    Element(Element),
    /// A text leaf, escaped by serializers.
    Text(TextValue),
    /// Verbatim markup that serializers must not escape.
    Raw(String),
    /// Sibling nodes with no enclosing element.
    Fragment(Vec<Node>),
    /// No output.
    Empty,
}

impl Node {
    /// Text leaf.
    pub fn text(value: impl Into<TextValue>) -> Self {
        Self::Text(value.into())
    }

    /// Verbatim markup leaf.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self::Raw(markup.into())
    }

    /// Fragment from any sequence of nodes.
    pub fn fragment(nodes: impl IntoIterator<Item = Node>) -> Self {
        Self::Fragment(nodes.into_iter().collect())
    }

    /// Render `f` only when `condition` holds, otherwise [`Node::Empty`].
    ///
    /// # Errors
    ///
    /// Propagates errors from `f`.
    pub fn when<F>(condition: bool, f: F) -> RenderResult<Self>
    where
        F: FnOnce() -> RenderResult<Self>,
    {
        if condition {
            f()
        } else {
            Ok(Self::Empty)
        }
    }

    /// Whether this is [`Node::Empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Borrow as an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Whether any element in this subtree, or any prop it carries, refers
    /// to a composite component. Always false for a composed tree.
    #[must_use]
    pub fn references_composite(&self) -> bool {
        match self {
            Self::Element(element) => {
                !element.component.is_primitive()
                    || element.props.iter().any(|(_, v)| v.references_composite())
                    || element.children.iter().any(Self::references_composite)
            }
            Self::Fragment(children) => children.iter().any(Self::references_composite),
            Self::Text(_) | Self::Raw(_) | Self::Empty => false,
        }
    }

    /// Concatenated text of all text leaves in pre-order. Raw markup is
    /// not text and is skipped.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(value) => out.push_str(&value.to_string()),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Fragment(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
            Self::Raw(_) | Self::Empty => {}
        }
    }

    /// Convert a dynamic value into a node.
    ///
    /// Suppression values (`null`, `false`, `""`) become [`Node::Empty`],
    /// strings and numbers become text, arrays become fragments.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidChild`] for `true`, maps and bare
    /// component references: none of them has a rendering.
    pub fn from_value(value: &PropValue) -> RenderResult<Self> {
        if value.is_suppressed() {
            return Ok(Self::Empty);
        }
        match value {
            PropValue::String(s) => Ok(Self::text(s.as_str())),
            PropValue::Int(i) => Ok(Self::text(*i)),
            PropValue::Float(f) => Ok(Self::text(*f)),
            PropValue::Array(items) => items
                .iter()
                .map(Self::from_value)
                .collect::<RenderResult<Vec<_>>>()
                .map(Self::Fragment),
            PropValue::Node(node) => Ok(node.clone()),
            PropValue::Component(component) => Err(RenderError::InvalidChild(format!(
                "component <{}> used directly as a child; build an element from it instead",
                component.name()
            ))),
            other => Err(RenderError::InvalidChild(format!(
                "{} values cannot be rendered",
                other.type_name()
            ))),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<TextValue> for Node {
    fn from(value: TextValue) -> Self {
        Self::Text(value)
    }
}

impl From<Option<Node>> for Node {
    fn from(node: Option<Node>) -> Self {
        node.unwrap_or(Self::Empty)
    }
}
