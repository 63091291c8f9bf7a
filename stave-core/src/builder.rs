//! Element construction and children normalization.
//!
//! The builder never invokes components; it only produces descriptors.
//! Children are flattened at construction time so every element holds a
//! single ordered sequence:
//!
//! | Input                          | Contributes                     |
//! |--------------------------------|---------------------------------|
//! | a [`Node`]                     | itself (`Empty` contributes 0)  |
//! | nested lists, any depth        | their entries, in order         |
//! | string / number                | a text leaf                     |
//! | `None`, `false`, `null`, `""`  | nothing                         |
//! | `true`, maps, components       | [`RenderError::InvalidChild`]   |

use crate::{Component, Element, Node, PropValue, Props, RenderError, RenderResult};

/// Loose input accepted wherever children are expected.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// An already-built node.
    Node(Node),
    /// A list of children, flattened recursively.
    List(Vec<Child>),
    /// A dynamic value, converted by the suppression policy.
    Value(PropValue),
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Self::Node(Node::Element(element))
    }
}

impl From<PropValue> for Child {
    fn from(value: PropValue) -> Self {
        Self::Value(value)
    }
}

impl From<&PropValue> for Child {
    fn from(value: &PropValue) -> Self {
        Self::Value(value.clone())
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Value(PropValue::from(text))
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Value(PropValue::String(text))
    }
}

impl From<i64> for Child {
    fn from(value: i64) -> Self {
        Self::Value(PropValue::Int(value))
    }
}

impl From<i32> for Child {
    fn from(value: i32) -> Self {
        Self::Value(PropValue::from(value))
    }
}

impl From<usize> for Child {
    fn from(value: usize) -> Self {
        Self::Value(PropValue::from(value))
    }
}

impl From<f64> for Child {
    fn from(value: f64) -> Self {
        Self::Value(PropValue::Float(value))
    }
}

impl From<bool> for Child {
    fn from(value: bool) -> Self {
        Self::Value(PropValue::Bool(value))
    }
}

impl From<()> for Child {
    fn from((): ()) -> Self {
        Self::List(Vec::new())
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Value(PropValue::Null), Into::into)
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Flatten `child` into `out`, dropping empty entries.
///
/// # Errors
///
/// Returns [`RenderError::InvalidChild`] for values with no rendering.
pub fn flatten_children(child: Child, out: &mut Vec<Node>) -> RenderResult<()> {
    match child {
        Child::Node(Node::Empty) => {}
        Child::Node(node) => out.push(node),
        Child::List(items) => {
            for item in items {
                flatten_children(item, out)?;
            }
        }
        Child::Value(PropValue::Array(items)) => {
            for item in items {
                flatten_children(Child::Value(item), out)?;
            }
        }
        Child::Value(value) => match Node::from_value(&value)? {
            Node::Empty => {}
            node => out.push(node),
        },
    }
    Ok(())
}

/// Fluent element builder.
///
/// ```
/// use stave_core::ElementBuilder;
///
/// let node = ElementBuilder::new("ul")
///     .prop("className", "list")
///     .child(ElementBuilder::new("li").child("one").build()?)
///     .child(None::<&str>)
///     .build()?;
///
/// assert_eq!(node.text_content(), "one");
/// # Ok::<(), stave_core::RenderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    component: Component,
    props: Props,
    children: Vec<Child>,
}

impl ElementBuilder {
    /// Start an element for `component`.
    pub fn new(component: impl Into<Component>) -> Self {
        Self {
            component: component.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Replace the whole property bag.
    #[must_use]
    pub fn props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Set one property.
    #[must_use]
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Append a child (or a list of children).
    #[must_use]
    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append every child from an iterator.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Finish the element.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidRef`] for a malformed tag and
    /// [`RenderError::InvalidChild`] for an unrenderable child value.
    pub fn build(self) -> RenderResult<Node> {
        self.component.validate()?;
        let mut children = Vec::new();
        flatten_children(Child::List(self.children), &mut children)?;
        Ok(Node::Element(Element {
            component: self.component,
            props: self.props,
            children,
        }))
    }
}

/// Build an element descriptor.
///
/// `props` may be `None` for an empty bag. `children` takes anything
/// convertible into a [`Child`]; use [`children!`](crate::children) for
/// several at once.
///
/// # Errors
///
/// Returns [`RenderError::InvalidRef`] for a malformed tag and
/// [`RenderError::InvalidChild`] for an unrenderable child value.
pub fn create_element(
    component: impl Into<Component>,
    props: Option<Props>,
    children: impl Into<Child>,
) -> RenderResult<Node> {
    ElementBuilder::new(component)
        .props(props.unwrap_or_default())
        .child(children)
        .build()
}

/// Build an element from a dynamically supplied reference.
///
/// # Errors
///
/// Returns [`RenderError::InvalidRef`] when `component` is neither a tag
/// name nor a component, plus everything [`create_element`] returns.
pub fn create_element_from_value(
    component: &PropValue,
    props: Option<Props>,
    children: impl Into<Child>,
) -> RenderResult<Node> {
    let component = Component::try_from(component)?;
    create_element(component, props, children)
}

/// Collapse loose child input into one node: nothing becomes `Empty`, a
/// single entry stays as is, several become a `Fragment`.
impl TryFrom<Child> for Node {
    type Error = RenderError;

    fn try_from(child: Child) -> RenderResult<Self> {
        let mut nodes = Vec::new();
        flatten_children(child, &mut nodes)?;
        Ok(match nodes.len() {
            0 => Self::Empty,
            1 => nodes.pop().unwrap_or(Self::Empty),
            _ => Self::Fragment(nodes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{children, props};

    fn texts(node: &Node) -> Vec<String> {
        node.as_element()
            .expect("element")
            .children
            .iter()
            .map(Node::text_content)
            .collect()
    }

    #[test]
    fn test_props_none_is_empty_bag() {
        let node = create_element("div", None, ()).expect("should build");
        let element = node.as_element().expect("element");

        assert!(element.props.is_empty());
        assert!(element.children.is_empty());
    }

    #[test]
    fn test_nested_lists_flatten_in_order() {
        let node = create_element(
            "ul",
            None,
            children![children!["A", "B"], "C", children![children!["D"]]],
        )
        .expect("should build");

        assert_eq!(texts(&node), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_suppressed_children_vanish() {
        let node = create_element(
            "div",
            None,
            children!["A", false, "B", PropValue::Null, "C", None::<Node>, "", Node::Empty],
        )
        .expect("should build");

        assert_eq!(texts(&node), ["A", "B", "C"]);
    }

    #[test]
    fn test_zero_is_content() {
        let node = create_element("span", None, children![0, "0"]).expect("should build");

        assert_eq!(texts(&node), ["0", "0"]);
    }

    #[test]
    fn test_scalar_child_wrapped_as_text() {
        let node = create_element("p", None, 42).expect("should build");
        let element = node.as_element().expect("element");

        assert_eq!(element.children, vec![Node::text(42_i64)]);
    }

    #[test]
    fn test_value_arrays_flatten() {
        let value = PropValue::from(vec![
            PropValue::from(vec!["x", "y"]),
            PropValue::from("z"),
        ]);
        let node = create_element("div", None, value).expect("should build");

        assert_eq!(texts(&node), ["x", "y", "z"]);
    }

    #[test]
    fn test_builder_does_not_invoke_composites() {
        let composite = Component::composite("Boom", |_| panic!("must not be invoked"));
        let node = create_element(composite, Some(props! { "a" => 1 }), ()).expect("build");

        assert_eq!(node.as_element().expect("element").tag(), "Boom");
    }

    #[test]
    fn test_invalid_ref() {
        let result = create_element("not a tag", None, ());
        assert!(matches!(result, Err(RenderError::InvalidRef(_))));

        let result = create_element_from_value(&PropValue::Float(1.0), None, ());
        assert!(matches!(result, Err(RenderError::InvalidRef(_))));
    }

    #[test]
    fn test_function_child_is_invalid() {
        let composite = Component::composite("Card", |_| Ok(Node::Empty));
        let result = create_element("div", None, PropValue::Component(composite));

        assert!(matches!(result, Err(RenderError::InvalidChild(_))));
    }

    #[test]
    fn test_true_child_is_invalid() {
        let result = create_element("div", None, true);
        assert!(matches!(result, Err(RenderError::InvalidChild(_))));
    }

    #[test]
    fn test_fragments_are_kept_for_composer() {
        let fragment = Node::fragment([Node::text("a"), Node::text("b")]);
        let node = create_element("div", None, fragment.clone()).expect("should build");

        assert_eq!(node.as_element().expect("element").children, vec![fragment]);
    }

    #[test]
    fn test_builder_chain() {
        let node = ElementBuilder::new("ul")
            .prop("className", "list")
            .children(["one", "two"])
            .child(vec![Some("three"), None])
            .build()
            .expect("should build");

        let element = node.as_element().expect("element");
        assert_eq!(element.props.str("className"), Some("list"));
        assert_eq!(texts(&node), ["one", "two", "three"]);
    }

    #[test]
    fn test_child_into_node() {
        assert!(Node::try_from(Child::from(())).expect("empty").is_empty());
        assert_eq!(
            Node::try_from(Child::from("solo")).expect("single"),
            Node::text("solo")
        );
        assert_eq!(
            Node::try_from(children!["a", "b"]).expect("many"),
            Node::fragment([Node::text("a"), Node::text("b")])
        );
    }
}
