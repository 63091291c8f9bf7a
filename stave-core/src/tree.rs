//! Fully composed output trees.

use serde::Serialize;

use crate::{Element, Node, RenderResult};

/// The output of composition.
///
/// Every element in a render tree is primitive. The root is `Empty` when
/// nothing was rendered, a single node, or a `Fragment` of top-level
/// siblings; fragments and empty nodes never appear deeper than the root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderTree {
    root: Node,
}

impl RenderTree {
    /// Wrap already-composed top-level nodes.
    pub(crate) fn from_nodes(mut nodes: Vec<Node>) -> Self {
        let root = match nodes.len() {
            0 => Node::Empty,
            1 => nodes.pop().unwrap_or(Node::Empty),
            _ => Node::Fragment(nodes),
        };
        Self { root }
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Take ownership of the root node.
    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }

    /// Top-level nodes, with a root fragment unwrapped.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        match &self.root {
            Node::Empty => &[],
            Node::Fragment(nodes) => nodes,
            node => std::slice::from_ref(node),
        }
    }

    /// Whether nothing was rendered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Total number of elements in the tree.
    #[must_use]
    pub fn element_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            match node {
                Node::Element(element) => 1 + element.children.iter().map(count).sum::<usize>(),
                Node::Fragment(nodes) => nodes.iter().map(count).sum(),
                _ => 0,
            }
        }
        count(&self.root)
    }

    /// Concatenated text of every text leaf, in document order.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.root.text_content()
    }

    /// All elements with the given tag, in pre-order.
    #[must_use]
    pub fn find_by_tag(&self, tag: &str) -> Vec<&Element> {
        fn walk<'a>(node: &'a Node, tag: &str, out: &mut Vec<&'a Element>) {
            match node {
                Node::Element(element) => {
                    if element.tag() == tag {
                        out.push(element);
                    }
                    for child in &element.children {
                        walk(child, tag, out);
                    }
                }
                Node::Fragment(nodes) => {
                    for child in nodes {
                        walk(child, tag, out);
                    }
                }
                _ => {}
            }
        }

        let mut out = Vec::new();
        walk(&self.root, tag, &mut out);
        out
    }

    /// Serialize the tree to a JSON value (snapshot form).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> RenderResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize the tree to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{children, create_element};

    #[test]
    fn test_from_nodes_shapes() {
        assert!(RenderTree::from_nodes(vec![]).is_empty());

        let single = RenderTree::from_nodes(vec![Node::text("a")]);
        assert_eq!(single.root(), &Node::text("a"));
        assert_eq!(single.nodes().len(), 1);

        let many = RenderTree::from_nodes(vec![Node::text("a"), Node::text("b")]);
        assert!(matches!(many.root(), Node::Fragment(_)));
        assert_eq!(many.nodes().len(), 2);
    }

    #[test]
    fn test_counts_and_lookup() {
        let node = create_element(
            "ul",
            None,
            children![
                create_element("li", None, "one").expect("li"),
                create_element("li", None, "two").expect("li"),
            ],
        )
        .expect("ul");
        let tree = RenderTree::from_nodes(vec![node]);

        assert_eq!(tree.element_count(), 3);
        assert_eq!(tree.text_content(), "onetwo");
        let items = tree.find_by_tag("li");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].text_content(), "two");
    }

    #[test]
    fn test_to_json_roundtrips_through_value() {
        let tree = RenderTree::from_nodes(vec![Node::text("hello")]);

        let json = tree.to_json().expect("should serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value, tree.to_value().expect("value"));
        assert_eq!(value["type"], "text");
    }
}
