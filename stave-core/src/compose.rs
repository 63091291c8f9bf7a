//! Tree composition: expanding composites until only primitives remain.
//!
//! Expansion is a depth-first, pre-order walk:
//!
//! - primitive elements keep their tag and props; their children are
//!   composed in order,
//! - composite elements are invoked exactly once with their props (plus
//!   their children under [`CHILDREN`]) and the result is composed in
//!   their place,
//! - `Empty` nodes are dropped and fragments are spliced into the parent.
//!
//! Composition reads nothing but the `(component, props)` pair at each
//! node, so equal inputs always compose to equal trees.

use crate::props::CHILDREN;
use crate::{Component, Element, Node, Props, RenderError, RenderResult, RenderTree};

/// Default bound on nested elements and composite expansions.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest accepted depth bound.
///
/// Expansion recurses once per level, so the bound also caps stack use. At
/// this ceiling the deepest render fits in a 2 MiB thread stack, which is
/// what tokio gives its blocking-pool threads.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Composer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeConfig {
    max_depth: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ComposeConfig {
    /// Set the depth bound, clamped to [`MAX_DEPTH_LIMIT`].
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        if max_depth > MAX_DEPTH_LIMIT {
            tracing::warn!(
                requested = max_depth,
                limit = MAX_DEPTH_LIMIT,
                "depth bound clamped"
            );
        }
        self.max_depth = max_depth.min(MAX_DEPTH_LIMIT);
        self
    }

    /// Maximum nesting depth along any root-to-leaf path. Every element and
    /// every composite expansion counts as one level.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Expands component trees into render trees.
///
/// A composer holds only its configuration, so one instance can serve
/// concurrent renders from many threads.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: ComposeConfig,
}

impl Composer {
    /// Composer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Composer with an explicit configuration.
    #[must_use]
    pub fn with_config(config: ComposeConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> ComposeConfig {
        self.config
    }

    /// Render `root` with `props` into a fully expanded tree.
    ///
    /// # Errors
    ///
    /// - [`RenderError::InvalidRef`] if `root` or any produced tag is malformed.
    /// - [`RenderError::InvalidChild`] if a component produces an unrenderable child.
    /// - [`RenderError::CompositionDepthExceeded`] if expansion nests past
    ///   [`ComposeConfig::max_depth`].
    #[tracing::instrument(name = "compose", skip_all, fields(component = %root.name()))]
    pub fn render(&self, root: &Component, props: Props) -> RenderResult<RenderTree> {
        let node = Node::Element(Element {
            component: root.clone(),
            props,
            children: Vec::new(),
        });
        self.compose(node)
    }

    /// Compose an already-built node.
    ///
    /// Composing a tree that is already fully primitive returns an equal
    /// tree.
    ///
    /// # Errors
    ///
    /// Same as [`Composer::render`].
    pub fn compose(&self, node: Node) -> RenderResult<RenderTree> {
        let mut out = Vec::new();
        self.expand(node, 0, &mut out)?;
        Ok(RenderTree::from_nodes(out))
    }

    fn expand(&self, node: Node, depth: usize, out: &mut Vec<Node>) -> RenderResult<()> {
        match node {
            Node::Empty => {}
            Node::Text(_) | Node::Raw(_) => out.push(node),
            Node::Fragment(children) => {
                for child in children {
                    self.expand(child, depth, out)?;
                }
            }
            Node::Element(element) => self.expand_element(element, depth, out)?,
        }
        Ok(())
    }

    fn expand_element(
        &self,
        element: Element,
        depth: usize,
        out: &mut Vec<Node>,
    ) -> RenderResult<()> {
        if depth >= self.config.max_depth {
            tracing::warn!(
                component = element.tag(),
                limit = self.config.max_depth,
                "composition depth exceeded"
            );
            return Err(RenderError::CompositionDepthExceeded {
                component: element.tag().to_string(),
                limit: self.config.max_depth,
            });
        }

        let Element {
            component,
            props,
            children,
        } = element;

        match component {
            Component::Tag(_) => {
                component.validate()?;
                // A primitive renders only its own children; slot content and
                // composite refs left in a spread bag are never expanded.
                let mut props = props;
                props.retain(|key, value| key != CHILDREN && !value.references_composite());
                let mut composed = Vec::with_capacity(children.len());
                for child in children {
                    self.expand(child, depth + 1, &mut composed)?;
                }
                out.push(Node::Element(Element {
                    component,
                    props,
                    children: composed,
                }));
            }
            Component::Composite(composite) => {
                let props = if children.is_empty() {
                    props
                } else {
                    props.with(CHILDREN, Node::Fragment(children))
                };
                tracing::trace!(component = composite.name(), depth, "invoking composite");
                let result = composite.invoke(&props)?;
                self.expand(result, depth + 1, out)?;
            }
        }
        Ok(())
    }
}
