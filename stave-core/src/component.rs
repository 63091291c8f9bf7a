//! Component references: primitive tags and composite callables.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::{Node, PropValue, Props, RenderError, RenderResult};

/// Signature of a composite component body.
pub type RenderFn = dyn Fn(&Props) -> RenderResult<Node> + Send + Sync;

/// A callable component with a display name.
///
/// Two composites are equal only when they share the same function
/// allocation; the name is for logs and error messages.
#[derive(Clone)]
pub struct Composite {
    name: Cow<'static, str>,
    render: Arc<RenderFn>,
}

impl Composite {
    /// Wrap a render function.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, render: F) -> Self
    where
        F: Fn(&Props) -> RenderResult<Node> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            render: Arc::new(render),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the component body once.
    ///
    /// # Errors
    ///
    /// Propagates whatever the component body returns.
    pub fn invoke(&self, props: &Props) -> RenderResult<Node> {
        (self.render)(props)
    }
}

impl PartialEq for Composite {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.render), Arc::as_ptr(&other.render))
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Composite").field(&self.name).finish()
    }
}

/// What an element refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    /// A terminal markup tag, opaque beyond its name.
    Tag(Cow<'static, str>),
    /// A callable that produces further nodes.
    Composite(Composite),
}

impl Component {
    /// Primitive tag reference. Validity is checked when an element is built.
    pub fn tag(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Tag(name.into())
    }

    /// Composite reference from a render function.
    pub fn composite<F>(name: impl Into<Cow<'static, str>>, render: F) -> Self
    where
        F: Fn(&Props) -> RenderResult<Node> + Send + Sync + 'static,
    {
        Self::Composite(Composite::new(name, render))
    }

    /// Tag name or composite display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tag(name) => name,
            Self::Composite(composite) => composite.name(),
        }
    }

    /// Whether this is a primitive tag.
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Tag(_))
    }

    /// Borrow the composite, if any.
    #[must_use]
    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Self::Composite(composite) => Some(composite),
            Self::Tag(_) => None,
        }
    }

    /// Check that a tag name is usable as a markup element name.
    ///
    /// Tags must start with an ASCII letter and contain only ASCII
    /// alphanumerics, `-`, `_`, `:` or `.`. Composites are always valid.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidRef`] for a malformed tag.
    pub fn validate(&self) -> RenderResult<()> {
        match self {
            Self::Tag(name) if !is_valid_tag(name) => {
                Err(RenderError::InvalidRef(format!("malformed tag name {name:?}")))
            }
            _ => Ok(()),
        }
    }
}

fn is_valid_tag(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        }
        _ => false,
    }
}

impl From<&'static str> for Component {
    fn from(name: &'static str) -> Self {
        Self::Tag(Cow::Borrowed(name))
    }
}

impl From<String> for Component {
    fn from(name: String) -> Self {
        Self::Tag(Cow::Owned(name))
    }
}

impl From<Composite> for Component {
    fn from(composite: Composite) -> Self {
        Self::Composite(composite)
    }
}

impl From<&Component> for Component {
    fn from(component: &Component) -> Self {
        component.clone()
    }
}

impl TryFrom<&PropValue> for Component {
    type Error = RenderError;

    fn try_from(value: &PropValue) -> RenderResult<Self> {
        let component = match value {
            PropValue::String(name) => Self::Tag(Cow::Owned(name.clone())),
            PropValue::Component(component) => component.clone(),
            other => {
                return Err(RenderError::InvalidRef(format!(
                    "expected a tag name or component, got {}",
                    other.type_name()
                )))
            }
        };
        component.validate()?;
        Ok(component)
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
