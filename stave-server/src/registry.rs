//! Named component registry.
//!
//! Components are registered once at startup and looked up by name for each
//! render request. Names go through [`validate_component_name`] on both
//! paths, so a lookup never sees a path-like or otherwise malformed name.

use std::collections::BTreeMap;
use std::sync::RwLock;

use stave_core::Component;

use crate::validation::{validate_component_name, ValidationError};

/// A registered component and its human-readable description.
#[derive(Debug, Clone)]
pub struct RegisteredComponent {
    /// The component itself.
    pub component: Component,
    /// One-line description shown by the listing endpoints.
    pub description: String,
}

/// Thread-safe name → component map.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    entries: RwLock<BTreeMap<String, RegisteredComponent>>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `name`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `name` is not a valid component name.
    pub fn register(
        &self,
        name: &str,
        description: impl Into<String>,
        component: impl Into<Component>,
    ) -> Result<(), ValidationError> {
        validate_component_name(name)?;

        let entry = RegisteredComponent {
            component: component.into(),
            description: description.into(),
        };
        let replaced = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(name.to_string(), entry)
            .is_some();

        if replaced {
            tracing::warn!(component = name, "replaced registered component");
        } else {
            tracing::debug!(component = name, "registered component");
        }
        Ok(())
    }

    /// Look up a component by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<RegisteredComponent> {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stave_core::{create_element, Node};

    fn noop() -> Component {
        Component::composite("Noop", |_| Ok(Node::Empty))
    }

    #[test]
    fn test_register_and_get() {
        let registry = ComponentRegistry::new();
        registry
            .register("Noop", "renders nothing", noop())
            .expect("should register");

        let entry = registry.get("Noop").expect("should exist");
        assert_eq!(entry.component.name(), "Noop");
        assert_eq!(entry.description, "renders nothing");
        assert!(registry.get("Missing").is_none());
    }

    #[test]
    fn test_register_rejects_bad_names() {
        let registry = ComponentRegistry::new();

        assert!(registry.register("../Noop", "", noop()).is_err());
        assert!(registry.register("", "", noop()).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_list_is_sorted() {
        let registry = ComponentRegistry::new();
        for name in ["Zeta", "Alpha", "Mid"] {
            registry.register(name, "", noop()).expect("register");
        }

        assert_eq!(registry.list(), ["Alpha", "Mid", "Zeta"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_register_replaces() {
        let registry = ComponentRegistry::new();
        registry.register("Box", "first", noop()).expect("register");
        let boxed = Component::composite("Box", |_| create_element("div", None, ()));
        registry.register("Box", "second", boxed.clone()).expect("register");

        let entry = registry.get("Box").expect("exists");
        assert_eq!(entry.description, "second");
        assert_eq!(entry.component, boxed);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_primitive_tags_can_be_registered() {
        let registry = ComponentRegistry::new();
        registry
            .register("Paragraph", "a bare <p>", "p")
            .expect("register");

        let entry = registry.get("Paragraph").expect("exists");
        assert!(entry.component.is_primitive());
    }
}
