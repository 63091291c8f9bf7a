//! Built-in demo components.

mod user_list;

pub use simple_test::simple_test;
pub use user_list::user_list;

use crate::registry::ComponentRegistry;
use crate::validation::ValidationError;

/// Register every built-in component.
///
/// # Errors
///
/// Returns a [`ValidationError`] if a built-in name is rejected.
pub fn register_builtins(registry: &ComponentRegistry) -> Result<(), ValidationError> {
    registry.register(
        "SimpleTest",
        "Styled box with a heading and a message",
        simple_test(),
    )?;
    registry.register(
        "UserList",
        "User management dashboard with statistics and one card per user",
        user_list(),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtins() {
        let registry = ComponentRegistry::new();
        register_builtins(&registry).expect("built-in names are valid");

        assert_eq!(registry.list(), ["SimpleTest", "UserList"]);
    }
}
