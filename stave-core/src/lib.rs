//! # Stave Core
//!
//! Composition engine for server-side rendered component trees.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 stave-core                  │
//! ├─────────────────────────────────────────────┤
//! │  Element Builder   │  Tree Composer         │
//! │  - Descriptors     │  - Composite expansion │
//! │  - Child flatten   │  - Fragment splicing   │
//! │  - Suppression     │  - Depth bound         │
//! ├─────────────────────────────────────────────┤
//! │  HTML Serializer (consumer of RenderTree)   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use stave_core::{children, create_element, props, Component, Composer, HtmlSerializer};
//!
//! let card = Component::composite("UserCard", |props| {
//!     let name = props.str_or("name", "Unknown");
//!     create_element("li", Some(props! { "className" => "card" }), name)
//! });
//!
//! let list = Component::composite("UserList", move |props| {
//!     let cards = props
//!         .array("users")
//!         .iter()
//!         .map(|user| create_element(&card, user.as_props().cloned(), ()))
//!         .collect::<Result<Vec<_>, _>>()?;
//!     create_element("ul", None, cards)
//! });
//!
//! let users = vec![props! { "name" => "Ann" }, props! { "name" => "Bo" }];
//! let tree = Composer::new().render(&list, props! { "users" => users })?;
//!
//! assert_eq!(
//!     HtmlSerializer::render(&tree),
//!     r#"<ul><li class="card">Ann</li><li class="card">Bo</li></ul>"#
//! );
//! # Ok::<(), stave_core::RenderError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
pub mod component;
pub mod compose;
pub mod error;
pub mod html;
pub mod node;
pub mod props;
pub mod tree;

pub use builder::{create_element, create_element_from_value, flatten_children, Child, ElementBuilder};
pub use component::{Component, Composite, RenderFn};
pub use compose::{ComposeConfig, Composer, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use error::{RenderError, RenderResult};
pub use html::{escape_html, render_to_string, HtmlSerializer};
pub use node::{Element, Node, TextValue};
pub use props::{PropValue, Props};
pub use tree::RenderTree;

/// Stave core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a [`Props`] bag from `key => value` pairs.
///
/// ```
/// let props = stave_core::props! { "title" => "Users", "count" => 3 };
/// assert_eq!(props.str("title"), Some("Users"));
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $( props.insert($key, $value); )+
        props
    }};
}

/// Build a [`Child::List`] from several children of mixed types.
///
/// ```
/// use stave_core::{children, create_element};
///
/// let node = create_element("p", None, children!["a", 1, None::<&str>])?;
/// assert_eq!(node.text_content(), "a1");
/// # Ok::<(), stave_core::RenderError>(())
/// ```
#[macro_export]
macro_rules! children {
    ($($child:expr),* $(,)?) => {
        $crate::Child::List(vec![$($crate::Child::from($child)),*])
    };
}
