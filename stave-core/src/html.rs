//! HTML serialization of render trees.
//!
//! The composer never calls into this module; it is one possible consumer
//! of a finished [`RenderTree`].
//!
//! ## Attribute mapping
//!
//! | Prop                        | Output                              |
//! |-----------------------------|-------------------------------------|
//! | `className`                 | `class="..."`                       |
//! | `htmlFor`                   | `for="..."`                         |
//! | `children`, `key`           | skipped                             |
//! | string / number             | `name="escaped"`                    |
//! | `true`                      | bare `name`                         |
//! | `null`, `false`             | skipped                             |
//! | `style` map                 | `style="kebab-case:value;..."`      |
//! | other maps, arrays, nodes   | skipped                             |

use crate::props::CHILDREN;
use crate::{Component, Composer, Node, PropValue, Props, RenderResult, RenderTree};

/// Elements that never have children or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Writes render trees as HTML text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

impl HtmlSerializer {
    /// Serialize a whole tree.
    #[must_use]
    pub fn render(tree: &RenderTree) -> String {
        let mut out = String::new();
        write_node(tree.root(), &mut out);
        out
    }

    /// Wrap a body fragment in a minimal HTML5 document.
    #[must_use]
    pub fn document(title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\" />\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\
             <title>{}</title></head><body>{body}</body></html>",
            escape_html(title)
        )
    }
}

/// Compose `root` with `props` and serialize the result.
///
/// # Errors
///
/// Returns any composition error; nothing is serialized on failure.
pub fn render_to_string(composer: &Composer, root: &Component, props: Props) -> RenderResult<String> {
    let tree = composer.render(root, props)?;
    Ok(HtmlSerializer::render(&tree))
}

/// Escape text for element content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out);
    out
}

fn escape_into(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Empty => {}
        Node::Text(value) => escape_into(&value.to_string(), out),
        Node::Raw(markup) => out.push_str(markup),
        Node::Fragment(children) => {
            for child in children {
                write_node(child, out);
            }
        }
        Node::Element(element) => {
            if !element.component.is_primitive() {
                tracing::warn!(component = element.tag(), "skipping unexpanded composite");
                return;
            }
            let tag = element.tag();
            out.push('<');
            out.push_str(tag);
            write_attributes(&element.props, out);
            if VOID_ELEMENTS.contains(&tag) {
                out.push_str(" />");
                return;
            }
            out.push('>');
            for child in &element.children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

fn write_attributes(props: &Props, out: &mut String) {
    for (key, value) in props.iter() {
        if key == CHILDREN || key == "key" || !is_attribute_name(key) {
            continue;
        }
        let name = match key {
            "className" => "class",
            "htmlFor" => "for",
            other => other,
        };
        match value {
            PropValue::Bool(true) => {
                out.push(' ');
                out.push_str(name);
            }
            PropValue::String(s) => write_attribute(name, s, out),
            PropValue::Int(i) => write_attribute(name, &i.to_string(), out),
            PropValue::Float(f) => write_attribute(name, &f.to_string(), out),
            PropValue::Map(style) if key == "style" => {
                let css = style_declarations(style);
                if !css.is_empty() {
                    write_attribute(name, &css, out);
                }
            }
            _ => {}
        }
    }
}

fn write_attribute(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(value, out);
    out.push('"');
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|c| {
            !c.is_whitespace()
                && !c.is_control()
                && !matches!(c, '"' | '\'' | '>' | '/' | '=' | '<')
        })
}

/// `{backgroundColor: "#fff", padding: "20px"}` -> `background-color:#fff;padding:20px`
fn style_declarations(style: &Props) -> String {
    let mut declarations = Vec::new();
    for (property, value) in style.iter() {
        let value = match value {
            PropValue::String(s) if !s.is_empty() => s.clone(),
            PropValue::Int(i) => i.to_string(),
            PropValue::Float(f) => f.to_string(),
            _ => continue,
        };
        declarations.push(format!("{}:{value}", kebab_case(property)));
    }
    declarations.join(";")
}

fn kebab_case(property: &str) -> String {
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
