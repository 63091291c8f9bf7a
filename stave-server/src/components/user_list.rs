//! `UserList`: the user management dashboard.
//!
//! ```text
//! UserList
//! ├── <style> (raw)
//! ├── header ─ title, current user badge
//! ├── UserStats ─ totals, role distribution (only when users exist)
//! ├── quick actions (only when can_edit)
//! ├── grid ─ UserCard × users
//! └── footer
//! ```
//!
//! Props:
//!
//! | Prop           | Type            | Default       |
//! |----------------|-----------------|---------------|
//! | `users`        | array of maps   | `[]`          |
//! | `current_user` | map             | `{}`          |
//! | `can_edit`     | bool            | `false`       |
//! | `page_title`   | string          | `"User List"` |
//! | `generated_at` | string          | omitted       |
//!
//! Each user map may carry `id`, `name`, `email`, `role` (`"user"` when
//! missing), `active` (`true` when missing) and `tasks` (`0` when missing).

use stave_core::{
    children, create_element, props, Component, Node, PropValue, Props, RenderResult,
};

const STYLES: &str = include_str!("styles.css");

const SUBTITLE: &str = "User management system - Server-Side Rendering";

/// Build the `UserList` dashboard component.
#[must_use]
pub fn user_list() -> Component {
    let card = user_card();
    let stats = user_stats();
    Component::composite("UserList", move |props| dashboard(props, &card, &stats))
}

fn class(name: impl Into<String>) -> Option<Props> {
    Some(props! { "className" => name.into() })
}

/// `"Ada Lovelace"` → `"AL"`.
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn role_badge(role: &str) -> &'static str {
    match role {
        "admin" => "bg-purple-100 text-purple-800",
        "user" => "bg-blue-100 text-blue-800",
        _ => "bg-orange-100 text-orange-800",
    }
}

fn role_of(user: &PropValue) -> &str {
    user.as_props().map_or("user", |u| u.str_or("role", "user"))
}

fn user_card() -> Component {
    Component::composite("UserCard", |props| {
        let user = props.props("user").cloned().unwrap_or_default();
        let name = user.str_or("name", "Unknown");
        let role = user.str_or("role", "user");
        let active = user.bool_or("active", true);
        let tasks = user.i64_or("tasks", 0);

        let (border, avatar, dot, status) = if active {
            ("border-green-200", "bg-green-500", "bg-green-400", "bg-green-100 text-green-800")
        } else {
            ("border-gray-200", "bg-gray-400", "bg-gray-400", "bg-gray-100 text-gray-800")
        };

        create_element(
            "div",
            class(format!(
                "p-4 bg-white rounded-xl border-2 {border} shadow-md hover:shadow-lg \
                 transition-all duration-300"
            )),
            children![
                create_element(
                    "div",
                    class("flex items-center space-x-3 mb-3"),
                    children![
                        create_element(
                            "div",
                            class(format!(
                                "w-12 h-12 rounded-full flex items-center justify-center \
                                 text-white font-bold text-lg {avatar}"
                            )),
                            initials(name),
                        )?,
                        create_element(
                            "div",
                            class("flex-1"),
                            children![
                                create_element(
                                    "h3",
                                    class("font-semibold text-gray-800"),
                                    name
                                )?,
                                create_element(
                                    "p",
                                    class("text-sm text-gray-600"),
                                    user.str_or("email", "")
                                )?,
                                create_element(
                                    "span",
                                    class(format!(
                                        "inline-block px-2 py-1 text-xs rounded-full mt-1 {}",
                                        role_badge(role)
                                    )),
                                    capitalize(role),
                                )?,
                            ],
                        )?,
                        create_element("div", class(format!("w-3 h-3 rounded-full {dot}")), ())?,
                    ],
                )?,
                create_element(
                    "div",
                    class("flex justify-between items-center text-sm"),
                    children![
                        create_element(
                            "span",
                            class("text-gray-600"),
                            format!("{tasks} tasks assigned")
                        )?,
                        create_element(
                            "span",
                            class(format!("px-2 py-1 rounded-full {status}")),
                            if active { "Active" } else { "Inactive" },
                        )?,
                    ],
                )?,
            ],
        )
    })
}

fn stat_tile(value: usize, label: &str, caption: &str, color: &str) -> RenderResult<Node> {
    create_element(
        "div",
        class(format!(
            "text-center p-4 bg-white rounded-xl shadow-md border-l-4 border-{color}-500"
        )),
        children![
            create_element(
                "div",
                class(format!("text-4xl font-bold text-{color}-600 mb-2")),
                value
            )?,
            create_element("div", class("text-sm font-medium text-gray-600"), label)?,
            create_element("div", class("text-xs text-gray-500 mt-1"), caption)?,
        ],
    )
}

fn user_stats() -> Component {
    Component::composite("UserStats", |props| {
        let users = props.array("users");
        let total = users.len();
        let admins = users.iter().filter(|u| role_of(u) == "admin").count();
        let regular = users.iter().filter(|u| role_of(u) == "user").count();

        // Roles in first-seen order.
        let mut role_counts: Vec<(&str, usize)> = Vec::new();
        for role in users.iter().map(role_of) {
            match role_counts.iter_mut().find(|(r, _)| *r == role) {
                Some((_, count)) => *count += 1,
                None => role_counts.push((role, 1)),
            }
        }

        let updated = props.str("generated_at").map(|at| {
            create_element(
                "div",
                class("text-sm text-gray-500"),
                format!("Last updated: {at}"),
            )
        });

        create_element(
            "div",
            class(
                "bg-gradient-to-br from-indigo-50 via-white to-cyan-50 p-6 rounded-2xl mb-8 \
                 border border-indigo-200 shadow-xl",
            ),
            children![
                create_element(
                    "div",
                    class("flex items-center justify-between mb-6"),
                    children![
                        create_element(
                            "h3",
                            class("text-2xl font-bold text-gray-800 flex items-center"),
                            children![
                                create_element("span", class("mr-2"), "📊")?,
                                "User Statistics",
                            ],
                        )?,
                        updated.transpose()?,
                    ],
                )?,
                create_element(
                    "div",
                    class("grid grid-cols-2 md:grid-cols-3 gap-6 mb-6"),
                    children![
                        stat_tile(total, "Total Users", "All registered", "blue")?,
                        stat_tile(admins, "Administrators", "System admins", "purple")?,
                        stat_tile(regular, "Regular Users", "Standard access", "green")?,
                    ],
                )?,
                Node::when(total > 0, || {
                    let rows = role_counts
                        .iter()
                        .map(|(role, count)| {
                            create_element(
                                "div",
                                Some(props! {
                                    "key" => *role,
                                    "className" => "flex justify-between items-center",
                                }),
                                children![
                                    create_element(
                                        "span",
                                        class(format!(
                                            "px-3 py-1 text-sm font-medium rounded-full {}",
                                            role_badge(role)
                                        )),
                                        capitalize(role),
                                    )?,
                                    create_element("span", class("font-bold text-lg"), *count)?,
                                ],
                            )
                        })
                        .collect::<RenderResult<Vec<_>>>()?;

                    create_element(
                        "div",
                        class("bg-white p-5 rounded-xl shadow-md"),
                        children![
                            create_element(
                                "h4",
                                class("font-semibold mb-4 text-gray-700 flex items-center"),
                                children![
                                    create_element("span", class("mr-2"), "👤")?,
                                    "Role Distribution",
                                ],
                            )?,
                            create_element("div", class("space-y-3"), rows)?,
                        ],
                    )
                })?,
            ],
        )
    })
}

fn header(title: &str, current_user: &Props) -> RenderResult<Node> {
    let badge = Node::when(!current_user.str_or("name", "").is_empty(), || {
        let role = current_user.str_or("role", "user");
        let tone = if role == "admin" {
            "bg-purple-200 text-purple-900"
        } else {
            "bg-blue-200 text-blue-900"
        };
        create_element(
            "div",
            class("text-right"),
            children![
                create_element("p", class("text-blue-100"), "Logged in as:")?,
                create_element(
                    "p",
                    class("text-white font-semibold"),
                    current_user.str_or("name", "Unknown")
                )?,
                create_element(
                    "span",
                    class(format!(
                        "inline-block px-2 py-1 text-xs rounded-full mt-1 {tone}"
                    )),
                    capitalize(role),
                )?,
            ],
        )
    })?;

    create_element(
        "header",
        class("bg-gradient-to-r from-blue-600 to-purple-700 text-white p-6 shadow-lg"),
        create_element(
            "div",
            class("max-w-7xl mx-auto"),
            create_element(
                "div",
                class("flex justify-between items-start"),
                children![
                    create_element(
                        "div",
                        None,
                        children![
                            create_element(
                                "h1",
                                class("text-4xl font-bold mb-2 flex items-center"),
                                children![create_element("span", class("mr-3"), "👥")?, title],
                            )?,
                            create_element("p", class("text-blue-100 text-lg"), SUBTITLE)?,
                        ],
                    )?,
                    badge,
                ],
            )?,
        )?,
    )
}

fn quick_actions() -> RenderResult<Node> {
    let buttons = [
        ("green", "👤 Add User"),
        ("blue", "✏️ Edit User"),
        ("purple", "📊 Export Users"),
        ("orange", "⚙️ Settings"),
    ]
    .into_iter()
    .map(|(color, label)| {
        create_element(
            "button",
            Some(props! {
                "type" => "button",
                "className" => format!(
                    "p-4 bg-{color}-500 text-white rounded-xl hover:bg-{color}-600 \
                     transition-colors font-medium"
                ),
            }),
            label,
        )
    })
    .collect::<RenderResult<Vec<_>>>()?;

    create_element(
        "div",
        class("mb-8 p-6 bg-white rounded-2xl shadow-lg border border-gray-200"),
        children![
            create_element(
                "h2",
                class("text-xl font-bold mb-4 flex items-center text-gray-800"),
                children![create_element("span", class("mr-2"), "⚡")?, "Quick Actions"],
            )?,
            create_element("div", class("grid grid-cols-2 md:grid-cols-4 gap-4"), buttons)?,
        ],
    )
}

fn footer() -> RenderResult<Node> {
    create_element(
        "footer",
        class("bg-gray-800 text-white p-6 mt-12"),
        create_element(
            "div",
            class("max-w-7xl mx-auto text-center"),
            children![
                create_element(
                    "p",
                    class("text-gray-300"),
                    "Composed on the server from plain component functions"
                )?,
                create_element(
                    "p",
                    class("text-sm text-gray-400 mt-2"),
                    "Demonstrates: component composition, conditional rendering, data mapping and styling"
                )?,
            ],
        )?,
    )
}

fn dashboard(props: &Props, card: &Component, stats: &Component) -> RenderResult<Node> {
    let users = props.array("users");
    let current_user = props.props("current_user").cloned().unwrap_or_default();
    let can_edit = props.bool_or("can_edit", false);
    let title = props.str_or("page_title", "User List");
    let view = if current_user.str("role") == Some("admin") {
        "Admin View"
    } else {
        "Standard View"
    };

    let cards = users
        .iter()
        .map(|user| {
            let key = user.as_props().and_then(|u| u.get("id")).cloned();
            create_element(card, Some(props! { "key" => key, "user" => user.clone() }), ())
        })
        .collect::<RenderResult<Vec<_>>>()?;

    let stats_props = props! {
        "users" => PropValue::Array(users.to_vec()),
        "generated_at" => props.get("generated_at").cloned(),
    };

    create_element(
        "div",
        class("min-h-screen bg-gray-50"),
        children![
            create_element("div", None, Node::raw(format!("<style>{STYLES}</style>")))?,
            header(title, &current_user)?,
            create_element(
                "div",
                class("max-w-7xl mx-auto p-6"),
                children![
                    create_element(stats, Some(stats_props), ())?,
                    Node::when(can_edit, quick_actions)?,
                    create_element(
                        "div",
                        class("mb-8"),
                        children![
                            create_element(
                                "div",
                                class("flex justify-between items-center mb-6"),
                                children![
                                    create_element(
                                        "h2",
                                        class("text-2xl font-bold text-gray-800 flex items-center"),
                                        children![
                                            create_element("span", class("mr-2"), "🧑‍💼")?,
                                            format!("Users ({})", users.len()),
                                        ],
                                    )?,
                                    create_element("div", class("text-sm text-gray-600"), view)?,
                                ],
                            )?,
                            create_element(
                                "div",
                                class("grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6"),
                                cards,
                            )?,
                        ],
                    )?,
                ],
            )?,
            footer()?,
        ],
    )
}
