//! Sample data for the demo pages.

use std::time::{SystemTime, UNIX_EPOCH};

use stave_core::{props, Props};

/// The users shown on the demo dashboard.
#[must_use]
pub fn users() -> Vec<Props> {
    vec![
        props! {
            "id" => 1,
            "name" => "Alice Johnson",
            "email" => "alice@example.com",
            "role" => "admin",
            "tasks" => 4,
        },
        props! {
            "id" => 2,
            "name" => "Bob Smith",
            "email" => "bob@example.com",
            "role" => "user",
            "tasks" => 2,
        },
        props! {
            "id" => 3,
            "name" => "Carol Davis",
            "email" => "carol@example.com",
            "role" => "user",
            "tasks" => 1,
        },
        props! {
            "id" => 4,
            "name" => "David Wilson",
            "email" => "david@example.com",
            "role" => "moderator",
            "active" => false,
        },
    ]
}

/// Props for the `UserList` dashboard, as seen by an admin.
///
/// The component itself never reads the clock; the caller supplies
/// `generated_at`.
#[must_use]
pub fn dashboard_props(generated_at: &str) -> Props {
    props! {
        "users" => users(),
        "current_user" => props! { "name" => "Alice Johnson", "role" => "admin" },
        "can_edit" => true,
        "page_title" => "User Management",
        "generated_at" => generated_at,
    }
}

/// Current wall-clock time of day as `HH:MM:SS UTC`.
#[must_use]
pub fn clock_time() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    format_time_of_day(secs)
}

fn format_time_of_day(unix_secs: u64) -> String {
    let day = unix_secs % 86_400;
    format!(
        "{:02}:{:02}:{:02} UTC",
        day / 3600,
        (day % 3600) / 60,
        day % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day(0), "00:00:00 UTC");
        assert_eq!(format_time_of_day(86_399), "23:59:59 UTC");
        assert_eq!(format_time_of_day(86_400 + 3_723), "01:02:03 UTC");
    }

    #[test]
    fn test_dashboard_props() {
        let props = dashboard_props("09:30:00 UTC");

        assert_eq!(props.array("users").len(), 4);
        assert!(props.bool_or("can_edit", false));
        assert_eq!(props.str("generated_at"), Some("09:30:00 UTC"));
        assert_eq!(
            props.props("current_user").and_then(|u| u.str("role")),
            Some("admin")
        );
    }
}
