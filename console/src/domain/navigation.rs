//! Post-login landing paths and the sidebar menu.

use crate::domain::role::{ROLE_ADMIN, ROLE_MUSICIAN};

/// Where a user lands after login when no return path was requested.
///
/// # Examples
/// ```
/// use console::domain::navigation::landing_path;
///
/// assert_eq!(landing_path(|role| role == "ADMIN"), "/admin/events");
/// assert_eq!(landing_path(|_| false), "/dashboard");
/// ```
pub fn landing_path(has_role: impl Fn(&str) -> bool) -> &'static str {
    if has_role(ROLE_ADMIN) {
        "/admin/events"
    } else if has_role(ROLE_MUSICIAN) {
        "/me/events"
    } else {
        "/dashboard"
    }
}

/// One sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLink {
    pub label: &'static str,
    pub path: &'static str,
}

impl MenuLink {
    /// Whether `current` is this link or one of its sub-pages.
    #[must_use]
    pub fn is_active(&self, current: &str) -> bool {
        current == self.path
            || current
                .strip_prefix(self.path)
                .is_some_and(|rest| rest.starts_with('/') || rest.starts_with('?'))
    }
}

/// A titled group of sidebar links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSection {
    pub title: &'static str,
    pub links: &'static [MenuLink],
}

/// The sidebar menu.
pub const MENU: &[MenuSection] = &[
    MenuSection {
        title: "General",
        links: &[MenuLink {
            label: "Dashboard",
            path: "/dashboard",
        }],
    },
    MenuSection {
        title: "Administración",
        links: &[
            MenuLink {
                label: "Usuarios",
                path: "/admin/users",
            },
            MenuLink {
                label: "Instrumentos",
                path: "/admin/instruments",
            },
            MenuLink {
                label: "Eventos",
                path: "/admin/events",
            },
            MenuLink {
                label: "Encuestas",
                path: "/admin/surveys",
            },
        ],
    },
    MenuSection {
        title: "Músico",
        links: &[
            MenuLink {
                label: "Mis eventos",
                path: "/me/events",
            },
            MenuLink {
                label: "Mis encuestas",
                path: "/me/surveys",
            },
        ],
    },
];
