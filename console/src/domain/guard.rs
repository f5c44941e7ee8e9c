//! Route guard decisions for protected pages.

use url::form_urlencoded;

use crate::domain::auth::AuthStatus;

/// Text shown by the loading placeholder.
pub const LOADING_MESSAGE: &str = "Cargando sesión...";
/// Text shown in place of a page the visitor's roles do not allow.
pub const NO_PERMISSION_MESSAGE: &str = "No tienes permisos para ver esta sección.";

const LOGIN_PATH: &str = "/login";

/// What to do with a request for a protected page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still resolving; show the loading placeholder.
    Loading,
    /// Send the visitor to the login page, remembering where they were going.
    RedirectToLogin { location: String },
    /// Serve the page.
    Allow,
}

/// Decide access for `requested` given the session status, if any.
///
/// # Examples
/// ```
/// use console::domain::auth::AuthStatus;
/// use console::domain::guard::{GuardDecision, decide};
///
/// assert_eq!(decide(Some(AuthStatus::Authenticated), "/dashboard"), GuardDecision::Allow);
/// assert_eq!(
///     decide(None, "/admin/users"),
///     GuardDecision::RedirectToLogin { location: "/login?from=%2Fadmin%2Fusers".into() },
/// );
/// ```
#[must_use]
pub fn decide(status: Option<AuthStatus>, requested: &str) -> GuardDecision {
    match status {
        Some(AuthStatus::Authenticated) => GuardDecision::Allow,
        Some(AuthStatus::Resolving) => GuardDecision::Loading,
        Some(AuthStatus::Unauthenticated) | None => GuardDecision::RedirectToLogin {
            location: login_location(requested),
        },
    }
}

/// Login URL carrying the originally requested path.
#[must_use]
pub fn login_location(from: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(from.as_bytes()).collect();
    format!("{LOGIN_PATH}?from={encoded}")
}

/// Accept a post-login return path only if it is a local absolute path
/// other than the login page itself.
#[must_use]
pub fn safe_return_path(from: Option<&str>) -> Option<String> {
    let path = from?.trim();
    let local = path.starts_with('/') && !path.starts_with("//") && !path.contains('\\');
    let is_login = path == LOGIN_PATH || path.starts_with("/login?");
    (local && !is_login).then(|| path.to_owned())
}
