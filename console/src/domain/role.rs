//! Realm role metadata used to populate the users role filter.

/// Realm role name granting access to the administration section.
pub const ROLE_ADMIN: &str = "ADMIN";
/// Realm role name for band musicians.
pub const ROLE_MUSICIAN: &str = "MUSICIAN";

/// A role as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    /// Identity-provider role identifier.
    pub id: String,
    /// Role name used for filtering.
    pub name: String,
    /// Optional human description.
    pub description: Option<String>,
}
