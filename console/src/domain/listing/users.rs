//! Users list wiring.

use crate::domain::format::non_blank;
use crate::domain::ports::UserSearch;
use crate::domain::{User, UserDraft, UserId, Version};

use super::{ListMessages, ListPage, ListSpec, SortField};

/// Marker type binding the list page to users.
#[derive(Debug, Clone, Copy)]
pub struct UsersList;

/// Users list page state.
pub type UsersPage = ListPage<UsersList>;

/// Tri-state filter on the `active` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActiveFilter {
    /// Form value: `all`, `true` or `false`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "true",
            Self::Inactive => "false",
        }
    }

    /// Parse a form value; anything unrecognised means `All`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "true" => Self::Active,
            "false" => Self::Inactive,
            _ => Self::All,
        }
    }

    /// Committed value: absent, true or false.
    #[must_use]
    pub const fn committed(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

/// Pending users filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilters {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: String,
    pub email: String,
    pub active: ActiveFilter,
    pub role_name: String,
}

/// Sortable users columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Username,
    FirstName,
    LastName,
    Email,
    Active,
}

impl SortField for UserSortField {
    const ALL: &'static [Self] = &[
        Self::Username,
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Active,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Active => "active",
        }
    }
}

impl ListSpec for UsersList {
    type Entity = User;
    type Id = UserId;
    type Draft = UserDraft;
    type Filters = UserFilters;
    type Search = UserSearch;
    type Sort = UserSortField;

    const MESSAGES: ListMessages = ListMessages {
        load_failed: "Error cargando usuarios",
        create_failed: "Error creando usuario",
        update_failed: "Error actualizando usuario",
        update_conflict: "El usuario ha sido modificado por otro usuario. Recarga datos.",
        delete_failed: "Error eliminando usuario",
        delete_conflict: "El usuario ha cambiado. Recarga la lista antes de eliminarlo.",
        toggle_failed: "Error al cambiar el estado activo del usuario",
        toggle_conflict: "El usuario ha sido modificado por otro usuario. Recarga datos.",
    };

    fn id_of(entity: &User) -> UserId {
        entity.id
    }

    fn version_of(entity: &User) -> Version {
        entity.version
    }

    fn commit(filters: &UserFilters) -> UserSearch {
        UserSearch {
            username: non_blank(&filters.username),
            first_name: non_blank(&filters.first_name),
            last_name: non_blank(&filters.last_name),
            second_last_name: non_blank(&filters.second_last_name),
            email: non_blank(&filters.email),
            active: filters.active.committed(),
            role_name: non_blank(&filters.role_name),
            instrument_id: None,
        }
    }
}
