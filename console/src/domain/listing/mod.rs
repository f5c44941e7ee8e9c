//! Generic list/edit page state machine.
//!
//! A [`ListPage`] holds everything one list screen needs between requests:
//! the view mode, pending filter inputs, the committed search, sort and
//! paging state, the current page of rows and a user-facing notice. It
//! never performs I/O. Services drive it through [`ListPage::begin_fetch`]
//! and [`ListPage::complete_fetch`], which tag every fetch with a generation
//! so only the most recent response is applied.

mod fetch;
pub mod instruments;
mod page;
mod sort;
pub mod users;

use std::fmt;

use pagination::{PageRequest, SortOrder};

use crate::domain::Version;
use crate::domain::ports::ApiError;

pub use fetch::{FetchOutcome, refresh_page};
pub use page::{FetchTicket, ListPage};
pub use sort::{SortField, SortState};

/// Parameters of one list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<S> {
    pub page: PageRequest,
    pub sort: Vec<SortOrder>,
    pub search: S,
}

/// Per-entity wiring of the generic list page.
pub trait ListSpec: Send + 'static {
    /// Row type.
    type Entity: Clone + fmt::Debug + Send + Sync;
    /// Identifier used to match rows.
    type Id: Copy + Eq + fmt::Debug + fmt::Display + Send;
    /// Form values for create/edit.
    type Draft: Clone + Default + fmt::Debug + Send + for<'a> From<&'a Self::Entity>;
    /// Pending filter inputs as typed by the user.
    type Filters: Clone + Default + fmt::Debug + Send;
    /// Committed search sent to the backend.
    type Search: Clone + Default + PartialEq + fmt::Debug + Send + Sync;
    /// Sortable columns.
    type Sort: SortField;

    /// User-facing notices for this entity.
    const MESSAGES: ListMessages;

    /// Identifier of `entity`.
    fn id_of(entity: &Self::Entity) -> Self::Id;

    /// Current version of `entity`.
    fn version_of(entity: &Self::Entity) -> Version;

    /// Trim the filter inputs into a committed search; blanks become absent.
    fn commit(filters: &Self::Filters) -> Self::Search;
}

/// Screen mode of a list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode<E, D> {
    /// The table is shown.
    List,
    /// An empty create form is shown.
    Create { draft: D },
    /// A read-only detail view of one row.
    Detail { entity: E },
    /// An edit form pre-filled from `entity`.
    Edit { entity: E, draft: D },
}

impl<E, D> ViewMode<E, D> {
    /// The entity shown by a detail or edit view.
    pub const fn selected(&self) -> Option<&E> {
        match self {
            Self::Detail { entity } | Self::Edit { entity, .. } => Some(entity),
            Self::List | Self::Create { .. } => None,
        }
    }
}

/// Kind of a user-initiated mutation, used to pick the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
    Toggle,
}

/// Result of a user-initiated mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The backend accepted the change and the page was updated.
    Applied,
    /// The form did not validate; nothing was sent.
    Invalid,
    /// The backend call failed; a notice was recorded.
    Failed,
    /// The target is no longer on the page or no form is open.
    Missing,
}

/// Entity-specific notice texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMessages {
    pub load_failed: &'static str,
    pub create_failed: &'static str,
    pub update_failed: &'static str,
    pub update_conflict: &'static str,
    pub delete_failed: &'static str,
    pub delete_conflict: &'static str,
    pub toggle_failed: &'static str,
    pub toggle_conflict: &'static str,
}

impl ListMessages {
    /// Classify a failed mutation: precondition statuses get the reload
    /// message, everything else the generic one.
    #[must_use]
    pub fn for_failure(&self, kind: MutationKind, error: &ApiError) -> Notice {
        let conflict = error.is_precondition_failure();
        let (kind_of_notice, message) = match (kind, conflict) {
            (MutationKind::Create, _) => (NoticeKind::Failed, self.create_failed),
            (MutationKind::Update, true) => (NoticeKind::Conflict, self.update_conflict),
            (MutationKind::Update, false) => (NoticeKind::Failed, self.update_failed),
            (MutationKind::Delete, true) => (NoticeKind::Conflict, self.delete_conflict),
            (MutationKind::Delete, false) => (NoticeKind::Failed, self.delete_failed),
            (MutationKind::Toggle, true) => (NoticeKind::Conflict, self.toggle_conflict),
            (MutationKind::Toggle, false) => (NoticeKind::Failed, self.toggle_failed),
        };
        Notice::new(kind_of_notice, message)
    }
}

/// Category of a notice shown above the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Loading the page failed.
    LoadFailed,
    /// The record changed underneath the user.
    Conflict,
    /// A mutation failed for any other reason.
    Failed,
    /// The submitted form did not validate.
    Invalid,
}

/// User-facing message shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    message: String,
}

impl Notice {
    /// Build a notice.
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Notice category.
    #[must_use]
    pub const fn kind(&self) -> NoticeKind {
        self.kind
    }

    /// Text shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
