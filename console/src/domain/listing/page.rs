//! The list page state machine.

use pagination::{
    PageRequest, PageResponse, PaginationBar, PaginationError, PaginationInput,
    clamp_page,
};
use tracing::debug;

use super::{
    ListMessages, ListQuery, ListSpec, MutationKind, Notice, NoticeKind, SortState, ViewMode,
};
use crate::domain::ports::ApiError;

/// A fetch issued by [`ListPage::begin_fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<S> {
    generation: u64,
    query: ListQuery<S>,
}

impl<S> FetchTicket<S> {
    /// Generation the response must carry back.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Parameters to send.
    #[must_use]
    pub const fn query(&self) -> &ListQuery<S> {
        &self.query
    }

    /// Consume the ticket, keeping its parameters.
    #[must_use]
    pub fn into_query(self) -> ListQuery<S> {
        self.query
    }
}

/// State of one list screen.
///
/// ## Invariants
/// - pending filter inputs never reach the backend until
///   [`submit_search`](Self::submit_search) commits them;
/// - every change of committed search, page, size or sort marks the page as
///   needing a fetch, and nothing else does (apart from a create);
/// - only the response to the latest issued fetch is applied.
pub struct ListPage<L: ListSpec> {
    mode: ViewMode<L::Entity, L::Draft>,
    filters: L::Filters,
    search: L::Search,
    sort: SortState<L::Sort>,
    request: PageRequest,
    rows: Vec<L::Entity>,
    total_pages: u32,
    total_elements: u64,
    notice: Option<Notice>,
    loading: bool,
    needs_fetch: bool,
    issued: u64,
}

impl<L: ListSpec> Default for ListPage<L> {
    fn default() -> Self {
        Self::new(PageRequest::default())
    }
}

impl<L: ListSpec> ListPage<L> {
    /// Fresh page in list mode that needs its first fetch.
    #[must_use]
    pub fn new(request: PageRequest) -> Self {
        Self {
            mode: ViewMode::List,
            filters: L::Filters::default(),
            search: L::Search::default(),
            sort: SortState::default(),
            request,
            rows: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            notice: None,
            loading: false,
            needs_fetch: true,
            issued: 0,
        }
    }

    /// Whether the page lists rows or holds a form.
    pub const fn mode(&self) -> &ViewMode<L::Entity, L::Draft> {
        &self.mode
    }

    /// Committed filter values.
    pub const fn filters(&self) -> &L::Filters {
        &self.filters
    }

    /// Committed search terms.
    pub const fn search(&self) -> &L::Search {
        &self.search
    }

    /// Active sort column and direction.
    pub const fn sort(&self) -> &SortState<L::Sort> {
        &self.sort
    }

    /// Page index and size of the next fetch.
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Rows of the last applied fetch.
    pub fn rows(&self) -> &[L::Entity] {
        &self.rows
    }

    /// Page count reported by the backend.
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Row count across all pages.
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Banner left by the last fetch or mutation.
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether a fetch is in flight.
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether committed parameters changed since the last issued fetch.
    pub const fn needs_fetch(&self) -> bool {
        self.needs_fetch
    }

    const fn messages() -> ListMessages {
        L::MESSAGES
    }

    /// Pagination control for the current page.
    #[must_use]
    pub fn pagination(&self) -> PaginationBar {
        PaginationBar::new(PaginationInput {
            page: self.request.page(),
            total_pages: self.total_pages,
            page_size: self.request.size(),
            current_count: self.rows.len(),
            total_elements: self.total_elements,
        })
    }

    fn require_fetch(&mut self) {
        self.needs_fetch = true;
    }

    /// Replace the pending filter inputs. Never requires a fetch.
    pub fn set_filters(&mut self, filters: L::Filters) {
        self.filters = filters;
    }

    /// Commit the trimmed filter inputs, reset to page 0 and return to the
    /// list, clearing any selection.
    pub fn submit_search(&mut self) {
        self.search = L::commit(&self.filters);
        self.request = self.request.with_page(0);
        self.mode = ViewMode::List;
        self.notice = None;
        self.require_fetch();
    }

    /// Apply a click on a sortable header and reset to page 0.
    pub fn toggle_sort(&mut self, field: L::Sort) {
        self.sort.toggle(field);
        self.request = self.request.with_page(0);
        self.require_fetch();
    }

    /// Navigate to `target`, clamped to the known pages.
    ///
    /// Returns `false` when navigation is disabled because there are no pages.
    pub fn go_to_page(&mut self, target: u32) -> bool {
        let Some(page) = clamp_page(target, self.total_pages) else {
            return false;
        };
        if page != self.request.page() {
            self.request = self.request.with_page(page);
            self.require_fetch();
        }
        true
    }

    /// Change the page size, resetting to page 0.
    ///
    /// # Errors
    /// Returns [`PaginationError::InvalidPageSize`] for sizes outside the
    /// accepted range; the state is left unchanged.
    pub fn set_page_size(&mut self, size: u32) -> Result<(), PaginationError> {
        self.request = self.request.with_size(size)?;
        self.require_fetch();
        Ok(())
    }

    /// Start a fetch of the committed parameters.
    ///
    /// Each call supersedes every earlier ticket.
    pub fn begin_fetch(&mut self) -> FetchTicket<L::Search> {
        self.issued += 1;
        self.loading = true;
        self.needs_fetch = false;
        FetchTicket {
            generation: self.issued,
            query: ListQuery {
                page: self.request,
                sort: self.sort.to_orders(),
                search: self.search.clone(),
            },
        }
    }

    /// Apply the result of the fetch tagged `generation`.
    ///
    /// Returns `false` and leaves the state untouched when a newer fetch was
    /// issued in the meantime.
    pub fn complete_fetch(
        &mut self,
        generation: u64,
        result: Result<PageResponse<L::Entity>, ApiError>,
    ) -> bool {
        if generation != self.issued {
            debug!(generation, latest = self.issued, "discarding stale list response");
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.rows = page.content;
                self.total_pages = page.total_pages;
                self.total_elements = page.total_elements;
                if matches!(self.notice.as_ref().map(Notice::kind), Some(NoticeKind::LoadFailed)) {
                    self.notice = None;
                }
            }
            Err(_) => {
                self.notice = Some(Notice::new(
                    NoticeKind::LoadFailed,
                    Self::messages().load_failed,
                ));
                self.require_fetch();
            }
        }
        true
    }

    fn find(&self, id: L::Id) -> Option<&L::Entity> {
        self.rows.iter().find(|row| L::id_of(row) == id)
    }

    /// Open an empty create form. Pending filters are preserved.
    pub fn open_create(&mut self) {
        self.mode = ViewMode::Create {
            draft: L::Draft::default(),
        };
    }

    /// Show the detail view of a listed row. Returns `false` if it is not on
    /// the current page.
    pub fn open_detail(&mut self, id: L::Id) -> bool {
        let Some(entity) = self.find(id).cloned() else {
            return false;
        };
        self.mode = ViewMode::Detail { entity };
        true
    }

    /// Open the edit form pre-filled from a listed row.
    pub fn open_edit(&mut self, id: L::Id) -> bool {
        let Some(entity) = self.find(id).cloned() else {
            return false;
        };
        let draft = L::Draft::from(&entity);
        self.mode = ViewMode::Edit { entity, draft };
        true
    }

    /// Keep the submitted form values so a failed save can be re-rendered.
    pub fn set_draft(&mut self, value: L::Draft) {
        match &mut self.mode {
            ViewMode::Create { draft } | ViewMode::Edit { draft, .. } => *draft = value,
            ViewMode::List | ViewMode::Detail { .. } => {}
        }
    }

    /// Discard any form or detail view and return to the list.
    pub fn cancel(&mut self) {
        self.mode = ViewMode::List;
    }

    /// The entity behind the edit form, if one is open.
    #[must_use]
    pub const fn editing(&self) -> Option<&L::Entity> {
        match &self.mode {
            ViewMode::Edit { entity, .. } => Some(entity),
            ViewMode::List | ViewMode::Create { .. } | ViewMode::Detail { .. } => None,
        }
    }

    /// Look up a listed row, falling back to the selected entity.
    #[must_use]
    pub fn entity(&self, id: L::Id) -> Option<&L::Entity> {
        self.find(id)
            .or_else(|| self.mode.selected().filter(|e| L::id_of(e) == id))
    }

    /// After a successful create: back to the list and reload from page 0.
    pub fn apply_created(&mut self) {
        self.mode = ViewMode::List;
        self.notice = None;
        self.request = self.request.with_page(0);
        self.require_fetch();
    }

    /// After a successful update: patch the matching row and return to the
    /// list, keeping page, filters and sort.
    pub fn apply_updated(&mut self, entity: L::Entity) {
        self.replace_row(&entity);
        self.mode = ViewMode::List;
        self.notice = None;
    }

    /// Replace the matching row in place and refresh a detail/edit view
    /// showing it. The mode is unchanged.
    pub fn apply_replaced(&mut self, entity: L::Entity) {
        self.replace_row(&entity);
        let id = L::id_of(&entity);
        match &mut self.mode {
            ViewMode::Detail { entity: shown } | ViewMode::Edit { entity: shown, .. }
                if L::id_of(shown) == id =>
            {
                *shown = entity;
            }
            _ => {}
        }
        self.notice = None;
    }

    fn replace_row(&mut self, entity: &L::Entity) {
        let id = L::id_of(entity);
        if let Some(row) = self.rows.iter_mut().find(|row| L::id_of(row) == id) {
            *row = entity.clone();
        }
    }

    /// After a successful delete: drop the matching row and close a
    /// detail/edit view showing it.
    pub fn apply_deleted(&mut self, id: L::Id) {
        self.rows.retain(|row| L::id_of(row) != id);
        if self.mode.selected().is_some_and(|shown| L::id_of(shown) == id) {
            self.mode = ViewMode::List;
        }
        self.notice = None;
    }

    /// Record a failed mutation.
    ///
    /// A stale version marks the rows for refetching so the next reload
    /// picks up the current versions.
    pub fn fail_mutation(&mut self, kind: MutationKind, error: &ApiError) {
        self.notice = Some(Self::messages().for_failure(kind, error));
        if error.is_precondition_failure() {
            self.require_fetch();
        }
    }

    /// Record a form that failed validation.
    pub fn reject_draft(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::new(NoticeKind::Invalid, message));
    }

    /// Drop the current notice.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
#[path = "page_tests.rs"]
mod tests;
