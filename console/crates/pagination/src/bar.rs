//! View model for the pagination control under every list.

use crate::request::DEFAULT_PAGE_SIZE;

/// Page sizes offered by the selector unless the caller overrides them.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 4] = [5, DEFAULT_PAGE_SIZE, 20, 50];

/// Raw inputs for [`PaginationBar::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInput {
    /// Current zero-based page.
    pub page: u32,
    /// Total pages reported by the backend.
    pub total_pages: u32,
    /// Current page size.
    pub page_size: u32,
    /// Rows present on the current page.
    pub current_count: usize,
    /// Rows across every page.
    pub total_elements: u64,
}

/// Clamp a navigation target into `[0, total_pages - 1]`.
///
/// Returns `None` when there are no pages, in which case navigation is
/// disabled.
///
/// ```
/// use pagination::clamp_page;
///
/// assert_eq!(clamp_page(7, 3), Some(2));
/// assert_eq!(clamp_page(1, 0), None);
/// ```
#[must_use]
pub const fn clamp_page(target: u32, total_pages: u32) -> Option<u32> {
    if total_pages == 0 {
        return None;
    }
    let last = total_pages - 1;
    if target > last { Some(last) } else { Some(target) }
}

/// Computed state of the pagination control.
///
/// ## Invariants
/// - `from` and `to` are both 0 when `total_elements` is 0.
/// - otherwise `from = page * size + 1` and
///   `to = min(total_elements, (page + 1) * size)`, both clamped to
///   `total_elements`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    page: u32,
    total_pages: u32,
    page_size: u32,
    current_count: usize,
    total_elements: u64,
    from: u64,
    to: u64,
    size_options: Vec<u32>,
}

impl PaginationBar {
    /// Compute the control state for the given inputs.
    #[must_use]
    pub fn new(input: PaginationInput) -> Self {
        let PaginationInput {
            page,
            total_pages,
            page_size,
            current_count,
            total_elements,
        } = input;
        let (from, to) = if total_elements == 0 {
            (0, 0)
        } else {
            let size = u64::from(page_size);
            let start = u64::from(page).saturating_mul(size);
            let from = start.saturating_add(1).min(total_elements);
            let to = start.saturating_add(size).min(total_elements);
            (from, to)
        };
        Self {
            page,
            total_pages,
            page_size,
            current_count,
            total_elements,
            from,
            to,
            size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
        }
    }

    /// Replace the page-size selector options.
    #[must_use]
    pub fn with_size_options(mut self, options: impl IntoIterator<Item = u32>) -> Self {
        self.size_options = options.into_iter().collect();
        self
    }

    /// First displayed row, 1-based.
    #[must_use]
    pub const fn from(&self) -> u64 {
        self.from
    }

    /// Last displayed row, 1-based and inclusive.
    #[must_use]
    pub const fn to(&self) -> u64 {
        self.to
    }

    /// Current zero-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Current page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows shown on the current page.
    #[must_use]
    pub const fn current_count(&self) -> usize {
        self.current_count
    }

    /// Options offered by the page-size selector.
    #[must_use]
    pub fn size_options(&self) -> &[u32] {
        &self.size_options
    }

    /// Whether the "previous" control is disabled.
    #[must_use]
    pub const fn is_previous_disabled(&self) -> bool {
        self.page == 0
    }

    /// Whether the "next" control is disabled.
    #[must_use]
    pub const fn is_next_disabled(&self) -> bool {
        self.total_pages == 0 || self.page >= self.total_pages - 1
    }

    /// Target page of the "previous" control, if enabled.
    #[must_use]
    pub const fn previous_page(&self) -> Option<u32> {
        if self.is_previous_disabled() {
            return None;
        }
        clamp_page(self.page - 1, self.total_pages)
    }

    /// Target page of the "next" control, if enabled.
    #[must_use]
    pub const fn next_page(&self) -> Option<u32> {
        if self.is_next_disabled() {
            return None;
        }
        clamp_page(self.page.saturating_add(1), self.total_pages)
    }

    /// `"{from}–{to} de {total}"`.
    #[must_use]
    pub fn range_label(&self) -> String {
        format!("{}–{} de {}", self.from, self.to, self.total_elements)
    }

    /// `"Página {page + 1} de {max(total_pages, 1)}"`.
    #[must_use]
    pub fn page_label(&self) -> String {
        format!(
            "Página {} de {}",
            self.page.saturating_add(1),
            self.total_pages.max(1)
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for range and navigation rules.

    use super::*;
    use rstest::rstest;

    fn bar(page: u32, total_pages: u32, size: u32, total: u64) -> PaginationBar {
        PaginationBar::new(PaginationInput {
            page,
            total_pages,
            page_size: size,
            current_count: 0,
            total_elements: total,
        })
    }

    #[rstest]
    #[case(0, 3, 10, 25, 1, 10)]
    #[case(1, 3, 10, 25, 11, 20)]
    #[case(2, 3, 10, 25, 21, 25)]
    #[case(0, 1, 50, 7, 1, 7)]
    #[case(0, 0, 10, 0, 0, 0)]
    fn computes_display_range(
        #[case] page: u32,
        #[case] total_pages: u32,
        #[case] size: u32,
        #[case] total: u64,
        #[case] from: u64,
        #[case] to: u64,
    ) {
        let bar = bar(page, total_pages, size, total);
        assert_eq!((bar.from(), bar.to()), (from, to));
    }

    #[test]
    fn range_matches_formula_for_all_small_inputs() {
        for size in 1..=12_u32 {
            for total in 1..=40_u64 {
                let pages = u32::try_from(total.div_ceil(u64::from(size))).expect("fits");
                for page in 0..pages {
                    let bar = bar(page, pages, size, total);
                    let expected_from = u64::from(page) * u64::from(size) + 1;
                    let expected_to = total.min(u64::from(page + 1) * u64::from(size));
                    assert_eq!(bar.from(), expected_from, "size={size} total={total}");
                    assert_eq!(bar.to(), expected_to, "size={size} total={total}");
                }
            }
        }
    }

    #[rstest]
    #[case(0, 3, true, false)]
    #[case(1, 3, false, false)]
    #[case(2, 3, false, true)]
    #[case(0, 1, true, true)]
    #[case(0, 0, true, true)]
    fn disables_navigation_at_the_edges(
        #[case] page: u32,
        #[case] total_pages: u32,
        #[case] previous_disabled: bool,
        #[case] next_disabled: bool,
    ) {
        let bar = bar(page, total_pages, 10, u64::from(total_pages) * 10);
        assert_eq!(bar.is_previous_disabled(), previous_disabled);
        assert_eq!(bar.is_next_disabled(), next_disabled);
        assert_eq!(bar.previous_page().is_none(), previous_disabled);
        assert_eq!(bar.next_page().is_none(), next_disabled);
    }

    #[test]
    fn navigation_targets_step_by_one() {
        let bar = bar(1, 3, 10, 25);
        assert_eq!(bar.previous_page(), Some(0));
        assert_eq!(bar.next_page(), Some(2));
    }

    #[test]
    fn labels_use_one_based_page_numbers() {
        let bar = bar(0, 0, 10, 0);
        assert_eq!(bar.page_label(), "Página 1 de 1");
        assert_eq!(bar.range_label(), "0–0 de 0");
    }
}
