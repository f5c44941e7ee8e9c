//! Page request parameters and query-string serialisation.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PaginationError;
use crate::sort::SortOrder;

/// Page size used when the caller has not chosen one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size the console will ask the backend for.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Zero-based page index plus page size.
///
/// ## Invariants
/// - `size` is within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPageSize`] when `size` is zero or
    /// larger than [`MAX_PAGE_SIZE`].
    pub const fn new(page: u32, size: u32) -> Result<Self, PaginationError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(PaginationError::InvalidPageSize {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { page, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of rows per page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Return the same request pointing at another page.
    #[must_use]
    pub const fn with_page(self, page: u32) -> Self {
        Self {
            page,
            size: self.size,
        }
    }

    /// Return a request with a new page size, rewound to the first page.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPageSize`] for out-of-range sizes.
    pub const fn with_size(self, size: u32) -> Result<Self, PaginationError> {
        Self::new(0, size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Append `page`, `size` and one `sort` pair per sort order to `url`.
///
/// An empty `sort` slice leaves the parameter out so the backend applies its
/// default ordering.
///
/// ```
/// use pagination::{PageRequest, SortDirection, SortOrder, append_page_query};
/// use url::Url;
///
/// let mut url = Url::parse("http://localhost/api/users").expect("url");
/// let sort = SortOrder::new("firstName", SortDirection::Desc).expect("sort");
/// append_page_query(&mut url, &PageRequest::default(), &[sort]);
/// assert_eq!(url.query(), Some("page=0&size=10&sort=firstName%2Cdesc"));
/// ```
pub fn append_page_query(url: &mut Url, request: &PageRequest, sort: &[SortOrder]) {
    let mut pairs = url.query_pairs_mut();
    pairs
        .append_pair("page", &request.page.to_string())
        .append_pair("size", &request.size.to_string());
    for order in sort {
        pairs.append_pair("sort", &order.to_string());
    }
}

#[cfg(test)]
mod tests {
    //! Unit coverage for page request validation and query encoding.

    use super::*;
    use crate::sort::SortDirection;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(MAX_PAGE_SIZE + 1)]
    fn rejects_out_of_range_sizes(#[case] size: u32) {
        let err = PageRequest::new(0, size).expect_err("size must be rejected");
        assert_eq!(
            err,
            PaginationError::InvalidPageSize {
                size,
                max: MAX_PAGE_SIZE
            }
        );
    }

    #[test]
    fn changing_size_rewinds_to_first_page() {
        let request = PageRequest::new(4, 10).expect("valid request");
        let resized = request.with_size(20).expect("valid size");
        assert_eq!(resized.page(), 0);
        assert_eq!(resized.size(), 20);
    }

    #[test]
    fn query_omits_sort_when_none_is_active() {
        let mut url = Url::parse("http://localhost/api/instruments/search").expect("url");
        append_page_query(&mut url, &PageRequest::new(2, 5).expect("request"), &[]);
        assert_eq!(url.query(), Some("page=2&size=5"));
    }

    #[test]
    fn query_keeps_existing_parameters() {
        let mut url = Url::parse("http://localhost/api/users/search?active=true").expect("url");
        let sort = SortOrder::new("username", SortDirection::Asc).expect("sort");
        append_page_query(&mut url, &PageRequest::default(), &[sort]);
        assert_eq!(
            url.query(),
            Some("active=true&page=0&size=10&sort=username%2Casc")
        );
    }
}
