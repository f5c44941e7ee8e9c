//! Page response envelope returned by the backend REST API.

use serde::{Deserialize, Serialize};

/// One page of `T` plus the backend's paging totals.
///
/// The console never recomputes these totals; they are rendered as returned.
///
/// ```
/// use pagination::PageResponse;
///
/// let body = r#"{"content":[1,2],"page":0,"size":2,"totalElements":5,
///               "totalPages":3,"first":true,"last":false}"#;
/// let page: PageResponse<u32> = serde_json::from_str(body).expect("decode");
/// assert_eq!(page.total_pages, 3);
/// assert_eq!(page.map(|n| n * 10).content, vec![10, 20]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    /// Rows on this page, in backend order.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// Zero-based page index.
    #[serde(default)]
    pub page: u32,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
    /// Number of rows across every page.
    #[serde(default)]
    pub total_elements: u64,
    /// Number of pages for the current size.
    #[serde(default)]
    pub total_pages: u32,
    /// Whether this is the first page.
    #[serde(default)]
    pub first: bool,
    /// Whether this is the last page.
    #[serde(default)]
    pub last: bool,
}

impl<T> PageResponse<T> {
    /// Build an empty first page for `size`.
    #[must_use]
    pub const fn empty(size: u32) -> Self {
        Self {
            content: Vec::new(),
            page: 0,
            size,
            total_elements: 0,
            total_pages: 0,
            first: true,
            last: true,
        }
    }

    /// Convert every row while keeping the paging totals.
    pub fn map<U, F>(self, f: F) -> PageResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PageResponse {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }

    /// Fallible variant of [`PageResponse::map`].
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E, F>(self, f: F) -> Result<PageResponse<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let content = self
            .content
            .into_iter()
            .map(f)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PageResponse {
            content,
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        })
    }
}
