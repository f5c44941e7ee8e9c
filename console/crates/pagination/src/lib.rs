//! Pagination primitives shared by the console's list pages.
//!
//! The backend REST API pages every collection with zero-based page indices
//! and an optional list of `field,direction` sort tokens. This crate owns the
//! request side ([`PageRequest`], [`SortOrder`]), the response envelope
//! ([`PageResponse`]) and the view model behind the pagination control
//! ([`PaginationBar`]).
//!
//! ```
//! use pagination::{PageRequest, PaginationBar, PaginationInput};
//!
//! let request = PageRequest::new(1, 10).expect("valid page request");
//! let bar = PaginationBar::new(PaginationInput {
//!     page: request.page(),
//!     total_pages: 3,
//!     page_size: request.size(),
//!     current_count: 10,
//!     total_elements: 25,
//! });
//! assert_eq!(bar.range_label(), "11–20 de 25");
//! ```

mod bar;
mod envelope;
mod error;
mod request;
mod sort;

pub use bar::{DEFAULT_PAGE_SIZE_OPTIONS, PaginationBar, PaginationInput, clamp_page};
pub use envelope::PageResponse;
pub use error::PaginationError;
pub use request::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest, append_page_query};
pub use sort::{SortDirection, SortOrder};
