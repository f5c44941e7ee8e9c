//! Validation errors for pagination primitives.

use thiserror::Error;

/// Errors raised while building page requests or parsing sort tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page size is zero or above the supported maximum.
    #[error("page size must be between 1 and {max}, got {size}")]
    InvalidPageSize {
        /// Rejected page size.
        size: u32,
        /// Largest accepted page size.
        max: u32,
    },
    /// Sort token named no field.
    #[error("sort field must not be empty")]
    EmptySortField,
    /// Sort field contains a separator character.
    #[error("sort field `{field}` must not contain ',' or whitespace")]
    InvalidSortField {
        /// Rejected field name.
        field: String,
    },
    /// Sort direction is neither `asc` nor `desc`.
    #[error("sort direction must be `asc` or `desc`, got `{value}`")]
    InvalidSortDirection {
        /// Rejected direction text.
        value: String,
    },
}
