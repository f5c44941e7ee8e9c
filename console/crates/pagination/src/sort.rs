//! Sort tokens in the backend's `field,direction` form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PaginationError;

/// Ordering direction for one sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest value first.
    #[default]
    Asc,
    /// Largest value first.
    Desc,
}

impl SortDirection {
    /// Return the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Wire representation (`asc` or `desc`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = PaginationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(PaginationError::InvalidSortDirection {
                value: value.to_owned(),
            }),
        }
    }
}

/// One `field,direction` sort token.
///
/// ## Invariants
/// - `field` is non-empty and contains neither commas nor whitespace.
///
/// ```
/// use pagination::{SortDirection, SortOrder};
///
/// let order: SortOrder = "lastName,desc".parse().expect("valid token");
/// assert_eq!(order.field(), "lastName");
/// assert_eq!(order.direction(), SortDirection::Desc);
/// assert_eq!(order.to_string(), "lastName,desc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortOrder {
    field: String,
    direction: SortDirection,
}

impl SortOrder {
    /// Validate and construct a sort order.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::EmptySortField`] or
    /// [`PaginationError::InvalidSortField`] for malformed field names.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Result<Self, PaginationError> {
        let field = field.into();
        if field.is_empty() {
            return Err(PaginationError::EmptySortField);
        }
        if field.contains(',') || field.chars().any(char::is_whitespace) {
            return Err(PaginationError::InvalidSortField { field });
        }
        Ok(Self { field, direction })
    }

    /// Backend field name.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Ordering direction.
    #[must_use]
    pub const fn direction(&self) -> SortDirection {
        self.direction
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.direction)
    }
}

impl FromStr for SortOrder {
    type Err = PaginationError;

    /// Parse `field` or `field,direction`; a bare field sorts ascending.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.split_once(',') {
            Some((field, direction)) => Self::new(field.trim(), direction.parse()?),
            None => Self::new(token.trim(), SortDirection::Asc),
        }
    }
}
