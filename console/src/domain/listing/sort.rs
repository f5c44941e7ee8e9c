//! Single-column sort state driven by header clicks.

use std::fmt;

use pagination::{SortDirection, SortOrder};

/// A sortable column of a list, named by its backend field.
pub trait SortField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every sortable field of the list.
    const ALL: &'static [Self];

    /// Backend field name sent in the `sort` parameter.
    fn as_str(self) -> &'static str;

    /// Look a field up by its backend name.
    #[must_use]
    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.as_str() == raw)
    }
}

/// The active sort column and direction, if any.
///
/// At most one field is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    active: Option<(F, SortDirection)>,
}

impl<F> Default for SortState<F> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<F: SortField> SortState<F> {
    /// Sort by `field` in `direction`.
    #[must_use]
    pub const fn by(field: F, direction: SortDirection) -> Self {
        Self {
            active: Some((field, direction)),
        }
    }

    /// The active field, if any.
    #[must_use]
    pub fn field(&self) -> Option<F> {
        self.active.map(|(field, _)| field)
    }

    /// The active direction; ascending when nothing is active.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.active.map(|(_, dir)| dir).unwrap_or_default()
    }

    /// Apply a header click: the active field flips direction, any other
    /// field becomes active ascending.
    pub fn toggle(&mut self, field: F) {
        self.active = match self.active {
            Some((current, dir)) if current == field => Some((field, dir.toggled())),
            _ => Some((field, SortDirection::Asc)),
        };
    }

    /// Direction marker for `field`, if it is the active one.
    #[must_use]
    pub fn direction_of(&self, field: F) -> Option<SortDirection> {
        match self.active {
            Some((current, dir)) if current == field => Some(dir),
            _ => None,
        }
    }

    /// Sort tokens sent to the backend; empty when nothing is active.
    #[must_use]
    pub fn to_orders(&self) -> Vec<SortOrder> {
        self.active
            .into_iter()
            .filter_map(|(field, dir)| SortOrder::new(field.as_str(), dir).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Column {
        Name,
        Voice,
    }

    impl SortField for Column {
        const ALL: &'static [Self] = &[Self::Name, Self::Voice];

        fn as_str(self) -> &'static str {
            match self {
                Self::Name => "instrumentName",
                Self::Voice => "voice",
            }
        }
    }

    #[test]
    fn first_click_sorts_ascending() {
        let mut sort = SortState::default();
        sort.toggle(Column::Name);
        assert_eq!(sort, SortState::by(Column::Name, SortDirection::Asc));
    }

    #[test]
    fn second_click_flips_direction() {
        let mut sort = SortState::by(Column::Name, SortDirection::Asc);
        sort.toggle(Column::Name);
        assert_eq!(sort.direction_of(Column::Name), Some(SortDirection::Desc));
        sort.toggle(Column::Name);
        assert_eq!(sort.direction_of(Column::Name), Some(SortDirection::Asc));
    }

    #[test]
    fn other_column_resets_to_ascending() {
        let mut sort = SortState::by(Column::Name, SortDirection::Desc);
        sort.toggle(Column::Voice);
        assert_eq!(sort.field(), Some(Column::Voice));
        assert_eq!(sort.direction(), SortDirection::Asc);
        assert_eq!(sort.direction_of(Column::Name), None);
    }

    #[test]
    fn orders_serialise_a_single_token() {
        let sort = SortState::by(Column::Voice, SortDirection::Desc);
        let tokens: Vec<String> = sort.to_orders().iter().map(ToString::to_string).collect();
        assert_eq!(tokens, ["voice,desc"]);
        assert!(SortState::<Column>::default().to_orders().is_empty());
    }

    #[test]
    fn parse_matches_backend_names() {
        assert_eq!(Column::parse("voice"), Some(Column::Voice));
        assert_eq!(Column::parse("Voice"), None);
    }
}
