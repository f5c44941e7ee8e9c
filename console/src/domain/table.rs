//! Declarative table model rendered by the HTML views.
//!
//! A [`Table`] is an ordered list of [`Column`]s, each with a required
//! accessor. Rendering never reorders rows; sorting is the backend's job and
//! the active [`SortState`] only decides which header carries a marker.

use pagination::SortDirection;

use crate::domain::listing::{SortField, SortState};

/// Text of the single row shown when there is no data.
pub const EMPTY_MESSAGE: &str = "No hay datos para los filtros actuales.";

/// How a row action is triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStyle {
    /// A form post.
    Post,
    /// A form post for a destructive action.
    Danger,
}

/// A button inside an actions cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAction {
    pub label: String,
    pub target: String,
    pub style: ActionStyle,
}

impl RowAction {
    pub fn post(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            style: ActionStyle::Post,
        }
    }

    pub fn danger(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            style: ActionStyle::Danger,
        }
    }
}

/// Content produced by a column accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Actions(Vec<RowAction>),
}

type Accessor<R> = Box<dyn Fn(&R) -> Cell + Send + Sync>;

/// One column definition.
pub struct Column<R, F> {
    key: &'static str,
    header: &'static str,
    sort_field: Option<F>,
    width: Option<&'static str>,
    accessor: Accessor<R>,
}

impl<R, F: SortField> Column<R, F> {
    /// A text column.
    pub fn text(
        key: &'static str,
        header: &'static str,
        accessor: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            header,
            sort_field: None,
            width: None,
            accessor: Box::new(move |row| Cell::Text(accessor(row))),
        }
    }

    /// A column of row action buttons.
    pub fn actions(
        key: &'static str,
        header: &'static str,
        accessor: impl Fn(&R) -> Vec<RowAction> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            header,
            sort_field: None,
            width: None,
            accessor: Box::new(move |row| Cell::Actions(accessor(row))),
        }
    }

    /// Make the column sortable by `field`.
    #[must_use]
    pub fn sortable(mut self, field: F) -> Self {
        self.sort_field = Some(field);
        self
    }

    /// Fix the column width (any CSS length).
    #[must_use]
    pub const fn width(mut self, width: &'static str) -> Self {
        self.width = Some(width);
        self
    }
}

/// A rendered header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell<F> {
    pub key: &'static str,
    pub label: &'static str,
    pub width: Option<&'static str>,
    /// Set only when the column is sortable and a sort state was supplied.
    pub sort_field: Option<F>,
    /// ` ▲`, ` ▼` or empty.
    pub marker: &'static str,
}

/// Rendered table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// No rows: one cell spanning every column.
    Empty { colspan: usize, message: &'static str },
    Rows(Vec<Vec<Cell>>),
}

/// A fully rendered table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView<F> {
    pub headers: Vec<HeaderCell<F>>,
    pub body: TableBody,
}

/// An ordered set of columns.
pub struct Table<R, F> {
    columns: Vec<Column<R, F>>,
}

const fn marker(direction: Option<SortDirection>) -> &'static str {
    match direction {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => "",
    }
}

impl<R, F: SortField> Table<R, F> {
    #[must_use]
    pub const fn new(columns: Vec<Column<R, F>>) -> Self {
        Self { columns }
    }

    /// Render `rows` in order. Headers are clickable only when `sort` is
    /// supplied.
    pub fn render(&self, rows: &[R], sort: Option<&SortState<F>>) -> TableView<F> {
        let headers = self
            .columns
            .iter()
            .map(|column| {
                let sort_field = column.sort_field.filter(|_| sort.is_some());
                let direction = sort_field
                    .zip(sort)
                    .and_then(|(field, state)| state.direction_of(field));
                HeaderCell {
                    key: column.key,
                    label: column.header,
                    width: column.width,
                    sort_field,
                    marker: marker(direction),
                }
            })
            .collect();
        let body = if rows.is_empty() {
            TableBody::Empty {
                colspan: self.columns.len().max(1),
                message: EMPTY_MESSAGE,
            }
        } else {
            TableBody::Rows(
                rows.iter()
                    .map(|row| self.columns.iter().map(|c| (c.accessor)(row)).collect())
                    .collect(),
            )
        };
        TableView { headers, body }
    }
}
