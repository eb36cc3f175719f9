//! UI-agnostic view models.
//!
//! The scheduler builds a [`TableViewModel`] from diffed rows and the sort state
//! of the current view. The TUI then maps the view model to ratatui widgets.

use crate::config::{SortState, View};
use crate::models::{Cell, TableRow};

/// Widest a column is allowed to grow before its cells are truncated.
pub const MAX_COLUMN_WIDTH: usize = 48;

/// Table ready for display: headers, sorted rows and column widths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableViewModel {
    pub title: String,
    pub headers: Vec<String>,
    /// Display width of each column, in characters.
    pub widths: Vec<usize>,
    pub rows: Vec<TableRow>,
    /// Sorted column, `None` when the view is shown unsorted.
    pub sort_column: Option<usize>,
    pub descending: bool,
}

impl TableViewModel {
    /// Builds the model for `view`. Views without a sortable range keep the
    /// order the server returned.
    pub fn build(view: View, columns: &[String], mut rows: Vec<TableRow>, sort: SortState) -> Self {
        let sort_column = view
            .sort_range()
            .filter(|r| r.contains(&sort.column))
            .map(|_| sort.column);

        if let Some(col) = sort_column {
            rows.sort_by(|a, b| {
                let ord = cell_at(a, col).compare(cell_at(b, col));
                if sort.descending { ord.reverse() } else { ord }
            });
        }

        let widths = column_widths(columns, &rows);
        Self {
            title: view.title().to_string(),
            headers: columns.to_vec(),
            widths,
            rows,
            sort_column,
            descending: sort.descending,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header label with the sort marker appended to the sorted column.
    pub fn header_label(&self, idx: usize) -> String {
        let name = self.headers.get(idx).map(String::as_str).unwrap_or_default();
        match self.sort_column {
            Some(col) if col == idx => {
                format!("{}{}", name, if self.descending { "▼" } else { "▲" })
            }
            _ => name.to_string(),
        }
    }
}

fn cell_at(row: &TableRow, idx: usize) -> &Cell {
    static NULL: Cell = Cell::Null;
    row.get(idx).unwrap_or(&NULL)
}

/// Widest of header and cells, per column, capped at [`MAX_COLUMN_WIDTH`].
/// Header width includes one character for the sort marker.
fn column_widths(columns: &[String], rows: &[TableRow]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let cells = rows
                .iter()
                .map(|r| cell_at(r, i).to_string().chars().count())
                .max()
                .unwrap_or(0);
            (header.chars().count() + 1).max(cells).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn row(name: &str, rate: f64, size: &str) -> TableRow {
        vec![Cell::Text(name.to_string()), Cell::Rate(rate), Cell::Text(size.to_string())]
    }

    #[test]
    fn sorts_descending_by_selected_column() {
        let rows = vec![row("a", 1.0, "10"), row("b", 30.0, "2"), row("c", 5.0, "7")];
        let sort = SortState {
            column: 1,
            descending: true,
        };
        let model = TableViewModel::build(View::Indexes, &columns(&["index", "idx_scan", "size"]), rows, sort);

        let names: Vec<String> = model.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(names, ["b", "c", "a"]);
        assert_eq!(model.sort_column, Some(1));
        assert_eq!(model.header_label(1), "idx_scan▼");
        assert_eq!(model.header_label(0), "index");
        assert_eq!(model.title, "pg_stat_user_indexes");
    }

    #[test]
    fn numeric_text_sorts_numerically() {
        let rows = vec![row("a", 0.0, "10"), row("b", 0.0, "9"), row("c", 0.0, "100")];
        let sort = SortState {
            column: 2,
            descending: false,
        };
        let model = TableViewModel::build(View::Tables, &columns(&["relation", "seq_scan", "n_live_tup"]), rows, sort);
        let names: Vec<String> = model.rows.iter().map(|r| r[0].to_string()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn activity_keeps_server_order() {
        let rows = vec![row("z", 1.0, "1"), row("a", 2.0, "2")];
        let sort = SortState {
            column: 1,
            descending: true,
        };
        let model = TableViewModel::build(View::Activity, &columns(&["pid", "x", "y"]), rows, sort);
        assert_eq!(model.sort_column, None);
        assert_eq!(model.rows[0][0].to_string(), "z");
    }

    #[test]
    fn widths_fit_header_and_cells() {
        let long = "x".repeat(100);
        let rows = vec![row(&long, 12345.5, "7")];
        let sort = SortState {
            column: 1,
            descending: true,
        };
        let model = TableViewModel::build(View::Tables, &columns(&["relation", "seq_scan", "n"]), rows, sort);
        assert_eq!(model.widths, [MAX_COLUMN_WIDTH, 9, 2]);
    }

    #[test]
    fn short_rows_treat_missing_cells_as_null() {
        let rows = vec![vec![Cell::Text("a".into())], row("b", 1.0, "1")];
        let sort = SortState {
            column: 1,
            descending: true,
        };
        let model = TableViewModel::build(View::Tables, &columns(&["relation", "seq_scan", "n"]), rows, sort);
        assert_eq!(model.rows.len(), 2);
    }
}
