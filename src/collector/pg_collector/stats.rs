//! Statistics views (`pg_stat_database`, `pg_stat_user_tables`, ...) as a source.

use std::collections::BTreeMap;

use tracing::debug;

use super::queries::build_view_query;
use crate::collector::source::{Snapshot, Source, SourceError};
use crate::config::{QueryOptions, View};
use crate::connection::Connection;

/// Raw row of a statistics view, as text.
pub type StatRow = Vec<Option<String>>;

/// Source for the currently selected statistics view.
///
/// Rows are keyed by their first column. Column names and row order of the
/// last result are kept for the table header and for views shown as-is.
pub struct StatViewSource {
    view: View,
    min_age: String,
    columns: Vec<String>,
    order: Vec<String>,
}

impl StatViewSource {
    pub fn new(view: View, options: &QueryOptions) -> Self {
        Self {
            view,
            min_age: options.min_age().to_string(),
            columns: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switches to another view or query shape; headers are reset.
    pub fn configure(&mut self, view: View, options: &QueryOptions) {
        if view != self.view {
            self.columns.clear();
        }
        self.view = view;
        self.min_age = options.min_age().to_string();
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Row keys of the last sample, in the order the server returned them.
    pub fn row_order(&self) -> &[String] {
        &self.order
    }
}

impl Source<String, StatRow> for StatViewSource {
    fn name(&self) -> &str {
        self.view.title()
    }

    fn sample(&mut self, conn: &mut dyn Connection) -> Result<Snapshot<String, StatRow>, SourceError> {
        let query = build_view_query(self.view, conn.server_version_num(), &self.min_age);
        let result = conn.query(&query)?;

        if !result.columns.is_empty() {
            self.columns = result.columns;
        }
        self.order.clear();
        let mut entries = BTreeMap::new();
        for row in result.rows {
            let key = row.first().cloned().flatten().unwrap_or_default();
            self.order.push(key.clone());
            entries.insert(key, row);
        }

        debug!(view = %self.view, rows = entries.len(), "statistics sampled");
        Ok(Snapshot::new(entries, None))
    }
}
