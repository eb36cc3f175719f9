//! Runtime configuration shared by the scheduler and the session controller.
//!
//! A single [`Config`] value is owned by the scheduler and lent to whoever
//! needs it; nothing here is global.

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use thiserror::Error;

use crate::collector::pg_collector::queries;
use crate::signal::ProcMask;

/// Default clock ticks per second (`sysconf(_SC_CLK_TCK)` on Linux).
pub const DEFAULT_TICKS_PER_SECOND: f64 = 100.0;

/// Default refresh interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Errors raised when the operator supplies an invalid setting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid age '{0}', expected HH:MM:SS")]
    InvalidAge(String),
    #[error("unknown view '{0}'")]
    UnknownView(String),
}

/// Statistics view shown in the lower half of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum View {
    #[default]
    Databases,
    Tables,
    Indexes,
    Functions,
    Activity,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Databases,
        View::Tables,
        View::Indexes,
        View::Functions,
        View::Activity,
    ];

    /// Name of the statistics view the rows come from.
    pub fn title(self) -> &'static str {
        match self {
            View::Databases => "pg_stat_database",
            View::Tables => "pg_stat_user_tables",
            View::Indexes => "pg_stat_user_indexes",
            View::Functions => "pg_stat_user_functions",
            View::Activity => "pg_stat_activity",
        }
    }

    /// Columns holding counters; `None` for views shown without diffing.
    pub fn diff_range(self) -> Option<RangeInclusive<usize>> {
        queries::diff_range(self)
    }

    /// Columns the operator can sort by.
    pub fn sort_range(self) -> Option<RangeInclusive<usize>> {
        queries::sort_range(self)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl std::str::FromStr for View {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "databases" | "d" => Ok(View::Databases),
            "tables" | "t" => Ok(View::Tables),
            "indexes" | "i" => Ok(View::Indexes),
            "functions" | "f" => Ok(View::Functions),
            "activity" | "a" => Ok(View::Activity),
            other => Err(ConfigError::UnknownView(other.to_string())),
        }
    }
}

/// Sort column and direction of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub descending: bool,
}

impl SortState {
    fn for_view(view: View) -> Self {
        Self {
            column: view.sort_range().map(|r| *r.start()).unwrap_or(0),
            descending: view != View::Activity,
        }
    }
}

/// Options shaping the statistics queries.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOptions {
    /// Minimum transaction or query age, as typed (`HH:MM:SS`).
    min_age: String,
    min_age_secs: u64,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            min_age: "00:00:00".to_string(),
            min_age_secs: 0,
        }
    }
}

impl QueryOptions {
    pub fn min_age(&self) -> &str {
        &self.min_age
    }

    pub fn min_age_secs(&self) -> u64 {
        self.min_age_secs
    }

    /// Validates and stores a new minimum age.
    pub fn set_min_age(&mut self, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        self.min_age_secs = parse_age(value)?;
        self.min_age = value.to_string();
        Ok(())
    }
}

/// Parses `HH:MM:SS` into seconds. Hours may exceed 24; minutes and seconds
/// must be below 60.
pub fn parse_age(value: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidAge(value.to_string());
    let parts: Vec<&str> = value.split(':').collect();
    let [h, m, s] = parts.as_slice() else {
        return Err(invalid());
    };
    let field = |p: &str| -> Result<u64, ConfigError> {
        if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        p.parse().map_err(|_| invalid())
    };
    let (h, m, s) = (field(*h)?, field(*m)?, field(*s)?);
    if m >= 60 || s >= 60 {
        return Err(invalid());
    }
    h.checked_mul(3600)
        .and_then(|secs| secs.checked_add(m * 60 + s))
        .ok_or_else(invalid)
}

/// Everything the operator can change at runtime.
#[derive(Debug, Clone)]
pub struct Config {
    pub view: View,
    pub mask: ProcMask,
    pub query: QueryOptions,
    pub interval: Duration,
    pub ticks_per_second: f64,
    sort: HashMap<View, SortState>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            view: View::default(),
            mask: ProcMask::default(),
            query: QueryOptions::default(),
            interval: DEFAULT_INTERVAL,
            ticks_per_second: DEFAULT_TICKS_PER_SECOND,
            sort: View::ALL.iter().map(|v| (*v, SortState::for_view(*v))).collect(),
        }
    }
}

impl Config {
    pub fn sort(&self, view: View) -> SortState {
        self.sort
            .get(&view)
            .copied()
            .unwrap_or_else(|| SortState::for_view(view))
    }

    /// Moves the sort column of the current view one step, wrapping around
    /// its sortable range. Returns false when the view cannot be sorted.
    pub fn shift_sort(&mut self, forward: bool) -> bool {
        let Some(range) = self.view.sort_range() else {
            return false;
        };
        let (min, max) = (*range.start(), *range.end());
        let mut state = self.sort(self.view);
        state.column = if forward {
            if state.column + 1 > max { min } else { state.column + 1 }
        } else if state.column <= min {
            max
        } else {
            state.column - 1
        };
        self.sort.insert(self.view, state);
        true
    }
}
