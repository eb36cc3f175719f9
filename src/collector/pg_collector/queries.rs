//! SQL query builders for PostgreSQL statistics views and the helper schema.
//!
//! Column order matters: the first column is the row key and the counter
//! columns must stay inside the ranges returned by [`diff_range`].

use std::ops::RangeInclusive;

use crate::config::View;

/// Probe for the helper schema exposing OS counters of a remote host.
pub(super) const HELPER_SCHEMA_QUERY: &str =
    "SELECT EXISTS (SELECT 1 FROM pg_namespace WHERE nspname = 'pgcenter')";

pub(super) const REMOTE_UPTIME_QUERY: &str = "SELECT * FROM pgcenter.sys_proc_uptime";
pub(super) const REMOTE_DISKSTATS_QUERY: &str = "SELECT * FROM pgcenter.sys_proc_diskstats";
pub(super) const REMOTE_CPUSTAT_QUERY: &str = "SELECT * FROM pgcenter.sys_proc_stat";

pub(crate) const BACKEND_PID_QUERY: &str = "SELECT pg_backend_pid()";

/// Wait column: `wait_event_type` on 9.6+, the boolean `waiting` before.
fn wait_expr(server_version_num: i32) -> &'static str {
    if server_version_num >= 90600 {
        "COALESCE(wait_event_type, '')"
    } else {
        "CASE WHEN waiting THEN 'Lock' ELSE '' END"
    }
}

/// Restricts pg_stat_activity to client sessions where the server can tell.
fn client_backend_filter(server_version_num: i32) -> &'static str {
    if server_version_num >= 100000 {
        "AND backend_type = 'client backend'"
    } else {
        ""
    }
}

/// Quotes a literal for inclusion in a query.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

pub(crate) fn build_stat_database_query() -> String {
    r#"
        SELECT
            datname,
            numbackends AS backends,
            xact_commit AS commits,
            xact_rollback AS rollbacks,
            blks_read AS reads,
            blks_hit AS hits,
            tup_returned AS returned,
            tup_fetched AS fetched,
            tup_inserted AS inserts,
            tup_updated AS updates,
            tup_deleted AS deletes,
            conflicts,
            deadlocks,
            temp_files,
            temp_bytes
        FROM pg_stat_database
        WHERE datname IS NOT NULL
    "#
    .to_string()
}

pub(crate) fn build_stat_user_tables_query() -> String {
    r#"
        SELECT
            schemaname || '.' || relname AS relation,
            seq_scan,
            seq_tup_read,
            COALESCE(idx_scan, 0) AS idx_scan,
            COALESCE(idx_tup_fetch, 0) AS idx_tup_fetch,
            n_tup_ins AS inserts,
            n_tup_upd AS updates,
            n_tup_del AS deletes,
            n_tup_hot_upd AS hot_updates,
            n_live_tup AS live,
            n_dead_tup AS dead
        FROM pg_stat_user_tables
    "#
    .to_string()
}

pub(crate) fn build_stat_user_indexes_query() -> String {
    r#"
        SELECT
            s.schemaname || '.' || s.relname || '.' || s.indexrelname AS index,
            s.idx_scan,
            s.idx_tup_read,
            s.idx_tup_fetch,
            i.idx_blks_read AS blks_read,
            i.idx_blks_hit AS blks_hit,
            pg_size_pretty(pg_relation_size(s.indexrelid)) AS size
        FROM pg_stat_user_indexes s
        JOIN pg_statio_user_indexes i ON i.indexrelid = s.indexrelid
    "#
    .to_string()
}

pub(crate) fn build_stat_user_functions_query() -> String {
    r#"
        SELECT
            schemaname || '.' || funcname || '(' || funcid || ')' AS function,
            calls,
            round(total_time::numeric, 2) AS total_ms,
            round(self_time::numeric, 2) AS self_ms,
            round((total_time / greatest(calls, 1))::numeric, 2) AS avg_ms
        FROM pg_stat_user_functions
    "#
    .to_string()
}

/// Long-running sessions: transaction or query older than `min_age`.
pub(crate) fn build_stat_activity_query(server_version_num: i32, min_age: &str) -> String {
    let wait = wait_expr(server_version_num);
    let filter = client_backend_filter(server_version_num);
    let age = quote_literal(min_age);

    format!(
        r#"
            SELECT
                pid,
                COALESCE(client_addr::text, 'local') AS cl_addr,
                usename AS user,
                datname AS database,
                to_char(clock_timestamp() - xact_start, 'HH24:MI:SS') AS xact_age,
                to_char(clock_timestamp() - query_start, 'HH24:MI:SS') AS query_age,
                {wait} AS waiting,
                COALESCE(state, '') AS state,
                regexp_replace(COALESCE(query, ''), '\s+', ' ', 'g') AS query
            FROM pg_stat_activity
            WHERE pid <> pg_backend_pid() {filter}
              AND ((clock_timestamp() - xact_start) > {age}::interval
                   OR (clock_timestamp() - query_start) > {age}::interval)
        "#
    )
}

/// Every session with the fields classification and age filtering need.
pub(crate) fn build_sessions_query(server_version_num: i32) -> String {
    let wait = wait_expr(server_version_num);
    let filter = client_backend_filter(server_version_num);

    format!(
        r#"
            SELECT
                pid,
                COALESCE(state, '') AS state,
                {wait} AS wait_event_type,
                COALESCE(usename::text, '') AS usename,
                COALESCE(datname::text, '') AS datname,
                EXTRACT(EPOCH FROM clock_timestamp() - xact_start) AS xact_age,
                EXTRACT(EPOCH FROM clock_timestamp() - query_start) AS query_age,
                COALESCE(query, '') AS query
            FROM pg_stat_activity
            WHERE true {filter}
        "#
    )
}

/// Query for a view; the activity view is shaped by `min_age`.
pub(crate) fn build_view_query(view: View, server_version_num: i32, min_age: &str) -> String {
    match view {
        View::Databases => build_stat_database_query(),
        View::Tables => build_stat_user_tables_query(),
        View::Indexes => build_stat_user_indexes_query(),
        View::Functions => build_stat_user_functions_query(),
        View::Activity => build_stat_activity_query(server_version_num, min_age),
    }
}

/// Counter columns of each view's query.
pub(crate) fn diff_range(view: View) -> Option<RangeInclusive<usize>> {
    match view {
        View::Databases => Some(2..=14),
        View::Tables => Some(1..=8),
        View::Indexes => Some(1..=5),
        View::Functions => Some(1..=1),
        View::Activity => None,
    }
}

/// Columns of each view's query the operator may sort by.
pub(crate) fn sort_range(view: View) -> Option<RangeInclusive<usize>> {
    match view {
        View::Databases => Some(1..=14),
        View::Tables => Some(1..=10),
        View::Indexes => Some(1..=5),
        View::Functions => Some(1..=4),
        View::Activity => None,
    }
}
