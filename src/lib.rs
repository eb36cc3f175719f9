//! pgtop - top-like live monitor for PostgreSQL and the host it runs on.
//!
//! The library is organised leaves first:
//! - `connection`: monitored-server handle (`Connection` trait, `PgConnection`)
//! - `collector`: counter sources (block devices, CPU, statistics views, sessions)
//! - `rates`: diff engine turning two snapshots into per-second metrics
//! - `signal`: session classification and cancel/terminate dispatch
//! - `scheduler`: sampling/render loop interleaved with operator commands
//! - `tui`: ratatui display sink and keyboard input thread

pub mod collector;
pub mod config;
pub mod connection;
pub mod fmt;
pub mod models;
pub mod rates;
pub mod scheduler;
pub mod signal;
pub mod tui;
pub mod view;
